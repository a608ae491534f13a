//! Justified rows.

use smallvec::SmallVec;

use crate::{Item, ItemId};

/// Inline capacity of a row; a threshold of 5 with typical photo ratios
/// packs three to six items.
pub(crate) const INLINE_ROW_ITEMS: usize = 8;

/// A horizontal run of items scaled to share one height.
///
/// A row is *complete* when its aggregate aspect ratio reached the tiling
/// threshold. Only the final row of a finished stream may be incomplete.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    items: SmallVec<[Item; INLINE_ROW_ITEMS]>,
    aspect_ratio: f32,
    complete: bool,
}

impl Row {
    pub(crate) fn new(items: SmallVec<[Item; INLINE_ROW_ITEMS]>, complete: bool) -> Self {
        debug_assert!(!items.is_empty(), "rows are never empty");
        let aspect_ratio = items.iter().map(Item::aspect_ratio).sum();
        Self {
            items,
            aspect_ratio,
            complete,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn ids(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.items.iter().map(Item::id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of the member items' aspect ratios.
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
