//! Gallery items and their identifiers.

use std::fmt;
use std::rc::Rc;

use crate::LayoutError;

/// Identifier of a gallery item.
///
/// Ids are handed to the render callback many times over a gallery's life,
/// so the string is shared rather than copied.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Rc<str>);

impl ItemId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Rc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(Rc::from(id))
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ItemId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// A fetched item: an id plus its intrinsic width / height ratio.
///
/// Items are immutable once built. The aspect ratio is validated on
/// construction, so every `Item` in the system has a finite, positive ratio.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    id: ItemId,
    aspect_ratio: f32,
}

impl Item {
    /// Creates an item, rejecting ratios that are not finite and positive.
    pub fn new(id: impl Into<ItemId>, aspect_ratio: f32) -> Result<Self, LayoutError> {
        let id = id.into();
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return Err(LayoutError::InvalidAspectRatio {
                id: id.to_string(),
                aspect_ratio,
            });
        }
        Ok(Self { id, aspect_ratio })
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
}
