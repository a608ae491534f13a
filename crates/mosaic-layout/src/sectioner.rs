//! Grouping rows into fixed-capacity sections.

use std::num::NonZeroUsize;

use crate::Row;

/// Result of chunking rows into sections.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sectioning {
    /// Row runs ready to become sections, in order.
    pub chunks: Vec<Vec<Row>>,

    /// Rows of a short trailing chunk withheld until more data arrives.
    pub row_remainder: Vec<Row>,
}

impl Sectioning {
    /// True when rows were produced but none could be emitted yet; the
    /// caller has to fetch again rather than wait for a viewport event.
    pub fn is_starved(&self) -> bool {
        self.chunks.is_empty() && !self.row_remainder.is_empty()
    }
}

/// Splits `held_back ++ rows` into chunks of `capacity` rows.
///
/// If `more_follows` and the last chunk is short, it is withheld as the new
/// row remainder. Without further data the short chunk becomes the final
/// section.
pub fn chunk_rows(
    held_back: Vec<Row>,
    rows: Vec<Row>,
    capacity: NonZeroUsize,
    more_follows: bool,
) -> Sectioning {
    let capacity = capacity.get();
    let mut all = held_back;
    all.extend(rows);

    let mut chunks = Vec::with_capacity(all.len().div_ceil(capacity));
    let mut rows = all.into_iter().peekable();
    while rows.peek().is_some() {
        chunks.push(rows.by_ref().take(capacity).collect::<Vec<_>>());
    }

    let short_tail = chunks.last().is_some_and(|last| last.len() < capacity);
    let row_remainder = if more_follows && short_tail {
        chunks.pop().unwrap_or_default()
    } else {
        Vec::new()
    };

    Sectioning {
        chunks,
        row_remainder,
    }
}
