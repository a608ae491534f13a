//! Signals delivered to a gallery.

use std::fmt;

use mosaic_layout::SectionIndex;

use crate::{FetchError, FetchTicket, Page, RootId};

/// Everything that can happen to a gallery from the outside.
///
/// Events are processed one at a time, in delivery order, by
/// [`Gallery::handle`](crate::Gallery::handle).
pub enum GalleryEvent<K> {
    /// A fetch started through [`GalleryHost::begin_fetch`](crate::GalleryHost::begin_fetch) finished.
    PageLoaded {
        ticket: FetchTicket,
        result: Result<Page<K>, FetchError>,
    },

    /// An observed section's intersection with the viewport changed.
    Intersection(IntersectionEntry),

    /// The host container was resized.
    Resize { width: f32 },

    /// Paint tick requested through [`GalleryHost::request_frame`](crate::GalleryHost::request_frame).
    Frame,
}

impl<K: fmt::Debug> fmt::Debug for GalleryEvent<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageLoaded { ticket, result } => f
                .debug_struct("PageLoaded")
                .field("ticket", ticket)
                .field(
                    "result",
                    &result.as_ref().map(|page| page.items.len()).map_err(|err| err.to_string()),
                )
                .finish(),
            Self::Intersection(entry) => f.debug_tuple("Intersection").field(entry).finish(),
            Self::Resize { width } => f.debug_struct("Resize").field("width", width).finish(),
            Self::Frame => f.write_str("Frame"),
        }
    }
}

/// One intersection observation of a section placeholder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    pub root: RootId,
    pub section: SectionIndex,

    /// Visible fraction of the section, `0.0` when fully outside.
    pub ratio: f32,
}

impl IntersectionEntry {
    pub fn is_intersecting(&self) -> bool {
        self.ratio > 0.0
    }
}
