//! The single mutable aggregate behind a gallery.

use std::collections::BTreeSet;

use mosaic_layout::collections::map::HashSet;
use mosaic_layout::{Item, Row, Section, SectionIndex};

use crate::{FetchTicket, Page, RootId};

/// Counters describing what a gallery has done so far.
///
/// Stats accumulate across resets. Used for testing and debugging pagination
/// and windowing behaviour.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GalleryStats {
    /// Fetches handed to the host.
    pub fetches_started: usize,

    /// Pages packed into sections.
    pub pages_applied: usize,

    /// Results dropped because their fetch belonged to an older lifetime.
    pub pages_discarded: usize,

    /// Fetches that resolved with an error.
    pub fetch_failures: usize,

    /// Section placeholders mounted.
    pub sections_mounted: usize,

    /// Calls made to the render callback.
    pub items_rendered: usize,
}

/// Pagination state. `Fetching` holds the outstanding ticket and the key it
/// was issued for, so a second concurrent fetch cannot be represented.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum FetchState<K> {
    Idle,
    Fetching { ticket: FetchTicket, key: K },
}

/// Everything a gallery lifetime owns. Replaced wholesale on reset.
#[derive(Debug)]
pub(crate) struct State<K> {
    pub(crate) lifetime: u64,
    pub(crate) root: RootId,
    pub(crate) fetch: FetchState<K>,
    next_sequence: u64,

    /// Where to fetch next; `None` once the stream has ended.
    pub(crate) request_key: Option<K>,

    /// Items of the open row from the previous page.
    pub(crate) item_remainder: Vec<Item>,

    /// Rows of the short section from the previous page.
    pub(crate) row_remainder: Vec<Row>,

    pub(crate) sections: Vec<Section>,
    pub(crate) shown: BTreeSet<SectionIndex>,

    /// Sections whose items reached the render callback this lifetime.
    pub(crate) clean: HashSet<SectionIndex>,
    pub(crate) active_section: SectionIndex,

    pub(crate) width: f32,
    pub(crate) container_height: f32,

    /// Bottom of the last section.
    pub(crate) height: f32,

    /// A page that resolved before the gallery knew its width.
    pub(crate) deferred_page: Option<Page<K>>,
}

impl<K> State<K> {
    pub(crate) fn new(lifetime: u64, request_key: K) -> Self {
        Self {
            lifetime,
            root: RootId(lifetime),
            fetch: FetchState::Idle,
            next_sequence: 0,
            request_key: Some(request_key),
            item_remainder: Vec::new(),
            row_remainder: Vec::new(),
            sections: Vec::new(),
            shown: BTreeSet::new(),
            clean: HashSet::default(),
            active_section: SectionIndex::new(0),
            width: 0.0,
            container_height: 0.0,
            height: 0.0,
            deferred_page: None,
        }
    }

    pub(crate) fn next_ticket(&mut self) -> FetchTicket {
        let ticket = FetchTicket {
            lifetime: self.lifetime,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        ticket
    }

    pub(crate) fn is_fetching(&self) -> bool {
        matches!(self.fetch, FetchState::Fetching { .. })
    }

    pub(crate) fn is_outstanding(&self, ticket: FetchTicket) -> bool {
        matches!(&self.fetch, FetchState::Fetching { ticket: current, .. } if *current == ticket)
    }
}
