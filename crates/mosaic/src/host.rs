//! Contract between a gallery and the surface embedding it.
//!
//! The gallery never touches real mount points, observers or the network.
//! It describes what should happen through [`GalleryHost`] and learns about
//! the outside world through [`GalleryEvent`](crate::GalleryEvent)s.

use std::fmt;

use log::error;
use mosaic_layout::{Item, ItemId, Rect, Section, SectionIndex};

use crate::GalleryError;

/// Identity of a mount root. Every reset mounts a fresh root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RootId(pub(crate) u64);

impl RootId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RootId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "root-{}", self.0)
    }
}

/// Identity of one fetch: the gallery lifetime it belongs to plus a
/// sequence number within that lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub(crate) lifetime: u64,
    pub(crate) sequence: u64,
}

impl FetchTicket {
    pub fn lifetime(self) -> u64 {
        self.lifetime
    }

    pub fn sequence(self) -> u64 {
        self.sequence
    }
}

/// A fetch the host must perform. The result goes back to the gallery as
/// [`GalleryEvent::PageLoaded`](crate::GalleryEvent::PageLoaded) carrying the
/// same ticket.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchRequest<K> {
    pub ticket: FetchTicket,
    pub key: K,
}

/// One page of fetched items.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<K> {
    pub items: Vec<Item>,

    /// Where to fetch next; `None` ends the stream.
    pub next_request_key: Option<K>,
}

impl<K> Page<K> {
    pub fn new(items: Vec<Item>, next_request_key: Option<K>) -> Self {
        Self {
            items,
            next_request_key,
        }
    }

    /// The final page of a stream.
    pub fn last(items: Vec<Item>) -> Self {
        Self::new(items, None)
    }
}

/// Size of the host container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Where an item is rendered: a tile of a mounted section.
///
/// `frame` is relative to the section's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MountPoint {
    pub root: RootId,
    pub section: SectionIndex,
    pub frame: Rect,
}

/// Per-item render callback.
///
/// Called once per item when its section first becomes visible, and again
/// for visible items whenever a new callback is installed with
/// [`Gallery::update_items`](crate::Gallery::update_items).
pub type ItemRenderer = Box<dyn FnMut(&ItemId, &MountPoint)>;

/// Side effects a gallery asks of its embedding surface.
///
/// All methods are called synchronously from within gallery operations.
/// Implementations must not call back into the gallery; report signals by
/// delivering events afterwards instead.
pub trait GalleryHost<K> {
    /// Starts fetching `request.key`. Exactly one fetch per gallery lifetime
    /// is outstanding at a time.
    fn begin_fetch(&mut self, request: FetchRequest<K>);

    /// Asks for a [`GalleryEvent::Frame`](crate::GalleryEvent::Frame) on the
    /// next paint tick. Repeated requests before that tick may be merged.
    fn request_frame(&mut self);

    /// A fresh, empty mount root replaces the previous one.
    fn mount_root(&mut self, root: RootId);

    /// Mounts a placeholder for a newly created section.
    fn mount_section(&mut self, root: RootId, section: &Section);

    /// A mounted section moved or changed size after a resize.
    fn place_section(&mut self, section: &Section) {
        let _ = section;
    }

    /// Total height of all sections under `root`.
    fn set_content_height(&mut self, root: RootId, height: f32);

    /// Starts reporting intersection changes of a section's placeholder.
    fn observe_section(&mut self, root: RootId, section: SectionIndex);

    /// Stops all intersection reporting for the current root.
    fn disconnect_sections(&mut self);

    /// The section entered the viewport.
    fn show_section(&mut self, section: &Section) {
        let _ = section;
    }

    /// The section left the viewport; its rendered content may be released.
    fn hide_section(&mut self, section: &Section) {
        let _ = section;
    }

    /// Brings a section back into view after repositioning.
    fn scroll_to_section(&mut self, section: &Section) {
        let _ = section;
    }

    /// A recoverable failure occurred.
    fn report_error(&mut self, error: GalleryError) {
        error!("gallery error: {error}");
    }
}
