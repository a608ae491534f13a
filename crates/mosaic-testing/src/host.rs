use std::collections::VecDeque;

use mosaic::{FetchRequest, GalleryError, GalleryHost, RootId, Section, SectionIndex};

/// One side effect requested by a gallery.
#[derive(Clone, Debug, PartialEq)]
pub enum HostCall<K> {
    BeginFetch(FetchRequest<K>),
    RequestFrame,
    MountRoot(RootId),
    MountSection { root: RootId, section: SectionIndex, top: f32, height: f32 },
    PlaceSection { section: SectionIndex, top: f32, height: f32 },
    SetContentHeight { root: RootId, height: f32 },
    ObserveSection { root: RootId, section: SectionIndex },
    DisconnectSections,
    ShowSection(SectionIndex),
    HideSection(SectionIndex),
    ScrollToSection(SectionIndex),
    ReportError(String),
}

/// A [`GalleryHost`] that performs nothing and remembers everything.
///
/// Fetches are queued instead of started; tests pop them with
/// [`next_fetch`](Self::next_fetch) and deliver whatever result they need.
#[derive(Debug)]
pub struct RecordingHost<K> {
    calls: Vec<HostCall<K>>,
    pending: VecDeque<FetchRequest<K>>,
    frame_requested: bool,
    root: Option<RootId>,
    content_height: f32,
    errors: Vec<String>,
}

impl<K> Default for RecordingHost<K> {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            pending: VecDeque::new(),
            frame_requested: false,
            root: None,
            content_height: 0.0,
            errors: Vec::new(),
        }
    }
}

impl<K> RecordingHost<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[HostCall<K>] {
        &self.calls
    }

    /// Drains the call log.
    pub fn take_calls(&mut self) -> Vec<HostCall<K>> {
        std::mem::take(&mut self.calls)
    }

    pub fn pending_fetches(&self) -> usize {
        self.pending.len()
    }

    /// Oldest fetch not yet answered.
    pub fn next_fetch(&mut self) -> Option<FetchRequest<K>> {
        self.pending.pop_front()
    }

    pub fn peek_fetch(&self) -> Option<&FetchRequest<K>> {
        self.pending.front()
    }

    pub fn is_frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Clears and returns the frame request flag, like a paint tick would.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    /// The root most recently mounted.
    pub fn root(&self) -> Option<RootId> {
        self.root
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn frame_requests(&self) -> usize {
        self.calls.iter().filter(|call| matches!(call, HostCall::RequestFrame)).count()
    }

    pub fn fetch_count(&self) -> usize {
        self.calls.iter().filter(|call| matches!(call, HostCall::BeginFetch(_))).count()
    }

    /// Sections mounted under `root`, in mount order.
    pub fn mounted_sections(&self, root: RootId) -> Vec<SectionIndex> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::MountSection { root: r, section, .. } if *r == root => Some(*section),
                _ => None,
            })
            .collect()
    }

    pub fn observed_sections(&self, root: RootId) -> Vec<SectionIndex> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::ObserveSection { root: r, section } if *r == root => Some(*section),
                _ => None,
            })
            .collect()
    }

    /// The section most recently scrolled into view.
    pub fn last_scroll_target(&self) -> Option<SectionIndex> {
        self.calls.iter().rev().find_map(|call| match call {
            HostCall::ScrollToSection(section) => Some(*section),
            _ => None,
        })
    }
}

impl<K: Clone> GalleryHost<K> for RecordingHost<K> {
    fn begin_fetch(&mut self, request: FetchRequest<K>) {
        self.calls.push(HostCall::BeginFetch(request.clone()));
        self.pending.push_back(request);
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
        self.calls.push(HostCall::RequestFrame);
    }

    fn mount_root(&mut self, root: RootId) {
        self.root = Some(root);
        self.content_height = 0.0;
        self.calls.push(HostCall::MountRoot(root));
    }

    fn mount_section(&mut self, root: RootId, section: &Section) {
        self.calls.push(HostCall::MountSection {
            root,
            section: section.index(),
            top: section.top(),
            height: section.height(),
        });
    }

    fn place_section(&mut self, section: &Section) {
        self.calls.push(HostCall::PlaceSection {
            section: section.index(),
            top: section.top(),
            height: section.height(),
        });
    }

    fn set_content_height(&mut self, root: RootId, height: f32) {
        if self.root == Some(root) {
            self.content_height = height;
        }
        self.calls.push(HostCall::SetContentHeight { root, height });
    }

    fn observe_section(&mut self, root: RootId, section: SectionIndex) {
        self.calls.push(HostCall::ObserveSection { root, section });
    }

    fn disconnect_sections(&mut self) {
        self.calls.push(HostCall::DisconnectSections);
    }

    fn show_section(&mut self, section: &Section) {
        self.calls.push(HostCall::ShowSection(section.index()));
    }

    fn hide_section(&mut self, section: &Section) {
        self.calls.push(HostCall::HideSection(section.index()));
    }

    fn scroll_to_section(&mut self, section: &Section) {
        self.calls.push(HostCall::ScrollToSection(section.index()));
    }

    fn report_error(&mut self, error: GalleryError) {
        let message = error.to_string();
        self.errors.push(message.clone());
        self.calls.push(HostCall::ReportError(message));
    }
}
