use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use mosaic::{
    Bounds, FetchError, FetchRequest, FetchTicket, Gallery, GalleryConfig, GalleryEvent, ItemId, ItemRenderer,
    Page, Rect, SectionIndex, Viewport,
};

use crate::RecordingHost;

/// One call the gallery made to its render callback.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedItem {
    pub id: ItemId,
    pub section: SectionIndex,
    pub frame: Rect,

    /// Which callback rendered it: 0 for the initial one, bumped by every
    /// [`GalleryTestRule::update_items`].
    pub generation: usize,
}

type RenderLog = Rc<RefCell<Vec<RenderedItem>>>;

/// Drives a gallery the way an embedding surface would, without one.
///
/// ```rust
/// use mosaic::GalleryConfig;
/// use mosaic_testing::prelude::*;
///
/// let mut rule = GalleryTestRule::new(GalleryConfig::new(0u32));
/// rule.attach(300.0, 200.0);
/// rule.respond(square_page("a", 30, None));
/// rule.scroll_to(0.0);
/// assert!(!rule.rendered().is_empty());
/// ```
pub struct GalleryTestRule<K> {
    gallery: Gallery<K>,
    host: RecordingHost<K>,
    viewport: Viewport,
    rendered: RenderLog,
    generation: usize,
}

impl<K: Clone + fmt::Debug> GalleryTestRule<K> {
    pub fn new(config: GalleryConfig<K>) -> Self {
        let rendered = RenderLog::default();
        let mut host = RecordingHost::new();
        let gallery = Gallery::new(config, recorder(&rendered, 0), &mut host);
        Self {
            gallery,
            host,
            viewport: Viewport::default(),
            rendered,
            generation: 0,
        }
    }

    /// Attaches to a container and sizes the viewport to match.
    pub fn attach(&mut self, width: f32, height: f32) {
        self.viewport.set_height(height);
        self.gallery.attach(Bounds::new(width, height), &mut self.host);
    }

    /// Answers the oldest pending fetch with `page`.
    ///
    /// # Panics
    /// If no fetch is pending.
    pub fn respond(&mut self, page: Page<K>) -> FetchRequest<K> {
        let request = self.expect_fetch();
        self.deliver(request.ticket, Ok(page));
        request
    }

    /// Fails the oldest pending fetch.
    ///
    /// # Panics
    /// If no fetch is pending.
    pub fn fail(&mut self, message: &str) -> FetchRequest<K> {
        let request = self.expect_fetch();
        self.deliver(request.ticket, Err(message.to_owned().into()));
        request
    }

    /// Delivers a fetch result for any ticket, stale or not.
    pub fn deliver(&mut self, ticket: FetchTicket, result: Result<Page<K>, FetchError>) {
        self.handle(GalleryEvent::PageLoaded { ticket, result });
    }

    /// Removes the oldest pending fetch without answering it.
    ///
    /// # Panics
    /// If no fetch is pending.
    pub fn expect_fetch(&mut self) -> FetchRequest<K> {
        match self.host.next_fetch() {
            Some(request) => request,
            None => panic!("no fetch pending; gallery: {:?}", self.gallery),
        }
    }

    /// Scrolls the viewport and delivers the resulting intersection changes.
    /// Returns the number of entries delivered.
    pub fn scroll_to(&mut self, scroll_top: f32) -> usize {
        let entries = self
            .viewport
            .update(self.gallery.root(), self.gallery.sections(), scroll_top);
        let count = entries.len();
        for entry in entries {
            self.handle(GalleryEvent::Intersection(entry));
        }
        count
    }

    /// Re-evaluates intersections at the current scroll offset, e.g. after
    /// new sections were mounted under the viewport.
    pub fn refresh_viewport(&mut self) -> usize {
        self.scroll_to(self.viewport.scroll_top())
    }

    /// Delivers a container resize signal.
    pub fn resize(&mut self, width: f32) {
        self.handle(GalleryEvent::Resize { width });
    }

    /// Runs a paint tick if one was requested. Returns whether it ran.
    pub fn advance_frame(&mut self) -> bool {
        if !self.host.take_frame_request() {
            return false;
        }
        self.handle(GalleryEvent::Frame);
        true
    }

    /// Installs a new recording callback; takes effect on the next frame.
    pub fn update_items(&mut self) {
        self.generation += 1;
        let updater = recorder(&self.rendered, self.generation);
        self.gallery.update_items(updater, &mut self.host);
    }

    /// Returns whether a fetch was started.
    pub fn load_more(&mut self) -> bool {
        self.gallery.load_more(&mut self.host)
    }

    pub fn reset(&mut self) {
        self.gallery.reset(&mut self.host);
    }

    pub fn handle(&mut self, event: GalleryEvent<K>) {
        self.gallery.handle(event, &mut self.host);
    }

    pub fn gallery(&self) -> &Gallery<K> {
        &self.gallery
    }

    pub fn gallery_mut(&mut self) -> &mut Gallery<K> {
        &mut self.gallery
    }

    pub fn host(&self) -> &RecordingHost<K> {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut RecordingHost<K> {
        &mut self.host
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Everything rendered so far, in call order.
    pub fn rendered(&self) -> Vec<RenderedItem> {
        self.rendered.borrow().clone()
    }

    pub fn rendered_ids(&self) -> Vec<String> {
        self.rendered.borrow().iter().map(|item| item.id.to_string()).collect()
    }

    pub fn clear_rendered(&mut self) {
        self.rendered.borrow_mut().clear();
    }
}

fn recorder(log: &RenderLog, generation: usize) -> ItemRenderer {
    let log = Rc::clone(log);
    Box::new(move |id, mount| {
        log.borrow_mut().push(RenderedItem {
            id: id.clone(),
            section: mount.section,
            frame: mount.frame,
            generation,
        });
    })
}
