//! Single-threaded async event loop around a [`Gallery`].
//!
//! The driver spawns fetches on a local executor and feeds their results,
//! together with any signal the surface posts, back into the gallery in
//! arrival order. It is a convenience for hosts whose fetcher is a future;
//! hosts with their own event loop can drive a [`Gallery`] directly.

use std::fmt;
use std::future::Future;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::{FutureExt, LocalBoxFuture};
use futures::stream::StreamExt;
use futures::task::LocalSpawnExt;
use log::{debug, trace, warn};
use mosaic_layout::{LayoutError, LayoutOptionsUpdate, Section, SectionIndex};
use web_time::Instant;

use crate::{
    Bounds, FetchError, FetchRequest, Gallery, GalleryConfig, GalleryError, GalleryEvent, GalleryHost,
    ItemRenderer, Page, RootId,
};

/// Produces pages for request keys.
///
/// Implemented for every `FnMut(K) -> impl Future<Output = Result<Page<K>, FetchError>>`.
pub trait Fetcher<K> {
    fn fetch(&mut self, key: K) -> LocalBoxFuture<'static, Result<Page<K>, FetchError>>;
}

impl<K, F, Fut> Fetcher<K> for F
where
    F: FnMut(K) -> Fut,
    Fut: Future<Output = Result<Page<K>, FetchError>> + 'static,
{
    fn fetch(&mut self, key: K) -> LocalBoxFuture<'static, Result<Page<K>, FetchError>> {
        self(key).boxed_local()
    }
}

/// Owns a gallery, its fetcher and its surface, and runs fetches to
/// completion on a [`LocalPool`].
///
/// The surface still receives [`GalleryHost::begin_fetch`] for every fetch
/// the driver spawns, as a notification; it must not start a fetch itself.
pub struct Driver<K, F, H> {
    gallery: Gallery<K>,
    fetcher: F,
    surface: H,
    pool: LocalPool,
    events_tx: UnboundedSender<GalleryEvent<K>>,
    events_rx: UnboundedReceiver<GalleryEvent<K>>,
    frame_requested: bool,
}

impl<K, F, H> Driver<K, F, H>
where
    K: Clone + fmt::Debug + 'static,
    F: Fetcher<K>,
    H: GalleryHost<K>,
{
    /// Creates the gallery and spawns the first fetch. Nothing runs until
    /// [`run_until_stalled`](Self::run_until_stalled).
    pub fn new(config: GalleryConfig<K>, fetcher: F, render: ItemRenderer, surface: H) -> Self {
        let pool = LocalPool::new();
        let (events_tx, events_rx) = mpsc::unbounded();
        let mut fetcher = fetcher;
        let mut surface = surface;
        let mut frame_requested = false;
        let gallery = {
            let mut host = Dispatch {
                fetcher: &mut fetcher,
                surface: &mut surface,
                spawner: pool.spawner(),
                events: &events_tx,
                frame_requested: &mut frame_requested,
            };
            Gallery::new(config, render, &mut host)
        };
        Self {
            gallery,
            fetcher,
            surface,
            pool,
            events_tx,
            events_rx,
            frame_requested,
        }
    }

    pub fn attach(&mut self, bounds: Bounds) {
        self.with_host(|gallery, host| gallery.attach(bounds, host));
    }

    pub fn reset(&mut self) {
        self.with_host(|gallery, host| gallery.reset(host));
    }

    pub fn update_items(&mut self, updater: ItemRenderer) {
        self.with_host(|gallery, host| gallery.update_items(updater, host));
    }

    pub fn update_options(&mut self, update: LayoutOptionsUpdate) -> Result<(), LayoutError> {
        self.gallery.update_options(update)
    }

    /// Returns whether a fetch was started.
    pub fn load_more(&mut self) -> bool {
        self.with_host(|gallery, host| gallery.load_more(host))
    }

    /// Queues an event for the next [`run_until_stalled`](Self::run_until_stalled).
    pub fn send(&self, event: GalleryEvent<K>) {
        if self.events_tx.unbounded_send(event).is_err() {
            warn!("gallery event channel closed");
        }
    }

    /// A sender surfaces can keep to post intersection and resize signals.
    pub fn sender(&self) -> UnboundedSender<GalleryEvent<K>> {
        self.events_tx.clone()
    }

    /// Runs spawned fetches and delivers queued events until neither makes
    /// progress. Returns the number of events delivered.
    pub fn run_until_stalled(&mut self) -> usize {
        let mut delivered = 0;
        loop {
            self.pool.run_until_stalled();
            let mut progressed = false;
            loop {
                let next = self.events_rx.next().now_or_never();
                let Some(Some(event)) = next else {
                    break;
                };
                trace!("delivering {event:?}");
                self.with_host(|gallery, host| gallery.handle(event, host));
                delivered += 1;
                progressed = true;
            }
            if !progressed {
                return delivered;
            }
        }
    }

    /// Runs one paint tick if the gallery asked for one, then settles.
    ///
    /// Returns whether a frame was delivered.
    pub fn advance_frame(&mut self) -> bool {
        if !std::mem::take(&mut self.frame_requested) {
            return false;
        }
        self.with_host(|gallery, host| gallery.handle(GalleryEvent::Frame, host));
        self.run_until_stalled();
        true
    }

    pub fn is_frame_requested(&self) -> bool {
        self.frame_requested
    }

    pub fn gallery(&self) -> &Gallery<K> {
        &self.gallery
    }

    pub fn surface(&self) -> &H {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut H {
        &mut self.surface
    }

    fn with_host<R>(&mut self, f: impl FnOnce(&mut Gallery<K>, &mut Dispatch<'_, K, F, H>) -> R) -> R {
        let mut host = Dispatch {
            fetcher: &mut self.fetcher,
            surface: &mut self.surface,
            spawner: self.pool.spawner(),
            events: &self.events_tx,
            frame_requested: &mut self.frame_requested,
        };
        f(&mut self.gallery, &mut host)
    }
}

impl<K: fmt::Debug, F, H> fmt::Debug for Driver<K, F, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver")
            .field("gallery", &self.gallery)
            .field("frame_requested", &self.frame_requested)
            .finish_non_exhaustive()
    }
}

/// The host a driven gallery sees: fetches and frame requests are handled
/// here, everything else goes to the surface.
struct Dispatch<'a, K, F, H> {
    fetcher: &'a mut F,
    surface: &'a mut H,
    spawner: LocalSpawner,
    events: &'a UnboundedSender<GalleryEvent<K>>,
    frame_requested: &'a mut bool,
}

impl<K, F, H> GalleryHost<K> for Dispatch<'_, K, F, H>
where
    K: Clone + fmt::Debug + 'static,
    F: Fetcher<K>,
    H: GalleryHost<K>,
{
    fn begin_fetch(&mut self, request: FetchRequest<K>) {
        let ticket = request.ticket;
        let fetch = self.fetcher.fetch(request.key.clone());
        let events = self.events.clone();
        let started = Instant::now();
        let task = async move {
            let result = fetch.await;
            debug!("fetch {ticket:?} settled after {:?}", started.elapsed());
            // The receiver only goes away with the driver.
            let _ = events.unbounded_send(GalleryEvent::PageLoaded { ticket, result });
        };
        if let Err(err) = self.spawner.spawn_local(task) {
            warn!("could not spawn fetch {ticket:?}: {err}");
            let _ = self.events.unbounded_send(GalleryEvent::PageLoaded {
                ticket,
                result: Err(Box::new(err)),
            });
        }
        self.surface.begin_fetch(request);
    }

    fn request_frame(&mut self) {
        *self.frame_requested = true;
        self.surface.request_frame();
    }

    fn mount_root(&mut self, root: RootId) {
        self.surface.mount_root(root);
    }

    fn mount_section(&mut self, root: RootId, section: &Section) {
        self.surface.mount_section(root, section);
    }

    fn place_section(&mut self, section: &Section) {
        self.surface.place_section(section);
    }

    fn set_content_height(&mut self, root: RootId, height: f32) {
        self.surface.set_content_height(root, height);
    }

    fn observe_section(&mut self, root: RootId, section: SectionIndex) {
        self.surface.observe_section(root, section);
    }

    fn disconnect_sections(&mut self) {
        self.surface.disconnect_sections();
    }

    fn show_section(&mut self, section: &Section) {
        self.surface.show_section(section);
    }

    fn hide_section(&mut self, section: &Section) {
        self.surface.hide_section(section);
    }

    fn scroll_to_section(&mut self, section: &Section) {
        self.surface.scroll_to_section(section);
    }

    fn report_error(&mut self, error: GalleryError) {
        self.surface.report_error(error);
    }
}
