//! The gallery orchestrator.

use std::fmt;

use log::{debug, warn};
use mosaic_layout::{Item, LayoutError, LayoutOptions, LayoutOptionsUpdate, Row, Section, SectionIndex};

use crate::frame::{FrameQueue, FrameWork};
use crate::state::{GalleryStats, State};
use crate::{
    Bounds, GalleryConfig, GalleryEvent, GalleryHost, IntersectionEntry, ItemRenderer, MountPoint, RootId,
    VisibilityController,
};

/// A virtualized justified gallery.
///
/// The gallery owns all of its state and is driven from a single thread:
/// lifecycle calls ([`attach`](Self::attach), [`reset`](Self::reset),
/// [`update_items`](Self::update_items), ...) and [`handle`](Self::handle)
/// for everything the host observes. Side effects go out through the
/// [`GalleryHost`] passed to each call.
///
/// # Example
///
/// ```rust
/// use mosaic::{Gallery, GalleryConfig, GalleryHost, FetchRequest, RootId, Section, SectionIndex, Bounds};
///
/// #[derive(Default)]
/// struct Host {
///     requests: Vec<FetchRequest<u32>>,
/// }
///
/// impl GalleryHost<u32> for Host {
///     fn begin_fetch(&mut self, request: FetchRequest<u32>) {
///         self.requests.push(request);
///     }
///     fn request_frame(&mut self) {}
///     fn mount_root(&mut self, _root: RootId) {}
///     fn mount_section(&mut self, _root: RootId, _section: &Section) {}
///     fn set_content_height(&mut self, _root: RootId, _height: f32) {}
///     fn observe_section(&mut self, _root: RootId, _section: SectionIndex) {}
///     fn disconnect_sections(&mut self) {}
/// }
///
/// let mut host = Host::default();
/// let mut gallery = Gallery::new(GalleryConfig::new(0u32), Box::new(|_, _| {}), &mut host);
/// gallery.attach(Bounds::new(800.0, 600.0), &mut host);
/// assert!(gallery.is_fetching());
/// assert_eq!(host.requests[0].key, 0);
/// ```
pub struct Gallery<K> {
    pub(crate) config: GalleryConfig<K>,
    pub(crate) options: LayoutOptions,
    pub(crate) state: State<K>,
    pub(crate) visibility: VisibilityController,
    pub(crate) render: ItemRenderer,
    pub(crate) frame: FrameQueue,
    pub(crate) attached: bool,
    pub(crate) stats: GalleryStats,
}

impl<K: Clone + fmt::Debug> Gallery<K> {
    /// Creates a gallery, mounts its root and starts fetching the first page.
    pub fn new(config: GalleryConfig<K>, render: ItemRenderer, host: &mut impl GalleryHost<K>) -> Self {
        let options = config.options;
        let state = State::new(0, config.initial_request_key.clone());
        let mut gallery = Self {
            config,
            options,
            state,
            visibility: VisibilityController::new(),
            render,
            frame: FrameQueue::default(),
            attached: false,
            stats: GalleryStats::default(),
        };
        host.mount_root(gallery.state.root);
        gallery.load_more(host);
        gallery
    }

    /// Binds the gallery to a host container of the given size.
    ///
    /// The container's width becomes the layout width and its height the
    /// visible height used to decide whether more pages are needed. A page
    /// that resolved before attaching is applied now.
    pub fn attach(&mut self, bounds: Bounds, host: &mut impl GalleryHost<K>) {
        if bounds.width <= 0.0 {
            warn!("attaching gallery to a container of width {}", bounds.width);
        }
        self.state.container_height = bounds.height;
        if self.state.sections.is_empty() {
            self.state.width = bounds.width;
        } else {
            self.schedule_reposition(bounds.width, host);
        }
        self.attached = true;
        self.visibility.begin_resize_observation();

        if let Some(page) = self.state.deferred_page.take() {
            self.apply_page(page, host);
        }
        self.fill_viewport(host);
    }

    /// Throws away every section and starts over from the initial request key.
    ///
    /// A fetch still in flight is not cancelled; its result will be discarded
    /// when it arrives. Container size and layout options are kept.
    pub fn reset(&mut self, host: &mut impl GalleryHost<K>) {
        let lifetime = self.state.lifetime + 1;
        debug!("reset: lifetime {} -> {lifetime}", self.state.lifetime);
        self.visibility.disconnect(host);

        let mut state = State::new(lifetime, self.config.initial_request_key.clone());
        state.width = self.state.width;
        state.container_height = self.state.container_height;
        self.state = state;

        let FrameWork {
            reposition,
            item_update,
        } = self.frame.take();
        if let Some(width) = reposition {
            self.state.width = width;
        }
        if let Some(updater) = item_update {
            self.render = updater;
        }

        host.mount_root(self.state.root);
        self.load_more(host);
    }

    /// Merges new layout options. They apply to pages packed from now on and
    /// to the next repositioning.
    pub fn update_options(&mut self, update: LayoutOptionsUpdate) -> Result<(), LayoutError> {
        self.options = self.options.merged(&update)?;
        Ok(())
    }

    /// Installs a new render callback on the next frame and re-renders every
    /// item of every shown section with it.
    pub fn update_items(&mut self, updater: ItemRenderer, host: &mut impl GalleryHost<K>) {
        if self.frame.schedule_item_update(updater) {
            host.request_frame();
        }
    }

    /// Processes one event.
    pub fn handle(&mut self, event: GalleryEvent<K>, host: &mut impl GalleryHost<K>) {
        match event {
            GalleryEvent::PageLoaded { ticket, result } => self.on_page_loaded(ticket, result, host),
            GalleryEvent::Intersection(entry) => self.on_intersection(entry, host),
            GalleryEvent::Resize { width } => {
                if let Some(width) = self.visibility.on_resize(width) {
                    self.schedule_reposition(width, host);
                }
            }
            GalleryEvent::Frame => self.on_frame(host),
        }
    }

    fn schedule_reposition(&mut self, width: f32, host: &mut impl GalleryHost<K>) {
        if self.frame.schedule_reposition(width) {
            host.request_frame();
        }
    }

    fn on_intersection(&mut self, entry: IntersectionEntry, host: &mut impl GalleryHost<K>) {
        if !self.visibility.is_observing(entry.root, entry.section) {
            debug!("ignoring intersection for unobserved section {} of {}", entry.section, entry.root);
            return;
        }
        let index = entry.section.get();
        let Some(section) = self.state.sections.get(index) else {
            warn!("intersection for section {} beyond {} sections", entry.section, self.state.sections.len());
            return;
        };

        if entry.is_intersecting() {
            let is_last = index + 1 == self.state.sections.len();
            if is_last && self.state.request_key.is_some() {
                self.load_more(host);
            }
            if !self.state.clean.contains(&entry.section) {
                self.render_section(entry.section);
                self.state.clean.insert(entry.section);
            }
            let section = &mut self.state.sections[index];
            section.show();
            host.show_section(section);
            self.state.shown.insert(entry.section);
            self.state.active_section = entry.section;
        } else if section.is_shown() {
            let section = &mut self.state.sections[index];
            section.hide();
            host.hide_section(section);
            self.state.shown.remove(&entry.section);
        }
    }

    /// Hands every item of a section to the current render callback.
    fn render_section(&mut self, index: SectionIndex) {
        let root = self.state.root;
        let Some(section) = self.state.sections.get(index.get()) else {
            return;
        };
        for tile in section.tiles() {
            let mount = MountPoint {
                root,
                section: index,
                frame: tile.frame,
            };
            (self.render)(&tile.id, &mount);
        }
        self.stats.items_rendered += section.tiles().len();
    }

    fn on_frame(&mut self, host: &mut impl GalleryHost<K>) {
        let FrameWork {
            reposition,
            item_update,
        } = self.frame.take();
        if let Some(width) = reposition {
            self.reposition(width, host);
        }
        if let Some(updater) = item_update {
            self.apply_item_update(updater);
        }
    }

    /// Re-lays every section for a new container width.
    ///
    /// Rows are not re-tiled and nothing is fetched; only section heights
    /// and offsets change. All sections are measured before any is moved, so
    /// a width that cannot hold some row leaves the layout untouched.
    fn reposition(&mut self, width: f32, host: &mut impl GalleryHost<K>) {
        if width == self.state.width {
            return;
        }
        let options = self.options;
        let layouts = match self
            .state
            .sections
            .iter()
            .map(|section| section.remeasure(width, &options))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(layouts) => layouts,
            Err(err) => {
                host.report_error(err.into());
                return;
            }
        };

        debug!("reposition: width {} -> {width}", self.state.width);
        self.state.width = width;
        let mut height = 0.0;
        for (section, layout) in self.state.sections.iter_mut().zip(layouts) {
            section.apply_layout(height, layout);
            height = section.bottom();
            host.place_section(section);
        }
        self.state.height = height;
        host.set_content_height(self.state.root, height);

        if let Some(active) = self.state.sections.get(self.state.active_section.get()) {
            host.scroll_to_section(active);
        }
        // Shorter content, or a page that could not be laid out at the old
        // width, may leave the container unfilled.
        self.fill_viewport(host);
    }

    fn apply_item_update(&mut self, updater: ItemRenderer) {
        self.state.clean.clear();
        self.render = updater;
        let shown: Vec<SectionIndex> = self.state.shown.iter().copied().collect();
        for index in shown {
            self.render_section(index);
            self.state.clean.insert(index);
        }
    }
}

impl<K> Gallery<K> {
    pub fn config(&self) -> &GalleryConfig<K> {
        &self.config
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn stats(&self) -> &GalleryStats {
        &self.stats
    }

    /// Counter identifying the current lifetime; bumped by every reset.
    pub fn lifetime(&self) -> u64 {
        self.state.lifetime
    }

    pub fn root(&self) -> RootId {
        self.state.root
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_fetching(&self) -> bool {
        self.state.is_fetching()
    }

    /// Where the next page will be fetched from; `None` once exhausted.
    pub fn request_key(&self) -> Option<&K> {
        self.state.request_key.as_ref()
    }

    pub fn sections(&self) -> &[Section] {
        &self.state.sections
    }

    pub fn section(&self, index: SectionIndex) -> Option<&Section> {
        self.state.sections.get(index.get())
    }

    /// Indices of the sections currently in the viewport, ascending.
    pub fn shown_sections(&self) -> impl Iterator<Item = SectionIndex> + '_ {
        self.state.shown.iter().copied()
    }

    pub fn is_clean(&self, index: SectionIndex) -> bool {
        self.state.clean.contains(&index)
    }

    /// The section that most recently entered the viewport.
    pub fn active_section(&self) -> SectionIndex {
        self.state.active_section
    }

    pub fn width(&self) -> f32 {
        self.state.width
    }

    pub fn container_height(&self) -> f32 {
        self.state.container_height
    }

    /// Total height of all mounted sections.
    pub fn content_height(&self) -> f32 {
        self.state.height
    }

    pub fn item_remainder(&self) -> &[Item] {
        &self.state.item_remainder
    }

    pub fn row_remainder(&self) -> &[Row] {
        &self.state.row_remainder
    }

    /// Whether a frame tick has work waiting.
    pub fn has_pending_frame(&self) -> bool {
        self.frame.is_pending()
    }
}

impl<K: fmt::Debug> fmt::Debug for Gallery<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gallery")
            .field("lifetime", &self.state.lifetime)
            .field("fetch", &self.state.fetch)
            .field("request_key", &self.state.request_key)
            .field("sections", &self.state.sections.len())
            .field("shown", &self.state.shown)
            .field("width", &self.state.width)
            .field("height", &self.state.height)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
