//! Drives a gallery over a synthetic photo stream without any UI.
//!
//! The "surface" only logs what it is asked to do. Scrolling is simulated
//! with a headless [`Viewport`], which produces the same intersection
//! signals a browser observer would.

use std::cell::Cell;
use std::rc::Rc;

use futures::future;
use log::{info, warn};
use mosaic::{
    Bounds, Driver, FetchError, FetchRequest, GalleryConfig, GalleryError, GalleryEvent, GalleryHost, Item,
    LayoutOptionsUpdate, Page, RootId, Section, SectionIndex, Viewport,
};

const PAGES: u32 = 8;
const ITEMS_PER_PAGE: u32 = 40;
const WIDTH: f32 = 1200.0;
const HEIGHT: f32 = 800.0;

/// Deterministic aspect ratios between 0.5 and 2.0.
fn aspect_ratio(seed: u32) -> f32 {
    let mixed = seed.wrapping_mul(2_654_435_761).rotate_left(13);
    0.5 + (mixed % 1_500) as f32 / 1_000.0
}

fn fetch_photos(page: u32) -> future::Ready<Result<Page<u32>, FetchError>> {
    let items = (0..ITEMS_PER_PAGE)
        .map(|n| {
            let seed = page * ITEMS_PER_PAGE + n;
            Item::new(format!("photo-{seed}"), aspect_ratio(seed))
        })
        .collect::<Result<Vec<_>, _>>();
    let result = items
        .map(|items| Page::new(items, (page + 1 < PAGES).then_some(page + 1)))
        .map_err(FetchError::from);
    future::ready(result)
}

#[derive(Default)]
struct LogSurface {
    mounted: usize,
    content_height: f32,
    errors: usize,
}

impl GalleryHost<u32> for LogSurface {
    fn begin_fetch(&mut self, request: FetchRequest<u32>) {
        info!("fetching page {}", request.key);
    }

    fn request_frame(&mut self) {}

    fn mount_root(&mut self, root: RootId) {
        info!("mounted {root}");
        self.mounted = 0;
        self.content_height = 0.0;
    }

    fn mount_section(&mut self, root: RootId, section: &Section) {
        self.mounted += 1;
        info!(
            "{root}: section {} at {:.1} ({} items, {:.1} high)",
            section.index(),
            section.top(),
            section.item_count(),
            section.height()
        );
    }

    fn set_content_height(&mut self, _root: RootId, height: f32) {
        self.content_height = height;
    }

    fn observe_section(&mut self, _root: RootId, _section: SectionIndex) {}

    fn disconnect_sections(&mut self) {
        info!("observers disconnected");
    }

    fn scroll_to_section(&mut self, section: &Section) {
        info!("keeping section {} in view at {:.1}", section.index(), section.top());
    }

    fn report_error(&mut self, error: GalleryError) {
        self.errors += 1;
        warn!("gallery error: {error}");
    }
}

type PhotoDriver = Driver<u32, fn(u32) -> future::Ready<Result<Page<u32>, FetchError>>, LogSurface>;

/// Scrolls from top to bottom in viewport-sized steps, following the
/// content as new pages extend it.
fn scroll_through(driver: &mut PhotoDriver, viewport: &mut Viewport) {
    let mut scroll_top = 0.0;
    loop {
        let gallery = driver.gallery();
        let entries = viewport.update(gallery.root(), gallery.sections(), scroll_top);
        for entry in entries {
            driver.send(GalleryEvent::Intersection(entry));
        }
        driver.run_until_stalled();

        let bottom = driver.gallery().content_height() - viewport.height();
        if scroll_top >= bottom {
            break;
        }
        scroll_top = (scroll_top + viewport.height() / 2.0).min(bottom);
    }
}

fn main() {
    #[cfg(feature = "logging")]
    let _ = env_logger::try_init();

    let rendered = Rc::new(Cell::new(0_usize));
    let counter = Rc::clone(&rendered);
    let fetcher: fn(u32) -> future::Ready<Result<Page<u32>, FetchError>> = fetch_photos;
    let mut driver: PhotoDriver = Driver::new(
        GalleryConfig::new(0),
        fetcher,
        Box::new(move |_, _| counter.set(counter.get() + 1)),
        LogSurface::default(),
    );
    driver.attach(Bounds::new(WIDTH, HEIGHT));
    driver.run_until_stalled();

    let mut viewport = Viewport::new(HEIGHT);
    scroll_through(&mut driver, &mut viewport);
    println!(
        "scrolled {} sections, content height {:.1}, {} items rendered",
        driver.gallery().sections().len(),
        driver.gallery().content_height(),
        rendered.get()
    );

    // The observer reports the current size first, then the real change.
    driver.send(GalleryEvent::Resize { width: WIDTH });
    driver.send(GalleryEvent::Resize { width: WIDTH / 2.0 });
    driver.run_until_stalled();
    driver.advance_frame();
    println!(
        "after resize to {:.0}: content height {:.1}",
        driver.gallery().width(),
        driver.surface().content_height
    );

    if let Err(err) = driver.update_options(LayoutOptionsUpdate::new().margin(8.0)) {
        warn!("rejected options: {err}");
    }
    let rerendered = Rc::new(Cell::new(0_usize));
    let counter = Rc::clone(&rerendered);
    driver.update_items(Box::new(move |_, _| counter.set(counter.get() + 1)));
    driver.advance_frame();
    println!("re-rendered {} visible items", rerendered.get());

    driver.reset();
    driver.run_until_stalled();
    let stats = driver.gallery().stats();
    println!(
        "after reset: {} sections mounted, {} fetches, {} pages applied, {} discarded, {} errors",
        driver.surface().mounted,
        stats.fetches_started,
        stats.pages_applied,
        stats.pages_discarded,
        driver.surface().errors
    );
}
