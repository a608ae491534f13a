//! Virtualized, infinitely scrolling justified gallery.
//!
//! A [`Gallery`] pulls pages of items from a host-provided fetcher, packs them
//! into justified rows, groups rows into sections and mounts those sections
//! as placeholders. Items are only handed to the render callback once their
//! section intersects the viewport.
//!
//! # Architecture
//!
//! - [`Gallery`] - the orchestrator; all state lives here and every signal
//!   enters through [`Gallery::handle`]
//! - [`GalleryHost`] - what the embedding surface must provide (fetch
//!   dispatch, mount points, observers, frame scheduling)
//! - [`VisibilityController`] - filters intersection and resize signals
//! - [`Viewport`] - computes intersection signals for hosts without a native
//!   observer
//! - [`Driver`] - a single-threaded async event loop around a gallery
//!
//! The pure layout half lives in [`mosaic_layout`] and is re-exported here.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut driver = Driver::new(
//!     GalleryConfig::new(0u32),
//!     |page: u32| async move { fetch_page(page).await },
//!     Box::new(|id, mount| surface.render(id, mount)),
//!     surface,
//! );
//! driver.attach(Bounds::new(1024.0, 768.0));
//! driver.run_until_stalled();
//! ```

mod config;
mod driver;
mod error;
mod event;
mod frame;
mod gallery;
mod host;
mod pagination;
mod state;
mod visibility;

pub use config::*;
pub use driver::*;
pub use error::*;
pub use event::*;
pub use gallery::*;
pub use host::*;
pub use state::GalleryStats;
pub use visibility::*;

pub use mosaic_layout as layout;
pub use mosaic_layout::{
    Item, ItemId, LayoutError, LayoutOptions, LayoutOptionsUpdate, Rect, Row, Section, SectionIndex, Tile,
};
