//! Testing utilities and harness for Mosaic galleries.
//!
//! [`RecordingHost`] records every side effect a gallery asks for and queues
//! fetches so tests decide when and how they resolve. [`GalleryTestRule`]
//! bundles a gallery, a recording host and a headless [`Viewport`](mosaic::Viewport)
//! so tests can scroll, resize and tick frames the way a real surface would.

pub mod host;
pub mod pages;
pub mod rule;

pub use host::*;
pub use rule::*;

pub mod prelude {
    pub use crate::pages::*;
    pub use crate::{GalleryTestRule, HostCall, RecordingHost, RenderedItem};
}
