//! Errors surfaced to the host.

use mosaic_layout::LayoutError;
use thiserror::Error;

/// Error produced by a fetcher. Any error type can be boxed into it.
pub type FetchError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures reported through [`GalleryHost::report_error`](crate::GalleryHost::report_error).
///
/// None of these are fatal: after a fetch failure the gallery is idle again
/// and the next trigger retries the same request key.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("fetching page {key} failed")]
    Fetch {
        /// Debug rendering of the request key that failed.
        key: String,
        #[source]
        source: FetchError,
    },

    #[error(transparent)]
    Layout(#[from] LayoutError),
}
