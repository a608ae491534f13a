//! Gallery configuration.

use std::num::NonZeroUsize;

use mosaic_layout::LayoutOptions;

/// Default number of rows grouped into one section.
pub const DEFAULT_ROWS_PER_SECTION: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(rows) => rows,
    None => unreachable!(),
};

/// Construction-time configuration of a [`Gallery`](crate::Gallery).
#[derive(Clone, Debug)]
pub struct GalleryConfig<K> {
    /// Request key of the first page; every reset starts over from here.
    pub initial_request_key: K,

    /// Initial layout options. They can be changed later with
    /// [`Gallery::update_options`](crate::Gallery::update_options).
    pub options: LayoutOptions,

    /// Rows per section. Fixed for the gallery's life, since every section
    /// except the last must hold exactly this many rows.
    pub rows_per_section: NonZeroUsize,
}

impl<K> GalleryConfig<K> {
    pub fn new(initial_request_key: K) -> Self {
        Self {
            initial_request_key,
            options: LayoutOptions::default(),
            rows_per_section: DEFAULT_ROWS_PER_SECTION,
        }
    }

    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_rows_per_section(mut self, rows_per_section: NonZeroUsize) -> Self {
        self.rows_per_section = rows_per_section;
        self
    }
}
