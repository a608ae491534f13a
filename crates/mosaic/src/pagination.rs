//! Request-key-driven pagination.
//!
//! The gallery is either idle or waiting for exactly one page. A page is
//! merged with whatever the previous page left open, packed into rows,
//! chunked into sections and mounted in one step. Afterwards the gallery
//! keeps fetching on its own while the viewport is not yet filled or the
//! page did not complete a single section.

use std::fmt;

use log::debug;
use mosaic_layout::{chunk_rows, tile, Section, SectionIndex};

use crate::state::FetchState;
use crate::{FetchError, FetchRequest, FetchTicket, Gallery, GalleryError, GalleryHost, Page};

impl<K: Clone + fmt::Debug> Gallery<K> {
    /// Starts fetching the next page if the gallery is idle and the stream
    /// has not ended.
    ///
    /// Returns whether a fetch was started. Calling this while a fetch is in
    /// flight does nothing.
    pub fn load_more(&mut self, host: &mut impl GalleryHost<K>) -> bool {
        if let FetchState::Fetching { ticket, .. } = &self.state.fetch {
            debug!("fetch {ticket:?} already in flight");
            return false;
        }
        let Some(key) = self.state.request_key.clone() else {
            return false;
        };

        let ticket = self.state.next_ticket();
        debug!("fetching {key:?} ({ticket:?})");
        self.state.fetch = FetchState::Fetching {
            ticket,
            key: key.clone(),
        };
        self.stats.fetches_started += 1;
        host.begin_fetch(FetchRequest { ticket, key });
        true
    }

    pub(crate) fn on_page_loaded(
        &mut self,
        ticket: FetchTicket,
        result: Result<Page<K>, FetchError>,
        host: &mut impl GalleryHost<K>,
    ) {
        if !self.state.is_outstanding(ticket) {
            debug!("discarding stale page {ticket:?} (lifetime {})", self.state.lifetime);
            self.stats.pages_discarded += 1;
            return;
        }

        match result {
            Ok(page) if !self.attached => {
                debug!("page {ticket:?} arrived before attach, deferring");
                self.state.deferred_page = Some(page);
            }
            Ok(page) => self.apply_page(page, host),
            Err(source) => {
                let key = match std::mem::replace(&mut self.state.fetch, FetchState::Idle) {
                    FetchState::Fetching { key, .. } => format!("{key:?}"),
                    FetchState::Idle => String::new(),
                };
                self.stats.fetch_failures += 1;
                host.report_error(GalleryError::Fetch { key, source });
            }
        }
    }

    /// Packs, chunks and mounts one page, then decides whether to keep going.
    ///
    /// Either the whole page is committed or, if some new section cannot be
    /// laid out at the current width, nothing is: the request key is not
    /// advanced and the next trigger fetches the same page again.
    pub(crate) fn apply_page(&mut self, page: Page<K>, host: &mut impl GalleryHost<K>) {
        let Page {
            items,
            next_request_key,
        } = page;
        let more_follows = next_request_key.is_some();
        let options = self.options;

        let merged = self.state.item_remainder.iter().cloned().chain(items);
        let tiling = tile(merged, options.row_aspect_ratio_threshold, more_follows);
        let sectioning = chunk_rows(
            self.state.row_remainder.clone(),
            tiling.rows,
            self.config.rows_per_section,
            more_follows,
        );
        if sectioning.is_starved() {
            debug!(
                "{} rows held back, not enough for a section of {}",
                sectioning.row_remainder.len(),
                self.config.rows_per_section
            );
        }

        let first = self.state.sections.len();
        let mut top = self.state.height;
        let mut built = Vec::with_capacity(sectioning.chunks.len());
        for (offset, rows) in sectioning.chunks.into_iter().enumerate() {
            match Section::new(SectionIndex::new(first + offset), rows, top, self.state.width, &options) {
                Ok(section) => {
                    top = section.bottom();
                    built.push(section);
                }
                Err(err) => {
                    self.state.fetch = FetchState::Idle;
                    host.report_error(err.into());
                    return;
                }
            }
        }

        self.state.item_remainder = tiling.remainder;
        self.state.row_remainder = sectioning.row_remainder;

        let root = self.state.root;
        for section in &built {
            host.mount_section(root, section);
        }
        let produced = built.len();
        if produced > 0 {
            self.state.height = top;
            host.set_content_height(root, top);
        }
        self.state.sections.extend(built);
        self.state.request_key = next_request_key;

        for index in first..first + produced {
            self.visibility.observe(root, SectionIndex::new(index), host);
        }

        self.state.fetch = FetchState::Idle;
        self.stats.pages_applied += 1;
        self.stats.sections_mounted += produced;
        debug!(
            "page applied: {produced} new sections, content height {}, next {:?}",
            self.state.height, self.state.request_key
        );

        if produced == 0 {
            self.load_more(host);
        } else {
            self.fill_viewport(host);
        }
    }

    /// Fetches the next page if the mounted content does not reach the
    /// bottom of the container. Returns whether a fetch was started.
    pub(crate) fn fill_viewport(&mut self, host: &mut impl GalleryHost<K>) -> bool {
        if self.state.height > self.state.container_height {
            return false;
        }
        self.load_more(host)
    }
}
