//! Viewport intersection and container resize signals.

use std::collections::BTreeSet;

use log::debug;
use mosaic_layout::collections::map::HashSet;
use mosaic_layout::{Section, SectionIndex};

use crate::{GalleryHost, IntersectionEntry, RootId};

/// Filters raw observer signals before they reach the gallery.
///
/// Tracks which section placeholders of which root are being observed, so
/// entries from a disconnected root or for unknown sections are dropped, and
/// swallows the resize echo that follows the start of container observation.
#[derive(Debug, Default)]
pub struct VisibilityController {
    root: Option<RootId>,
    observed: HashSet<SectionIndex>,
    resize_echo_pending: bool,
}

impl VisibilityController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a section placeholder with the host's intersection observer.
    pub fn observe<K>(&mut self, root: RootId, section: SectionIndex, host: &mut impl GalleryHost<K>) {
        if self.root != Some(root) {
            self.root = Some(root);
            self.observed.clear();
        }
        if self.observed.insert(section) {
            host.observe_section(root, section);
        }
    }

    /// Stops observing every section.
    pub fn disconnect<K>(&mut self, host: &mut impl GalleryHost<K>) {
        if self.root.take().is_some() {
            host.disconnect_sections();
        }
        self.observed.clear();
    }

    /// Whether intersection entries for this section are currently accepted.
    pub fn is_observing(&self, root: RootId, section: SectionIndex) -> bool {
        self.root == Some(root) && self.observed.contains(&section)
    }

    /// Container observation (re)started; the next resize signal is the
    /// observer's initial measurement, not a real resize.
    pub fn begin_resize_observation(&mut self) {
        self.resize_echo_pending = true;
    }

    /// Returns the width to reposition to, or `None` for the initial echo.
    pub fn on_resize(&mut self, width: f32) -> Option<f32> {
        if std::mem::take(&mut self.resize_echo_pending) {
            debug!("dropping initial resize echo (width {width})");
            return None;
        }
        Some(width)
    }
}

/// Headless intersection source.
///
/// Hosts without a native intersection observer keep one of these, feed it
/// the scroll offset and the gallery's sections, and deliver the returned
/// entries. Only changes are reported: a section produces an entry when it
/// starts or stops intersecting.
#[derive(Clone, Debug, Default)]
pub struct Viewport {
    root: Option<RootId>,
    scroll_top: f32,
    height: f32,
    intersecting: BTreeSet<SectionIndex>,
}

impl Viewport {
    pub fn new(height: f32) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }

    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    pub fn is_intersecting(&self, section: SectionIndex) -> bool {
        self.intersecting.contains(&section)
    }

    /// Scrolls to `scroll_top` and reports intersection changes.
    ///
    /// Switching to a new root forgets everything seen under the old one.
    pub fn update(&mut self, root: RootId, sections: &[Section], scroll_top: f32) -> Vec<IntersectionEntry> {
        if self.root != Some(root) {
            self.root = Some(root);
            self.intersecting.clear();
        }
        self.scroll_top = scroll_top.max(0.0);
        let view_top = self.scroll_top;
        let view_bottom = view_top + self.height;

        let mut entries = Vec::new();
        for section in sections {
            let overlap = section.bottom().min(view_bottom) - section.top().max(view_top);
            let ratio = if overlap > 0.0 {
                (overlap / section.height()).min(1.0)
            } else {
                0.0
            };
            let index = section.index();
            let was = self.intersecting.contains(&index);
            let now = ratio > 0.0;
            if was == now {
                continue;
            }
            if now {
                self.intersecting.insert(index);
            } else {
                self.intersecting.remove(&index);
            }
            entries.push(IntersectionEntry {
                root,
                section: index,
                ratio,
            });
        }
        entries
    }
}
