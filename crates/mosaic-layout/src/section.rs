//! Sections: the unit of viewport windowing.
//!
//! A section owns a fixed run of rows and knows where each of its tiles sits
//! for a given container width. Geometry is recomputed on resize, but the rows
//! themselves never change once the section exists.

use std::fmt;

use crate::{ItemId, LayoutError, LayoutOptions, Rect, Row};

/// Position of a section among all sections of one gallery lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionIndex(usize);

impl SectionIndex {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for SectionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A placed item. The frame is relative to the top-left of its section.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub id: ItemId,
    pub frame: Rect,
}

/// Geometry of a section at one width, computed without touching the section.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionLayout {
    height: f32,
    tiles: Vec<Tile>,
}

impl SectionLayout {
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

/// A laid-out run of rows with a shown/hidden flag.
///
/// Sections can only be created through [`Section::new`], which computes the
/// geometry up front, so a section with a zero or negative height never
/// exists.
#[derive(Clone, Debug)]
pub struct Section {
    index: SectionIndex,
    rows: Vec<Row>,
    top: f32,
    layout: SectionLayout,
    shown: bool,
}

impl Section {
    /// Builds and lays out a section whose top edge sits at `top`.
    pub fn new(
        index: SectionIndex,
        rows: Vec<Row>,
        top: f32,
        width: f32,
        options: &LayoutOptions,
    ) -> Result<Self, LayoutError> {
        let layout = Self::measure(index, &rows, width, options)?;
        Ok(Self {
            index,
            rows,
            top,
            layout,
            shown: false,
        })
    }

    /// Computes tile frames and height for `rows` at `width`.
    ///
    /// Complete rows are scaled to span the full width. A short terminal row
    /// is sized as if it reached the threshold, so it keeps the height of its
    /// neighbours instead of stretching a few items across the container.
    pub fn measure(
        index: SectionIndex,
        rows: &[Row],
        width: f32,
        options: &LayoutOptions,
    ) -> Result<SectionLayout, LayoutError> {
        let degenerate = || LayoutError::DegenerateSection {
            index: index.get(),
            width,
        };
        if rows.is_empty() {
            return Err(degenerate());
        }

        let margin = options.margin;
        let mut tiles = Vec::with_capacity(rows.iter().map(Row::len).sum());
        let mut y = 0.0_f32;

        for row in rows {
            let gaps = row.len().saturating_sub(1) as f32 * margin;
            let ratio = if row.is_complete() {
                row.aspect_ratio()
            } else {
                row.aspect_ratio().max(options.row_aspect_ratio_threshold)
            };
            let row_height = (width - gaps) / ratio;
            if !row_height.is_finite() || row_height <= 0.0 {
                return Err(degenerate());
            }

            let mut x = 0.0_f32;
            for item in row.items() {
                let tile_width = row_height * item.aspect_ratio();
                tiles.push(Tile {
                    id: item.id().clone(),
                    frame: Rect::new(x, y, tile_width, row_height),
                });
                x += tile_width + margin;
            }
            y += row_height + margin;
        }

        if !y.is_finite() || y <= 0.0 {
            return Err(degenerate());
        }

        Ok(SectionLayout { height: y, tiles })
    }

    /// Measures this section's rows at a new width without applying it.
    pub fn remeasure(&self, width: f32, options: &LayoutOptions) -> Result<SectionLayout, LayoutError> {
        Self::measure(self.index, &self.rows, width, options)
    }

    /// Moves the section to `top` and adopts a previously measured layout.
    pub fn apply_layout(&mut self, top: f32, layout: SectionLayout) {
        debug_assert_eq!(layout.tiles.len(), self.item_count());
        self.top = top;
        self.layout = layout;
    }

    /// Re-lays the section at `top` for `width`. On error the current
    /// geometry is kept.
    pub fn relayout(&mut self, top: f32, width: f32, options: &LayoutOptions) -> Result<(), LayoutError> {
        let layout = self.remeasure(width, options)?;
        self.apply_layout(top, layout);
        Ok(())
    }

    pub fn index(&self) -> SectionIndex {
        self.index
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn height(&self) -> f32 {
        self.layout.height
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.layout.height
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.layout.tiles
    }

    pub fn item_ids(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.rows.iter().flat_map(Row::ids)
    }

    pub fn item_count(&self) -> usize {
        self.rows.iter().map(Row::len).sum()
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn show(&mut self) {
        self.shown = true;
    }

    pub fn hide(&mut self) {
        self.shown = false;
    }
}
