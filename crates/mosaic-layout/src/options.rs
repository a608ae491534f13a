//! Tunable layout options.

use crate::LayoutError;

/// Default row aspect-ratio threshold. Higher values give wider, shorter rows.
pub const DEFAULT_ROW_ASPECT_RATIO_THRESHOLD: f32 = 5.0;

/// Default gap between tiles, in layout units.
pub const DEFAULT_MARGIN: f32 = 3.0;

/// Options shared by the tiler and section geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutOptions {
    /// A row is closed once its items' aspect ratios sum to at least this.
    pub row_aspect_ratio_threshold: f32,

    /// Space between adjacent tiles and after every row.
    pub margin: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            row_aspect_ratio_threshold: DEFAULT_ROW_ASPECT_RATIO_THRESHOLD,
            margin: DEFAULT_MARGIN,
        }
    }
}

impl LayoutOptions {
    pub fn new(row_aspect_ratio_threshold: f32, margin: f32) -> Result<Self, LayoutError> {
        let options = Self {
            row_aspect_ratio_threshold,
            margin,
        };
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let threshold = self.row_aspect_ratio_threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(LayoutError::InvalidThreshold(threshold));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(LayoutError::InvalidMargin(self.margin));
        }
        Ok(())
    }

    /// Returns these options with `update` merged over them.
    ///
    /// The merged result is validated as a whole; on error `self` is
    /// untouched.
    pub fn merged(&self, update: &LayoutOptionsUpdate) -> Result<Self, LayoutError> {
        let merged = Self {
            row_aspect_ratio_threshold: update
                .row_aspect_ratio_threshold
                .unwrap_or(self.row_aspect_ratio_threshold),
            margin: update.margin.unwrap_or(self.margin),
        };
        merged.validate()?;
        Ok(merged)
    }
}

/// A partial set of options; `None` fields keep their current value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutOptionsUpdate {
    pub row_aspect_ratio_threshold: Option<f32>,
    pub margin: Option<f32>,
}

impl LayoutOptionsUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_aspect_ratio_threshold(mut self, threshold: f32) -> Self {
        self.row_aspect_ratio_threshold = Some(threshold);
        self
    }

    pub fn margin(mut self, margin: f32) -> Self {
        self.margin = Some(margin);
        self
    }
}
