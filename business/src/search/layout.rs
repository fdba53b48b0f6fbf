//! Responsive 24-unit grid layout of the search form.

use serde::Deserialize;

use crate::error::ConfigError;

/// Grid units in one form row.
pub const GRID_COLUMNS: u8 = 24;

/// Width assumed before the first measurement arrives.
pub const DEFAULT_CONTAINER_WIDTH: f32 = 1200.0;

const FOUR_PER_ROW_MIN_WIDTH: f32 = 1352.0;
const THREE_PER_ROW_MIN_WIDTH: f32 = 1062.0;
const NARROW_MIN_WIDTH: f32 = 702.0;
const FORCED_VERTICAL_MAX_WIDTH: f32 = 701.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Horizontal,
    Vertical,
}

impl std::str::FromStr for LayoutMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            _ => Err(ConfigError::Layout(s.to_owned())),
        }
    }
}

/// Result of laying out the form for one container width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Grid units one regular field spans.
    pub col_span: u8,
    pub fields_per_row: u8,
    /// Vertical when requested, or forced by a narrow container.
    pub effective_mode: LayoutMode,
}

impl GridLayout {
    /// Grid units taken by the submit/reset/expand group so that it ends
    /// flush with the right edge of the last field row.
    pub fn action_span(&self, visible_fields: usize) -> u8 {
        if self.effective_mode == LayoutMode::Vertical {
            return GRID_COLUMNS;
        }
        let per_row = usize::from(self.fields_per_row.max(1));
        match visible_fields % per_row {
            0 => GRID_COLUMNS,
            remainder => ((per_row - remainder) as u8).saturating_mul(self.col_span),
        }
    }

    /// Grid units of a field spanning `col_size` regular slots.
    pub fn field_span(&self, col_size: u8) -> u8 {
        let unit = GRID_COLUMNS / self.fields_per_row.max(1);
        col_size.saturating_mul(unit).min(GRID_COLUMNS)
    }
}

/// Lays out a form of `requested` mode in a container `width_px` wide.
pub fn layout(width_px: f32, requested: LayoutMode) -> GridLayout {
    layout_with_span(width_px, requested, None)
}

/// Like [`layout`], with an optional fixed column span for horizontal mode.
///
/// A container of 701px or less always renders vertically, even when
/// horizontal was requested.
pub fn layout_with_span(width_px: f32, requested: LayoutMode, span: Option<u8>) -> GridLayout {
    let forced_vertical = width_px <= FORCED_VERTICAL_MAX_WIDTH;
    let col_span = match requested {
        LayoutMode::Vertical => GRID_COLUMNS,
        LayoutMode::Horizontal if forced_vertical => GRID_COLUMNS,
        LayoutMode::Horizontal => match span.filter(|s| (1..=GRID_COLUMNS).contains(s)) {
            Some(span) => span,
            None if width_px >= FOUR_PER_ROW_MIN_WIDTH => 6,
            None if width_px >= THREE_PER_ROW_MIN_WIDTH => 8,
            None if width_px >= NARROW_MIN_WIDTH => 8,
            None => GRID_COLUMNS,
        },
    };
    let effective_mode = if forced_vertical {
        LayoutMode::Vertical
    } else {
        requested
    };

    GridLayout {
        col_span,
        fields_per_row: GRID_COLUMNS / col_span,
        effective_mode,
    }
}

/// Number of fields shown while collapsed.
///
/// One slot of the first row is kept for the action group. An explicit
/// `override_count` is taken as the total slot count including that group.
pub fn default_visible_count(fields_per_row: u8, override_count: Option<usize>) -> usize {
    match override_count.filter(|count| *count > 0) {
        Some(count) => count - 1,
        None => usize::from(fields_per_row).saturating_sub(1).max(1),
    }
}

/// Source of container width measurements.
///
/// Returns `None` when nothing was measured since the last call.
pub trait WidthObserver {
    fn observe(&mut self) -> Option<f32>;
}

impl<F: FnMut() -> Option<f32>> WidthObserver for F {
    fn observe(&mut self) -> Option<f32> {
        self()
    }
}

/// An observer that always reports the same width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWidth(pub f32);

impl WidthObserver for FixedWidth {
    fn observe(&mut self) -> Option<f32> {
        Some(self.0)
    }
}

/// Tracks the measured container width of one form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEngine {
    width: f32,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            width: DEFAULT_CONTAINER_WIDTH,
        }
    }
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Pulls one measurement from `observer`. Returns whether the width changed.
    pub fn observe(&mut self, observer: &mut impl WidthObserver) -> bool {
        match observer.observe() {
            Some(width) => self.set_width(width),
            None => false,
        }
    }

    /// Returns whether the width changed. Non-finite or negative widths are ignored.
    pub fn set_width(&mut self, width: f32) -> bool {
        if !width.is_finite() || width < 0.0 || width == self.width {
            return false;
        }
        log::trace!("search form width {} -> {}", self.width, width);
        self.width = width;
        true
    }

    pub fn compute(&self, requested: LayoutMode, span: Option<u8>) -> GridLayout {
        layout_with_span(self.width, requested, span)
    }
}
