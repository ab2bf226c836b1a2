//! Layout configuration.
//!
//! All width and margin arithmetic scales with [`LayoutConfig::total_width`]
//! and [`LayoutConfig::gutter`]. The defaults reproduce the classic 600-unit
//! day column with a 3-unit gutter.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Default width of the day column.
pub const DEFAULT_TOTAL_WIDTH: f64 = 600.0;
/// Default spacing subtracted from every computed width.
pub const DEFAULT_GUTTER: f64 = 3.0;
/// Default slack kept free on the right edge when re-packing a cluster.
pub const DEFAULT_OVERFLOW_MARGIN: f64 = 5.0;

// ── Ordering ────────────────────────────────────────────────────────────────

/// The order in which events are fed to column assignment.
///
/// First-fit column assignment only uses the minimum number of columns when
/// events arrive sorted by start. Sorting changes which column an event lands
/// in, so it is opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventOrder {
    /// Process events exactly as given.
    #[default]
    Input,
    /// Process events by ascending start, ties kept in input order.
    StartTime,
}

// ── Reflow strategy ─────────────────────────────────────────────────────────

/// How widths are tightened after the global width pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReflowStrategy {
    /// Re-pack each event's two-hop collision neighborhood when it has fewer
    /// direct neighbors than the day's highest column index.
    #[default]
    Neighborhood,
    /// Size every connected collision group by the columns it actually uses.
    Component,
}

// ── LayoutConfig ────────────────────────────────────────────────────────────

/// Options for [`layout`](crate::layout::layout).
///
/// Deserializes from camelCase keys, so `{"totalWidth": 800, "gutter": 4}`
/// works and every missing key falls back to its default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Width of the whole day column.
    pub total_width: f64,
    /// Spacing subtracted from each computed width.
    pub gutter: f64,
    /// A cluster is only re-packed when its rightmost member ends before
    /// `total_width - overflow_margin`.
    pub overflow_margin: f64,
    pub order: EventOrder,
    pub reflow: ReflowStrategy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            total_width: DEFAULT_TOTAL_WIDTH,
            gutter: DEFAULT_GUTTER,
            overflow_margin: DEFAULT_OVERFLOW_MARGIN,
            order: EventOrder::default(),
            reflow: ReflowStrategy::default(),
        }
    }
}

impl LayoutConfig {
    #[must_use]
    pub fn with_total_width(mut self, total_width: f64) -> Self {
        self.total_width = total_width;
        self
    }

    #[must_use]
    pub fn with_gutter(mut self, gutter: f64) -> Self {
        self.gutter = gutter;
        self
    }

    #[must_use]
    pub fn with_overflow_margin(mut self, overflow_margin: f64) -> Self {
        self.overflow_margin = overflow_margin;
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: EventOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn with_reflow(mut self, reflow: ReflowStrategy) -> Self {
        self.reflow = reflow;
        self
    }

    /// Parse a config from JSON. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidJson`] if the text is not a valid config
    /// object, or [`LayoutError::InvalidConfig`] if it fails [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the widths describe a usable column.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidConfig`] when `total_width` is not a
    /// positive finite number, when `gutter` is negative, non-finite, or not
    /// smaller than `total_width`, or when `overflow_margin` is negative or
    /// non-finite.
    pub fn validate(&self) -> Result<()> {
        if !self.total_width.is_finite() || self.total_width <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "total_width must be a positive finite number, got {}",
                self.total_width
            )));
        }
        if !self.gutter.is_finite() || self.gutter < 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "gutter must be a non-negative finite number, got {}",
                self.gutter
            )));
        }
        if self.gutter >= self.total_width {
            return Err(LayoutError::InvalidConfig(format!(
                "gutter ({}) must be smaller than total_width ({})",
                self.gutter, self.total_width
            )));
        }
        if !self.overflow_margin.is_finite() || self.overflow_margin < 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "overflow_margin must be a non-negative finite number, got {}",
                self.overflow_margin
            )));
        }
        Ok(())
    }

    /// Width an event gets when nothing collides with it.
    pub(crate) fn full_width(&self) -> f64 {
        self.total_width - self.gutter
    }

    /// Right-edge bound a cluster must stay under to be re-packed.
    pub(crate) fn repack_bound(&self) -> f64 {
        self.total_width - self.overflow_margin
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
