pub mod linear;
pub mod timeseries;

use data::chart::Bounds;
use data::util::RatioScale;
use iced_core::Rectangle;

/// Coordinate mapping for one layout pass: sample indices and values to
/// pixels inside the plot rectangle. The two vertical scales are independent
/// and share the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scales {
    pub plot: Rectangle,
    pub bounds: Bounds,
    pub ratio: Option<RatioScale>,
}

impl Scales {
    pub fn new(plot: Rectangle, bounds: Bounds, ratio: Option<RatioScale>) -> Self {
        Self { plot, bounds, ratio }
    }

    /// Linear index-to-x mapping; a lone sample sits at the horizontal
    /// midpoint of the plot instead of its left edge.
    pub fn x_at(&self, index: usize, total: usize) -> f32 {
        if total <= 1 {
            return self.plot.x + self.plot.width / 2.0;
        }
        self.plot.x + (index as f32 / (total - 1) as f32) * self.plot.width
    }

    /// Bounded-metric y: the upper bound maps to the plot's top edge, the
    /// lower bound to its bottom edge.
    pub fn y_bounded(&self, value: f32) -> f32 {
        self.plot.y + ((self.bounds.upper - value) / self.bounds.span()) * self.plot.height
    }

    /// Ratio-metric y for a normalized ratio in `[0, 1]`.
    pub fn y_ratio(&self, ratio: f32) -> f32 {
        self.plot.y + (1.0 - ratio) * self.plot.height
    }
}
