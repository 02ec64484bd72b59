use enum_map::{Enum, EnumMap, enum_map};
use iced_core::Rectangle;
use serde::{Deserialize, Serialize};

const TABLET_MIN_WIDTH: f32 = 640.0;
const DESKTOP_MIN_WIDTH: f32 = 1024.0;

/// Canvas size supplied by the host on layout change; read-only to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn breakpoint(&self) -> Breakpoint {
        if self.width < TABLET_MIN_WIDTH {
            Breakpoint::Mobile
        } else if self.width < DESKTOP_MIN_WIDTH {
            Breakpoint::Tablet
        } else {
            Breakpoint::Desktop
        }
    }

    /// The plot rectangle left after breakpoint padding, computed once per
    /// layout pass. `None` while the host is not laid out yet (zero or
    /// negative area) so the caller can short-circuit the whole render.
    pub fn plot_area(&self) -> Option<Rectangle> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }

        let padding = metrics(self.breakpoint()).padding;
        let width = self.width - padding.left - padding.right;
        let height = self.height - padding.top - padding.bottom;
        if width <= 0.0 || height <= 0.0 {
            return None;
        }

        Some(Rectangle {
            x: padding.left,
            y: padding.top,
            width,
            height,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum, Serialize, Deserialize)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

/// Per-breakpoint layout constants: padding, text sizes, and how many x-axis
/// labels fit before decimation kicks in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub padding: Padding,
    pub axis_text_size: f32,
    pub x_label_text_size: f32,
    pub max_x_labels: usize,
}

fn table() -> EnumMap<Breakpoint, Metrics> {
    enum_map! {
        Breakpoint::Mobile => Metrics {
            padding: Padding { top: 20.0, right: 25.0, bottom: 30.0, left: 30.0 },
            axis_text_size: 11.0,
            x_label_text_size: 10.0,
            max_x_labels: 4,
        },
        Breakpoint::Tablet => Metrics {
            padding: Padding { top: 30.0, right: 40.0, bottom: 40.0, left: 40.0 },
            axis_text_size: 13.0,
            x_label_text_size: 12.0,
            max_x_labels: 6,
        },
        Breakpoint::Desktop => Metrics {
            padding: Padding { top: 40.0, right: 60.0, bottom: 60.0, left: 60.0 },
            axis_text_size: 13.0,
            x_label_text_size: 12.0,
            max_x_labels: 8,
        },
    }
}

pub fn metrics(breakpoint: Breakpoint) -> Metrics {
    table()[breakpoint]
}
