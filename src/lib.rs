pub mod chart;
pub mod style;

pub use chart::hover::Tooltip;
pub use chart::render::{DrawList, DrawOp, Outline};
pub use chart::{ChartEngine, HoverState, NormalizedSample, Visibility};
pub use style::Palette;

pub use data::chart::{Bounds, Config, Features, ThemeMode};
pub use data::layout::{Breakpoint, Viewport};
pub use data::series::{RawPoint, Sample, Series};
pub use data::session::SessionWindow;
