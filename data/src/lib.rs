pub mod chart;
pub mod layout;
pub mod series;
pub mod session;
pub mod util;

pub use chart::{Bounds, Config, Features, ThemeMode};
pub use layout::{Breakpoint, Viewport};
pub use series::{RawPoint, Sample, Series};
pub use session::SessionWindow;
pub use util::{RatioScale, Trend};

/// Decoding the raw feed payload is the only fallible boundary in this crate;
/// individual malformed rows are dropped with a warning instead.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("invalid feed payload: {0}")]
    Payload(#[from] serde_json::Error),
}
