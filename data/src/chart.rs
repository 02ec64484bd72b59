use serde::{Deserialize, Serialize};

use crate::session::SessionWindow;
use crate::util;

/// Display range of the bounded metric and the thresholds emphasized on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: f32,
    pub upper: f32,
    /// Grid line above which sentiment reads bullish.
    pub bullish: f32,
    /// Grid line below which sentiment reads bearish.
    pub bearish: f32,
    pub grid_step: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            lower: -120.0,
            upper: 120.0,
            bullish: 30.0,
            bearish: -30.0,
            grid_step: 30.0,
        }
    }
}

impl Bounds {
    /// Out-of-range values are visually truncated to this; the raw value is
    /// kept separately for tooltips.
    pub fn clamp(&self, value: f32) -> f32 {
        util::clamp(value, self.lower, self.upper)
    }

    pub fn span(&self) -> f32 {
        (self.upper - self.lower).max(f32::EPSILON)
    }

    /// Grid row values from `lower` to `upper` inclusive, at `grid_step`.
    pub fn grid_values(&self) -> Vec<f32> {
        if self.grid_step <= 0.0 {
            return vec![self.lower, self.upper];
        }

        let count = (self.span() / self.grid_step).round() as usize;
        (0..=count)
            .map(|i| self.lower + i as f32 * self.grid_step)
            .collect()
    }
}

/// The declared feature set that collapses the dashboard's chart variants
/// into one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    /// Ratio line, its axis and its tooltip rows.
    pub secondary_metric: bool,
    /// Shaded bands beyond the bullish/bearish thresholds.
    pub band_thresholds: bool,
    /// Keep the hover highlight when a same-key snapshot refreshes under the
    /// cursor; hover still clears unconditionally on pointer leave.
    pub sticky_hover: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            secondary_metric: true,
            band_thresholds: true,
            sticky_hover: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    pub bounds: Bounds,
    pub session: SessionWindow,
    pub features: Features,
    pub theme: ThemeMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_rows_cover_the_range_in_steps() {
        let values = Bounds::default().grid_values();
        assert_eq!(
            values,
            vec![-120.0, -90.0, -60.0, -30.0, 0.0, 30.0, 60.0, 90.0, 120.0]
        );
    }

    #[test]
    fn degenerate_grid_step_falls_back_to_endpoints() {
        let bounds = Bounds {
            grid_step: 0.0,
            ..Bounds::default()
        };
        assert_eq!(bounds.grid_values(), vec![-120.0, 120.0]);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = Config {
            features: Features {
                secondary_metric: false,
                sticky_hover: true,
                ..Features::default()
            },
            theme: ThemeMode::Light,
            ..Config::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(back, config);
    }
}
