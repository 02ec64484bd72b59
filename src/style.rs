use data::ThemeMode;
use data::util::Trend;
use iced_core::Color;

/// Fixed color set for one theme mode. Not a theming system; the dashboard
/// ships exactly these two palettes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub grid: Color,
    pub grid_zero: Color,
    pub threshold_bullish: Color,
    pub threshold_bearish: Color,
    pub band_bullish: Color,
    pub band_bearish: Color,
    pub primary: Color,
    pub secondary: Color,
    pub secondary_hover: Color,
    pub secondary_axis: Color,
    pub up: Color,
    pub down: Color,
    pub neutral: Color,
    pub axis_text: Color,
    pub muted_text: Color,
    pub marker_ring: Color,
    pub marker_ring_active: Color,
}

impl Palette {
    pub fn trend_color(&self, trend: Trend) -> Color {
        match trend {
            Trend::Up => self.up,
            Trend::Down => self.down,
            Trend::Neutral => self.neutral,
        }
    }
}

pub fn palette(mode: ThemeMode) -> Palette {
    match mode {
        ThemeMode::Dark => dark_palette(),
        ThemeMode::Light => light_palette(),
    }
}

fn dark_palette() -> Palette {
    Palette {
        background: Color::from_rgb8(10, 10, 10),
        axis_text: Color::from_rgb8(209, 213, 219),
        muted_text: Color::from_rgb8(209, 213, 219),
        ..base_palette()
    }
}

fn light_palette() -> Palette {
    Palette {
        background: Color::WHITE,
        axis_text: Color::from_rgb8(55, 65, 81),
        muted_text: Color::from_rgb8(107, 114, 128),
        ..base_palette()
    }
}

/// Colors shared by both modes.
fn base_palette() -> Palette {
    Palette {
        background: Color::BLACK,
        grid: Color::from_rgb8(107, 114, 128),
        grid_zero: Color::from_rgb8(209, 213, 219),
        threshold_bullish: Color::from_rgb8(52, 211, 153),
        threshold_bearish: Color::from_rgb8(248, 113, 113),
        band_bullish: Color::from_rgb8(34, 197, 94),
        band_bearish: Color::from_rgb8(239, 68, 68),
        primary: Color::from_rgb8(59, 130, 246),
        secondary: Color::from_rgb8(245, 158, 11),
        secondary_hover: Color::from_rgb8(252, 211, 77),
        secondary_axis: Color::from_rgb8(251, 191, 36),
        up: Color::from_rgb8(34, 197, 94),
        down: Color::from_rgb8(239, 68, 68),
        neutral: Color::from_rgb8(234, 179, 8),
        axis_text: Color::from_rgb8(209, 213, 219),
        muted_text: Color::from_rgb8(209, 213, 219),
        marker_ring: Color::from_rgb8(10, 10, 10),
        marker_ring_active: Color::WHITE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_differ_only_in_surface_colors() {
        let dark = palette(ThemeMode::Dark);
        let light = palette(ThemeMode::Light);

        assert_ne!(dark.background, light.background);
        assert_ne!(dark.axis_text, light.axis_text);
        assert_eq!(dark.primary, light.primary);
        assert_eq!(dark.up, light.up);
    }

    #[test]
    fn trend_colors_map_to_distinct_channels() {
        let palette = palette(ThemeMode::Dark);
        assert_eq!(palette.trend_color(Trend::Up), palette.up);
        assert_eq!(palette.trend_color(Trend::Down), palette.down);
        assert_eq!(palette.trend_color(Trend::Neutral), palette.neutral);
    }
}
