use super::Scales;

const THRESHOLD_EPSILON: f32 = 1e-3;

/// Stroke treatment of a horizontal grid row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Bullish,
    Bearish,
    Zero,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRow {
    pub value: f32,
    pub y: f32,
    pub emphasis: Emphasis,
}

/// Grid rows for the bounded metric at fixed value steps, with the zero line
/// and the two threshold lines marked for visual emphasis.
pub fn grid_rows(scales: &Scales) -> Vec<GridRow> {
    let bounds = scales.bounds;
    bounds
        .grid_values()
        .into_iter()
        .map(|value| {
            let emphasis = if (value - bounds.bullish).abs() < THRESHOLD_EPSILON {
                Emphasis::Bullish
            } else if (value - bounds.bearish).abs() < THRESHOLD_EPSILON {
                Emphasis::Bearish
            } else if value.abs() < THRESHOLD_EPSILON {
                Emphasis::Zero
            } else {
                Emphasis::Plain
            };

            GridRow {
                value,
                y: scales.y_bounded(value),
                emphasis,
            }
        })
        .collect()
}

/// Fixed label ratios of the ratio axis, bottom to top.
pub const RATIO_AXIS_STEPS: [f32; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

pub fn format_grid_value(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
