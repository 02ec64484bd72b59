use data::chart::Config;
use data::layout::Viewport;
use iced_core::alignment::Horizontal;
use iced_core::{Color, Point, Rectangle};

use super::animation::reveal_prefix;
use super::scale::linear::{self, Emphasis, RATIO_AXIS_STEPS};
use super::scale::timeseries;
use super::{NormalizedSample, Snapshot};
use crate::style::Palette;

const PRIMARY_STROKE: f32 = 4.0;
const SECONDARY_STROKE: f32 = 2.0;
const GRID_STROKE: f32 = 1.0;
const THRESHOLD_STROKE: f32 = 3.0;

const HOVER_MARKER_RADIUS: f32 = 8.0;
const LAST_MARKER_RADIUS: f32 = 6.0;
const HOVER_RING_WIDTH: f32 = 3.0;
const LAST_RING_WIDTH: f32 = 2.0;

const VALUE_TEXT_SIZE: f32 = 11.0;
const EMPTY_STATE_TEXT_SIZE: f32 = 14.0;

const AXIS_LABEL_GAP: f32 = 10.0;
const LABEL_BASELINE_NUDGE: f32 = 4.0;
const VALUE_LABEL_RISE: f32 = 10.0;
const RATIO_LABEL_DROP: f32 = 15.0;
const X_LABEL_DROP: f32 = 20.0;

const BAND_ALPHA_STRONG: f32 = 0.3;
const BAND_ALPHA_FAINT: f32 = 0.05;

/// Samples on this time-of-day granularity carry an inline value label.
const VALUE_LABEL_GRANULARITY_MINUTES: u16 = 30;

pub const EMPTY_STATE_MESSAGE: &str = "No data available for market hours";

/// One drawing operation for the host's surface. The list is ordered
/// back-to-front; a surface that replays it in order reproduces the frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        bounds: Rectangle,
        color: Color,
    },
    /// Vertical two-stop gradient fill.
    GradientV {
        bounds: Rectangle,
        top: Color,
        bottom: Color,
    },
    Line {
        from: Point,
        to: Point,
        width: f32,
        color: Color,
    },
    Polyline {
        points: Vec<Point>,
        width: f32,
        color: Color,
    },
    Circle {
        center: Point,
        radius: f32,
        fill: Color,
        outline: Option<Outline>,
    },
    Text {
        content: String,
        position: Point,
        size: f32,
        color: Color,
        align: Horizontal,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub width: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }
}

impl IntoIterator for DrawList {
    type Item = DrawOp;
    type IntoIter = std::vec::IntoIter<DrawOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

/// Assembles one frame, back to front: background, threshold bands, grid,
/// axis labels, the two metric lines with their markers and value labels,
/// and finally the decimated x-axis time labels so nothing occludes them.
pub(super) fn frame(
    config: &Config,
    palette: &Palette,
    snapshot: &Snapshot,
    primary_progress: f32,
    secondary_progress: f32,
) -> DrawList {
    let mut ops = DrawList::default();

    background(&mut ops, snapshot.viewport, palette);

    if config.features.band_thresholds {
        threshold_bands(&mut ops, palette, snapshot);
    }

    grid(&mut ops, palette, snapshot);

    let ratio_axis_shown = config.features.secondary_metric
        && snapshot.visibility.secondary
        && snapshot.scales.ratio.is_some();
    if ratio_axis_shown {
        ratio_axis(&mut ops, palette, snapshot);
    }

    if primary_progress > 0.0 {
        primary_line(&mut ops, config, palette, snapshot, primary_progress);
    }

    if config.features.secondary_metric
        && secondary_progress > 0.0
        && snapshot.scales.ratio.is_some()
    {
        secondary_line(&mut ops, config, palette, snapshot, secondary_progress);
    }

    x_labels(&mut ops, config, palette, snapshot);

    ops
}

/// The terminal state for a session window with nothing in it: background
/// plus a single centered message, everything else skipped.
pub(super) fn empty_state(viewport: Viewport, palette: &Palette) -> DrawList {
    let mut ops = DrawList::default();
    background(&mut ops, viewport, palette);
    ops.push(DrawOp::Text {
        content: EMPTY_STATE_MESSAGE.to_string(),
        position: Point::new(viewport.width / 2.0, viewport.height / 2.0),
        size: EMPTY_STATE_TEXT_SIZE,
        color: palette.muted_text,
        align: Horizontal::Center,
    });
    ops
}

fn background(ops: &mut DrawList, viewport: Viewport, palette: &Palette) {
    ops.push(DrawOp::Rect {
        bounds: Rectangle {
            x: 0.0,
            y: 0.0,
            width: viewport.width,
            height: viewport.height,
        },
        color: palette.background,
    });
}

/// Decorative gradients beyond the thresholds; they never affect coordinate
/// math, only sit behind the grid.
fn threshold_bands(ops: &mut DrawList, palette: &Palette, snapshot: &Snapshot) {
    let scales = &snapshot.scales;
    let plot = scales.plot;

    let bullish_y = scales.y_bounded(scales.bounds.bullish);
    if bullish_y > plot.y {
        ops.push(DrawOp::GradientV {
            bounds: Rectangle {
                x: plot.x,
                y: plot.y,
                width: plot.width,
                height: bullish_y - plot.y,
            },
            top: palette.band_bullish.scale_alpha(BAND_ALPHA_FAINT),
            bottom: palette.band_bullish.scale_alpha(BAND_ALPHA_STRONG),
        });
    }

    let bearish_y = scales.y_bounded(scales.bounds.bearish);
    let plot_bottom = plot.y + plot.height;
    if bearish_y < plot_bottom {
        ops.push(DrawOp::GradientV {
            bounds: Rectangle {
                x: plot.x,
                y: bearish_y,
                width: plot.width,
                height: plot_bottom - bearish_y,
            },
            top: palette.band_bearish.scale_alpha(BAND_ALPHA_STRONG),
            bottom: palette.band_bearish.scale_alpha(BAND_ALPHA_FAINT),
        });
    }
}

fn grid(ops: &mut DrawList, palette: &Palette, snapshot: &Snapshot) {
    let plot = snapshot.scales.plot;

    for row in linear::grid_rows(&snapshot.scales) {
        let (color, width) = match row.emphasis {
            Emphasis::Bullish => (palette.threshold_bullish, THRESHOLD_STROKE),
            Emphasis::Bearish => (palette.threshold_bearish, THRESHOLD_STROKE),
            Emphasis::Zero => (palette.grid_zero, GRID_STROKE),
            Emphasis::Plain => (palette.grid, GRID_STROKE),
        };

        ops.push(DrawOp::Line {
            from: Point::new(plot.x, row.y),
            to: Point::new(plot.x + plot.width, row.y),
            width,
            color,
        });

        if snapshot.visibility.primary {
            ops.push(DrawOp::Text {
                content: linear::format_grid_value(row.value),
                position: Point::new(plot.x - AXIS_LABEL_GAP, row.y + LABEL_BASELINE_NUDGE),
                size: snapshot.metrics.axis_text_size,
                color: palette.axis_text,
                align: Horizontal::Right,
            });
        }
    }
}

/// Labels for the ratio axis on the opposite edge, spaced at fixed ratios of
/// the currently visible min/max.
fn ratio_axis(ops: &mut DrawList, palette: &Palette, snapshot: &Snapshot) {
    let Some(ratio_scale) = snapshot.scales.ratio else {
        return;
    };
    let plot = snapshot.scales.plot;

    for step in RATIO_AXIS_STEPS {
        ops.push(DrawOp::Text {
            content: format!("{:.2}", ratio_scale.value_at(step)),
            position: Point::new(
                plot.x + plot.width + AXIS_LABEL_GAP,
                snapshot.scales.y_ratio(step) + LABEL_BASELINE_NUDGE,
            ),
            size: snapshot.metrics.axis_text_size,
            color: palette.secondary_axis,
            align: Horizontal::Left,
        });
    }
}

fn labeled_minute(config: &Config, sample: &NormalizedSample) -> bool {
    config
        .session
        .minute_of_day(sample.time)
        .is_some_and(|minute| minute % VALUE_LABEL_GRANULARITY_MINUTES == 0)
}

fn primary_line(
    ops: &mut DrawList,
    config: &Config,
    palette: &Palette,
    snapshot: &Snapshot,
    progress: f32,
) {
    let scales = &snapshot.scales;
    let total = snapshot.samples.len();
    let prefix = reveal_prefix(total, progress);
    if prefix == 0 {
        return;
    }
    let visible = &snapshot.samples[..prefix];

    let points: Vec<Point> = visible
        .iter()
        .map(|sample| {
            Point::new(
                scales.x_at(sample.index, total),
                scales.y_bounded(sample.bounded),
            )
        })
        .collect();

    if points.len() >= 2 {
        ops.push(DrawOp::Polyline {
            points: points.clone(),
            width: PRIMARY_STROKE,
            color: palette.primary,
        });
    }

    for (sample, point) in visible.iter().zip(&points) {
        let hovered = snapshot.hover == Some(sample.index);
        let is_last = sample.index == prefix - 1;

        if hovered || is_last {
            ops.push(DrawOp::Circle {
                center: *point,
                radius: if hovered { HOVER_MARKER_RADIUS } else { LAST_MARKER_RADIUS },
                fill: palette.trend_color(sample.trend),
                outline: Some(marker_outline(hovered, palette)),
            });
        }

        if labeled_minute(config, sample) || is_last {
            ops.push(DrawOp::Text {
                content: format!("{:.1}", sample.bounded),
                position: Point::new(point.x, point.y - VALUE_LABEL_RISE),
                size: VALUE_TEXT_SIZE,
                color: palette.primary,
                align: Horizontal::Center,
            });
        }
    }
}

/// The ratio polyline breaks at samples without a ratio; gaps are never
/// interpolated across.
fn secondary_line(
    ops: &mut DrawList,
    config: &Config,
    palette: &Palette,
    snapshot: &Snapshot,
    progress: f32,
) {
    let scales = &snapshot.scales;
    let total = snapshot.samples.len();
    let prefix = reveal_prefix(total, progress);
    if prefix == 0 {
        return;
    }
    let visible = &snapshot.samples[..prefix];

    let mut segment: Vec<Point> = Vec::new();
    for sample in visible {
        match sample.ratio_norm {
            Some(norm) => segment.push(Point::new(
                scales.x_at(sample.index, total),
                scales.y_ratio(norm),
            )),
            None => flush_segment(ops, &mut segment, palette),
        }
    }
    flush_segment(ops, &mut segment, palette);

    for sample in visible {
        let (Some(ratio), Some(norm)) = (sample.ratio, sample.ratio_norm) else {
            continue;
        };
        let point = Point::new(scales.x_at(sample.index, total), scales.y_ratio(norm));

        let hovered = snapshot.hover == Some(sample.index);
        let is_last = sample.index == prefix - 1;

        if hovered || is_last {
            ops.push(DrawOp::Circle {
                center: point,
                radius: if hovered { HOVER_MARKER_RADIUS } else { LAST_MARKER_RADIUS },
                fill: if hovered { palette.secondary_hover } else { palette.secondary },
                outline: Some(marker_outline(hovered, palette)),
            });
        }

        if labeled_minute(config, sample) || is_last {
            ops.push(DrawOp::Text {
                content: format!("{ratio:.3}"),
                position: Point::new(point.x, point.y + RATIO_LABEL_DROP),
                size: VALUE_TEXT_SIZE,
                color: palette.secondary,
                align: Horizontal::Center,
            });
        }
    }
}

fn flush_segment(ops: &mut DrawList, segment: &mut Vec<Point>, palette: &Palette) {
    if segment.len() >= 2 {
        ops.push(DrawOp::Polyline {
            points: segment.clone(),
            width: SECONDARY_STROKE,
            color: palette.secondary,
        });
    }
    segment.clear();
}

fn x_labels(ops: &mut DrawList, config: &Config, palette: &Palette, snapshot: &Snapshot) {
    let total = snapshot.samples.len();
    let indices = timeseries::label_indices(total, snapshot.metrics.max_x_labels);
    let y = snapshot.viewport.height - snapshot.metrics.padding.bottom + X_LABEL_DROP;

    for sample in &snapshot.samples {
        if !indices.contains(&sample.index) {
            continue;
        }
        ops.push(DrawOp::Text {
            content: config.session.format_label(sample.time),
            position: Point::new(snapshot.scales.x_at(sample.index, total), y),
            size: snapshot.metrics.x_label_text_size,
            color: palette.axis_text,
            align: Horizontal::Center,
        });
    }
}

fn marker_outline(hovered: bool, palette: &Palette) -> Outline {
    if hovered {
        Outline {
            width: HOVER_RING_WIDTH,
            color: palette.marker_ring_active,
        }
    } else {
        Outline {
            width: LAST_RING_WIDTH,
            color: palette.marker_ring,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::scale::Scales;
    use crate::chart::{Snapshot, Visibility, normalize};
    use crate::style;
    use data::chart::{Features, ThemeMode};
    use data::layout::{self, Breakpoint};
    use data::series::Sample;
    use data::util::RatioScale;

    const MIDNIGHT_MS: u64 = 1_717_372_800_000;

    fn at(hour: u32, minute: u32) -> u64 {
        MIDNIGHT_MS + u64::from(hour * 60 + minute) * 60_000
    }

    fn sample(hour: u32, minute: u32, imbalance: f32, ratio: Option<f32>) -> Sample {
        Sample {
            time: at(hour, minute),
            imbalance,
            ratio,
        }
    }

    fn snapshot_for(samples: &[Sample], hover: Option<usize>) -> (Config, Snapshot) {
        let config = Config::default();
        let viewport = Viewport::new(1280.0, 320.0);
        let plot = viewport.plot_area().unwrap();
        let ratio = RatioScale::from_values(samples.iter().filter_map(|s| s.ratio));
        let scales = Scales::new(plot, config.bounds, ratio);
        let normalized = normalize(samples, &config.bounds, ratio.as_ref());

        let snapshot = Snapshot {
            samples: normalized,
            scales,
            viewport,
            metrics: layout::metrics(Breakpoint::Desktop),
            visibility: Visibility::default(),
            hover,
        };
        (config, snapshot)
    }

    fn full_frame(samples: &[Sample], hover: Option<usize>) -> DrawList {
        let (config, snapshot) = snapshot_for(samples, hover);
        let palette = style::palette(ThemeMode::Dark);
        frame(&config, &palette, &snapshot, 1.0, 1.0)
    }

    fn polyline_point_counts(list: &DrawList, width: f32) -> Vec<usize> {
        list.ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Polyline { points, width: w, .. } if *w == width => Some(points.len()),
                _ => None,
            })
            .collect()
    }

    fn default_samples() -> Vec<Sample> {
        vec![
            sample(9, 15, 10.0, Some(0.8)),
            sample(9, 45, 40.0, Some(1.1)),
            sample(10, 15, -50.0, Some(0.9)),
        ]
    }

    #[test]
    fn frame_layers_background_first_and_x_labels_last() {
        let list = full_frame(&default_samples(), None);

        assert!(matches!(list.ops()[0], DrawOp::Rect { .. }));
        assert!(matches!(list.ops()[1], DrawOp::GradientV { .. }));
        assert!(matches!(
            list.ops().last().unwrap(),
            DrawOp::Text { align: Horizontal::Center, .. }
        ));

        // both gradients precede every grid line
        let last_gradient = list
            .ops()
            .iter()
            .rposition(|op| matches!(op, DrawOp::GradientV { .. }))
            .unwrap();
        let first_line = list
            .ops()
            .iter()
            .position(|op| matches!(op, DrawOp::Line { .. }))
            .unwrap();
        assert!(last_gradient < first_line);
    }

    #[test]
    fn reveal_progress_limits_the_drawn_prefix() {
        let samples: Vec<Sample> = (0..5)
            .map(|i| sample(9, 15 + i, i as f32 * 10.0, None))
            .collect();
        let (config, snapshot) = snapshot_for(&samples, None);
        let palette = style::palette(ThemeMode::Dark);

        let list = frame(&config, &palette, &snapshot, 0.5, 0.0);

        // floor((5 - 1) * 0.5) + 1 = 3 points
        assert_eq!(polyline_point_counts(&list, PRIMARY_STROKE), vec![3]);

        let list = frame(&config, &palette, &snapshot, 1.0, 0.0);
        assert_eq!(polyline_point_counts(&list, PRIMARY_STROKE), vec![5]);

        let list = frame(&config, &palette, &snapshot, 0.0, 0.0);
        assert!(polyline_point_counts(&list, PRIMARY_STROKE).is_empty());
    }

    #[test]
    fn missing_ratio_breaks_the_secondary_line() {
        let samples = vec![
            sample(9, 15, 1.0, Some(0.8)),
            sample(9, 16, 2.0, Some(0.9)),
            sample(9, 17, 3.0, None),
            sample(9, 18, 4.0, Some(1.0)),
            sample(9, 19, 5.0, Some(1.1)),
        ];

        let list = full_frame(&samples, None);

        assert_eq!(polyline_point_counts(&list, SECONDARY_STROKE), vec![2, 2]);
    }

    #[test]
    fn markers_only_on_hovered_and_last_point() {
        let list = full_frame(&default_samples(), Some(0));

        let circles: Vec<_> = list
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Circle { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();

        // hovered + last for each of the two metrics
        assert_eq!(circles.len(), 4);
        assert_eq!(circles.iter().filter(|r| **r == HOVER_MARKER_RADIUS).count(), 2);
        assert_eq!(circles.iter().filter(|r| **r == LAST_MARKER_RADIUS).count(), 2);
    }

    #[test]
    fn primary_markers_take_the_trend_color() {
        let palette = style::palette(ThemeMode::Dark);
        // samples: 10 -> 40 (up) -> -50 (down); hover the middle one
        let list = full_frame(&default_samples(), Some(1));

        let fills: Vec<Color> = list
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Circle { fill, radius, .. } if *radius == HOVER_MARKER_RADIUS => {
                    Some(*fill)
                }
                _ => None,
            })
            .collect();

        assert!(fills.contains(&palette.up));
    }

    #[test]
    fn value_labels_on_half_hours_and_last_point() {
        let samples = vec![
            sample(9, 15, 10.0, None),
            sample(9, 30, 20.0, None),
            sample(9, 47, 30.0, None),
            sample(10, 0, 40.0, None),
            sample(10, 12, 50.0, None),
        ];

        let list = full_frame(&samples, None);

        let value_labels: Vec<&str> = list
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { content, size, .. } if *size == VALUE_TEXT_SIZE => {
                    Some(content.as_str())
                }
                _ => None,
            })
            .collect();

        // 09:30 and 10:00 by granularity, 10:12 as the last point
        assert_eq!(value_labels, vec!["20.0", "40.0", "50.0"]);
    }

    #[test]
    fn bands_are_omitted_when_the_feature_is_off() {
        let (mut config, snapshot) = snapshot_for(&default_samples(), None);
        config.features = Features {
            band_thresholds: false,
            ..config.features
        };
        let palette = style::palette(ThemeMode::Dark);

        let list = frame(&config, &palette, &snapshot, 1.0, 1.0);

        assert!(
            !list
                .ops()
                .iter()
                .any(|op| matches!(op, DrawOp::GradientV { .. }))
        );
    }

    #[test]
    fn empty_state_draws_only_background_and_message() {
        let palette = style::palette(ThemeMode::Dark);
        let list = empty_state(Viewport::new(800.0, 320.0), &palette);

        assert_eq!(list.len(), 2);
        assert!(matches!(list.ops()[0], DrawOp::Rect { .. }));
        match &list.ops()[1] {
            DrawOp::Text { content, position, .. } => {
                assert_eq!(content, EMPTY_STATE_MESSAGE);
                assert_eq!((position.x, position.y), (400.0, 160.0));
            }
            other => panic!("expected centered text, got {other:?}"),
        }
    }

    #[test]
    fn ratio_axis_labels_span_the_visible_range() {
        let list = full_frame(&default_samples(), None);

        let axis_labels: Vec<&str> = list
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { content, align: Horizontal::Left, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect();

        assert_eq!(axis_labels.len(), RATIO_AXIS_STEPS.len());
        assert_eq!(axis_labels.first(), Some(&"0.80"));
        assert_eq!(axis_labels.last(), Some(&"1.10"));
    }
}
