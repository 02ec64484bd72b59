pub mod animation;
pub mod hover;
pub mod render;
pub(crate) mod scale;

use data::chart::{Bounds, Config};
use data::layout::{self, Metrics, Viewport};
use data::series::{Sample, Series};
use data::util::{RatioScale, Trend};
use iced_core::Point;
use log::debug;

use animation::Driver;
use hover::Tooltip;
use render::DrawList;
use scale::Scales;

use crate::style;

const TOOLTIP_RISE: f32 = 10.0;

/// Index of the hovered sample, if any.
pub type HoverState = Option<usize>;

/// Which metrics the host currently shows; toggling one animates its reveal
/// in or out without touching the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Visibility {
    pub primary: bool,
    pub secondary: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            primary: true,
            secondary: true,
        }
    }
}

/// A filtered sample projected into display space. Recomputed every render,
/// never persisted; `raw` keeps the unclamped value for tooltips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedSample {
    pub index: usize,
    pub time: u64,
    pub x_ratio: f32,
    pub raw: f32,
    pub bounded: f32,
    pub trend: Trend,
    pub ratio: Option<f32>,
    pub ratio_norm: Option<f32>,
}

/// Everything `on_frame` needs to redraw without the caller re-supplying
/// inputs: the filtered samples, the scales of this layout pass, and the
/// hover/visibility flags of the latest render.
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    pub(crate) samples: Vec<NormalizedSample>,
    pub(crate) scales: Scales,
    pub(crate) viewport: Viewport,
    pub(crate) metrics: Metrics,
    pub(crate) visibility: Visibility,
    pub(crate) hover: HoverState,
}

pub(crate) fn normalize(
    filtered: &[Sample],
    bounds: &Bounds,
    ratio_scale: Option<&RatioScale>,
) -> Vec<NormalizedSample> {
    let total = filtered.len();
    let mut previous: Option<f32> = None;

    filtered
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            let bounded = bounds.clamp(sample.imbalance);
            let trend = Trend::classify(bounded, previous);
            previous = Some(bounded);

            let x_ratio = if total <= 1 {
                0.5
            } else {
                index as f32 / (total - 1) as f32
            };
            let ratio = sample.ratio.filter(|r| r.is_finite());
            let ratio_norm = match (ratio, ratio_scale) {
                (Some(value), Some(scale)) => Some(scale.normalize(value)),
                _ => None,
            };

            NormalizedSample {
                index,
                time: sample.time,
                x_ratio,
                raw: sample.imbalance,
                bounded,
                trend,
                ratio,
                ratio_norm,
            }
        })
        .collect()
}

/// The dual-metric session chart engine.
///
/// One owned object, driven by the host: `render` with a finished series
/// snapshot per refresh, `on_frame` with the display clock while the reveal
/// animation runs, `hit_test`/`tooltip` on pointer events. A change of
/// `Series::key` resets the reveal; nothing here blocks or locks.
pub struct ChartEngine {
    config: Config,
    animation: Driver,
    series_key: Option<String>,
    snapshot: Option<Snapshot>,
}

impl ChartEngine {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            animation: Driver::default(),
            series_key: None,
            snapshot: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Filters, normalizes and assembles a frame for the given snapshot,
    /// caching the inputs so `on_frame` can redraw on its own.
    ///
    /// Degenerate inputs never fail: an unlaid-out viewport renders nothing,
    /// and an empty session window renders the explicit no-data state.
    pub fn render(
        &mut self,
        series: &Series,
        viewport: Viewport,
        visibility: Visibility,
        hover: HoverState,
    ) -> DrawList {
        let key_changed = self.series_key.as_deref() != Some(series.key.as_str());
        if key_changed {
            debug!("new series identity {:?}, restarting reveal", series.key);
            self.series_key = Some(series.key.clone());
            self.animation.reset();
        }

        let Some(plot) = viewport.plot_area() else {
            self.snapshot = None;
            return DrawList::default();
        };

        let palette = style::palette(self.config.theme);

        let filtered = self.config.session.filter(&series.samples);
        if filtered.is_empty() {
            self.animation.complete();
            self.snapshot = None;
            return render::empty_state(viewport, &palette);
        }

        self.animation.set_targets(
            visibility.primary,
            visibility.secondary && self.config.features.secondary_metric,
        );

        let ratio_scale = if self.config.features.secondary_metric {
            RatioScale::from_values(filtered.iter().filter_map(|sample| sample.ratio))
        } else {
            None
        };
        let samples = normalize(&filtered, &self.config.bounds, ratio_scale.as_ref());
        let scales = Scales::new(plot, self.config.bounds, ratio_scale);
        let metrics = layout::metrics(viewport.breakpoint());

        // a retained hover never crosses into a new dataset; the host-passed
        // one is taken at face value and clamped to the filtered length
        let previous_hover = self.snapshot.as_ref().and_then(|snapshot| snapshot.hover);
        let hover = if self.config.features.sticky_hover && !key_changed {
            hover.or(previous_hover)
        } else {
            hover
        };
        let hover = hover.filter(|&index| index < samples.len());

        let snapshot = Snapshot {
            samples,
            scales,
            viewport,
            metrics,
            visibility,
            hover,
        };
        let list = render::frame(
            &self.config,
            &palette,
            &snapshot,
            self.animation.primary().progress(),
            self.animation.secondary().progress(),
        );
        self.snapshot = Some(snapshot);
        list
    }

    /// Advances the reveal animation and redraws from the cached inputs.
    /// `None` means nothing is animating and the host should stop scheduling
    /// frames until the next state-changing event.
    pub fn on_frame(&mut self, now_ms: f64) -> Option<DrawList> {
        if self.snapshot.is_none() {
            return None;
        }
        if !self.animation.tick(now_ms) {
            return None;
        }

        let snapshot = self.snapshot.as_ref()?;
        Some(render::frame(
            &self.config,
            &style::palette(self.config.theme),
            snapshot,
            self.animation.primary().progress(),
            self.animation.secondary().progress(),
        ))
    }

    pub fn is_animating(&self) -> bool {
        self.snapshot.is_some() && !self.animation.is_settled()
    }

    /// Nearest sample under the pointer, x-only; `None` outside the plot's
    /// horizontal span. Runs on input events, independent of the animation.
    pub fn hit_test(&self, pointer_x: f32, _pointer_y: f32) -> HoverState {
        let snapshot = self.snapshot.as_ref()?;
        hover::nearest_index(pointer_x, &snapshot.scales.plot, snapshot.samples.len())
    }

    /// Tooltip payload for a hovered index, anchored above the sample point.
    /// Shows the raw (unclamped) imbalance; rows follow the visibility
    /// toggles of the latest render.
    pub fn tooltip(&self, index: usize) -> Option<Tooltip> {
        let snapshot = self.snapshot.as_ref()?;
        let sample = snapshot.samples.get(index)?;
        let total = snapshot.samples.len();

        let mut lines = vec![format!(
            "Time: {}",
            self.config.session.format_label(sample.time)
        )];
        if snapshot.visibility.primary {
            lines.push(format!("Imbalance: {:.2}", sample.raw));
        }
        if self.config.features.secondary_metric
            && snapshot.visibility.secondary
            && let Some(ratio) = sample.ratio
        {
            lines.push(format!("PCR: {ratio:.4}"));
        }

        let anchor = Point::new(
            snapshot.scales.x_at(index, total),
            snapshot.scales.y_bounded(sample.bounded) - TOOLTIP_RISE,
        );

        Some(Tooltip { anchor, lines })
    }

    /// Pointer left the chart: the hover highlight goes away immediately and
    /// unconditionally, sticky or not.
    pub fn clear_hover(&mut self) {
        if let Some(snapshot) = &mut self.snapshot {
            snapshot.hover = None;
        }
    }
}
