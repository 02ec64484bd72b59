/// Time for a full 0→1 reveal at a steady frame clock.
pub const REVEAL_DURATION_MS: f32 = 1500.0;
/// Distance from target below which a metric counts as settled.
pub const SETTLE_EPSILON: f32 = 0.001;

/// Number of samples the renderer may read for a metric at `progress`:
/// `floor((len - 1) * progress) + 1`, monotone in `progress`, exactly `len`
/// at 1, and zero while the metric is still fully hidden.
pub fn reveal_prefix(len: usize, progress: f32) -> usize {
    if len == 0 || progress <= 0.0 {
        return 0;
    }
    ((len - 1) as f32 * progress.min(1.0)).floor() as usize + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    Rising,
    Falling,
    #[default]
    Settled,
}

/// Reveal state of one metric: progress chases target at a constant rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    progress: f32,
    target: f32,
    phase: Phase,
}

impl Default for Metric {
    fn default() -> Self {
        Self {
            progress: 0.0,
            target: 0.0,
            phase: Phase::Settled,
        }
    }
}

impl Metric {
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_settled(&self) -> bool {
        self.phase == Phase::Settled
    }

    /// Retargets the metric; direction decides the new phase.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
        self.phase = if (self.progress - target).abs() <= SETTLE_EPSILON {
            self.progress = target;
            Phase::Settled
        } else if target > self.progress {
            Phase::Rising
        } else {
            Phase::Falling
        };
    }

    /// Back to a fully hidden metric, keeping the current target.
    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.set_target(self.target);
    }

    /// Jump straight to the target without animating.
    fn complete(&mut self) {
        self.progress = self.target;
        self.phase = Phase::Settled;
    }

    /// Moves `progress` one `step` toward the target, clamped so it never
    /// overshoots. Returns true while the metric still needs redrawing.
    fn advance(&mut self, step: f32) -> bool {
        match self.phase {
            Phase::Settled => false,
            Phase::Rising => {
                self.progress = (self.progress + step).min(self.target);
                self.settle_if_close();
                true
            }
            Phase::Falling => {
                self.progress = (self.progress - step).max(self.target);
                self.settle_if_close();
                true
            }
        }
    }

    fn settle_if_close(&mut self) {
        if (self.progress - self.target).abs() <= SETTLE_EPSILON {
            self.progress = self.target;
            self.phase = Phase::Settled;
        }
    }
}

/// Independent reveal animation for both metrics, driven by the host's frame
/// clock. Owns the shared frame-time anchor; the anchor clears whenever the
/// driver settles or resets, so a stale `now` from a superseded animation
/// cannot leak a huge delta into the next one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Driver {
    primary: Metric,
    secondary: Metric,
    last_frame_ms: Option<f64>,
}

impl Driver {
    pub fn primary(&self) -> &Metric {
        &self.primary
    }

    pub fn secondary(&self) -> &Metric {
        &self.secondary
    }

    pub fn set_targets(&mut self, primary_shown: bool, secondary_shown: bool) {
        self.primary.set_target(if primary_shown { 1.0 } else { 0.0 });
        self.secondary.set_target(if secondary_shown { 1.0 } else { 0.0 });
    }

    /// Left-to-right reveal from scratch, for a new series identity.
    pub fn reset(&mut self) {
        self.primary.reset();
        self.secondary.reset();
        self.last_frame_ms = None;
    }

    /// Skip to the final state, e.g. when there is nothing to reveal.
    pub fn complete(&mut self) {
        self.primary.complete();
        self.secondary.complete();
        self.last_frame_ms = None;
    }

    pub fn is_settled(&self) -> bool {
        self.primary.is_settled() && self.secondary.is_settled()
    }

    /// Advances both metrics by the real time elapsed since the previous
    /// tick. Returns true while a redraw is needed; once everything settles
    /// it returns false and the caller should stop scheduling frames.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if self.is_settled() {
            self.last_frame_ms = None;
            return false;
        }

        let delta = match self.last_frame_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);

        let step = delta as f32 / REVEAL_DURATION_MS;
        let primary_moved = self.primary.advance(step);
        let secondary_moved = self.secondary.advance(step);

        if self.is_settled() {
            self.last_frame_ms = None;
        }

        primary_moved || secondary_moved
    }
}
