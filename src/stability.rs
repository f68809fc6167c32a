//! Debounced stabilisation of per-frame height deltas.
//!
//! The filter keeps the last `history_length` deltas in arrival order. A
//! full window is *consistent* when every entry, and the newest one in
//! particular, lies strictly within `threshold` of the window mean. A
//! consistent window publishes its mean as a [`StableMeasurement`] unless a
//! previous publication happened less than `display_hold_secs` ago.
//!
//! The same [`WindowStats`] drives both the consistency check and the
//! published value.
use crate::error::{invalid_config, Result};
use crate::types::StableMeasurement;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityOptions {
    /// Window capacity `N`.
    pub history_length: usize,
    /// Strict bound on each entry's deviation from the window mean.
    pub threshold: f32,
    /// Minimum time between two publications.
    pub display_hold_secs: f64,
}

impl Default for StabilityOptions {
    fn default() -> Self {
        Self {
            history_length: 10,
            threshold: 2.0,
            display_hold_secs: 3.0,
        }
    }
}

impl StabilityOptions {
    pub fn validate(&self) -> Result<()> {
        self.hold().map(|_| ())
    }

    fn hold(&self) -> Result<Duration> {
        if self.history_length == 0 {
            return Err(invalid_config("history_length must be >= 1"));
        }
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(invalid_config(format!(
                "stability threshold must be finite and > 0, got {}",
                self.threshold
            )));
        }
        Duration::try_from_secs_f64(self.display_hold_secs).map_err(|_| {
            invalid_config(format!(
                "display_hold_secs must be finite and >= 0, got {}",
                self.display_hold_secs
            ))
        })
    }
}

/// Where the filter stands after the latest push.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StabilityState {
    /// Window not yet full, or the full window is inconsistent.
    #[default]
    Accumulating,
    /// Consistent window held back by the debounce interval; its mean differs
    /// from the published value by at least `threshold`.
    Evaluating,
    /// A value is published and the current window agrees with it.
    Stable,
}

/// Mean of the window and the largest absolute deviation from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowStats {
    pub mean: f32,
    pub max_deviation: f32,
}

impl WindowStats {
    fn of(values: &VecDeque<f32>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mean = values.iter().sum::<f32>() / values.len() as f32;
        let max_deviation = values.iter().map(|v| (v - mean).abs()).fold(0.0f32, f32::max);
        Some(Self {
            mean,
            max_deviation,
        })
    }
}

#[derive(Clone, Debug)]
pub struct StabilityFilter {
    opts: StabilityOptions,
    hold: Duration,
    history: VecDeque<f32>,
    stable: Option<StableMeasurement>,
    last_established: Option<Duration>,
    state: StabilityState,
}

impl StabilityFilter {
    pub fn new(opts: StabilityOptions) -> Result<Self> {
        let hold = opts.hold()?;
        Ok(Self {
            history: VecDeque::with_capacity(opts.history_length),
            opts,
            hold,
            stable: None,
            last_established: None,
            state: StabilityState::Accumulating,
        })
    }

    pub fn options(&self) -> &StabilityOptions {
        &self.opts
    }

    /// Replaces the tunables; a shorter window drops its oldest entries.
    pub fn set_options(&mut self, opts: StabilityOptions) -> Result<()> {
        self.hold = opts.hold()?;
        while self.history.len() > opts.history_length {
            self.history.pop_front();
        }
        self.opts = opts;
        Ok(())
    }

    /// Records one delta taken at `at`; returns the measurement if one was
    /// published by this push.
    pub fn push(&mut self, delta: f32, at: Duration) -> Option<StableMeasurement> {
        self.history.push_back(delta);
        while self.history.len() > self.opts.history_length {
            self.history.pop_front();
        }

        let Some(stats) = self.window_stats() else {
            self.state = StabilityState::Accumulating;
            return None;
        };
        let threshold = self.opts.threshold;
        let consistent = stats.max_deviation < threshold && (delta - stats.mean).abs() < threshold;
        if !consistent {
            debug!(
                "stability window inconsistent mean={:.3} max_dev={:.3}",
                stats.mean, stats.max_deviation
            );
            self.state = StabilityState::Accumulating;
            return None;
        }

        let hold_elapsed = self
            .last_established
            .map_or(true, |t| at.saturating_sub(t) >= self.hold);
        if hold_elapsed {
            let published = StableMeasurement {
                value: stats.mean,
                established_at: at,
            };
            info!("New stable height measurement: {:.1}", published.value);
            self.stable = Some(published);
            self.last_established = Some(at);
            self.state = StabilityState::Stable;
            return Some(published);
        }

        self.state = match self.stable {
            Some(s) if (s.value - stats.mean).abs() < threshold => StabilityState::Stable,
            _ => StabilityState::Evaluating,
        };
        None
    }

    /// Statistics of the window, `None` until it holds `history_length` entries.
    pub fn window_stats(&self) -> Option<WindowStats> {
        if self.history.len() < self.opts.history_length {
            return None;
        }
        WindowStats::of(&self.history)
    }

    /// Clears history, the published value and the debounce timestamp.
    pub fn reset(&mut self) {
        self.history.clear();
        self.stable = None;
        self.last_established = None;
        self.state = StabilityState::Accumulating;
    }

    pub fn stable(&self) -> Option<StableMeasurement> {
        self.stable
    }

    pub fn state(&self) -> StabilityState {
        self.state
    }

    /// `(filled, capacity)` of the history window.
    pub fn progress(&self) -> (usize, usize) {
        (self.history.len(), self.opts.history_length)
    }
}
