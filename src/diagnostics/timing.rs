use serde::{Deserialize, Serialize};
use std::time::Instant;

pub const STAGE_PREPROCESS: &str = "preprocess";
pub const STAGE_LINES: &str = "lines";
pub const STAGE_SELECT: &str = "select";
pub const STAGE_CALIBRATE: &str = "calibrate";
pub const STAGE_STABILITY: &str = "stability";

/// Wall-clock cost of one stage of a tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

/// Per-stage timings of one tick, in execution order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming {
            label: label.into(),
            elapsed_ms,
        });
    }

    /// Runs `f`, recording its duration under `label`.
    pub fn measure<T>(&mut self, label: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.push(label, start.elapsed().as_secs_f64() * 1000.0);
        out
    }

    /// Sets `total_ms` to the sum of the recorded stages.
    pub fn finish(&mut self) {
        self.total_ms = self.stages.iter().map(|s| s.elapsed_ms).sum();
    }
}
