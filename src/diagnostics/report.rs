use super::timing::TimingBreakdown;
use crate::select::ReferencePair;
use crate::stability::StabilityState;
use crate::types::{RawMeasurement, StableMeasurement};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

/// Fill level of the stability window after the tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StabilityProgress {
    pub filled: usize,
    pub capacity: usize,
    pub state: StabilityState,
}

/// Everything a rendering sink needs to draw one tick.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    pub input: InputDescriptor,
    pub unit_label: String,
    /// Segments reported by the line detector.
    pub candidate_lines: usize,
    /// Segments accepted as horizontal reference lines.
    pub reference_lines: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<ReferencePair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawMeasurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stable: Option<StableMeasurement>,
    /// `true` only on the tick that published `stable`.
    pub newly_established: bool,
    pub stability: StabilityProgress,
    pub timings: TimingBreakdown,
}

impl FrameReport {
    /// Overlay text: the final value once published, else the live reading
    /// with the stabilisation progress.
    pub fn status_lines(&self) -> Vec<String> {
        let unit = &self.unit_label;
        let mut out = Vec::new();
        match (self.stable, self.raw) {
            (Some(stable), raw) => {
                out.push(format!("FINAL HEIGHT: {:.1} {unit}", stable.value));
                if let Some(raw) = raw {
                    out.push(format!("Current: {:.1} {unit}", raw.delta_unit));
                }
            }
            (None, Some(raw)) => {
                out.push(format!("HEIGHT: {:.1} {unit}", raw.delta_unit));
                out.push(format!(
                    "Stabilizing: {}/{} frames",
                    self.stability.filled, self.stability.capacity
                ));
            }
            (None, None) => {}
        }
        out
    }
}
