use serde::{Serialize, Serializer};
use std::time::Duration;

/// Serializes a clock offset as fractional seconds.
pub(crate) fn secs<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

/// One frame's calibrated pair of boundaries.
///
/// `timestamp` is the offset of the frame from the gauge's clock origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeasurement {
    pub top_unit: f32,
    pub bottom_unit: f32,
    /// `top_unit - bottom_unit`.
    pub delta_unit: f32,
    #[serde(serialize_with = "secs")]
    pub timestamp: Duration,
}

/// A debounced value published by the stability filter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StableMeasurement {
    /// Mean of the qualifying history window.
    pub value: f32,
    #[serde(serialize_with = "secs")]
    pub established_at: Duration,
}
