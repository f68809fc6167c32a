//! Parameter types configuring one height gauge.
//!
//! Every stage owns its option struct; `GaugeParams` just groups them so a
//! single JSON document can configure the whole pipeline. All fields have
//! defaults, so partial documents are fine.

use crate::lines::LineOptions;
use crate::preprocess::PreprocessOptions;
use crate::scale::ScaleConfig;
use crate::stability::StabilityOptions;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeParams {
    /// Colour frame → edge map.
    pub preprocess: PreprocessOptions,
    /// Segment detection and the horizontal filter.
    pub lines: LineOptions,
    /// Pixel → unit calibration.
    pub scale: ScaleConfig,
    /// History window and debounce.
    pub stability: StabilityOptions,
}
