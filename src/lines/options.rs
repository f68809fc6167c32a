use super::hough::HoughParams;
use super::line::HorizontalCriteria;
use serde::{Deserialize, Serialize};

/// Options for segment detection and the horizontal acceptance filter.
///
/// - `min_line_length` gates what the Hough search reports at all.
/// - `min_accepted_length` and `slope_tolerance` decide which of those count
///   as reference lines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineOptions {
    /// Accumulator distance resolution in pixels.
    pub rho: f32,
    /// Accumulator angle resolution in degrees.
    pub theta_deg: f32,
    pub hough_threshold: u32,
    pub min_line_length: f32,
    pub max_line_gap: usize,
    /// Exclusive upper bound on `|dy/dx|`.
    pub slope_tolerance: f32,
    /// Exclusive lower bound on the endpoint distance.
    pub min_accepted_length: f32,
    /// Optional cap on detected segments per frame.
    pub max_lines: Option<usize>,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            rho: 1.0,
            theta_deg: 1.0,
            hough_threshold: 30,
            min_line_length: 100.0,
            max_line_gap: 20,
            slope_tolerance: 0.1,
            min_accepted_length: 100.0,
            max_lines: None,
        }
    }
}

impl LineOptions {
    pub fn hough_params(&self) -> HoughParams {
        HoughParams {
            rho: self.rho,
            theta: self.theta_deg.to_radians(),
            threshold: self.hough_threshold,
            min_line_length: self.min_line_length,
            max_line_gap: self.max_line_gap,
            max_lines: self.max_lines,
        }
    }

    pub fn criteria(&self) -> HorizontalCriteria {
        HorizontalCriteria {
            slope_tolerance: self.slope_tolerance,
            min_length: self.min_accepted_length,
        }
    }
}
