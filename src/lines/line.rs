use nalgebra::Point2;
use serde::Serialize;

/// A straight segment in pixel coordinates, valid for one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub p0: Point2<f32>,
    pub p1: Point2<f32>,
}

impl Line {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            p0: Point2::new(x1, y1),
            p1: Point2::new(x2, y2),
        }
    }

    /// `true` when both endpoints share a column; the slope is undefined.
    pub fn is_vertical(&self) -> bool {
        self.p1.x == self.p0.x
    }

    /// Absolute rise over run, `None` for vertical segments.
    pub fn slope(&self) -> Option<f32> {
        if self.is_vertical() {
            None
        } else {
            Some(((self.p1.y - self.p0.y) / (self.p1.x - self.p0.x)).abs())
        }
    }

    pub fn length(&self) -> f32 {
        nalgebra::distance(&self.p0, &self.p1)
    }

    /// Mean row of the two endpoints.
    pub fn representative_y(&self) -> f32 {
        0.5 * (self.p0.y + self.p1.y)
    }
}

/// Thresholds that decide whether a segment is a horizontal reference.
#[derive(Clone, Copy, Debug)]
pub struct HorizontalCriteria {
    /// Accepted when `slope < slope_tolerance`.
    pub slope_tolerance: f32,
    /// Accepted when `length > min_length`.
    pub min_length: f32,
}

/// A [`Line`] accepted as a near-horizontal measurement boundary.
///
/// Only [`ReferenceLine::accept`] constructs one, so every instance has
/// passed the slope and length criteria.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceLine {
    #[serde(flatten)]
    line: Line,
    slope: f32,
    length: f32,
}

impl ReferenceLine {
    pub fn accept(line: Line, criteria: &HorizontalCriteria) -> Option<Self> {
        let slope = line.slope()?;
        let length = line.length();
        if slope < criteria.slope_tolerance && length > criteria.min_length {
            Some(Self { line, slope, length })
        } else {
            None
        }
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn slope(&self) -> f32 {
        self.slope
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn representative_y(&self) -> f32 {
        self.line.representative_y()
    }
}
