//! Pixel row → physical unit calibration.
//!
//! Two models exist and are chosen by configuration:
//!
//! - [`AxisScale`]: the pixel interval `[top_px, bottom_px]` spans
//!   `[range_max, 0]` units, drawn bottom-up like a ruler.
//! - [`ReferenceObjectScale`]: a known physical size and its measured pixel
//!   extent fix `pixels_per_unit`; rows are measured from an origin row.
//!
//! When a reference object is configured it takes priority over the axis.
//! Degenerate inputs are rejected when the scale is built, so a [`Scale`]
//! never divides by zero.
//!
//! Conversions run in `f64` and narrow only on output, so the axis end rows
//! map exactly onto `range_max` and zero.
use crate::error::{invalid_config, Result};
use crate::select::ReferencePair;
use crate::types::RawMeasurement;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reference-object calibration input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceObjectConfig {
    /// Physical size of the object, in the scale's unit.
    pub known_size: f32,
    /// Pixel extent the object covers in the image.
    pub measured_extent_px: f32,
    /// Row representing physical zero; the axis bottom when absent.
    #[serde(default)]
    pub origin_row: Option<f32>,
}

/// Serializable scale configuration; turned into a [`Scale`] by [`ScaleConfig::build`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    pub unit_label: String,
    /// Units spanned by the axis.
    pub range_max: f32,
    /// Value restored by [`ScaleConfig::reset_range`].
    pub default_range_max: f32,
    /// Pixel row drawn as `range_max`.
    pub axis_top_px: f32,
    /// Pixel row drawn as zero.
    pub axis_bottom_px: f32,
    pub reference: Option<ReferenceObjectConfig>,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            unit_label: "mm".to_string(),
            range_max: 150.0,
            default_range_max: 150.0,
            axis_top_px: 20.0,
            axis_bottom_px: 460.0,
            reference: None,
        }
    }
}

impl ScaleConfig {
    /// Validates the configuration and selects the calibration model.
    pub fn build(&self) -> Result<Scale> {
        let axis = AxisScale::new(self.range_max, self.axis_top_px, self.axis_bottom_px)?;
        let model = match &self.reference {
            Some(r) => ScaleModel::ReferenceObject(ReferenceObjectScale::new(
                r.known_size,
                r.measured_extent_px,
                r.origin_row.unwrap_or(self.axis_bottom_px),
            )?),
            None => ScaleModel::Axis(axis),
        };
        Ok(Scale {
            model,
            unit_label: self.unit_label.clone(),
        })
    }

    /// Copy with `range_max` moved by `delta` and clamped to `[min, max]`.
    pub fn step_range(&self, delta: f32, min: f32, max: f32) -> Self {
        Self {
            range_max: (self.range_max + delta).max(min).min(max),
            ..self.clone()
        }
    }

    /// Copy with `range_max` back at `default_range_max`.
    pub fn reset_range(&self) -> Self {
        Self {
            range_max: self.default_range_max,
            ..self.clone()
        }
    }
}

fn ensure_finite(name: &str, v: f32) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(invalid_config(format!("{name} must be finite, got {v}")))
    }
}

/// Ruler-style mapping of a fixed pixel interval onto `[0, range_max]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisScale {
    range_max: f32,
    top_px: f32,
    bottom_px: f32,
}

impl AxisScale {
    pub fn new(range_max: f32, top_px: f32, bottom_px: f32) -> Result<Self> {
        ensure_finite("range_max", range_max)?;
        ensure_finite("axis_top_px", top_px)?;
        ensure_finite("axis_bottom_px", bottom_px)?;
        if range_max <= 0.0 {
            return Err(invalid_config(format!("range_max must be > 0, got {range_max}")));
        }
        if bottom_px <= top_px {
            return Err(invalid_config(format!(
                "axis pixel extent must be > 0 (top={top_px}, bottom={bottom_px})"
            )));
        }
        Ok(Self {
            range_max,
            top_px,
            bottom_px,
        })
    }

    pub fn range_max(&self) -> f32 {
        self.range_max
    }

    fn extent_px(&self) -> f64 {
        f64::from(self.bottom_px) - f64::from(self.top_px)
    }

    pub fn pixels_per_unit(&self) -> f32 {
        (self.extent_px() / f64::from(self.range_max)) as f32
    }

    pub fn to_unit(&self, row: f32) -> f32 {
        self.to_unit_f64(row) as f32
    }

    fn to_unit_f64(&self, row: f32) -> f64 {
        (f64::from(self.bottom_px) - f64::from(row)) * f64::from(self.range_max) / self.extent_px()
    }
}

/// Calibration from an object of known size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceObjectScale {
    known_size: f32,
    extent_px: f32,
    origin_row: f32,
}

impl ReferenceObjectScale {
    pub fn new(known_size: f32, measured_extent_px: f32, origin_row: f32) -> Result<Self> {
        ensure_finite("known_size", known_size)?;
        ensure_finite("measured_extent_px", measured_extent_px)?;
        ensure_finite("origin_row", origin_row)?;
        if known_size <= 0.0 {
            return Err(invalid_config(format!("known_size must be > 0, got {known_size}")));
        }
        if measured_extent_px <= 0.0 {
            return Err(invalid_config(format!(
                "reference pixel extent must be > 0, got {measured_extent_px}"
            )));
        }
        Ok(Self {
            known_size,
            extent_px: measured_extent_px,
            origin_row,
        })
    }

    /// Extent taken as the distance between two picked image points.
    pub fn from_points(
        known_size: f32,
        p0: Point2<f32>,
        p1: Point2<f32>,
        origin_row: f32,
    ) -> Result<Self> {
        Self::new(known_size, nalgebra::distance(&p0, &p1), origin_row)
    }

    pub fn pixels_per_unit(&self) -> f32 {
        (f64::from(self.extent_px) / f64::from(self.known_size)) as f32
    }

    pub fn to_unit(&self, row: f32) -> f32 {
        self.to_unit_f64(row) as f32
    }

    fn to_unit_f64(&self, row: f32) -> f64 {
        (f64::from(self.origin_row) - f64::from(row)) * f64::from(self.known_size)
            / f64::from(self.extent_px)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ScaleModel {
    Axis(AxisScale),
    ReferenceObject(ReferenceObjectScale),
}

/// A validated calibration together with its unit label.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scale {
    pub model: ScaleModel,
    pub unit_label: String,
}

impl Scale {
    pub fn pixels_per_unit(&self) -> f32 {
        match &self.model {
            ScaleModel::Axis(a) => a.pixels_per_unit(),
            ScaleModel::ReferenceObject(r) => r.pixels_per_unit(),
        }
    }

    pub fn to_unit(&self, row: f32) -> f32 {
        self.to_unit_f64(row) as f32
    }

    fn to_unit_f64(&self, row: f32) -> f64 {
        match &self.model {
            ScaleModel::Axis(a) => a.to_unit_f64(row),
            ScaleModel::ReferenceObject(r) => r.to_unit_f64(row),
        }
    }

    /// Converts a selected pair into a raw measurement at `timestamp`.
    pub fn measure(&self, pair: &ReferencePair, timestamp: Duration) -> RawMeasurement {
        let top_unit = self.to_unit_f64(pair.top.representative_y());
        let bottom_unit = self.to_unit_f64(pair.bottom.representative_y());
        RawMeasurement {
            top_unit: top_unit as f32,
            bottom_unit: bottom_unit as f32,
            delta_unit: (top_unit - bottom_unit) as f32,
            timestamp,
        }
    }
}
