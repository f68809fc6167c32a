#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod measure;
pub mod scale;
pub mod stability;
pub mod stream;
pub mod types;

// Stage-level modules, public for tools and experiments.
pub mod config;
pub mod edges;
pub mod lines;
pub mod preprocess;
pub mod select;

// --- High-level re-exports -------------------------------------------------

// Main entry points: gauge + results.
pub use crate::error::{GaugeError, Result};
pub use crate::measure::{GaugeParams, HeightGauge, RunSummary};
pub use crate::types::{RawMeasurement, StableMeasurement};

// Per-tick report handed to rendering sinks.
pub use crate::diagnostics::{FrameReport, TimingBreakdown};

// Calibration and stabilisation building blocks.
pub use crate::scale::{AxisScale, ReferenceObjectScale, Scale, ScaleConfig, ScaleModel};
pub use crate::stability::{StabilityFilter, StabilityOptions, StabilityState};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use height_gauge::prelude::*;
/// use std::time::Duration;
///
/// # fn main() -> height_gauge::Result<()> {
/// let (w, h) = (640usize, 480usize);
/// let rgb = vec![0u8; w * h * 3];
/// let frame = ColorFrame::packed(w, h, ChannelOrder::Rgb, &rgb);
///
/// let mut gauge = HeightGauge::new(GaugeParams::default())?;
/// let report = gauge.process(&frame, Duration::ZERO)?;
/// println!("lines={} raw={:?}", report.reference_lines, report.raw);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ChannelOrder, ColorFrame, OwnedFrame};
    pub use crate::stream::{FrameSource, RenderSink};
    pub use crate::{FrameReport, GaugeParams, HeightGauge, StableMeasurement};
}

// --- Stage-level API (for tools & advanced users) ---------------------------

pub mod stages {
    pub use crate::edges::canny;
    pub use crate::lines::{extract_reference_lines, LineExtraction, LineOptions, ReferenceLine};
    pub use crate::preprocess::{preprocess_frame, preprocess_stages, PreprocessOptions, PreprocessStages};
    pub use crate::select::{select_reference_pair, ReferencePair};
}
