//! Height measurement orchestrator.
//!
//! Overview
//! - [`HeightGauge::process`] runs one tick: preprocess the colour frame,
//!   extract horizontal reference lines, select the top/bottom pair,
//!   calibrate both rows and feed the delta to the stability filter.
//! - [`HeightGauge::run`] drives ticks from a [`FrameSource`] into a
//!   [`RenderSink`] until end-of-stream.
//!
//! Modules
//! - [`params`] – configuration grouping the per-stage options.
//! - `pipeline` – the [`HeightGauge`] implementation.
//!
//! State
//! - The gauge exclusively owns the calibration, the history window and the
//!   published value. Independent camera streams need independent gauges.
//! - A malformed frame is rejected before any state is touched.
//!
//! [`FrameSource`]: crate::stream::FrameSource
//! [`RenderSink`]: crate::stream::RenderSink

pub mod params;
mod pipeline;

pub use params::GaugeParams;
pub use pipeline::{fixed_interval_clock, HeightGauge, RunSummary};
