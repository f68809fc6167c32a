//! Per-tick report handed to rendering sinks, plus stage timings.

pub mod report;
pub mod timing;

pub use report::{FrameReport, InputDescriptor, StabilityProgress};
pub use timing::{StageTiming, TimingBreakdown};
