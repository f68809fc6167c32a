//! Per-frame measurement cycle and the frame loop.
//!
//! Typical usage:
//! ```no_run
//! use height_gauge::image::{ChannelOrder, ColorFrame};
//! use height_gauge::{GaugeParams, HeightGauge};
//! use std::time::Duration;
//!
//! # fn example(rgb: &[u8], w: usize, h: usize) -> height_gauge::Result<()> {
//! let mut gauge = HeightGauge::new(GaugeParams::default())?;
//! let frame = ColorFrame::packed(w, h, ChannelOrder::Rgb, rgb);
//! let report = gauge.process(&frame, Duration::ZERO)?;
//! for line in report.status_lines() {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```
use super::params::GaugeParams;
use crate::diagnostics::timing::{
    STAGE_CALIBRATE, STAGE_LINES, STAGE_PREPROCESS, STAGE_SELECT, STAGE_STABILITY,
};
use crate::diagnostics::{FrameReport, InputDescriptor, StabilityProgress, TimingBreakdown};
use crate::error::{invalid_config, Result};
use crate::image::ColorFrame;
use crate::lines::extract_reference_lines;
use crate::preprocess::preprocess_frame;
use crate::scale::{Scale, ScaleConfig};
use crate::select::select_reference_pair;
use crate::stability::{StabilityFilter, StabilityState};
use crate::stream::{FrameSource, RenderSink};
use crate::types::{RawMeasurement, StableMeasurement};
use log::{debug, info, warn};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Counters accumulated by [`HeightGauge::run`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub frames_seen: usize,
    /// Frames the source failed to deliver or that were malformed.
    pub frames_skipped: usize,
    /// Ticks that produced a raw measurement.
    pub measurements: usize,
    pub stable_publications: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_stable: Option<StableMeasurement>,
}

/// Clock for [`HeightGauge::run_with_clock`] that advances by `interval_ms`
/// per delivered frame, starting at zero.
///
/// Fails when the interval is not a valid duration or when `frames` ticks
/// would overflow [`Duration`].
pub fn fixed_interval_clock(interval_ms: f64, frames: usize) -> Result<impl FnMut() -> Duration> {
    let step = Duration::try_from_secs_f64(interval_ms / 1000.0).map_err(|_| {
        invalid_config(format!(
            "frame_interval_ms must be finite and >= 0, got {interval_ms}"
        ))
    })?;
    u32::try_from(frames.saturating_sub(1))
        .ok()
        .and_then(|last| step.checked_mul(last))
        .ok_or_else(|| {
            invalid_config(format!(
                "frame_interval_ms {interval_ms} overflows the clock over {frames} frames"
            ))
        })?;
    let mut tick = 0u32;
    Ok(move || {
        let at = step.saturating_mul(tick);
        tick = tick.saturating_add(1);
        at
    })
}

/// One measurement target: calibration, history window and published value.
pub struct HeightGauge {
    params: GaugeParams,
    scale: Scale,
    filter: StabilityFilter,
    latest_raw: Option<RawMeasurement>,
}

impl HeightGauge {
    pub fn new(params: GaugeParams) -> Result<Self> {
        let scale = params.scale.build()?;
        let filter = StabilityFilter::new(params.stability.clone())?;
        Ok(Self {
            params,
            scale,
            filter,
            latest_raw: None,
        })
    }

    pub fn params(&self) -> &GaugeParams {
        &self.params
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    /// Replaces the tunables between ticks.
    ///
    /// Preprocessing and line options always apply. A rejected scale or
    /// stability section keeps the previous one and the first error is
    /// returned.
    pub fn update_params(&mut self, params: GaugeParams) -> Result<()> {
        let GaugeParams {
            preprocess,
            lines,
            scale,
            stability,
        } = params;
        self.params.preprocess = preprocess;
        self.params.lines = lines;

        let scale_result = self.configure_scale(scale);
        let stability_result = match self.filter.set_options(stability.clone()) {
            Ok(()) => {
                self.params.stability = stability;
                Ok(())
            }
            Err(e) => {
                warn!("Rejected stability options, keeping previous ones: {e}");
                Err(e)
            }
        };
        scale_result.and(stability_result)
    }

    /// Swaps the calibration; on rejection the last valid scale stays.
    pub fn configure_scale(&mut self, config: ScaleConfig) -> Result<()> {
        match config.build() {
            Ok(scale) => {
                debug!(
                    "scale configured unit={} px_per_unit={:.4}",
                    scale.unit_label,
                    scale.pixels_per_unit()
                );
                self.scale = scale;
                self.params.scale = config;
                Ok(())
            }
            Err(e) => {
                warn!("Rejected scale configuration, keeping previous one: {e}");
                Err(e)
            }
        }
    }

    /// Runs one tick on `frame`, captured at offset `at` of the gauge clock.
    ///
    /// Only a malformed frame fails, and it leaves every piece of state as it
    /// was.
    pub fn process(&mut self, frame: &ColorFrame<'_>, at: Duration) -> Result<FrameReport> {
        debug!("HeightGauge::process start w={} h={} t={:?}", frame.w, frame.h, at);
        let mut timings = TimingBreakdown::default();

        let edges = timings.measure(STAGE_PREPROCESS, || {
            preprocess_frame(frame, &self.params.preprocess)
        })?;
        let extraction = timings.measure(STAGE_LINES, || {
            extract_reference_lines(&edges, &self.params.lines)
        });
        let pair = timings.measure(STAGE_SELECT, || select_reference_pair(&extraction.accepted));
        let raw = timings.measure(STAGE_CALIBRATE, || {
            pair.as_ref().map(|p| self.scale.measure(p, at))
        });
        let published = timings.measure(STAGE_STABILITY, || {
            raw.and_then(|m| self.filter.push(m.delta_unit, at))
        });
        timings.finish();
        self.latest_raw = raw;

        let (filled, capacity) = self.filter.progress();
        debug!(
            "HeightGauge::process done candidates={} accepted={} raw={:?} stable={:?} total_ms={:.3}",
            extraction.candidates.len(),
            extraction.accepted.len(),
            raw.map(|m| m.delta_unit),
            self.filter.stable().map(|s| s.value),
            timings.total_ms
        );

        Ok(FrameReport {
            input: InputDescriptor {
                width: frame.w,
                height: frame.h,
            },
            unit_label: self.scale.unit_label.clone(),
            candidate_lines: extraction.candidates.len(),
            reference_lines: extraction.accepted.len(),
            pair,
            raw,
            stable: self.filter.stable(),
            newly_established: published.is_some(),
            stability: StabilityProgress {
                filled,
                capacity,
                state: self.filter.state(),
            },
            timings,
        })
    }

    /// Measurement of the latest tick, absent when it found no pair.
    pub fn latest_raw(&self) -> Option<RawMeasurement> {
        self.latest_raw
    }

    pub fn stable(&self) -> Option<StableMeasurement> {
        self.filter.stable()
    }

    pub fn state(&self) -> StabilityState {
        self.filter.state()
    }

    /// `(filled, capacity)` of the stability window.
    pub fn progress(&self) -> (usize, usize) {
        self.filter.progress()
    }

    /// External clear trigger: history, published value and debounce go.
    pub fn reset(&mut self) {
        self.filter.reset();
        self.latest_raw = None;
        info!("Cleared stable height measurement");
    }

    /// Drives ticks until the source is exhausted, timestamping frames with
    /// the wall-clock offset from the start of the run.
    pub fn run<S, R>(&mut self, source: &mut S, sink: &mut R) -> RunSummary
    where
        S: FrameSource + ?Sized,
        R: RenderSink + ?Sized,
    {
        let origin = Instant::now();
        self.run_with_clock(source, sink, || origin.elapsed())
    }

    /// Like [`HeightGauge::run`] with timestamps supplied by `clock`, which
    /// is read once per delivered frame.
    pub fn run_with_clock<S, R, C>(&mut self, source: &mut S, sink: &mut R, mut clock: C) -> RunSummary
    where
        S: FrameSource + ?Sized,
        R: RenderSink + ?Sized,
        C: FnMut() -> Duration,
    {
        let mut summary = RunSummary::default();
        while let Some(next) = source.next_frame() {
            summary.frames_seen += 1;
            let frame = match next {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("Skipping frame {}: {e}", summary.frames_seen);
                    summary.frames_skipped += 1;
                    continue;
                }
            };
            let at = clock();
            match self.process(&frame.as_view(), at) {
                Ok(report) => {
                    if report.raw.is_some() {
                        summary.measurements += 1;
                    }
                    if report.newly_established {
                        summary.stable_publications += 1;
                    }
                    sink.render(&report);
                }
                Err(e) => {
                    warn!("Skipping frame {}: {e}", summary.frames_seen);
                    summary.frames_skipped += 1;
                }
            }
        }
        summary.last_stable = self.stable();
        info!(
            "run finished frames={} skipped={} measurements={} publications={}",
            summary.frames_seen,
            summary.frames_skipped,
            summary.measurements,
            summary.stable_publications
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GaugeError;
    use crate::image::ChannelOrder;

    /// Light background with two dark horizontal bars.
    fn two_bar_frame(w: usize, h: usize, bars: [std::ops::Range<usize>; 2]) -> Vec<u8> {
        let mut data = vec![210u8; w * h * 3];
        for bar in bars {
            for y in bar {
                data[y * w * 3..(y + 1) * w * 3].fill(30);
            }
        }
        data
    }

    fn gauge() -> HeightGauge {
        HeightGauge::new(GaugeParams::default()).unwrap()
    }

    #[test]
    fn fixed_interval_clock_ticks_from_zero() {
        let mut clock = fixed_interval_clock(500.0, 3).unwrap();
        assert_eq!(clock(), Duration::ZERO);
        assert_eq!(clock(), Duration::from_millis(500));
        assert_eq!(clock(), Duration::from_secs(1));
    }

    #[test]
    fn fixed_interval_clock_rejects_unrepresentable_intervals() {
        for ms in [f64::NAN, f64::INFINITY, -1.0, 1e300] {
            assert!(
                matches!(fixed_interval_clock(ms, 2), Err(GaugeError::InvalidConfig(_))),
                "{ms}"
            );
        }
        // Each step fits, the last tick does not.
        assert!(fixed_interval_clock(1e19, 10_000).is_err());
        assert!(fixed_interval_clock(1e19, 1).is_ok());
    }

    #[test]
    fn rejects_degenerate_scale_at_construction() {
        let mut params = GaugeParams::default();
        params.scale.range_max = 0.0;
        assert!(matches!(HeightGauge::new(params), Err(GaugeError::InvalidConfig(_))));
    }

    #[test]
    fn rejected_reconfiguration_keeps_last_valid_scale() {
        let mut g = gauge();
        let before = g.scale().clone();
        let mut params = GaugeParams::default();
        params.scale.axis_bottom_px = 10.0;
        params.lines.slope_tolerance = 0.05;
        assert!(g.update_params(params).is_err());
        assert_eq!(g.scale(), &before);
        assert_eq!(g.params().scale, ScaleConfig::default());
        assert_eq!(g.params().lines.slope_tolerance, 0.05);
    }

    #[test]
    fn blank_frame_is_not_a_measurement() {
        let mut g = gauge();
        let data = vec![128u8; 320 * 240 * 3];
        let frame = ColorFrame::packed(320, 240, ChannelOrder::Rgb, &data);
        let report = g.process(&frame, Duration::ZERO).unwrap();
        assert!(report.pair.is_none());
        assert!(report.raw.is_none());
        assert!(g.latest_raw().is_none());
        assert_eq!(g.progress(), (0, 10));
    }

    #[test]
    fn two_bars_yield_a_measurement() {
        let mut g = gauge();
        let data = two_bar_frame(320, 480, [95..105, 395..405]);
        let frame = ColorFrame::packed(320, 480, ChannelOrder::Rgb, &data);
        let report = g.process(&frame, Duration::from_millis(40)).unwrap();
        let raw = report.raw.expect("expected a measurement");
        let pair = report.pair.expect("expected a pair");
        assert!(pair.top.representative_y() < 110.0);
        assert!(pair.bottom.representative_y() > 390.0);
        // Rows ~100 and ~400 span roughly 300 px, i.e. about 102 mm.
        assert!((raw.delta_unit - 102.3).abs() < 5.0, "delta={}", raw.delta_unit);
        assert_eq!(raw.timestamp, Duration::from_millis(40));
        assert_eq!(g.progress(), (1, 10));
        assert_eq!(report.timings.stages.len(), 5);
    }

    #[test]
    fn malformed_frame_leaves_state_untouched() {
        let mut g = gauge();
        let data = two_bar_frame(320, 480, [95..105, 395..405]);
        let frame = ColorFrame::packed(320, 480, ChannelOrder::Rgb, &data);
        g.process(&frame, Duration::ZERO).unwrap();
        let raw = g.latest_raw();

        let short = vec![0u8; 17];
        let bad = ColorFrame::packed(320, 480, ChannelOrder::Rgb, &short);
        assert!(g.process(&bad, Duration::from_secs(1)).is_err());
        assert_eq!(g.latest_raw(), raw);
        assert_eq!(g.progress(), (1, 10));
    }

    #[test]
    fn reset_clears_history_and_latest_raw() {
        let mut g = gauge();
        let data = two_bar_frame(320, 480, [95..105, 395..405]);
        let frame = ColorFrame::packed(320, 480, ChannelOrder::Rgb, &data);
        g.process(&frame, Duration::ZERO).unwrap();
        g.reset();
        assert_eq!(g.progress(), (0, 10));
        assert!(g.latest_raw().is_none());
        assert!(g.stable().is_none());
        assert_eq!(g.state(), StabilityState::Accumulating);
    }
}
