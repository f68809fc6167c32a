mod common;

use common::synthetic_image::{banded_frame, columned_frame, truncated_frame};
use height_gauge::image::OwnedFrame;
use height_gauge::scale::ReferenceObjectConfig;
use height_gauge::stream::FrameSource;
use height_gauge::{FrameReport, GaugeParams, HeightGauge, Result, StabilityState};
use std::collections::VecDeque;
use std::time::Duration;

const W: usize = 320;
const H: usize = 480;

struct ScriptedSource(VecDeque<Result<OwnedFrame>>);

impl ScriptedSource {
    fn new(frames: impl IntoIterator<Item = Result<OwnedFrame>>) -> Self {
        Self(frames.into_iter().collect())
    }
}

impl FrameSource for ScriptedSource {
    fn next_frame(&mut self) -> Option<Result<OwnedFrame>> {
        self.0.pop_front()
    }
}

fn two_bars() -> OwnedFrame {
    banded_frame(W, H, &[95..105, 395..405])
}

fn ticks(step_ms: u64) -> impl FnMut() -> Duration {
    let mut n = 0u64;
    move || {
        let at = Duration::from_millis(step_ms * n);
        n += 1;
        at
    }
}

#[test]
fn steady_scene_publishes_one_stable_height() {
    let mut gauge = HeightGauge::new(GaugeParams::default()).unwrap();
    let mut source = ScriptedSource::new((0..12).map(|_| Ok(two_bars())));
    let mut reports: Vec<FrameReport> = Vec::new();

    let summary = gauge.run_with_clock(&mut source, &mut reports, ticks(33));

    assert_eq!(summary.frames_seen, 12);
    assert_eq!(summary.frames_skipped, 0);
    assert_eq!(summary.measurements, 12);
    assert_eq!(summary.stable_publications, 1);
    assert_eq!(reports.len(), 12);

    let first_stable = reports
        .iter()
        .position(|r| r.newly_established)
        .expect("a stable value should be published");
    assert_eq!(first_stable, 9);
    assert!(reports[..9].iter().all(|r| r.stable.is_none()));
    assert_eq!(reports[4].stability.filled, 5);

    let raw = reports[9].raw.unwrap();
    let stable = summary.last_stable.unwrap();
    assert!((stable.value - raw.delta_unit).abs() < 1e-3);
    assert!(stable.value > 95.0 && stable.value < 110.0, "value={}", stable.value);
    assert_eq!(stable.established_at, Duration::from_millis(297));
    assert_eq!(gauge.state(), StabilityState::Stable);
}

#[test]
fn republishes_only_after_the_hold_interval() {
    let mut gauge = HeightGauge::new(GaugeParams::default()).unwrap();
    let mut source = ScriptedSource::new((0..20).map(|_| Ok(two_bars())));
    let mut reports: Vec<FrameReport> = Vec::new();

    let summary = gauge.run_with_clock(&mut source, &mut reports, ticks(500));

    let published: Vec<usize> = reports
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.newly_established.then_some(i))
        .collect();
    assert_eq!(published, vec![9, 15]);
    assert_eq!(summary.stable_publications, 2);
    assert_eq!(
        summary.last_stable.unwrap().established_at,
        Duration::from_millis(7500)
    );
}

#[test]
fn malformed_and_missing_frames_do_not_reset_progress() {
    let mut gauge = HeightGauge::new(GaugeParams::default()).unwrap();
    let mut frames: Vec<Result<OwnedFrame>> = Vec::new();
    for i in 0..10 {
        frames.push(Ok(two_bars()));
        if i == 3 {
            frames.push(Ok(truncated_frame(W, H)));
        }
        if i == 6 {
            frames.push(Err(height_gauge::GaugeError::Io("camera hiccup".into())));
        }
    }
    let mut source = ScriptedSource::new(frames);
    let mut reports: Vec<FrameReport> = Vec::new();

    let summary = gauge.run_with_clock(&mut source, &mut reports, ticks(40));

    assert_eq!(summary.frames_seen, 12);
    assert_eq!(summary.frames_skipped, 2);
    assert_eq!(summary.measurements, 10);
    assert_eq!(summary.stable_publications, 1);
    assert_eq!(reports.len(), 10);
    assert!(reports.last().unwrap().newly_established);
}

#[test]
fn vertical_structures_never_measure() {
    let mut gauge = HeightGauge::new(GaugeParams::default()).unwrap();
    let mut source = ScriptedSource::new((0..5).map(|_| Ok(columned_frame(W, H, &[150..170]))));
    let mut reports: Vec<FrameReport> = Vec::new();

    let summary = gauge.run_with_clock(&mut source, &mut reports, ticks(33));

    assert_eq!(summary.frames_seen, 5);
    assert_eq!(summary.measurements, 0);
    assert!(summary.last_stable.is_none());
    assert!(reports.iter().all(|r| r.raw.is_none() && r.pair.is_none()));
    assert!(reports.iter().all(|r| r.reference_lines == 0));
    assert!(reports.iter().all(|r| r.candidate_lines >= 1));
    assert_eq!(gauge.progress(), (0, 10));
}

#[test]
fn reset_mid_stream_restarts_accumulation() {
    let mut gauge = HeightGauge::new(GaugeParams::default()).unwrap();
    let frame = two_bars();
    for i in 0..10u64 {
        gauge
            .process(&frame.as_view(), Duration::from_millis(30 * i))
            .unwrap();
    }
    assert!(gauge.stable().is_some());

    gauge.reset();
    assert!(gauge.stable().is_none());
    assert_eq!(gauge.progress(), (0, 10));

    for i in 0..9u64 {
        let report = gauge
            .process(&frame.as_view(), Duration::from_millis(400 + 30 * i))
            .unwrap();
        assert!(report.stable.is_none());
    }
    let report = gauge
        .process(&frame.as_view(), Duration::from_millis(670))
        .unwrap();
    assert!(report.newly_established);
}

#[test]
fn reference_object_scale_overrides_axis() {
    let mut axis_gauge = HeightGauge::new(GaugeParams::default()).unwrap();
    let mut params = GaugeParams::default();
    params.scale.reference = Some(ReferenceObjectConfig {
        known_size: 100.0,
        measured_extent_px: 300.0,
        origin_row: None,
    });
    let mut ref_gauge = HeightGauge::new(params).unwrap();

    let frame = two_bars();
    let axis = axis_gauge.process(&frame.as_view(), Duration::ZERO).unwrap();
    let reference = ref_gauge.process(&frame.as_view(), Duration::ZERO).unwrap();

    let pair = reference.pair.unwrap();
    let span = pair.bottom.representative_y() - pair.top.representative_y();
    let delta = reference.raw.unwrap().delta_unit;
    assert!((delta - span / 3.0).abs() < 1e-3, "delta={delta} span={span}");
    assert!((axis.raw.unwrap().delta_unit - span * 150.0 / 440.0).abs() < 1e-3);
}

#[test]
fn scale_range_steps_apply_between_ticks() {
    let mut gauge = HeightGauge::new(GaugeParams::default()).unwrap();
    let frame = two_bars();
    let before = gauge
        .process(&frame.as_view(), Duration::ZERO)
        .unwrap()
        .raw
        .unwrap();

    let doubled = gauge.params().scale.step_range(150.0, 10.0, 2000.0);
    gauge.configure_scale(doubled).unwrap();
    let after = gauge
        .process(&frame.as_view(), Duration::from_millis(33))
        .unwrap()
        .raw
        .unwrap();
    assert!((after.delta_unit - 2.0 * before.delta_unit).abs() < 1e-3);

    let invalid = gauge.params().scale.step_range(-1000.0, -5.0, 2000.0);
    assert!(gauge.configure_scale(invalid).is_err());
    let kept = gauge
        .process(&frame.as_view(), Duration::from_millis(66))
        .unwrap()
        .raw
        .unwrap();
    assert_eq!(kept.delta_unit, after.delta_unit);
}
