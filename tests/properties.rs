use height_gauge::lines::{HorizontalCriteria, Line, ReferenceLine};
use height_gauge::select::select_reference_pair;
use height_gauge::{AxisScale, StabilityFilter, StabilityOptions};
use proptest::prelude::*;
use std::time::Duration;

const CRITERIA: HorizontalCriteria = HorizontalCriteria {
    slope_tolerance: 0.1,
    min_length: 100.0,
};

fn reference_at(y0: f32, dy: f32) -> ReferenceLine {
    ReferenceLine::accept(Line::new(0.0, y0, 300.0, y0 + dy), &CRITERIA)
        .expect("generated line is horizontal")
}

proptest! {
    #[test]
    fn selected_pair_brackets_every_line(
        rows in prop::collection::vec((0.0f32..2000.0, -10.0f32..10.0), 2..24),
    ) {
        let lines: Vec<ReferenceLine> = rows.iter().map(|&(y, dy)| reference_at(y, dy)).collect();
        let pair = select_reference_pair(&lines).unwrap();
        let top = pair.top.representative_y();
        let bottom = pair.bottom.representative_y();
        for line in &lines {
            prop_assert!(top <= line.representative_y());
            prop_assert!(bottom >= line.representative_y());
        }
    }

    #[test]
    fn selection_is_deterministic(
        rows in prop::collection::vec(0.0f32..500.0, 2..16),
    ) {
        let lines: Vec<ReferenceLine> = rows.iter().map(|&y| reference_at(y, 0.0)).collect();
        prop_assert_eq!(select_reference_pair(&lines), select_reference_pair(&lines));
    }

    #[test]
    fn axis_end_points_map_to_zero_and_range(
        range_max in 0.5f32..2000.0,
        top in 0.0f32..1000.0,
        extent in 1.0f32..2000.0,
    ) {
        let bottom = top + extent;
        let axis = AxisScale::new(range_max, top, bottom).unwrap();
        prop_assert!(axis.to_unit(bottom).abs() <= 1e-6);
        prop_assert!((axis.to_unit(top) - range_max).abs() <= 1e-6);
    }

    #[test]
    fn constant_window_publishes_on_the_nth_feed(
        value in -500.0f32..500.0,
        n in 1usize..32,
    ) {
        let opts = StabilityOptions { history_length: n, ..StabilityOptions::default() };
        let mut filter = StabilityFilter::new(opts).unwrap();
        for i in 0..n - 1 {
            prop_assert!(filter.push(value, Duration::from_millis(i as u64)).is_none());
        }
        let published = filter.push(value, Duration::from_millis(n as u64));
        let published = published.expect("constant window must publish");
        prop_assert!((published.value - value).abs() <= 1e-4 * value.abs().max(1.0));
    }

    #[test]
    fn progress_never_exceeds_capacity(
        values in prop::collection::vec(-100.0f32..100.0, 0..64),
        n in 1usize..16,
    ) {
        let opts = StabilityOptions { history_length: n, ..StabilityOptions::default() };
        let mut filter = StabilityFilter::new(opts).unwrap();
        for (i, v) in values.iter().enumerate() {
            filter.push(*v, Duration::from_millis(i as u64));
            let (filled, capacity) = filter.progress();
            prop_assert_eq!(capacity, n);
            prop_assert_eq!(filled, (i + 1).min(n));
        }
    }
}
