use super::hough::hough_lines_p;
use super::line::{Line, ReferenceLine};
use super::options::LineOptions;
use crate::image::GrayU8;
use log::debug;
use std::time::Instant;

/// Output of one extraction pass over an edge map.
#[derive(Clone, Debug, Default)]
pub struct LineExtraction {
    /// Every segment reported by the Hough search.
    pub candidates: Vec<Line>,
    /// Candidates that passed the horizontal filter, in detection order.
    pub accepted: Vec<ReferenceLine>,
    pub elapsed_ms: f64,
}

pub(crate) fn extract(edges: &GrayU8, opts: &LineOptions) -> LineExtraction {
    let start = Instant::now();
    let candidates = hough_lines_p(edges, &opts.hough_params());
    let criteria = opts.criteria();
    let accepted: Vec<ReferenceLine> = candidates
        .iter()
        .filter_map(|line| ReferenceLine::accept(line.clone(), &criteria))
        .collect();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    debug!(
        "lines candidates={} accepted={} elapsed_ms={:.3}",
        candidates.len(),
        accepted.len(),
        elapsed_ms
    );
    LineExtraction {
        candidates,
        accepted,
        elapsed_ms,
    }
}
