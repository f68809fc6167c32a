//! Reference line extraction.
//!
//! Segments are detected on the binary edge map with a probabilistic Hough
//! transform ([`hough::hough_lines_p`]) and then filtered down to
//! near-horizontal, long segments ([`ReferenceLine`]).
//!
//! A segment is accepted iff all of the following hold:
//! - its endpoints differ in `x` (vertical segments have no slope),
//! - `|dy/dx| < slope_tolerance`,
//! - its endpoint distance is `> min_accepted_length`.
//!
//! Accepted lines keep the order in which the detector reported them. An
//! edge map with no structure yields an empty list, never an error.

mod extractor;
pub mod hough;
mod line;
mod options;

pub use extractor::LineExtraction;
pub use hough::HoughParams;
pub use line::{HorizontalCriteria, Line, ReferenceLine};
pub use options::LineOptions;

use crate::image::GrayU8;

/// Detects segments on `edges` and keeps the horizontal reference lines.
pub fn extract_reference_lines(edges: &GrayU8, options: &LineOptions) -> LineExtraction {
    extractor::extract(edges, options)
}
