//! Top/bottom reference pair selection.
//!
//! Lines are ordered by their representative row with a stable sort, so
//! ties keep the detector's order and the choice is reproducible.
use crate::lines::ReferenceLine;
use serde::Serialize;

/// The two boundaries of one measurement; `top` has the smaller row.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencePair {
    pub top: ReferenceLine,
    pub bottom: ReferenceLine,
}

/// Picks the topmost and bottommost lines, or `None` with fewer than two.
pub fn select_reference_pair(lines: &[ReferenceLine]) -> Option<ReferencePair> {
    if lines.len() < 2 {
        return None;
    }
    let mut order: Vec<&ReferenceLine> = lines.iter().collect();
    order.sort_by(|a, b| a.representative_y().total_cmp(&b.representative_y()));
    let top = order.first()?;
    let bottom = order.last()?;
    Some(ReferencePair {
        top: (*top).clone(),
        bottom: (*bottom).clone(),
    })
}
