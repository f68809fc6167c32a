//! Progressive probabilistic Hough transform for line segments.
//!
//! Edge pixels are visited in a pseudo-random (but seeded, hence
//! reproducible) order. Each visited pixel votes into a `(θ, ρ)`
//! accumulator; once a cell reaches the vote threshold the segment through
//! that pixel is traced in both directions, tolerating up to `max_line_gap`
//! missing pixels. Traced pixels are removed from the pool, and when the
//! segment is long enough their votes are withdrawn so that the same line is
//! not reported twice.
//!
//! Complexity: O(E·Θ) votes for `E` edge pixels and `Θ` angle bins, plus
//! linear tracing per reported segment.
use super::line::Line;
use crate::image::GrayU8;
use nalgebra::Vector2;
use std::f32::consts::PI;

/// Parameters of the probabilistic Hough search.
#[derive(Clone, Copy, Debug)]
pub struct HoughParams {
    /// Distance resolution of the accumulator (pixels).
    pub rho: f32,
    /// Angle resolution of the accumulator (radians).
    pub theta: f32,
    /// Minimum votes for a `(θ, ρ)` cell before a segment is traced.
    pub threshold: u32,
    /// Segments shorter than this (along their major axis) are dropped.
    pub min_line_length: f32,
    /// Largest run of missing pixels bridged while tracing.
    pub max_line_gap: usize,
    /// Stop after this many segments.
    pub max_lines: Option<usize>,
}

const VISIT_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// xorshift64* stream deciding the order in which edge pixels are consumed.
struct VisitOrder(u64);

impl VisitOrder {
    fn below(&mut self, n: usize) -> usize {
        let mut s = self.0;
        s ^= s >> 12;
        s ^= s << 25;
        s ^= s >> 27;
        self.0 = s;
        ((s.wrapping_mul(0x2545_F491_4F6C_DD1D) >> 32) as usize) % n
    }
}

struct Accumulator {
    votes: Vec<i32>,
    num_rho: usize,
    /// `(cos θ, sin θ) / ρ` per angle bin.
    trig: Vec<(f32, f32)>,
}

impl Accumulator {
    fn new(w: usize, h: usize, rho: f32, theta: f32) -> Self {
        let num_angle = ((PI / theta).round() as usize).max(1);
        let num_rho = ((((w + h) * 2 + 1) as f32 / rho).round() as usize).max(1);
        let irho = 1.0 / rho;
        let trig = (0..num_angle)
            .map(|n| {
                let t = n as f32 * theta;
                (t.cos() * irho, t.sin() * irho)
            })
            .collect();
        Self {
            votes: vec![0; num_angle * num_rho],
            num_rho,
            trig,
        }
    }

    #[inline]
    fn cell(&self, n: usize, x: usize, y: usize) -> usize {
        let (c, s) = self.trig[n];
        let r = (x as f32 * c + y as f32 * s).round() as isize + ((self.num_rho - 1) / 2) as isize;
        n * self.num_rho + r.clamp(0, self.num_rho as isize - 1) as usize
    }

    /// Adds the votes of `(x, y)` and returns the best `(votes, angle bin)`.
    fn vote(&mut self, x: usize, y: usize) -> (i32, usize) {
        let mut best = (i32::MIN, 0usize);
        for n in 0..self.trig.len() {
            let idx = self.cell(n, x, y);
            self.votes[idx] += 1;
            if self.votes[idx] > best.0 {
                best = (self.votes[idx], n);
            }
        }
        best
    }

    fn unvote(&mut self, x: usize, y: usize) {
        for n in 0..self.trig.len() {
            let idx = self.cell(n, x, y);
            self.votes[idx] -= 1;
        }
    }
}

/// Walks pixel positions along a line, one unit step on the major axis.
struct Walker {
    pos: Vector2<f32>,
    step: Vector2<f32>,
    major_is_x: bool,
}

impl Walker {
    fn new(x: usize, y: usize, dir: Vector2<f32>, major_is_x: bool, forward: bool) -> Self {
        let step = if major_is_x {
            Vector2::new(dir.x.signum(), dir.y / dir.x.abs())
        } else {
            Vector2::new(dir.x / dir.y.abs(), dir.y.signum())
        };
        // The minor coordinate starts at the pixel centre so that flooring rounds.
        let pos = if major_is_x {
            Vector2::new(x as f32, y as f32 + 0.5)
        } else {
            Vector2::new(x as f32 + 0.5, y as f32)
        };
        Self {
            pos,
            step: if forward { step } else { -step },
            major_is_x,
        }
    }

    fn pixel(&self, w: usize, h: usize) -> Option<(usize, usize)> {
        let (fx, fy) = if self.major_is_x {
            (self.pos.x.round(), self.pos.y.floor())
        } else {
            (self.pos.x.floor(), self.pos.y.round())
        };
        if fx < 0.0 || fy < 0.0 || fx >= w as f32 || fy >= h as f32 {
            return None;
        }
        Some((fx as usize, fy as usize))
    }

    fn advance(&mut self) {
        self.pos += self.step;
    }
}

/// Detects line segments on a binary edge map (non-zero = edge).
pub fn hough_lines_p(edges: &GrayU8, params: &HoughParams) -> Vec<Line> {
    let (w, h) = (edges.w, edges.h);
    let mut lines = Vec::new();
    if w == 0 || h == 0 || params.rho <= 0.0 || params.theta <= 0.0 {
        return lines;
    }
    let threshold = params.threshold.max(1) as i32;
    let max_lines = params.max_lines.unwrap_or(usize::MAX);
    if max_lines == 0 {
        return lines;
    }

    let mut acc = Accumulator::new(w, h, params.rho, params.theta);
    let mut mask = vec![false; w * h];
    let mut points = Vec::new();
    for (idx, &v) in edges.data.iter().enumerate() {
        if v != 0 {
            mask[idx] = true;
            points.push((idx % w, idx / w));
        }
    }

    let mut order = VisitOrder(VISIT_SEED);
    let mut remaining = points.len();
    while remaining > 0 {
        let pick = order.below(remaining);
        let (x, y) = points[pick];
        points.swap(pick, remaining - 1);
        remaining -= 1;

        if !mask[y * w + x] {
            continue;
        }

        let (best_votes, best_n) = acc.vote(x, y);
        if best_votes < threshold {
            continue;
        }

        let (c, s) = acc.trig[best_n];
        let dir = Vector2::new(-s, c);
        let major_is_x = dir.x.abs() > dir.y.abs();

        let mut ends = [(x, y); 2];
        for (k, end) in ends.iter_mut().enumerate() {
            let mut walker = Walker::new(x, y, dir, major_is_x, k == 0);
            let mut gap = 0usize;
            while let Some((px, py)) = walker.pixel(w, h) {
                if mask[py * w + px] {
                    gap = 0;
                    *end = (px, py);
                } else {
                    gap += 1;
                    if gap > params.max_line_gap {
                        break;
                    }
                }
                walker.advance();
            }
        }

        let span_x = (ends[1].0 as f32 - ends[0].0 as f32).abs();
        let span_y = (ends[1].1 as f32 - ends[0].1 as f32).abs();
        let good_line = span_x >= params.min_line_length || span_y >= params.min_line_length;

        for (k, end) in ends.iter().enumerate() {
            let mut walker = Walker::new(x, y, dir, major_is_x, k == 0);
            while let Some((px, py)) = walker.pixel(w, h) {
                let idx = py * w + px;
                if mask[idx] {
                    if good_line {
                        acc.unvote(px, py);
                    }
                    mask[idx] = false;
                }
                if (px, py) == *end {
                    break;
                }
                walker.advance();
            }
        }

        if good_line {
            lines.push(Line::new(
                ends[0].0 as f32,
                ends[0].1 as f32,
                ends[1].0 as f32,
                ends[1].1 as f32,
            ));
            if lines.len() >= max_lines {
                break;
            }
        }
    }

    lines
}
