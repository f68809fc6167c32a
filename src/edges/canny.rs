//! Canny edge detector: Sobel gradients, direction-aligned non-maximum
//! suppression and two-threshold hysteresis.
//!
//! NMS compares each magnitude with its two neighbours along the quantised
//! gradient direction. The comparison is asymmetric (`> previous`,
//! `>= next`) so that a plateau two pixels wide, as produced by a binary
//! step, still yields a one-pixel edge instead of vanishing.
//!
//! The outermost 1-pixel frame is never marked.
use super::grad::{sobel_gradients, Grad};
use crate::image::{GrayU8, ImageF32};

const TAN_22_5_DEG: f32 = 0.414_213_56;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    None,
    Weak,
    Strong,
}

fn suppress_non_maxima(grad: &Grad, low: f32, high: f32) -> Vec<Mark> {
    let w = grad.mag.w;
    let h = grad.mag.h;
    let mut marks = vec![Mark::None; w * h];
    if w < 3 || h < 3 {
        return marks;
    }

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag <= low {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0) == (gy >= 0.0);

            let (before, after) = if abs_gy <= abs_gx * TAN_22_5_DEG {
                (mag_row[x - 1], mag_row[x + 1])
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x - 1], mag_next[x + 1])
            } else {
                (mag_prev[x + 1], mag_next[x - 1])
            };

            if mag <= before || mag < after {
                continue;
            }

            marks[y * w + x] = if mag > high { Mark::Strong } else { Mark::Weak };
        }
    }
    marks
}

fn hysteresis(marks: &[Mark], w: usize, h: usize) -> GrayU8 {
    let mut out = GrayU8::new(w, h);
    let mut stack: Vec<usize> = marks
        .iter()
        .enumerate()
        .filter_map(|(i, m)| (*m == Mark::Strong).then_some(i))
        .collect();
    for &i in &stack {
        out.data[i] = 255;
    }

    while let Some(idx) = stack.pop() {
        let x = (idx % w) as isize;
        let y = (idx / w) as isize;
        for dy in -1..=1isize {
            for dx in -1..=1isize {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                    continue;
                }
                let n = ny as usize * w + nx as usize;
                if marks[n] == Mark::Weak && out.data[n] == 0 {
                    out.data[n] = 255;
                    stack.push(n);
                }
            }
        }
    }
    out
}

/// Binary edge map (0/255) of `src` using L1 Sobel magnitudes.
///
/// Pixels above `high` seed edges; pixels above `low` extend them when
/// 8-connected to a seed. Swapped thresholds are reordered.
pub fn canny(src: &GrayU8, low: f32, high: f32) -> GrayU8 {
    let (low, high) = if low > high { (high, low) } else { (low, high) };
    let grad = sobel_gradients(&ImageF32::from_gray(src));
    let marks = suppress_non_maxima(&grad, low, high);
    hysteresis(&marks, src.w, src.h)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_image(w: usize, h: usize, split_y: usize, dark: u8, bright: u8) -> GrayU8 {
        let mut img = GrayU8::filled(w, h, dark);
        for y in split_y..h {
            for x in 0..w {
                img.set(x, y, bright);
            }
        }
        img
    }

    #[test]
    fn binary_step_gives_single_pixel_edge() {
        let img = step_image(32, 20, 10, 0, 255);
        let edges = canny(&img, 30.0, 150.0);
        for x in 1..31 {
            assert_eq!(edges.get(x, 9), 255, "missing edge at x={x}");
            assert_eq!(edges.get(x, 10), 0, "double edge at x={x}");
        }
        assert_eq!(edges.count_set(), 30);
    }

    #[test]
    fn flat_image_has_no_edges() {
        let edges = canny(&GrayU8::filled(16, 16, 120), 30.0, 150.0);
        assert_eq!(edges.count_set(), 0);
    }

    #[test]
    fn weak_step_alone_is_rejected() {
        // L1 magnitude 4·20 = 80 lies between the thresholds but has no seed.
        let img = step_image(32, 20, 10, 100, 120);
        let edges = canny(&img, 30.0, 150.0);
        assert_eq!(edges.count_set(), 0);
    }

    #[test]
    fn weak_pixels_connected_to_a_seed_survive() {
        let mut img = step_image(32, 20, 10, 100, 120);
        // Make the left half a strong step; the weak right half hangs off it.
        for y in 10..20 {
            for x in 0..16 {
                img.set(x, y, 255);
            }
        }
        let edges = canny(&img, 30.0, 150.0);
        assert_eq!(edges.get(4, 9), 255);
        assert_eq!(edges.get(28, 9), 255);
    }

    #[test]
    fn swapped_thresholds_are_reordered() {
        let img = step_image(32, 20, 10, 0, 255);
        assert_eq!(canny(&img, 150.0, 30.0), canny(&img, 30.0, 150.0));
    }
}
