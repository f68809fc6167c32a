//! Adaptive local thresholding against a Gaussian-weighted neighbourhood mean.
use super::filters::{apply_separable, odd_at_least, GaussianKernel};
use crate::image::{GrayU8, ImageF32};

/// Binarises `src` against its local Gaussian mean minus `offset`.
///
/// A pixel becomes 255 when `src > mean(block) − offset`, 0 otherwise.
/// `block_size` is rounded up to the next odd value (minimum 3).
pub fn adaptive_threshold_gaussian(src: &GrayU8, block_size: usize, offset: f32) -> GrayU8 {
    let block = odd_at_least(block_size, 3);
    let kernel = GaussianKernel::new(block, 0.0);
    let mean = apply_separable(&kernel, &ImageF32::from_gray(src));

    let mut out = GrayU8::new(src.w, src.h);
    for y in 0..src.h {
        let src_row = src.row(y);
        let mean_row = mean.row(y);
        let dst = out.row_mut(y);
        for x in 0..src.w {
            let local = mean_row[x].round();
            dst[x] = if src_row[x] as f32 > local - offset { 255 } else { 0 };
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_region_turns_white() {
        // Every pixel equals its local mean, which exceeds mean − C for C > 0.
        let img = GrayU8::filled(12, 12, 90);
        let out = adaptive_threshold_gaussian(&img, 11, 2.0);
        assert!(out.data.iter().all(|&v| v == 255));
    }

    #[test]
    fn dark_side_of_a_step_turns_black() {
        let mut img = GrayU8::filled(20, 20, 200);
        for y in 10..20 {
            for x in 0..20 {
                img.set(x, y, 30);
            }
        }
        let out = adaptive_threshold_gaussian(&img, 11, 2.0);
        // Just below the step the local mean is pulled up by the bright rows.
        assert_eq!(out.get(10, 10), 0);
        assert_eq!(out.get(10, 9), 255);
        assert_eq!(out.get(10, 19), 255);
    }

    #[test]
    fn unevenly_lit_stripe_is_still_found() {
        // A dark stripe on a left-to-right brightness ramp.
        let mut img = GrayU8::new(40, 30);
        for y in 0..30 {
            for x in 0..40 {
                let base = 60 + x as u8 * 4;
                let v = if (14..16).contains(&y) { base - 40 } else { base };
                img.set(x, y, v);
            }
        }
        let out = adaptive_threshold_gaussian(&img, 11, 2.0);
        for x in 0..40 {
            assert_eq!(out.get(x, 14), 0, "stripe missed at x={x}");
        }
        // Away from the clamped borders the ramp's local mean equals the pixel.
        for x in 5..35 {
            assert_eq!(out.get(x, 5), 255, "background lost at x={x}");
        }
    }
}
