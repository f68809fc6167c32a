//! Separable 1D filters and clamped-border convolution.
use crate::image::ImageF32;

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// centred on `taps().len() / 2`.
    fn taps(&self) -> &[f32];
}

/// Normalised Gaussian kernel of odd size.
#[derive(Clone, Debug)]
pub struct GaussianKernel {
    taps: Vec<f32>,
}

impl GaussianKernel {
    /// Builds a `ksize`-tap kernel; `sigma <= 0` derives the width from the
    /// size as `0.3·((ksize−1)/2 − 1) + 0.8`.
    pub fn new(ksize: usize, sigma: f32) -> Self {
        let ksize = odd_at_least(ksize, 1);
        let sigma = if sigma > 0.0 {
            sigma
        } else {
            0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
        };
        let half = (ksize / 2) as f32;
        let mut taps: Vec<f32> = (0..ksize)
            .map(|i| {
                let d = i as f32 - half;
                (-(d * d) / (2.0 * sigma * sigma)).exp()
            })
            .collect();
        let total: f32 = taps.iter().sum();
        for t in &mut taps {
            *t /= total;
        }
        Self { taps }
    }
}

impl SeparableFilter for GaussianKernel {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Rounds `v` up to the next odd value no smaller than `min`.
pub fn odd_at_least(v: usize, min: usize) -> usize {
    let v = v.max(min);
    if v % 2 == 0 {
        v + 1
    } else {
        v
    }
}

/// Convolves rows then columns with `filter`, clamping at the borders.
pub fn apply_separable(filter: &dyn SeparableFilter, src: &ImageF32) -> ImageF32 {
    let (w, h) = (src.w, src.h);
    let taps = filter.taps();
    let half = (taps.len() / 2) as isize;
    let mut tmp = ImageF32::new(w, h);
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 || taps.is_empty() {
        return out;
    }

    for y in 0..h {
        let src_row = src.row(y);
        let dst = tmp.row_mut(y);
        for (x, px) in dst.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                let sx = (x as isize + k as isize - half).clamp(0, w as isize - 1) as usize;
                acc += src_row[sx] * t;
            }
            *px = acc;
        }
    }

    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                let sy = (y as isize + k as isize - half).clamp(0, h as isize - 1) as usize;
                acc += tmp.get(x, sy) * t;
            }
            out.row_mut(y)[x] = acc;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaussian_taps_are_normalised_and_symmetric() {
        let k = GaussianKernel::new(11, 0.0);
        let taps = k.taps();
        assert_eq!(taps.len(), 11);
        let total: f32 = taps.iter().sum();
        assert!((total - 1.0).abs() < 1e-5);
        for i in 0..5 {
            assert!((taps[i] - taps[10 - i]).abs() < 1e-7);
        }
        assert!(taps[5] > taps[4]);
    }

    #[test]
    fn even_size_is_rounded_up() {
        assert_eq!(GaussianKernel::new(4, 1.0).taps().len(), 5);
    }

    #[test]
    fn constant_image_is_preserved() {
        let mut img = ImageF32::new(7, 5);
        img.data.iter_mut().for_each(|v| *v = 42.0);
        let out = apply_separable(&GaussianKernel::new(5, 0.0), &img);
        assert!(out.data.iter().all(|v| (v - 42.0).abs() < 1e-3));
    }
}
