//! Edge-preserving bilateral smoothing on 8-bit luma.
//!
//! Each output pixel is the normalised sum of its disc neighbourhood weighted
//! by `exp(-r²/2σs²) · exp(-Δ²/2σc²)`, where `r` is the spatial distance and
//! `Δ` the intensity difference to the centre. Step edges keep their contrast
//! while flat texture is averaged out. Borders clamp (replicate).
use crate::image::GrayU8;

struct Tap {
    dx: isize,
    dy: isize,
    weight: f32,
}

/// `diameter` is the neighbourhood width in pixels (values < 1 act as 1).
pub fn bilateral_filter(src: &GrayU8, diameter: usize, sigma_color: f32, sigma_space: f32) -> GrayU8 {
    let (w, h) = (src.w, src.h);
    let mut out = GrayU8::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    let radius = (diameter.max(1) / 2) as isize;
    let sigma_color = sigma_color.max(f32::EPSILON);
    let sigma_space = sigma_space.max(f32::EPSILON);
    let color_coeff = -0.5 / (sigma_color * sigma_color);
    let space_coeff = -0.5 / (sigma_space * sigma_space);

    let color_lut: Vec<f32> = (0..256)
        .map(|d| ((d * d) as f32 * color_coeff).exp())
        .collect();

    let mut taps = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let r2 = (dx * dx + dy * dy) as f32;
            if r2.sqrt() > radius as f32 {
                continue;
            }
            taps.push(Tap {
                dx,
                dy,
                weight: (r2 * space_coeff).exp(),
            });
        }
    }

    let max_x = w as isize - 1;
    let max_y = h as isize - 1;
    for y in 0..h {
        let dst = out.row_mut(y);
        let centre_row = src.row(y);
        for (x, px) in dst.iter_mut().enumerate() {
            let centre = centre_row[x] as i32;
            let mut sum = 0.0f32;
            let mut norm = 0.0f32;
            for tap in &taps {
                let sx = (x as isize + tap.dx).clamp(0, max_x) as usize;
                let sy = (y as isize + tap.dy).clamp(0, max_y) as usize;
                let v = src.get(sx, sy);
                let wgt = tap.weight * color_lut[(v as i32 - centre).unsigned_abs() as usize];
                sum += wgt * v as f32;
                norm += wgt;
            }
            *px = (sum / norm).round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}
