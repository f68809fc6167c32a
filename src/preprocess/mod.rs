//! Frame preprocessing: colour frame → binary edge map.
//!
//! The stages run in a fixed order, each consuming the previous output:
//!
//! 1. Luma conversion ([`gray::to_grayscale`]).
//! 2. Bilateral smoothing ([`bilateral::bilateral_filter`]) to flatten texture
//!    while keeping step edges sharp.
//! 3. Adaptive Gaussian thresholding ([`threshold::adaptive_threshold_gaussian`])
//!    so that uneven lighting does not shift the binarisation.
//! 4. Morphological opening with a wide, flat element ([`morph::open_rect`])
//!    that keeps horizontal structures only.
//! 5. Canny hysteresis edge detection ([`crate::edges::canny`]).
//!
//! Every frame that passes [`ColorFrame::validate`] produces an edge map of
//! the same width and height.

pub mod bilateral;
pub mod filters;
pub mod gray;
pub mod morph;
pub mod threshold;

use crate::edges::canny;
use crate::error::Result;
use crate::image::{ColorFrame, GrayU8};
use log::debug;
use morph::RectElement;
use serde::{Deserialize, Serialize};

/// Knobs for the preprocessing stages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessOptions {
    /// Bilateral neighbourhood diameter in pixels.
    pub bilateral_diameter: usize,
    /// Bilateral range sigma (intensity levels).
    pub bilateral_sigma_color: f32,
    /// Bilateral spatial sigma (pixels).
    pub bilateral_sigma_space: f32,
    /// Adaptive threshold block size (rounded up to odd).
    pub adaptive_block_size: usize,
    /// Constant subtracted from the local mean.
    pub adaptive_offset: f32,
    /// Opening element width; wide values favour horizontal structures.
    pub open_kernel_width: usize,
    pub open_kernel_height: usize,
    /// Canny hysteresis thresholds (L1 Sobel units).
    pub canny_low: f32,
    pub canny_high: f32,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            bilateral_diameter: 9,
            bilateral_sigma_color: 75.0,
            bilateral_sigma_space: 75.0,
            adaptive_block_size: 11,
            adaptive_offset: 2.0,
            open_kernel_width: 25,
            open_kernel_height: 1,
            canny_low: 30.0,
            canny_high: 150.0,
        }
    }
}

/// Every intermediate of one preprocessing run, for tooling.
#[derive(Clone, Debug)]
pub struct PreprocessStages {
    pub gray: GrayU8,
    pub smoothed: GrayU8,
    pub binary: GrayU8,
    pub opened: GrayU8,
    pub edges: GrayU8,
}

/// Runs the full pipeline and keeps every intermediate map.
pub fn preprocess_stages(frame: &ColorFrame<'_>, opts: &PreprocessOptions) -> Result<PreprocessStages> {
    frame.validate()?;
    let gray = gray::to_grayscale(frame);
    let smoothed = bilateral::bilateral_filter(
        &gray,
        opts.bilateral_diameter,
        opts.bilateral_sigma_color,
        opts.bilateral_sigma_space,
    );
    let binary =
        threshold::adaptive_threshold_gaussian(&smoothed, opts.adaptive_block_size, opts.adaptive_offset);
    let element = RectElement::new(opts.open_kernel_width, opts.open_kernel_height);
    let opened = morph::open_rect(&binary, element);
    let edges = canny(&opened, opts.canny_low, opts.canny_high);
    debug!(
        "preprocess w={} h={} binary_set={} opened_set={} edge_px={}",
        frame.w,
        frame.h,
        binary.count_set(),
        opened.count_set(),
        edges.count_set()
    );
    Ok(PreprocessStages {
        gray,
        smoothed,
        binary,
        opened,
        edges,
    })
}

/// Colour frame → binary edge map (0/255, same size as the frame).
pub fn preprocess_frame(frame: &ColorFrame<'_>, opts: &PreprocessOptions) -> Result<GrayU8> {
    preprocess_stages(frame, opts).map(|stages| stages.edges)
}
