//! Edge processing: Sobel gradients and the Canny detector built on them.
//!
//! - Gradient computation returning `gx`, `gy` and the L1 magnitude.
//! - Direction-aligned non-maximum suppression followed by hysteresis,
//!   producing a binary (0/255) edge map of the input size.
//!
//! Borders are handled by clamping indices (replicate).

pub mod canny;
pub mod grad;

pub use canny::canny;
pub use grad::{sobel_gradients, Grad};
