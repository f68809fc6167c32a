use crate::image::{ColorFrame, GrayU8};

/// Luma weights (ITU-R BT.601) in 14-bit fixed point.
const R_W: u32 = 4899;
const G_W: u32 = 9617;
const B_W: u32 = 1868;
const SHIFT: u32 = 14;

/// Converts an interleaved colour frame to 8-bit luma.
///
/// The frame must already have passed [`ColorFrame::validate`].
pub fn to_grayscale(frame: &ColorFrame<'_>) -> GrayU8 {
    let mut out = GrayU8::new(frame.w, frame.h);
    for y in 0..frame.h {
        let dst = out.row_mut(y);
        for (x, px) in dst.iter_mut().enumerate() {
            let (r, g, b) = frame.rgb(x, y);
            let luma = (r as u32 * R_W + g as u32 * G_W + b as u32 * B_W + (1 << (SHIFT - 1))) >> SHIFT;
            *px = luma.min(255) as u8;
        }
    }
    out
}
