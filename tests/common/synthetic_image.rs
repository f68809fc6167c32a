use height_gauge::image::{ChannelOrder, OwnedFrame};
use std::ops::Range;

pub const BACKGROUND: [u8; 3] = [215, 210, 205];
pub const BAR: [u8; 3] = [35, 30, 40];

/// Light RGB frame with full-width dark horizontal bars.
pub fn banded_rgb(width: usize, height: usize, bars: &[Range<usize>]) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        let color = if bars.iter().any(|b| b.contains(&y)) {
            BAR
        } else {
            BACKGROUND
        };
        for _ in 0..width {
            img.extend_from_slice(&color);
        }
    }
    img
}

pub fn banded_frame(width: usize, height: usize, bars: &[Range<usize>]) -> OwnedFrame {
    OwnedFrame::new(width, height, ChannelOrder::Rgb, banded_rgb(width, height, bars))
}

/// Frame whose buffer is too short for its declared size.
pub fn truncated_frame(width: usize, height: usize) -> OwnedFrame {
    OwnedFrame::new(width, height, ChannelOrder::Rgb, vec![0u8; width * 3])
}

/// Light RGB frame with full-height dark vertical bars.
pub fn columned_frame(width: usize, height: usize, cols: &[Range<usize>]) -> OwnedFrame {
    let mut img = Vec::with_capacity(width * height * 3);
    for _ in 0..height {
        for x in 0..width {
            let color = if cols.iter().any(|c| c.contains(&x)) {
                BAR
            } else {
                BACKGROUND
            };
            img.extend_from_slice(&color);
        }
    }
    OwnedFrame::new(width, height, ChannelOrder::Rgb, img)
}
