//! Interleaved 3-channel colour frames as delivered by a frame source.
//!
//! `ColorFrame` borrows the acquisition buffer; `OwnedFrame` is what the
//! file-backed sources hand out. Geometry is checked once per tick by
//! [`ColorFrame::validate`] before any stage touches the pixels.
use crate::error::{GaugeError, Result};
use serde::{Deserialize, Serialize};

/// Sample order inside one interleaved pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

#[derive(Clone, Debug)]
pub struct ColorFrame<'a> {
    pub w: usize,
    pub h: usize,
    /// Bytes between consecutive rows (>= `w * channels`).
    pub stride: usize,
    pub channels: usize,
    pub order: ChannelOrder,
    pub data: &'a [u8],
}

impl<'a> ColorFrame<'a> {
    /// Tightly packed 3-channel view.
    pub fn packed(w: usize, h: usize, order: ChannelOrder, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            stride: w * 3,
            channels: 3,
            order,
            data,
        }
    }

    /// Checks that the buffer can feed the preprocessing pipeline.
    pub fn validate(&self) -> Result<()> {
        let reason = if self.w == 0 || self.h == 0 {
            Some("zero-sized frame")
        } else if self.channels != 3 {
            Some("expected 3 interleaved channels")
        } else if self.stride < self.w * self.channels {
            Some("stride shorter than a row")
        } else if self.data.len() < self.stride * (self.h - 1) + self.w * self.channels {
            Some("buffer shorter than stride * height")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(GaugeError::MalformedFrame {
                width: self.w,
                height: self.h,
                channels: self.channels,
                stride: self.stride,
                len: self.data.len(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// `(r, g, b)` at `(x, y)`, honouring the channel order.
    #[inline]
    pub fn rgb(&self, x: usize, y: usize) -> (u8, u8, u8) {
        let i = y * self.stride + x * self.channels;
        let (a, b, c) = (self.data[i], self.data[i + 1], self.data[i + 2]);
        match self.order {
            ChannelOrder::Rgb => (a, b, c),
            ChannelOrder::Bgr => (c, b, a),
        }
    }
}

/// Owned interleaved frame.
#[derive(Clone, Debug)]
pub struct OwnedFrame {
    pub w: usize,
    pub h: usize,
    pub channels: usize,
    pub order: ChannelOrder,
    pub data: Vec<u8>,
}

impl OwnedFrame {
    pub fn new(w: usize, h: usize, order: ChannelOrder, data: Vec<u8>) -> Self {
        Self {
            w,
            h,
            channels: 3,
            order,
            data,
        }
    }

    pub fn as_view(&self) -> ColorFrame<'_> {
        ColorFrame {
            w: self.w,
            h: self.h,
            stride: self.w * self.channels,
            channels: self.channels,
            order: self.order,
            data: &self.data,
        }
    }
}
