//! Grey-level morphology with rectangular structuring elements.
//!
//! Out-of-image samples are ignored, so the border never erodes or dilates
//! the content. A wide, one-row element (`25×1` by default) keeps horizontal
//! runs and removes vertical or diagonal clutter.
use crate::image::GrayU8;

/// Rectangular structuring element anchored at its centre.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectElement {
    pub width: usize,
    pub height: usize,
}

impl RectElement {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    fn anchor(&self) -> (isize, isize) {
        ((self.width / 2) as isize, (self.height / 2) as isize)
    }
}

#[derive(Clone, Copy)]
enum Op {
    Erode,
    Dilate,
}

fn rank_filter(src: &GrayU8, el: RectElement, op: Op) -> GrayU8 {
    let (w, h) = (src.w, src.h);
    let mut out = GrayU8::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }
    let (ax, ay) = el.anchor();
    // Dilation uses the reflected element so that open/close are exact duals.
    let (x0, y0) = match op {
        Op::Erode => (-ax, -ay),
        Op::Dilate => (ax - el.width as isize + 1, ay - el.height as isize + 1),
    };

    for y in 0..h {
        let dst = out.row_mut(y);
        for (x, px) in dst.iter_mut().enumerate() {
            let xs = (x as isize + x0).max(0) as usize;
            let xe = ((x as isize + x0 + el.width as isize).min(w as isize)) as usize;
            let ys = (y as isize + y0).max(0) as usize;
            let ye = ((y as isize + y0 + el.height as isize).min(h as isize)) as usize;
            let mut acc = match op {
                Op::Erode => u8::MAX,
                Op::Dilate => u8::MIN,
            };
            for yy in ys..ye {
                let row = &src.row(yy)[xs..xe];
                acc = match op {
                    Op::Erode => row.iter().fold(acc, |a, &v| a.min(v)),
                    Op::Dilate => row.iter().fold(acc, |a, &v| a.max(v)),
                };
            }
            *px = acc;
        }
    }
    out
}

pub fn erode_rect(src: &GrayU8, el: RectElement) -> GrayU8 {
    rank_filter(src, el, Op::Erode)
}

pub fn dilate_rect(src: &GrayU8, el: RectElement) -> GrayU8 {
    rank_filter(src, el, Op::Dilate)
}

/// Erosion followed by dilation: removes structures narrower than `el`.
pub fn open_rect(src: &GrayU8, el: RectElement) -> GrayU8 {
    dilate_rect(&erode_rect(src, el), el)
}
