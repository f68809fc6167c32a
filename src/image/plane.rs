//! Owned single-channel buffers, row-major without padding.
//!
//! Every intermediate of the preprocessing chain is a [`Plane`]: 8-bit maps
//! (grayscale, smoothed, binary, edges) as [`GrayU8`], and numeric results
//! (Gaussian local means, Sobel derivatives) as [`ImageF32`].

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plane<T> {
    /// Width in pixels, also the row length of `data`.
    pub w: usize,
    pub h: usize,
    pub data: Vec<T>,
}

pub type GrayU8 = Plane<u8>;
pub type ImageF32 = Plane<f32>;

impl<T: Copy + Default> Plane<T> {
    /// `w × h` plane of `T::default()`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, T::default())
    }

    pub fn filled(w: usize, h: usize, value: T) -> Self {
        Self {
            w,
            h,
            data: vec![value; w * h],
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        &self.data[y * self.w..(y + 1) * self.w]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        &mut self.data[y * self.w..(y + 1) * self.w]
    }

    /// Same geometry, every sample mapped through `f`.
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> Plane<U> {
        Plane {
            w: self.w,
            h: self.h,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}

impl GrayU8 {
    /// Number of non-zero pixels.
    pub fn count_set(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}

impl ImageF32 {
    /// Promotes an 8-bit map without rescaling (values stay in `[0, 255]`).
    pub fn from_gray(gray: &GrayU8) -> Self {
        gray.map(f32::from)
    }
}
