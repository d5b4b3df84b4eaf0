#[derive(Debug, Clone)]
pub struct Im<T, const N_CH: usize> {
    pub w: usize,
    pub h: usize,
    pub s: usize, // stride in elements (w * N_CH)
    pub arr: Vec<T>,
}

impl<T: Copy, const N_CH: usize> Im<T, N_CH> {
    /// Wraps a tightly packed buffer. Returns `None` if `arr` is not exactly `w * h * N_CH` long.
    pub fn from_raw(w: usize, h: usize, arr: Vec<T>) -> Option<Self> {
        let s = w.checked_mul(N_CH)?;
        if s.checked_mul(h)? != arr.len() {
            return None;
        }
        Some(Self { w, h, s, arr })
    }

    /// All channels of pixel `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn px(&self, x: usize, y: usize) -> [T; N_CH] {
        debug_assert!(x < self.w && y < self.h);
        let i = y * self.s + x * N_CH;
        std::array::from_fn(|ch| self.arr[i + ch])
    }
}

pub type RGBAIm = Im<u8, 4>;
