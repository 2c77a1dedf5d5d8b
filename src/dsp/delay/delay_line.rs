//! Fixed-capacity ring buffer over borrowed memory.

use crate::prelude::*;
use std::fmt;

/// A circular sample buffer which writes one sample at a time and supports
/// fractional, linearly interpolated reads.
///
/// The line does not own its memory: it borrows a slice of a larger region
/// handed out by the engine, so it never allocates or resizes.
pub struct DelayLine<'buf> {
    /// The internal data buffer.
    data: &'buf mut [f64],
    /// The slot the next sample is written to.
    write_pos: usize,
}

impl<'buf> DelayLine<'buf> {
    /// Wraps `data` as a delay line, zeroing it.
    ///
    /// # Panics
    ///
    /// Panics if `data` is empty.
    pub fn new(data: &'buf mut [f64]) -> Self {
        assert!(!data.is_empty(), "a delay line needs at least one sample");

        let mut line = Self { data, write_pos: 0 };
        line.clear();
        line
    }

    /// Writes `sample` at the write position and advances it, wrapping at
    /// the end of the buffer.
    #[inline]
    pub fn write(&mut self, sample: f64) {
        self.data[self.write_pos] = sample;

        self.write_pos += 1;
        if self.write_pos >= self.data.len() {
            self.write_pos = 0;
        }
    }

    /// Reads the sample `lag` samples behind the write position.
    ///
    /// A lag of `1.0` is the most recently written sample; a lag of `len()`
    /// is the oldest.
    #[inline]
    pub fn read_interpolated(&self, lag: f64) -> f64 {
        self.read_at(self.write_pos as f64 - lag)
    }

    /// Reads at an absolute, fractional buffer coordinate. The coordinate is
    /// wrapped into the buffer first.
    ///
    /// Interpolation weights within `1 / len()` of either neighbour are
    /// snapped to it, so rounding never pulls in the slot that is about to
    /// be overwritten.
    #[inline]
    pub fn read_at(&self, position: f64) -> f64 {
        let size = self.data.len();
        if !position.is_finite() {
            return self.data[self.write_pos];
        }

        let position = wrap_position(position, size as f64);
        let floor = position.floor();
        let mut interp = position - floor;

        let r0 = (floor as usize).min(size - 1);
        let r1 = if r0 + 1 >= size { 0 } else { r0 + 1 };

        let snap = (size as f64).recip();
        if interp < snap {
            interp = 0.0;
        }
        else if interp > 1.0 - snap {
            interp = 1.0;
        }

        lerp(self.data[r0], self.data[r1], interp)
    }

    /// Zeroes the buffer and rewinds the write position.
    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|x| *x = 0.0);
        self.write_pos = 0;
    }

    /// The number of samples the line holds.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`: a line is never empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The slot the next sample will be written to.
    pub fn write_index(&self) -> usize {
        self.write_pos
    }
}

impl fmt::Debug for DelayLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelayLine")
            .field("len", &self.data.len())
            .field("write_pos", &self.write_pos)
            .finish()
    }
}
