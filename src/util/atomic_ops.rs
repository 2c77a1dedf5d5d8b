//! Shorthand atomic load and store operations for common atomic types.
use atomic_float::AtomicF64;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering::Relaxed};

/// Trait for shorthand implementation of Relaxed atomic load and store operations.
pub trait AtomicOps: Default {
    type NonAtomic: Default;

    /// Shorthand method for `self.load(Relaxed)`.
    fn lr(&self) -> Self::NonAtomic;
    /// Shorthand method for `self.store(value, Relaxed)`.
    fn sr(&self, value: Self::NonAtomic);
}

impl AtomicOps for AtomicUsize {
    type NonAtomic = usize;

    fn lr(&self) -> Self::NonAtomic {
        self.load(Relaxed)
    }

    fn sr(&self, value: Self::NonAtomic) {
        self.store(value, Relaxed);
    }
}

impl AtomicOps for AtomicBool {
    type NonAtomic = bool;

    fn lr(&self) -> Self::NonAtomic {
        self.load(Relaxed)
    }

    fn sr(&self, value: Self::NonAtomic) {
        self.store(value, Relaxed);
    }
}

impl AtomicOps for AtomicF64 {
    type NonAtomic = f64;

    fn lr(&self) -> Self::NonAtomic {
        self.load(Relaxed)
    }

    fn sr(&self, value: Self::NonAtomic) {
        self.store(value, Relaxed);
    }
}
