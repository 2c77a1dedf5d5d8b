//! Global utility functions, publicly re-exported in `prelude.rs`.

pub mod atomic_ops;
pub mod general;
pub mod interp;
pub mod smoothing;

pub use atomic_ops::AtomicOps;
pub use general::*;
pub use interp::lerp;
pub use smoothing::Smoother;
