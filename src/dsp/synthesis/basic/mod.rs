//! Primitive, non-anti-aliased oscillator types.

pub mod noise_osc;
pub mod sine;

pub use noise_osc::NoiseOsc;
pub use sine::SineOsc;
