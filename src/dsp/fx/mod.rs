//! Complete effect setups built from delay engines.

pub mod chain;
pub mod presets;

pub use chain::DelayChain;
pub use presets::Preset;
