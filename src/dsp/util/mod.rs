//! DSP utility types.

pub mod dry_wet;
pub mod effect_trait;
pub mod panning;

pub use dry_wet::DryWet;
pub use effect_trait::Effect;
pub use panning::PanningLaw;
