//! Digital signal processors and utilities.

pub mod delay;
pub mod filtering;
pub mod fx;
pub mod modulation;
pub mod synthesis;
pub mod util;

pub use delay::{DelayEngine, DelayLine, DelayVoice, VoiceLines};
pub use filtering::{svf::StateVariableFilter, FilterType, BUTTERWORTH_Q};
pub use fx::{DelayChain, Preset};
pub use modulation::{ModulationSource, PanOscillator};
pub use synthesis::{NoiseOsc, SineOsc};
pub use util::*;
