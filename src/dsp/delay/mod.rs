//! Delay lines, voices and the multi-voice engine.

pub mod delay_line;
pub mod engine;
pub mod voice;

pub use delay_line::DelayLine;
pub use engine::DelayEngine;
pub use voice::{DelayVoice, VoiceLines};
