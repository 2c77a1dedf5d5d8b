//! Error types.

use thiserror::Error;

/// Errors returned by structural and per-voice engine operations.
///
/// None of these leave the engine in a modified state: a rejected operation
/// is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("voice {id} does not exist (the engine holds {count} voices)")]
    VoiceOutOfRange { id: usize, count: usize },

    #[error("cannot add a voice: all {max} voice slots are in use")]
    VoiceLimitReached { max: usize },

    #[error("cannot remove the last remaining voice")]
    LastVoice,

    #[error("the command queue is full")]
    CommandQueueFull,

    #[error("the audio processor has been dropped")]
    Disconnected,
}

/// Errors returned when an [`EngineConfig`](crate::config::EngineConfig) is
/// invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("sample rate must be finite and at least 1 kHz (got {0})")]
    SampleRate(f64),

    #[error("maximum delay must be at least 2 samples (got {0})")]
    MaxDelay(usize),

    #[error("an engine needs at least one voice")]
    NoVoices,

    #[error("{requested} initial voices exceed the limit of {max}")]
    TooManyVoices { requested: usize, max: usize },

    #[error("delay memory holds {provided} samples, but {required} are required")]
    MemoryTooSmall { provided: usize, required: usize },

    #[error(
        "{max_voices} voices of {max_delay_samples} samples exceed the \
         addressable memory"
    )]
    MemoryOverflow { max_delay_samples: usize, max_voices: usize },

    #[error("the command queue needs room for at least one command")]
    QueueSize,

    #[error("failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),
}
