//! Global constants.
//!
//! Nothing in here is mutable: the sample rate and buffer sizes are runtime
//! configuration (see [`EngineConfig`](crate::config::EngineConfig)), these
//! are only the defaults and the fixed tuning of the delay algorithm.

/// The default sample rate, 48 kHz.
pub const DEFAULT_SAMPLE_RATE: f64 = 48000.0;

/// The lowest sample rate an engine accepts.
pub const MIN_SAMPLE_RATE: f64 = 1000.0;

/// The default maximum delay time of each voice in seconds.
pub const DEFAULT_MAX_DELAY_SECS: f64 = 2.0;

/// The default number of voices an engine starts with.
pub const DEFAULT_NUM_VOICES: usize = 3;

/// The default number of voices an engine can hold at once. Memory for this
/// many voices is reserved up front.
pub const DEFAULT_MAX_VOICES: usize = 8;

/// The shortest delay time a voice accepts, in samples. Never exactly `0.0`,
/// so the lag between the read and write pointers is always well-defined.
pub const MIN_DELAY_SAMPLES: f64 = 0.01;

/// How strongly the read pointer is pulled toward the target delay time.
///
/// The per-sample correction is `lag_error * SMOOTH_GAIN / sample_rate`, so a
/// delay change settles with a time constant of `1 / SMOOTH_GAIN` seconds.
pub const SMOOTH_GAIN: f64 = 1.25;

/// Scales the flutter noise applied to the target delay time, in samples.
pub const FLUTTER_DELAY_SCALAR: f64 = 10.0;

/// Scales the flutter noise applied to the output level.
pub const FLUTTER_LEVEL_SCALAR: f64 = 0.07;

/// Cutoff of the lowpass filter which shapes the flutter noise.
pub const FLUTTER_NOISE_CUTOFF_HZ: f64 = 200.0;

/// Base rate of the ping-pong pan oscillator. Each voice adds up to
/// `PAN_RATE_SPREAD_HZ` of filtered noise on top so voices drift apart.
pub const PAN_BASE_RATE_HZ: f64 = 0.6;
/// See [`PAN_BASE_RATE_HZ`].
pub const PAN_RATE_SPREAD_HZ: f64 = 0.5;

/// Amplitude of the pan oscillator. Centred on `0.5`, this sweeps the full
/// `0.0..=1.0` pan range.
pub const PAN_OSC_AMPLITUDE: f64 = 0.5;

/// Startup master feedback.
pub const DEFAULT_FEEDBACK: f64 = 0.3;
/// Startup master flutter.
pub const DEFAULT_FLUTTER: f64 = 0.5;
/// Startup delay ratio of every voice.
pub const DEFAULT_DELAY_RATIO: f64 = 1.0;
/// Startup pan of a single voice (and of voices added at runtime).
pub const DEFAULT_PAN: f64 = 0.5;

/// The seed used for the flutter noise when none is configured.
pub const DEFAULT_NOISE_SEED: u64 = 0x5EED_DE1A;

/// How many control commands may be queued between two audio blocks.
pub const COMMAND_QUEUE_SIZE: usize = 64;

/// The audio block size of the reference hardware.
pub const AUDIO_BLOCK_SIZE: usize = 4;

/// The number of audio channels produced by the engine.
pub const NUM_CHANNELS: usize = 2;

/// Smoothing time of the dry/wet mix in milliseconds.
pub const MIX_SMOOTHING_MS: f64 = 5.0;
