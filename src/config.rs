//! Runtime engine configuration.

use crate::error::ConfigError;
use crate::settings::*;
use serde::{Deserialize, Serialize};

/// Whether each voice owns a single delay line or a left/right pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelLayout {
    /// One line per voice, fed with the average of both input channels and
    /// panned with a linear law.
    Mono,
    /// Two independent lines per voice.
    #[default]
    Stereo,
}

impl ChannelLayout {
    /// The number of delay lines each voice owns.
    pub const fn num_lines(self) -> usize {
        match self {
            Self::Mono => 1,
            Self::Stereo => 2,
        }
    }
}

/// Construction-time settings of a [`DelayEngine`](crate::dsp::DelayEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub sample_rate: f64,
    /// Length of each delay line in samples.
    pub max_delay_samples: usize,
    /// Voices present when the engine is created.
    pub num_voices: usize,
    /// Voices the engine may hold at once; memory is reserved for all of them.
    pub max_voices: usize,
    pub layout: ChannelLayout,
    /// Seed of the first voice's flutter noise. Voice `n` uses `seed + n`.
    pub seed: u64,
    /// Capacity of the control command queue.
    pub command_queue_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_delay_samples: (DEFAULT_SAMPLE_RATE * DEFAULT_MAX_DELAY_SECS)
                as usize,
            num_voices: DEFAULT_NUM_VOICES,
            max_voices: DEFAULT_MAX_VOICES,
            layout: ChannelLayout::default(),
            seed: DEFAULT_NOISE_SEED,
            command_queue_size: COMMAND_QUEUE_SIZE,
        }
    }
}

impl EngineConfig {
    /// Parses a config from JSON. Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the resulting config is
    /// invalid (see [`validate()`](Self::validate)).
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_max_delay_samples(mut self, max_delay_samples: usize) -> Self {
        self.max_delay_samples = max_delay_samples;
        self
    }

    /// Sets the maximum delay from a time in seconds at the current sample
    /// rate.
    pub fn with_max_delay_secs(mut self, max_delay_secs: f64) -> Self {
        self.max_delay_samples = (max_delay_secs * self.sample_rate) as usize;
        self
    }

    /// Sets the initial number of voices, raising `max_voices` if needed.
    pub fn with_voices(mut self, num_voices: usize) -> Self {
        self.num_voices = num_voices;
        self.max_voices = self.max_voices.max(num_voices);
        self
    }

    pub fn with_max_voices(mut self, max_voices: usize) -> Self {
        self.max_voices = max_voices;
        self
    }

    pub fn with_layout(mut self, layout: ChannelLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_command_queue_size(mut self, size: usize) -> Self {
        self.command_queue_size = size;
        self
    }

    /// The number of samples of delay memory a single voice occupies.
    /// Saturates at `usize::MAX`; such configs fail
    /// [`validate()`](Self::validate).
    pub fn samples_per_voice(&self) -> usize {
        self.max_delay_samples.saturating_mul(self.layout.num_lines())
    }

    /// The number of samples of delay memory the engine needs. Saturates at
    /// `usize::MAX`; such configs fail [`validate()`](Self::validate).
    pub fn required_memory(&self) -> usize {
        self.samples_per_voice().saturating_mul(self.max_voices)
    }

    /// Allocates a zeroed memory region large enough for this config.
    ///
    /// This allocates, so call it during setup rather than on the audio
    /// thread.
    ///
    /// # Panics
    ///
    /// Panics if the config needs more memory than can be allocated; check
    /// it with [`validate()`](Self::validate) first.
    pub fn allocate_memory(&self) -> Vec<f64> {
        vec![0.0; self.required_memory()]
    }

    /// The maximum delay time of each voice in seconds.
    pub fn max_delay_secs(&self) -> f64 {
        self.max_delay_samples as f64 / self.sample_rate
    }

    /// Checks that the config describes a usable engine.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sample_rate.is_finite() || self.sample_rate < MIN_SAMPLE_RATE
        {
            return Err(ConfigError::SampleRate(self.sample_rate));
        }
        if self.max_delay_samples < 2 {
            return Err(ConfigError::MaxDelay(self.max_delay_samples));
        }
        if self.num_voices == 0 {
            return Err(ConfigError::NoVoices);
        }
        if self.num_voices > self.max_voices {
            return Err(ConfigError::TooManyVoices {
                requested: self.num_voices,
                max: self.max_voices,
            });
        }
        if self.command_queue_size == 0 {
            return Err(ConfigError::QueueSize);
        }

        let max_samples = isize::MAX as usize / std::mem::size_of::<f64>();
        let fits = self
            .max_delay_samples
            .checked_mul(self.layout.num_lines())
            .and_then(|n| n.checked_mul(self.max_voices))
            .is_some_and(|n| n <= max_samples);
        if !fits {
            return Err(ConfigError::MemoryOverflow {
                max_delay_samples: self.max_delay_samples,
                max_voices: self.max_voices,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_delay_samples, 96000);
        assert_eq!(config.required_memory(), 96000 * 2 * DEFAULT_MAX_VOICES);
    }

    #[test]
    fn rejects_bad_values() {
        let bad_rate = EngineConfig::default().with_sample_rate(0.0);
        assert!(matches!(bad_rate.validate(), Err(ConfigError::SampleRate(_))));

        let nan_rate = EngineConfig::default().with_sample_rate(f64::NAN);
        assert!(matches!(nan_rate.validate(), Err(ConfigError::SampleRate(_))));

        let short = EngineConfig::default().with_max_delay_samples(1);
        assert!(matches!(short.validate(), Err(ConfigError::MaxDelay(1))));

        let empty = EngineConfig::default().with_voices(0);
        assert!(matches!(empty.validate(), Err(ConfigError::NoVoices)));

        let crowded = EngineConfig {
            num_voices: 3,
            max_voices: 2,
            ..EngineConfig::default()
        };
        assert!(matches!(
            crowded.validate(),
            Err(ConfigError::TooManyVoices { requested: 3, max: 2 })
        ));

        let no_queue = EngineConfig::default().with_command_queue_size(0);
        assert!(matches!(no_queue.validate(), Err(ConfigError::QueueSize)));
    }

    #[test]
    fn rejects_sample_rates_below_the_floor() {
        for rate in [0.01, 1.0, MIN_SAMPLE_RATE - 1.0, f64::INFINITY] {
            let config = EngineConfig::default().with_sample_rate(rate);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::SampleRate(_))
            ));
        }

        let floor = EngineConfig::default().with_sample_rate(MIN_SAMPLE_RATE);
        assert!(floor.validate().is_ok());
    }

    #[test]
    fn oversized_memory_is_rejected() {
        let config = EngineConfig::from_json_str(
            r#"{ "max_delay_samples": 4611686018427387904, "max_voices": 8 }"#,
        );
        assert!(matches!(
            config,
            Err(ConfigError::MemoryOverflow { max_voices: 8, .. })
        ));

        let config = EngineConfig::default()
            .with_max_delay_samples(usize::MAX / 2)
            .with_max_voices(3);
        assert_eq!(config.required_memory(), usize::MAX);
        assert!(matches!(
            crate::dsp::DelayEngine::new(&mut [], &config),
            Err(ConfigError::MemoryOverflow { .. })
        ));
    }

    #[test]
    fn with_voices_raises_the_limit() {
        let config = EngineConfig::default().with_max_voices(2).with_voices(5);
        assert_eq!(config.max_voices, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn mono_layout_halves_memory() {
        let stereo = EngineConfig::default();
        let mono = EngineConfig::default().with_layout(ChannelLayout::Mono);
        assert_eq!(mono.required_memory() * 2, stereo.required_memory());
    }

    #[test]
    fn parses_partial_json() {
        let config = EngineConfig::from_json_str(
            r#"{ "sample_rate": 44100.0, "num_voices": 2, "layout": "mono" }"#,
        )
        .unwrap();

        assert_eq!(config.sample_rate, 44100.0);
        assert_eq!(config.num_voices, 2);
        assert_eq!(config.layout, ChannelLayout::Mono);
        assert_eq!(config.max_voices, DEFAULT_MAX_VOICES);
    }

    #[test]
    fn json_errors_are_reported() {
        assert!(matches!(
            EngineConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "num_voices": 0 }"#),
            Err(ConfigError::NoVoices)
        ));
    }
}
