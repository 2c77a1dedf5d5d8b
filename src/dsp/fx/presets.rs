//! Factory setups for the delay and chorus engines.

use crate::config::EngineConfig;
use crate::dsp::DelayEngine;
use crate::settings::DEFAULT_MAX_DELAY_SECS;

/// A named engine setup: how large the engine is, and how its voices are
/// spread once it exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Three voices over two seconds, panned left, centre and right.
    Delay,
    /// Two short, heavily detuned voices panned hard left and right.
    Chorus,
}

impl Preset {
    /// The engine config for this preset at `sample_rate`.
    pub fn config(self, sample_rate: f64) -> EngineConfig {
        let base = EngineConfig::default().with_sample_rate(sample_rate);

        match self {
            Self::Delay => base
                .with_max_delay_secs(DEFAULT_MAX_DELAY_SECS)
                .with_voices(3)
                .with_max_voices(3),
            Self::Chorus => base
                .with_max_delay_samples((sample_rate / 50.0) as usize)
                .with_voices(2)
                .with_max_voices(2),
        }
    }

    /// Sets up the voices of `engine`, which should have been built from
    /// [`config()`](Self::config). Voices the preset does not describe are
    /// left alone.
    pub fn apply(self, engine: &mut DelayEngine) {
        match self {
            Self::Delay => {
                spread_voices(engine, &[(0.0, 0.67), (0.5, 1.0), (1.0, 0.44)]);

                let master = engine.master_delay_time();
                engine.set_master_delay_time(master);
            }
            Self::Chorus => {
                spread_voices(engine, &[(0.0, 1.0), (1.0, 0.2)]);

                engine.set_master_flutter(0.35);
                // an engine always holds at least one voice
                engine.set_detune(0, -300.0).ok();
                engine.set_master_feedback(0.13);
                engine.set_master_delay_time(engine.max_delay_samples() as f64);
            }
        }

        engine.snap_to_targets();
    }
}

/// Sets the `(pan, ratio)` of each voice, in id order.
fn spread_voices(engine: &mut DelayEngine, voices: &[(f64, f64)]) {
    let count = engine.voice_count();

    for (id, &(pan, ratio)) in voices.iter().enumerate().take(count) {
        // ids below `count` always exist
        engine.set_pan(id, pan).ok();
        engine.set_delay_ratio(id, ratio).ok();
    }
}
