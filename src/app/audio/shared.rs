//! Engine state published by the audio thread for the control thread.

use crate::dsp::DelayEngine;
use crate::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize};

/// The published parameters of a single voice.
#[derive(Debug, Default)]
pub struct SharedVoiceState {
    pub ratio: AtomicF64,
    pub pan: AtomicF64,
    pub detune: AtomicF64,
    pub feedback: AtomicF64,
    pub gain: AtomicF64,
    /// Target delay time in samples, including flutter drift.
    pub delay_time: AtomicF64,
    pub bypass: AtomicBool,
}

/// A snapshot of the engine's parameters, written by the audio thread after
/// every block and read by the control thread.
///
/// Every field is an independent relaxed atomic, so a reader may see values
/// from two consecutive blocks at once.
#[derive(Debug)]
pub struct SharedEngineState {
    pub master_delay: AtomicF64,
    pub master_feedback: AtomicF64,
    pub master_flutter: AtomicF64,
    pub master_gain: AtomicF64,
    pub ping_pong: AtomicBool,
    pub voice_count: AtomicUsize,
    /// Commands the audio thread could not apply.
    pub rejected_commands: AtomicUsize,
    /// One entry per voice slot; only the first `voice_count` are live.
    pub voices: Box<[SharedVoiceState]>,

    sample_rate: f64,
    max_delay_samples: usize,
}

impl SharedEngineState {
    /// Creates the state for `engine` and publishes its current parameters.
    pub fn new(engine: &DelayEngine) -> Self {
        let state = Self {
            master_delay: AtomicF64::default(),
            master_feedback: AtomicF64::default(),
            master_flutter: AtomicF64::default(),
            master_gain: AtomicF64::default(),
            ping_pong: AtomicBool::default(),
            voice_count: AtomicUsize::default(),
            rejected_commands: AtomicUsize::default(),
            voices: (0..engine.max_voices())
                .map(|_| SharedVoiceState::default())
                .collect(),
            sample_rate: engine.sample_rate(),
            max_delay_samples: engine.max_delay_samples(),
        };

        state.publish(engine);
        state
    }

    /// Stores the engine's current parameters.
    pub fn publish(&self, engine: &DelayEngine) {
        self.master_delay.sr(engine.master_delay_time());
        self.master_feedback.sr(engine.master_feedback());
        self.master_flutter.sr(engine.master_flutter());
        self.master_gain.sr(engine.master_gain());
        self.ping_pong.sr(engine.ping_pong_mode());
        self.voice_count.sr(engine.voice_count());

        let live = engine.voices().enumerate().zip(self.voices.iter());
        for ((id, voice), shared) in live {
            shared.ratio.sr(engine.delay_ratio(id).unwrap_or_default());
            shared.pan.sr(voice.pan());
            shared.detune.sr(voice.detune());
            shared.feedback.sr(voice.feedback());
            shared.gain.sr(voice.gain());
            shared.delay_time.sr(voice.delay_time());
            shared.bypass.sr(voice.is_bypassed());
        }
    }

    /// The published voice at `id`, if it is live.
    pub fn voice(&self, id: usize) -> Option<&SharedVoiceState> {
        if id < self.voice_count.lr() { self.voices.get(id) } else { None }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn max_delay_samples(&self) -> usize {
        self.max_delay_samples
    }

    pub fn max_voices(&self) -> usize {
        self.voices.len()
    }
}
