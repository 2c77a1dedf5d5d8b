//! Multi-voice delay engine.

use super::{DelayVoice, VoiceLines};
use crate::config::{ChannelLayout, EngineConfig};
use crate::dsp::Effect;
use crate::error::{ConfigError, EngineError};
use crate::prelude::*;

/// A set of delay voices sharing one memory region.
///
/// The master delay time is distributed to each voice through its ratio
/// (`voice delay = master * ratio`); master feedback, flutter, gain and
/// ping-pong are broadcast. The outputs of all voices which are not bypassed
/// are summed.
///
/// Voices can be added and removed at runtime without allocating: every
/// voice the engine may ever hold is built up front, and removed voices are
/// parked in a pool until they are needed again.
#[derive(Debug)]
pub struct DelayEngine<'buf> {
    /// The active voices, in id order.
    voices: Vec<DelayVoice<'buf>>,
    /// Delay ratio of each active voice.
    ratios: Vec<f64>,
    /// Voices not currently in use.
    pool: Vec<DelayVoice<'buf>>,

    master_delay: f64,
    master_feedback: f64,
    master_flutter: f64,
    master_gain: f64,
    ping_pong: bool,

    output: (f64, f64),

    max_delay_samples: usize,
    max_voices: usize,
    layout: ChannelLayout,
    sample_rate: f64,
}

impl<'buf> DelayEngine<'buf> {
    /// Creates an engine over `memory`, which must hold at least
    /// [`EngineConfig::required_memory()`] samples. Any excess is left
    /// untouched.
    ///
    /// The engine starts with the master delay at half the line length,
    /// default feedback and flutter, every ratio at `1.0`, and pans spread
    /// evenly from left to right.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid or `memory` is too small.
    pub fn new(
        memory: &'buf mut [f64],
        config: &EngineConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let required = config.required_memory();
        if memory.len() < required {
            return Err(ConfigError::MemoryTooSmall {
                provided: memory.len(),
                required,
            });
        }

        let (memory, _) = memory.split_at_mut(required);
        let sample_rate = config.sample_rate;

        // reversed, so voices are taken from the pool in memory order
        let mut pool: Vec<DelayVoice> = memory
            .chunks_exact_mut(config.samples_per_voice())
            .enumerate()
            .map(|(i, slot)| {
                let lines = VoiceLines::new(slot, config.layout);
                let seed = config.seed.wrapping_add(i as u64);
                DelayVoice::new(lines, sample_rate, seed)
            })
            .collect();
        pool.reverse();

        let mut engine = Self {
            voices: Vec::with_capacity(config.max_voices),
            ratios: Vec::with_capacity(config.max_voices),
            pool,
            master_delay: config.max_delay_samples as f64 / 2.0,
            master_feedback: DEFAULT_FEEDBACK,
            master_flutter: DEFAULT_FLUTTER,
            master_gain: 1.0,
            ping_pong: false,
            output: (0.0, 0.0),
            max_delay_samples: config.max_delay_samples,
            max_voices: config.max_voices,
            layout: config.layout,
            sample_rate,
        };

        for _ in 0..config.num_voices {
            engine.add_voice().map_err(|_| ConfigError::TooManyVoices {
                requested: config.num_voices,
                max: config.max_voices,
            })?;
        }

        let spread = config.num_voices.saturating_sub(1) as f64;
        for (i, voice) in engine.voices.iter_mut().enumerate() {
            if spread > 0.0 {
                voice.set_pan(i as f64 / spread);
            }
        }

        Ok(engine)
    }

    /// Processes one stereo sample through every voice, in id order.
    pub fn process(&mut self, in_l: f64, in_r: f64) {
        let mut out = (0.0, 0.0);

        for voice in &mut self.voices {
            voice.process(in_l, in_r);

            if !voice.is_bypassed() {
                out.0 += voice.left();
                out.1 += voice.right();
            }
        }

        self.output = out;
    }

    /// Processes one mono sample, fed at half level into both channels.
    pub fn process_mono(&mut self, input: f64) {
        let half = input * 0.5;
        self.process(half, half);
    }

    /// The summed left output of the last processed sample.
    pub fn left(&self) -> f64 {
        self.output.0
    }

    /// The summed right output of the last processed sample.
    pub fn right(&self) -> f64 {
        self.output.1
    }

    pub fn output(&self) -> (f64, f64) {
        self.output
    }

    /// Sets the master delay time in samples, clamped to `0.01..=len - 1`,
    /// and retargets every voice to `master * ratio`. Non-finite values are
    /// ignored.
    pub fn set_master_delay_time(&mut self, samples: f64) {
        if !samples.is_finite() {
            return;
        }

        self.master_delay = self.clamp_delay(samples);

        for (voice, ratio) in self.voices.iter_mut().zip(&self.ratios) {
            voice.set_delay_time(self.master_delay * ratio);
        }
    }

    /// Sets the master delay time as a fraction of the line length.
    pub fn set_master_delay_ratio(&mut self, ratio: f64) {
        if let Some(ratio) = clamp_unit(ratio) {
            self.set_master_delay_time(ratio * self.max_delay_samples as f64);
        }
    }

    /// Sets the master delay time in milliseconds.
    pub fn set_master_delay_time_ms(&mut self, ms: f64) {
        self.set_master_delay_time(ms_to_samples(ms, self.sample_rate));
    }

    /// Sets the feedback of every voice, clamped to `0.0..=1.0`.
    pub fn set_master_feedback(&mut self, feedback: f64) {
        let Some(feedback) = clamp_unit(feedback) else { return };

        self.master_feedback = feedback;
        self.voices.iter_mut().for_each(|v| v.set_feedback(feedback));
    }

    /// Sets the flutter of every voice, clamped to `0.0..=1.0`.
    pub fn set_master_flutter(&mut self, flutter: f64) {
        let Some(flutter) = clamp_unit(flutter) else { return };

        self.master_flutter = flutter;
        self.voices.iter_mut().for_each(|v| v.set_flutter(flutter));
    }

    /// Sets the output gain of every voice, clamped to `0.0..=1.0`.
    pub fn set_master_gain(&mut self, gain: f64) {
        let Some(gain) = clamp_unit(gain) else { return };

        self.master_gain = gain;
        self.voices.iter_mut().for_each(|v| v.set_gain(gain));
    }

    pub fn set_ping_pong_mode(&mut self, ping_pong: bool) {
        self.ping_pong = ping_pong;
        self.voices.iter_mut().for_each(|v| v.set_ping_pong(ping_pong));
    }

    /// Sets the delay ratio of voice `id`, clamped to `0.0..=1.0`.
    ///
    /// The voice's delay time does not move until the next master delay
    /// change.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is out of range.
    pub fn set_delay_ratio(
        &mut self,
        id: usize,
        ratio: f64,
    ) -> Result<(), EngineError> {
        self.check_id(id)?;

        if let Some(ratio) = clamp_unit(ratio) {
            self.ratios[id] = ratio;
        }

        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if `id` is out of range.
    pub fn set_pan(&mut self, id: usize, pan: f64) -> Result<(), EngineError> {
        self.voice_mut(id)?.set_pan(pan);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if `id` is out of range.
    pub fn set_bypass(
        &mut self,
        id: usize,
        bypass: bool,
    ) -> Result<(), EngineError> {
        self.voice_mut(id)?.set_bypass(bypass);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if `id` is out of range.
    pub fn set_detune(
        &mut self,
        id: usize,
        samples: f64,
    ) -> Result<(), EngineError> {
        self.voice_mut(id)?.set_detune(samples);
        Ok(())
    }

    /// Overrides the feedback of a single voice until the next master
    /// feedback change.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is out of range.
    pub fn set_feedback(
        &mut self,
        id: usize,
        feedback: f64,
    ) -> Result<(), EngineError> {
        self.voice_mut(id)?.set_feedback(feedback);
        Ok(())
    }

    /// Overrides the gain of a single voice until the next master gain
    /// change.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is out of range.
    pub fn set_gain(
        &mut self,
        id: usize,
        gain: f64,
    ) -> Result<(), EngineError> {
        self.voice_mut(id)?.set_gain(gain);
        Ok(())
    }

    /// Moves every voice's read pointer straight to its target delay time.
    pub fn snap_to_targets(&mut self) {
        self.voices.iter_mut().for_each(DelayVoice::snap_to_target);
    }

    /// Zeroes every delay line and the output.
    pub fn clear(&mut self) {
        self.voices.iter_mut().for_each(DelayVoice::clear);
        self.output = (0.0, 0.0);
    }

    /// Adds a voice with a ratio of `1.0`, a centred pan and the master
    /// feedback, flutter, gain and ping-pong settings. Its read pointer starts
    /// at the master delay time.
    ///
    /// Returns the id of the new voice, which is always the highest id.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine already holds `max_voices` voices.
    pub fn add_voice(&mut self) -> Result<usize, EngineError> {
        let Some(mut voice) = self.pool.pop() else {
            return Err(EngineError::VoiceLimitReached { max: self.max_voices });
        };

        voice.set_pan(DEFAULT_PAN);
        voice.set_detune(0.0);
        voice.set_gain(self.master_gain);
        voice.set_bypass(false);
        voice.set_feedback(self.master_feedback);
        voice.set_flutter(self.master_flutter);
        voice.set_ping_pong(self.ping_pong);
        voice.snap_delay_time(self.master_delay * DEFAULT_DELAY_RATIO);

        self.voices.push(voice);
        self.ratios.push(DEFAULT_DELAY_RATIO);

        Ok(self.voices.len() - 1)
    }

    /// Removes voice `id`. Voices after it move down by one id, keeping
    /// their order. The voice's delay lines are zeroed and returned to the
    /// pool.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is out of range or the voice is the last one.
    pub fn remove_voice(&mut self, id: usize) -> Result<(), EngineError> {
        self.check_id(id)?;
        if self.voices.len() == 1 {
            return Err(EngineError::LastVoice);
        }

        let mut voice = self.voices.remove(id);
        self.ratios.remove(id);

        voice.clear();
        self.pool.push(voice);

        Ok(())
    }

    /// The master delay time in samples.
    pub fn master_delay_time(&self) -> f64 {
        self.master_delay
    }

    pub fn master_delay_time_ms(&self) -> f64 {
        samples_to_ms(self.master_delay, self.sample_rate)
    }

    pub fn master_feedback(&self) -> f64 {
        self.master_feedback
    }

    pub fn master_flutter(&self) -> f64 {
        self.master_flutter
    }

    pub fn master_gain(&self) -> f64 {
        self.master_gain
    }

    pub fn ping_pong_mode(&self) -> bool {
        self.ping_pong
    }

    pub fn delay_ratio(&self, id: usize) -> Option<f64> {
        self.ratios.get(id).copied()
    }

    pub fn pan(&self, id: usize) -> Option<f64> {
        self.voice(id).map(DelayVoice::pan)
    }

    pub fn is_bypassed(&self, id: usize) -> Option<bool> {
        self.voice(id).map(DelayVoice::is_bypassed)
    }

    pub fn detune(&self, id: usize) -> Option<f64> {
        self.voice(id).map(DelayVoice::detune)
    }

    pub fn feedback(&self, id: usize) -> Option<f64> {
        self.voice(id).map(DelayVoice::feedback)
    }

    pub fn gain(&self, id: usize) -> Option<f64> {
        self.voice(id).map(DelayVoice::gain)
    }

    /// The current target delay time of voice `id` in samples.
    pub fn delay_time(&self, id: usize) -> Option<f64> {
        self.voice(id).map(DelayVoice::delay_time)
    }

    pub fn voice(&self, id: usize) -> Option<&DelayVoice<'buf>> {
        self.voices.get(id)
    }

    /// The active voices, in id order.
    pub fn voices(&self) -> impl Iterator<Item = &DelayVoice<'buf>> {
        self.voices.iter()
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    pub fn max_voices(&self) -> usize {
        self.max_voices
    }

    /// The length of each delay line in samples.
    pub fn max_delay_samples(&self) -> usize {
        self.max_delay_samples
    }

    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn voice_mut(
        &mut self,
        id: usize,
    ) -> Result<&mut DelayVoice<'buf>, EngineError> {
        let count = self.voices.len();
        self.voices
            .get_mut(id)
            .ok_or(EngineError::VoiceOutOfRange { id, count })
    }

    fn check_id(&self, id: usize) -> Result<(), EngineError> {
        if id < self.voices.len() {
            Ok(())
        }
        else {
            Err(EngineError::VoiceOutOfRange { id, count: self.voices.len() })
        }
    }

    fn clamp_delay(&self, samples: f64) -> f64 {
        let max = (self.max_delay_samples - 1) as f64;
        samples.clamp(MIN_DELAY_SAMPLES, max)
    }
}

impl Effect for DelayEngine<'_> {
    fn process_stereo(&mut self, in_l: f64, in_r: f64) -> (f64, f64) {
        self.process(in_l, in_r);
        self.output
    }

    fn get_sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn get_identifier(&self) -> &str {
        "delay_engine"
    }
}
