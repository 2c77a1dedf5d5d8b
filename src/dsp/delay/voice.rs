//! A single delay voice: one or two delay lines plus flutter, panning and
//! feedback.

use super::DelayLine;
use crate::config::ChannelLayout;
use crate::dsp::modulation::{ModulationSource, PanOscillator};
use crate::dsp::PanningLaw;
use crate::prelude::*;

/// The delay line(s) a voice reads from and writes to.
#[derive(Debug)]
pub enum VoiceLines<'buf> {
    /// One line fed with the average of both inputs.
    Mono(DelayLine<'buf>),
    /// Independent left and right lines.
    Stereo {
        left: DelayLine<'buf>,
        right: DelayLine<'buf>,
    },
}

impl<'buf> VoiceLines<'buf> {
    /// Builds the lines for `layout` over `slot`, zeroing it. Stereo voices
    /// split the slot in half.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is too short for `layout` (fewer than one sample per
    /// line).
    pub fn new(slot: &'buf mut [f64], layout: ChannelLayout) -> Self {
        match layout {
            ChannelLayout::Mono => Self::Mono(DelayLine::new(slot)),
            ChannelLayout::Stereo => {
                let half = slot.len() / 2;
                let (left, right) = slot.split_at_mut(half);

                Self::Stereo {
                    left: DelayLine::new(left),
                    right: DelayLine::new(&mut right[..half]),
                }
            }
        }
    }

    /// The length of each line in samples.
    pub fn len(&self) -> usize {
        match self {
            Self::Mono(line) => line.len(),
            Self::Stereo { left, .. } => left.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The shared write index of the line(s).
    pub fn write_index(&self) -> usize {
        match self {
            Self::Mono(line) => line.write_index(),
            Self::Stereo { left, .. } => left.write_index(),
        }
    }

    pub fn layout(&self) -> ChannelLayout {
        match self {
            Self::Mono(_) => ChannelLayout::Mono,
            Self::Stereo { .. } => ChannelLayout::Stereo,
        }
    }

    pub fn clear(&mut self) {
        match self {
            Self::Mono(line) => line.clear(),
            Self::Stereo { left, right } => {
                left.clear();
                right.clear();
            }
        }
    }
}

/// One delay voice.
///
/// Each call to [`process()`](Self::process) advances the voice by exactly
/// one sample. The read pointer is stored as an absolute buffer coordinate
/// and glides toward the target delay time instead of jumping, so delay time
/// changes bend the pitch rather than click.
#[derive(Debug)]
pub struct DelayVoice<'buf> {
    lines: VoiceLines<'buf>,

    /// Absolute buffer coordinate of the read pointer.
    read_pos: f64,
    /// Target delay time in samples, including flutter drift.
    delay_time: f64,
    /// The read pointer correction applied on the last sample.
    interp_step: f64,

    feedback: f64,
    pan: f64,
    flutter: f64,
    detune: f64,
    gain: f64,
    bypass: bool,
    ping_pong: bool,

    /// Output level after flutter.
    level: f64,
    /// The pan used on the last sample.
    current_pan: f64,
    output: (f64, f64),

    modulation: ModulationSource,
    pan_osc: PanOscillator,

    sample_rate: f64,
}

impl<'buf> DelayVoice<'buf> {
    /// Creates a voice over `lines`.
    ///
    /// The voice starts centred at half the line length, with no feedback and
    /// no flutter, and its read pointer already at that delay.
    pub fn new(lines: VoiceLines<'buf>, sample_rate: f64, seed: u64) -> Self {
        let mut modulation = ModulationSource::new(seed, sample_rate);
        let pan_rate =
            PAN_RATE_SPREAD_HZ.mul_add(modulation.next(), PAN_BASE_RATE_HZ);
        let half = lines.len() as f64 / 2.0;

        let mut voice = Self {
            lines,
            read_pos: 0.0,
            delay_time: MIN_DELAY_SAMPLES,
            interp_step: 0.0,
            feedback: 0.0,
            pan: DEFAULT_PAN,
            flutter: 0.0,
            detune: 0.0,
            gain: 1.0,
            bypass: false,
            ping_pong: false,
            level: 1.0,
            current_pan: DEFAULT_PAN,
            output: (0.0, 0.0),
            modulation,
            pan_osc: PanOscillator::new(pan_rate, sample_rate),
            sample_rate,
        };

        voice.snap_delay_time(half);
        voice
    }

    /// Processes one stereo sample.
    pub fn process(&mut self, in_l: f64, in_r: f64) {
        self.apply_flutter();

        let size = self.max_delay_samples() as f64;
        let diff = self.current_lag() - self.effective_delay();
        let mut step = diff * SMOOTH_GAIN / self.sample_rate;
        if !step.is_finite() {
            step = 0.0;
        }
        self.interp_step = step;

        let read_pos = self.read_pos + step;
        self.read_pos = wrap_position(self.read_pos + 1.0 + step, size);

        let pan = self.next_pan();
        let level = self.level;
        let gain = self.gain;
        let feedback = self.feedback;

        match &mut self.lines {
            VoiceLines::Mono(line) => {
                let sample = line.read_at(read_pos) * level;
                let (out_l, out_r) = PanningLaw::Linear.apply(sample, pan);

                let input = (in_l + in_r) * 0.5;
                line.write((out_l + out_r).mul_add(feedback, input));

                self.output = (out_l * gain, out_r * gain);
            }
            VoiceLines::Stereo { left, right } => {
                let (gain_l, gain_r) = PanningLaw::Balance.gains(pan);
                let out_l = left.read_at(read_pos) * gain_l * level;
                let out_r = right.read_at(read_pos) * gain_r * level;

                left.write(out_l.mul_add(feedback, in_l));
                right.write(out_r.mul_add(feedback, in_r));

                self.output = (out_l * gain, out_r * gain);
            }
        }
    }

    /// Processes one mono sample, fed at half level into both channels.
    pub fn process_mono(&mut self, input: f64) {
        let half = input * 0.5;
        self.process(half, half);
    }

    /// Sets the target delay time in samples. The read pointer glides toward
    /// it over the following samples.
    ///
    /// The value is clamped to `0.01..=len - 1`; non-finite values are
    /// ignored.
    pub fn set_delay_time(&mut self, samples: f64) {
        if samples.is_finite() {
            self.delay_time = self.clamp_delay(samples);
        }
    }

    /// Sets the delay time and moves the read pointer straight to it. Unlike
    /// [`set_delay_time()`](Self::set_delay_time) this is not click-free.
    pub fn snap_delay_time(&mut self, samples: f64) {
        self.set_delay_time(samples);
        self.snap_to_target();
    }

    /// Moves the read pointer so the lag equals the current (detuned) target.
    pub fn snap_to_target(&mut self) {
        let size = self.max_delay_samples() as f64;
        let write = self.lines.write_index() as f64;

        self.read_pos = wrap_position(write - self.effective_delay(), size);
        self.interp_step = 0.0;
    }

    /// Sets the feedback amount, clamped to `0.0..=1.0`.
    pub fn set_feedback(&mut self, feedback: f64) {
        if let Some(feedback) = clamp_unit(feedback) {
            self.feedback = feedback;
        }
    }

    /// Sets the static pan (`0.0` is left, `1.0` is right), clamped to
    /// `0.0..=1.0`.
    ///
    /// The ping-pong oscillator's phase is shifted by half of the change, so
    /// its sweep follows the static position.
    pub fn set_pan(&mut self, pan: f64) {
        if let Some(pan) = clamp_unit(pan) {
            self.pan_osc.phase_add((pan - self.pan) * 0.5);
            self.pan = pan;
        }
    }

    /// Sets the flutter amount, clamped to `0.0..=1.0`.
    pub fn set_flutter(&mut self, flutter: f64) {
        if let Some(flutter) = clamp_unit(flutter) {
            self.flutter = flutter;
        }
    }

    /// Sets the detune offset in samples, added to the target delay time.
    pub fn set_detune(&mut self, samples: f64) {
        if samples.is_finite() {
            self.detune = samples;
        }
    }

    /// Sets the output gain, clamped to `0.0..=1.0`. The gain is applied
    /// after the feedback tap, so it does not change the repeats' decay.
    pub fn set_gain(&mut self, gain: f64) {
        if let Some(gain) = clamp_unit(gain) {
            self.gain = gain;
        }
    }

    /// A bypassed voice keeps running but is left out of the engine's mix.
    pub fn set_bypass(&mut self, bypass: bool) {
        self.bypass = bypass;
    }

    pub fn set_ping_pong(&mut self, ping_pong: bool) {
        self.ping_pong = ping_pong;
    }

    /// Sets the ping-pong oscillator's phase in cycles.
    pub fn reset_pan_phase(&mut self, cycles: f64) {
        self.pan_osc.set_phase(cycles);
    }

    /// Zeroes the delay lines and output, and snaps the read pointer to the
    /// target delay time.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.output = (0.0, 0.0);
        self.snap_to_target();
    }

    pub fn delay_time(&self) -> f64 {
        self.delay_time
    }

    pub fn feedback(&self) -> f64 {
        self.feedback
    }

    pub fn pan(&self) -> f64 {
        self.pan
    }

    pub fn flutter(&self) -> f64 {
        self.flutter
    }

    pub fn detune(&self) -> f64 {
        self.detune
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    pub fn is_bypassed(&self) -> bool {
        self.bypass
    }

    pub fn ping_pong(&self) -> bool {
        self.ping_pong
    }

    /// The flutter level applied on the last sample.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// The pan used on the last sample, static or from the oscillator.
    pub fn current_pan(&self) -> f64 {
        self.current_pan
    }

    pub fn left(&self) -> f64 {
        self.output.0
    }

    pub fn right(&self) -> f64 {
        self.output.1
    }

    pub fn output(&self) -> (f64, f64) {
        self.output
    }

    /// The distance between the write cursor and the read pointer, always in
    /// `(0.0, len]`.
    pub fn current_lag(&self) -> f64 {
        let lag = self.lines.write_index() as f64 - self.read_pos;

        if lag <= 0.0 { lag + self.max_delay_samples() as f64 } else { lag }
    }

    /// The read pointer correction applied on the last sample.
    pub fn interpolation_step(&self) -> f64 {
        self.interp_step
    }

    /// The target lag: delay time plus detune, kept inside the line.
    pub fn effective_delay(&self) -> f64 {
        self.clamp_delay(self.delay_time + self.detune)
    }

    pub fn max_delay_samples(&self) -> usize {
        self.lines.len()
    }

    pub fn layout(&self) -> ChannelLayout {
        self.lines.layout()
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn clamp_delay(&self, samples: f64) -> f64 {
        let max = (self.max_delay_samples() - 1) as f64;
        samples.clamp(MIN_DELAY_SAMPLES, max.max(MIN_DELAY_SAMPLES))
    }

    /// Draws both flutter values. The noise advances even with flutter off,
    /// so turning it on later does not replay the same sequence.
    fn apply_flutter(&mut self) {
        let drift = self.modulation.next();
        let wobble = self.modulation.next();

        if self.flutter > 0.0 {
            let scale = self.flutter * FLUTTER_DELAY_SCALAR;
            self.delay_time =
                self.clamp_delay(scale.mul_add(drift, self.delay_time));
        }

        self.level = 1.0 - wobble.abs() * self.flutter * FLUTTER_LEVEL_SCALAR;
    }

    fn next_pan(&mut self) -> f64 {
        let osc = self.pan_osc.process();

        self.current_pan = if self.ping_pong { osc + 0.5 } else { self.pan };
        self.current_pan
    }
}
