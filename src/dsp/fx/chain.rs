//! The full signal chain: a delay engine into an optional chorus engine.

use crate::dsp::{DelayEngine, DryWet, Effect};

/// A delay engine with a dry/wet mix, followed by a chorus engine which can
/// be switched in and out.
///
/// The chorus keeps processing while it is switched out, so its lines are
/// already filled when it is switched back in.
#[derive(Debug)]
pub struct DelayChain<'buf> {
    delay: DryWet<DelayEngine<'buf>>,
    chorus: DryWet<DelayEngine<'buf>>,
    chorus_enabled: bool,
}

impl<'buf> DelayChain<'buf> {
    /// Chains `delay` into `chorus`. The delay starts fully dry and the
    /// chorus fully wet and switched out.
    pub fn new(delay: DelayEngine<'buf>, chorus: DelayEngine<'buf>) -> Self {
        Self {
            delay: DryWet::new(delay).with_mix(0.0),
            chorus: DryWet::new(chorus).with_mix(1.0),
            chorus_enabled: false,
        }
    }

    /// Processes one stereo sample through the chain.
    pub fn process(&mut self, in_l: f64, in_r: f64) -> (f64, f64) {
        let delayed = self.delay.process_stereo(in_l, in_r);
        let chorused = self.chorus.process_stereo(delayed.0, delayed.1);

        if self.chorus_enabled { chorused } else { delayed }
    }

    /// Processes one mono sample, fed at half level into both channels.
    pub fn process_mono(&mut self, input: f64) -> (f64, f64) {
        let half = input * 0.5;
        self.process(half, half)
    }

    /// Sets the delay's dry/wet mix. Changes are smoothed.
    pub fn set_delay_mix(&mut self, mix: f64) {
        self.delay.set_mix_equal_gain(mix);
    }

    pub fn delay_mix(&self) -> f64 {
        self.delay.mix()
    }

    /// Sets the chorus's dry/wet mix. Changes are smoothed.
    pub fn set_chorus_mix(&mut self, mix: f64) {
        self.chorus.set_mix_equal_gain(mix);
    }

    pub fn chorus_mix(&self) -> f64 {
        self.chorus.mix()
    }

    pub fn set_chorus_enabled(&mut self, enabled: bool) {
        self.chorus_enabled = enabled;
    }

    pub fn chorus_enabled(&self) -> bool {
        self.chorus_enabled
    }

    pub fn delay(&self) -> &DelayEngine<'buf> {
        &self.delay
    }

    pub fn delay_mut(&mut self) -> &mut DelayEngine<'buf> {
        &mut self.delay
    }

    pub fn chorus(&self) -> &DelayEngine<'buf> {
        &self.chorus
    }

    pub fn chorus_mut(&mut self) -> &mut DelayEngine<'buf> {
        &mut self.chorus
    }
}

impl Effect for DelayChain<'_> {
    fn process_stereo(&mut self, in_l: f64, in_r: f64) -> (f64, f64) {
        self.process(in_l, in_r)
    }

    fn get_sample_rate(&self) -> f64 {
        self.delay.get_sample_rate()
    }

    fn get_identifier(&self) -> &str {
        "delay_chain"
    }
}
