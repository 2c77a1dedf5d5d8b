//! The audio-thread half of the engine.

use super::{EngineCommand, SharedEngineState};
use crate::dsp::DelayEngine;
use crate::prelude::*;
use std::sync::atomic::Ordering::Relaxed;
use std::sync::Arc;

/// Owns the [`DelayEngine`] on the audio thread.
///
/// Commands from the controller are applied at the start of each block, and
/// the engine's parameters are published once the block is done. Nothing in
/// here blocks, locks or allocates.
#[derive(Debug)]
pub struct EngineProcessor<'buf> {
    engine: DelayEngine<'buf>,
    commands: CCReceiver<EngineCommand>,
    shared: Arc<SharedEngineState>,
}

impl<'buf> EngineProcessor<'buf> {
    pub(super) fn new(
        engine: DelayEngine<'buf>,
        commands: CCReceiver<EngineCommand>,
        shared: Arc<SharedEngineState>,
    ) -> Self {
        Self { engine, commands, shared }
    }

    /// Applies every queued command, returning how many were received.
    /// Rejected commands are counted in the shared state.
    pub fn apply_pending_commands(&mut self) -> usize {
        let mut received = 0;

        for command in self.commands.try_iter() {
            received += 1;

            if command.apply(&mut self.engine).is_err() {
                self.shared.rejected_commands.fetch_add(1, Relaxed);
            }
        }

        received
    }

    /// Processes one stereo sample. Does not apply commands.
    #[inline]
    pub fn process_sample(&mut self, in_l: f64, in_r: f64) -> (f64, f64) {
        self.engine.process(in_l, in_r);
        self.engine.output()
    }

    /// Applies pending commands, then processes `left` and `right` in place.
    ///
    /// Only the first `min(left.len(), right.len())` frames are touched.
    pub fn process_block(&mut self, left: &mut [f64], right: &mut [f64]) {
        self.apply_pending_commands();

        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            (*l, *r) = self.process_sample(*l, *r);
        }

        self.publish();
    }

    /// Applies pending commands, then processes interleaved stereo frames
    /// from `input` into `output`.
    ///
    /// Only whole frames present in both buffers are processed.
    pub fn process_interleaved(&mut self, input: &[f64], output: &mut [f64]) {
        self.apply_pending_commands();

        let frames = input
            .chunks_exact(NUM_CHANNELS)
            .zip(output.chunks_exact_mut(NUM_CHANNELS));

        for (frame_in, frame_out) in frames {
            let (l, r) = self.process_sample(frame_in[0], frame_in[1]);
            frame_out[0] = l;
            frame_out[1] = r;
        }

        self.publish();
    }

    /// Stores the engine's parameters for the controller.
    pub fn publish(&self) {
        self.shared.publish(&self.engine);
    }

    pub fn engine(&self) -> &DelayEngine<'buf> {
        &self.engine
    }

    /// Direct access to the engine. Changes made here are published after
    /// the next block.
    pub fn engine_mut(&mut self) -> &mut DelayEngine<'buf> {
        &mut self.engine
    }

    pub fn shared(&self) -> &Arc<SharedEngineState> {
        &self.shared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    #[test]
    fn rejected_commands_are_counted() {
        let config = EngineConfig::default()
            .with_max_delay_samples(1000)
            .with_voices(2)
            .with_max_voices(2);
        let mut memory = config.allocate_memory();
        let engine = DelayEngine::new(&mut memory, &config).unwrap();

        let (sender, receiver) = bounded_channel(8);
        let shared = Arc::new(SharedEngineState::new(&engine));
        let mut processor =
            EngineProcessor::new(engine, receiver, Arc::clone(&shared));

        sender.send(EngineCommand::RemoveVoice(9)).unwrap();
        sender.send(EngineCommand::SetPan { id: 5, pan: 0.0 }).unwrap();
        sender.send(EngineCommand::AddVoice).unwrap();
        sender.send(EngineCommand::SetMasterFlutter(0.0)).unwrap();

        assert_eq!(processor.apply_pending_commands(), 4);
        processor.publish();

        assert_eq!(shared.rejected_commands.lr(), 3);
        assert_eq!(shared.master_flutter.lr(), 0.0);
        assert_eq!(processor.engine().voice_count(), 2);
    }

    #[test]
    fn voice_ids_of_commands() {
        let set_gain = EngineCommand::SetGain { id: 3, gain: 1.0 };
        assert_eq!(set_gain.voice_id(), Some(3));
        assert_eq!(EngineCommand::RemoveVoice(1).voice_id(), Some(1));
        assert_eq!(EngineCommand::AddVoice.voice_id(), None);
        assert_eq!(EngineCommand::SetMasterFeedback(0.1).voice_id(), None);
    }
}
