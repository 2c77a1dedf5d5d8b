//! The control-thread half of the engine.

use crate::app::audio::{EngineCommand, SharedEngineState, SharedVoiceState};
use crate::error::EngineError;
use crate::prelude::*;
use crossbeam_channel::TrySendError;
use std::sync::Arc;

/// Sends parameter changes to the audio thread and reads back the state it
/// publishes.
///
/// Setters never touch the engine: they queue an [`EngineCommand`] which
/// the [`EngineProcessor`](crate::app::EngineProcessor) applies at its next
/// block. Getters reflect the engine as of the last processed block.
///
/// The controller keeps its own count of voices, including add and remove
/// requests which are still queued, so that voice ids can be checked (and
/// new ids handed out) straight away.
#[derive(Debug)]
pub struct EngineController {
    commands: CCSender<EngineCommand>,
    shared: Arc<SharedEngineState>,
    voice_count: usize,
}

impl EngineController {
    pub(crate) fn new(
        commands: CCSender<EngineCommand>,
        shared: Arc<SharedEngineState>,
    ) -> Self {
        let voice_count = shared.voice_count.lr();
        Self { commands, shared, voice_count }
    }

    /// Queues `command` with the same checks as the matching setter. Voice
    /// additions and removals go through [`add_voice()`](Self::add_voice)
    /// and [`remove_voice()`](Self::remove_voice), so the voice count stays
    /// in step with the engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the command targets a voice which does not exist,
    /// would add or remove a voice past the limits, or could not be queued.
    pub fn send(&mut self, command: EngineCommand) -> Result<(), EngineError> {
        match command {
            EngineCommand::AddVoice => self.add_voice().map(|_| ()),
            EngineCommand::RemoveVoice(id) => self.remove_voice(id),
            _ => {
                if let Some(id) = command.voice_id() {
                    self.check_id(id)?;
                }
                self.queue(command)
            }
        }
    }

    fn queue(&self, command: EngineCommand) -> Result<(), EngineError> {
        match self.commands.try_send(command) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(command)) => {
                log::warn!("engine command queue full, dropping {command:?}");
                Err(EngineError::CommandQueueFull)
            }
            Err(TrySendError::Disconnected(command)) => {
                log::error!("engine processor is gone, dropping {command:?}");
                Err(EngineError::Disconnected)
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error if the command could not be queued.
    pub fn set_master_delay_time(
        &self,
        samples: f64,
    ) -> Result<(), EngineError> {
        self.queue(EngineCommand::SetMasterDelayTime(samples))
    }

    /// Sets the master delay time as a fraction of the line length.
    ///
    /// # Errors
    ///
    /// Returns an error if the command could not be queued.
    pub fn set_master_delay_ratio(
        &self,
        ratio: f64,
    ) -> Result<(), EngineError> {
        self.queue(EngineCommand::SetMasterDelayRatio(ratio))
    }

    /// # Errors
    ///
    /// Returns an error if the command could not be queued.
    pub fn set_master_delay_time_ms(&self, ms: f64) -> Result<(), EngineError> {
        let samples = ms_to_samples(ms, self.shared.sample_rate());
        self.queue(EngineCommand::SetMasterDelayTime(samples))
    }

    /// # Errors
    ///
    /// Returns an error if the command could not be queued.
    pub fn set_master_feedback(
        &self,
        feedback: f64,
    ) -> Result<(), EngineError> {
        self.queue(EngineCommand::SetMasterFeedback(feedback))
    }

    /// # Errors
    ///
    /// Returns an error if the command could not be queued.
    pub fn set_master_flutter(&self, flutter: f64) -> Result<(), EngineError> {
        self.queue(EngineCommand::SetMasterFlutter(flutter))
    }

    /// # Errors
    ///
    /// Returns an error if the command could not be queued.
    pub fn set_master_gain(&self, gain: f64) -> Result<(), EngineError> {
        self.queue(EngineCommand::SetMasterGain(gain))
    }

    /// # Errors
    ///
    /// Returns an error if the command could not be queued.
    pub fn set_ping_pong_mode(
        &self,
        ping_pong: bool,
    ) -> Result<(), EngineError> {
        self.queue(EngineCommand::SetPingPong(ping_pong))
    }

    /// # Errors
    ///
    /// Returns an error if `id` is out of range or the command could not be
    /// queued.
    pub fn set_delay_ratio(
        &self,
        id: usize,
        ratio: f64,
    ) -> Result<(), EngineError> {
        self.check_id(id)?;
        self.queue(EngineCommand::SetDelayRatio { id, ratio })
    }

    /// # Errors
    ///
    /// Returns an error if `id` is out of range or the command could not be
    /// queued.
    pub fn set_pan(&self, id: usize, pan: f64) -> Result<(), EngineError> {
        self.check_id(id)?;
        self.queue(EngineCommand::SetPan { id, pan })
    }

    /// # Errors
    ///
    /// Returns an error if `id` is out of range or the command could not be
    /// queued.
    pub fn set_bypass(
        &self,
        id: usize,
        bypass: bool,
    ) -> Result<(), EngineError> {
        self.check_id(id)?;
        self.queue(EngineCommand::SetBypass { id, bypass })
    }

    /// # Errors
    ///
    /// Returns an error if `id` is out of range or the command could not be
    /// queued.
    pub fn set_detune(
        &self,
        id: usize,
        samples: f64,
    ) -> Result<(), EngineError> {
        self.check_id(id)?;
        self.queue(EngineCommand::SetDetune { id, samples })
    }

    /// # Errors
    ///
    /// Returns an error if `id` is out of range or the command could not be
    /// queued.
    pub fn set_feedback(
        &self,
        id: usize,
        feedback: f64,
    ) -> Result<(), EngineError> {
        self.check_id(id)?;
        self.queue(EngineCommand::SetFeedback { id, feedback })
    }

    /// # Errors
    ///
    /// Returns an error if `id` is out of range or the command could not be
    /// queued.
    pub fn set_gain(&self, id: usize, gain: f64) -> Result<(), EngineError> {
        self.check_id(id)?;
        self.queue(EngineCommand::SetGain { id, gain })
    }

    /// # Errors
    ///
    /// Returns an error if the command could not be queued.
    pub fn snap_to_targets(&self) -> Result<(), EngineError> {
        self.queue(EngineCommand::SnapToTargets)
    }

    /// Zeroes every delay line.
    ///
    /// # Errors
    ///
    /// Returns an error if the command could not be queued.
    pub fn clear(&self) -> Result<(), EngineError> {
        self.queue(EngineCommand::Clear)
    }

    /// Requests a new voice, returning the id it will have.
    ///
    /// # Errors
    ///
    /// Returns an error if every voice slot is taken or the command could not
    /// be queued.
    pub fn add_voice(&mut self) -> Result<usize, EngineError> {
        let max = self.shared.max_voices();
        if self.voice_count >= max {
            return Err(EngineError::VoiceLimitReached { max });
        }

        self.queue(EngineCommand::AddVoice)?;
        self.voice_count += 1;
        log::debug!("queued voice {}", self.voice_count - 1);

        Ok(self.voice_count - 1)
    }

    /// Requests the removal of voice `id`. Later voices move down by one id.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is out of range, it is the last voice, or the
    /// command could not be queued.
    pub fn remove_voice(&mut self, id: usize) -> Result<(), EngineError> {
        self.check_id(id)?;
        if self.voice_count == 1 {
            return Err(EngineError::LastVoice);
        }

        self.queue(EngineCommand::RemoveVoice(id))?;
        self.voice_count -= 1;
        log::debug!("queued removal of voice {id}");

        Ok(())
    }

    /// The number of voices, including queued additions and removals.
    pub fn voice_count(&self) -> usize {
        self.voice_count
    }

    /// The number of voices the audio thread last reported.
    pub fn published_voice_count(&self) -> usize {
        self.shared.voice_count.lr()
    }

    pub fn max_voices(&self) -> usize {
        self.shared.max_voices()
    }

    pub fn max_delay_samples(&self) -> usize {
        self.shared.max_delay_samples()
    }

    pub fn sample_rate(&self) -> f64 {
        self.shared.sample_rate()
    }

    pub fn master_delay_time(&self) -> f64 {
        self.shared.master_delay.lr()
    }

    pub fn master_delay_time_ms(&self) -> f64 {
        samples_to_ms(self.master_delay_time(), self.sample_rate())
    }

    pub fn master_feedback(&self) -> f64 {
        self.shared.master_feedback.lr()
    }

    pub fn master_flutter(&self) -> f64 {
        self.shared.master_flutter.lr()
    }

    pub fn master_gain(&self) -> f64 {
        self.shared.master_gain.lr()
    }

    pub fn ping_pong_mode(&self) -> bool {
        self.shared.ping_pong.lr()
    }

    pub fn delay_ratio(&self, id: usize) -> Option<f64> {
        self.shared.voice(id).map(|v| v.ratio.lr())
    }

    pub fn pan(&self, id: usize) -> Option<f64> {
        self.shared.voice(id).map(|v| v.pan.lr())
    }

    pub fn is_bypassed(&self, id: usize) -> Option<bool> {
        self.shared.voice(id).map(|v| v.bypass.lr())
    }

    pub fn detune(&self, id: usize) -> Option<f64> {
        self.shared.voice(id).map(|v| v.detune.lr())
    }

    pub fn feedback(&self, id: usize) -> Option<f64> {
        self.shared.voice(id).map(|v| v.feedback.lr())
    }

    pub fn gain(&self, id: usize) -> Option<f64> {
        self.shared.voice(id).map(|v| v.gain.lr())
    }

    /// The current target delay time of voice `id` in samples.
    pub fn delay_time(&self, id: usize) -> Option<f64> {
        self.shared.voice(id).map(|v| v.delay_time.lr())
    }

    /// The published state of voice `id`.
    pub fn voice(&self, id: usize) -> Option<&SharedVoiceState> {
        self.shared.voice(id)
    }

    /// How many commands the audio thread has rejected so far.
    pub fn rejected_commands(&self) -> usize {
        self.shared.rejected_commands.lr()
    }

    fn check_id(&self, id: usize) -> Result<(), EngineError> {
        if id < self.voice_count {
            Ok(())
        }
        else {
            Err(EngineError::VoiceOutOfRange { id, count: self.voice_count })
        }
    }
}
