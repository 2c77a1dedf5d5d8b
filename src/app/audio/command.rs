//! Control messages sent to the audio thread.

use crate::dsp::DelayEngine;
use crate::error::EngineError;

/// A single engine operation, queued by the
/// [`EngineController`](crate::app::EngineController) and applied by the
/// [`EngineProcessor`](super::EngineProcessor) at the next block boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineCommand {
    SetMasterDelayTime(f64),
    SetMasterDelayRatio(f64),
    SetMasterFeedback(f64),
    SetMasterFlutter(f64),
    SetMasterGain(f64),
    SetPingPong(bool),
    SetDelayRatio { id: usize, ratio: f64 },
    SetPan { id: usize, pan: f64 },
    SetBypass { id: usize, bypass: bool },
    SetDetune { id: usize, samples: f64 },
    SetFeedback { id: usize, feedback: f64 },
    SetGain { id: usize, gain: f64 },
    SnapToTargets,
    AddVoice,
    RemoveVoice(usize),
    Clear,
}

impl EngineCommand {
    /// Applies the command to `engine`.
    ///
    /// # Errors
    ///
    /// Returns the engine's error if the command was rejected, in which case
    /// the engine is unchanged.
    pub fn apply(self, engine: &mut DelayEngine) -> Result<(), EngineError> {
        match self {
            Self::SetMasterDelayTime(samples) => {
                engine.set_master_delay_time(samples);
            }
            Self::SetMasterDelayRatio(ratio) => {
                engine.set_master_delay_ratio(ratio);
            }
            Self::SetMasterFeedback(feedback) => {
                engine.set_master_feedback(feedback);
            }
            Self::SetMasterFlutter(flutter) => {
                engine.set_master_flutter(flutter);
            }
            Self::SetMasterGain(gain) => engine.set_master_gain(gain),
            Self::SetPingPong(ping_pong) => {
                engine.set_ping_pong_mode(ping_pong);
            }
            Self::SetDelayRatio { id, ratio } => {
                engine.set_delay_ratio(id, ratio)?;
            }
            Self::SetPan { id, pan } => engine.set_pan(id, pan)?,
            Self::SetBypass { id, bypass } => engine.set_bypass(id, bypass)?,
            Self::SetDetune { id, samples } => engine.set_detune(id, samples)?,
            Self::SetFeedback { id, feedback } => {
                engine.set_feedback(id, feedback)?;
            }
            Self::SetGain { id, gain } => engine.set_gain(id, gain)?,
            Self::SnapToTargets => engine.snap_to_targets(),
            Self::AddVoice => {
                engine.add_voice()?;
            }
            Self::RemoveVoice(id) => engine.remove_voice(id)?,
            Self::Clear => engine.clear(),
        }

        Ok(())
    }

    /// The voice the command addresses, if any.
    pub fn voice_id(&self) -> Option<usize> {
        match *self {
            Self::SetDelayRatio { id, .. }
            | Self::SetPan { id, .. }
            | Self::SetBypass { id, .. }
            | Self::SetDetune { id, .. }
            | Self::SetFeedback { id, .. }
            | Self::SetGain { id, .. }
            | Self::RemoveVoice(id) => Some(id),
            _ => None,
        }
    }
}
