//! Engine constructor.

use super::*;
use crate::app::EngineController;
use crate::config::EngineConfig;
use crate::dsp::DelayEngine;
use crate::error::ConfigError;
use crate::prelude::*;
use std::sync::Arc;

/// Builds a [`DelayEngine`] and splits it into its audio-thread and
/// control-thread halves.
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    config: EngineConfig,
}

/// The two halves of a built engine.
#[derive(Debug)]
pub struct EnginePackage<'buf> {
    /// Move this to the audio thread.
    pub processor: EngineProcessor<'buf>,
    /// Keep this on the control thread.
    pub controller: EngineController,
}

impl EngineBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Builds the engine over `memory`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or `memory` is too small.
    pub fn build(
        self,
        memory: &mut [f64],
    ) -> Result<EnginePackage<'_>, ConfigError> {
        self.build_with(memory, |_| {})
    }

    /// Builds the engine over `memory`, running `setup` on it before either
    /// half exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or `memory` is too small.
    pub fn build_with<'buf, F>(
        self,
        memory: &'buf mut [f64],
        setup: F,
    ) -> Result<EnginePackage<'buf>, ConfigError>
    where
        F: FnOnce(&mut DelayEngine<'buf>),
    {
        let mut engine = DelayEngine::new(memory, &self.config)?;
        setup(&mut engine);

        let (sender, receiver) =
            bounded_channel(self.config.command_queue_size);
        let shared = Arc::new(SharedEngineState::new(&engine));

        log::info!(
            "built delay engine: {} of {} voices, {:?}, {} samples ({:.3} s) per line at {} Hz",
            engine.voice_count(),
            engine.max_voices(),
            engine.layout(),
            engine.max_delay_samples(),
            self.config.max_delay_secs(),
            engine.sample_rate(),
        );

        Ok(EnginePackage {
            controller: EngineController::new(sender, Arc::clone(&shared)),
            processor: EngineProcessor::new(engine, receiver, shared),
        })
    }
}
