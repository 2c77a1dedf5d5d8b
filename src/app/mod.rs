//! Cross-thread plumbing: an audio-thread processor and a control-thread
//! controller around one [`DelayEngine`](crate::dsp::DelayEngine).

pub mod audio;
pub mod params;

pub use audio::*;
pub use params::EngineController;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::error::{ConfigError, EngineError};
    use crate::prelude::*;

    fn small_config() -> EngineConfig {
        EngineConfig::default()
            .with_max_delay_samples(1000)
            .with_voices(2)
            .with_max_voices(3)
    }

    fn run_block(processor: &mut EngineProcessor) {
        let mut left = [0.0; AUDIO_BLOCK_SIZE];
        let mut right = [0.0; AUDIO_BLOCK_SIZE];
        processor.process_block(&mut left, &mut right);
    }

    #[test]
    fn initial_state_is_published() {
        let config = small_config();
        let mut memory = config.allocate_memory();
        let EnginePackage { controller, .. } =
            EngineBuilder::new(config).build(&mut memory).unwrap();

        assert_eq!(controller.voice_count(), 2);
        assert_eq!(controller.published_voice_count(), 2);
        assert_eq!(controller.max_voices(), 3);
        assert_eq!(controller.master_delay_time(), 500.0);
        assert_eq!(controller.master_feedback(), DEFAULT_FEEDBACK);
        assert_eq!(controller.pan(1), Some(1.0));
        assert_eq!(controller.pan(2), None);
    }

    #[test]
    fn commands_apply_at_block_boundary() {
        let config = small_config();
        let mut memory = config.allocate_memory();
        let EnginePackage { mut processor, controller } =
            EngineBuilder::new(config).build(&mut memory).unwrap();

        controller.set_master_feedback(0.7).unwrap();
        controller.set_pan(0, 0.25).unwrap();
        controller.set_detune(1, 12.0).unwrap();
        controller.set_ping_pong_mode(true).unwrap();
        controller.set_master_gain(0.8).unwrap();
        controller.set_master_delay_time(400.0).unwrap();

        // nothing changes until the audio thread runs
        assert_eq!(controller.master_feedback(), DEFAULT_FEEDBACK);
        assert_eq!(processor.engine().master_feedback(), DEFAULT_FEEDBACK);

        run_block(&mut processor);

        assert_eq!(controller.master_feedback(), 0.7);
        assert_eq!(controller.feedback(1), Some(0.7));
        assert_eq!(controller.pan(0), Some(0.25));
        assert_eq!(controller.detune(1), Some(12.0));
        assert!(controller.ping_pong_mode());
        assert_eq!(controller.master_gain(), 0.8);
        assert_eq!(controller.gain(0), Some(0.8));
        assert_eq!(controller.master_delay_time(), 400.0);
        assert!(within_tolerance(
            controller.master_delay_time_ms(),
            400.0 / 48.0,
            1e-9
        ));
        assert_eq!(controller.rejected_commands(), 0);
    }

    #[test]
    fn controller_checks_voice_ids() {
        let config = small_config();
        let mut memory = config.allocate_memory();
        let EnginePackage { mut processor, mut controller } =
            EngineBuilder::new(config).build(&mut memory).unwrap();

        assert_eq!(
            controller.set_pan(2, 0.5),
            Err(EngineError::VoiceOutOfRange { id: 2, count: 2 })
        );

        // the new id can be used before the audio thread has seen it
        assert_eq!(controller.add_voice(), Ok(2));
        assert!(controller.set_pan(2, 0.1).is_ok());
        assert_eq!(
            controller.add_voice(),
            Err(EngineError::VoiceLimitReached { max: 3 })
        );

        run_block(&mut processor);
        assert_eq!(controller.published_voice_count(), 3);
        assert_eq!(controller.pan(2), Some(0.1));

        assert!(controller.remove_voice(0).is_ok());
        assert!(controller.remove_voice(0).is_ok());
        assert_eq!(controller.remove_voice(0), Err(EngineError::LastVoice));

        run_block(&mut processor);
        assert_eq!(controller.published_voice_count(), 1);
        assert_eq!(controller.pan(0), Some(0.1));
        assert_eq!(controller.rejected_commands(), 0);
    }

    #[test]
    fn raw_commands_keep_the_voice_count_in_step() {
        let config = small_config();
        let mut memory = config.allocate_memory();
        let EnginePackage { mut processor, mut controller } =
            EngineBuilder::new(config).build(&mut memory).unwrap();

        assert_eq!(controller.send(EngineCommand::RemoveVoice(0)), Ok(()));
        assert_eq!(controller.voice_count(), 1);
        assert_eq!(
            controller.send(EngineCommand::RemoveVoice(0)),
            Err(EngineError::LastVoice)
        );
        assert_eq!(
            controller.send(EngineCommand::SetPan { id: 1, pan: 0.2 }),
            Err(EngineError::VoiceOutOfRange { id: 1, count: 1 })
        );
        assert_eq!(controller.send(EngineCommand::AddVoice), Ok(()));
        assert_eq!(controller.voice_count(), 2);
        let set_pan = EngineCommand::SetPan { id: 1, pan: 0.2 };
        assert!(controller.send(set_pan).is_ok());
        assert!(controller.send(EngineCommand::SetMasterFlutter(0.0)).is_ok());

        run_block(&mut processor);

        assert_eq!(processor.engine().voice_count(), 2);
        assert_eq!(controller.published_voice_count(), 2);
        assert_eq!(controller.pan(1), Some(0.2));
        assert_eq!(controller.master_flutter(), 0.0);
        assert_eq!(controller.rejected_commands(), 0);
    }

    #[test]
    fn full_queue_is_reported() {
        let config = small_config().with_command_queue_size(2);
        let mut memory = config.allocate_memory();
        let EnginePackage { mut processor, controller } =
            EngineBuilder::new(config).build(&mut memory).unwrap();

        assert!(controller.set_master_feedback(0.1).is_ok());
        assert!(controller.set_master_feedback(0.2).is_ok());
        assert_eq!(
            controller.set_master_feedback(0.3),
            Err(EngineError::CommandQueueFull)
        );

        run_block(&mut processor);
        assert_eq!(controller.master_feedback(), 0.2);
        assert!(controller.set_master_feedback(0.3).is_ok());
    }

    #[test]
    fn dropped_processor_disconnects() {
        let config = small_config();
        let mut memory = config.allocate_memory();
        let EnginePackage { processor, mut controller } =
            EngineBuilder::new(config).build(&mut memory).unwrap();
        drop(processor);

        assert_eq!(
            controller.set_master_flutter(0.2),
            Err(EngineError::Disconnected)
        );
        assert_eq!(controller.add_voice(), Err(EngineError::Disconnected));
        assert_eq!(controller.voice_count(), 2);
    }

    #[test]
    fn interleaved_matches_split_channels() {
        let config = small_config();
        let mut mem_a = config.allocate_memory();
        let mut mem_b = config.allocate_memory();
        fn setup(engine: &mut crate::dsp::DelayEngine) {
            engine.set_master_flutter(0.0);
            engine.set_master_delay_time(3.0);
            engine.snap_to_targets();
        }

        let mut a = EngineBuilder::new(config.clone())
            .build_with(&mut mem_a, setup)
            .unwrap()
            .processor;
        let mut b = EngineBuilder::new(config)
            .build_with(&mut mem_b, setup)
            .unwrap()
            .processor;

        let input = [1.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let mut interleaved = [0.0; 8];
        a.process_interleaved(&input, &mut interleaved);

        let mut left = [1.0, 0.0, 0.0, 0.0];
        let mut right = [0.5, 0.0, 0.0, 0.0];
        b.process_block(&mut left, &mut right);

        for i in 0..4 {
            assert_eq!(interleaved[i * 2], left[i]);
            assert_eq!(interleaved[i * 2 + 1], right[i]);
        }
        // pans 0 and 1 with a 3 sample delay
        assert_eq!(left[3], 1.0);
        assert_eq!(right[3], 0.5);
    }

    #[test]
    fn builder_reports_bad_memory() {
        let config = small_config();
        let mut memory = vec![0.0; 10];

        assert!(matches!(
            EngineBuilder::new(config).build(&mut memory),
            Err(ConfigError::MemoryTooSmall { provided: 10, .. })
        ));
    }
}
