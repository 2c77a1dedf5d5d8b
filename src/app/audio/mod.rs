//! The audio thread's side of the engine.

pub mod builder;
pub mod command;
pub mod processor;
pub mod shared;

pub use builder::{EngineBuilder, EnginePackage};
pub use command::EngineCommand;
pub use processor::EngineProcessor;
pub use shared::{SharedEngineState, SharedVoiceState};
