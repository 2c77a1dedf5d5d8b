//! Control-rate parameter access.

pub mod controller;

pub use controller::EngineController;
