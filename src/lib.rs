#![allow(
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::return_self_not_must_use,
    clippy::redundant_closure_for_method_calls
)]

// Audio/control thread plumbing
pub mod app;

// Runtime configuration
pub mod config;

// Signal processing
pub mod dsp;

// Error types
pub mod error;

// General utilities
pub mod util;

// Some widely-used re-exports
pub mod prelude;

// Program-wide settings
pub mod settings;
