//! Module for signal generation.

pub mod basic;

pub use basic::*;
