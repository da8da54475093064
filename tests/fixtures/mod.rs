//! Test Fixtures Module
//!
//! Shared helpers for the integration tests:
//! - Audio fixtures (programmatically generated tones and WAV bytes)
//! - Scripted classifier and synthesizer backends

// Each test binary uses a different subset of these helpers
#![allow(dead_code, unused_imports)]

pub mod audio_fixtures;
pub mod backends;

pub use audio_fixtures::*;
pub use backends::*;
