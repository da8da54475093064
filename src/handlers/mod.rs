//! HTTP request handlers
//!
//! - `api` - Health check and the browser form
//! - `synthesize` - Emotion-aware text-to-speech

pub mod api;
pub mod synthesize;

pub use synthesize::synthesize_handler;
