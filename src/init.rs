//! Startup helpers shared by the CLI and the HTTP server.
//!
//! Both entry points build exactly one [`Pipeline`] from an [`EngineConfig`];
//! backend construction errors surface here, before any request is served.
//!
//! ```rust,no_run
//! use empathy_engine::{config::EngineConfig, init};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = EngineConfig::from_env()?;
//! let pipeline = init::build_pipeline(&config)?;
//! # let _ = pipeline;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::EngineConfig;
use crate::core::classifier::create_classifier;
use crate::core::pipeline::Pipeline;
use crate::core::tts::create_synthesizer;

/// Builds the classifier and synthesizer named in `config` and wires them
/// into a pipeline.
pub fn build_pipeline(config: &EngineConfig) -> Result<Pipeline> {
    let classifier = create_classifier(&config.classifier).with_context(|| {
        format!(
            "Failed to create classifier '{}'",
            config.classifier.provider
        )
    })?;
    let synthesizer = create_synthesizer(&config.synthesizer).with_context(|| {
        format!(
            "Failed to create synthesizer '{}'",
            config.synthesizer.provider
        )
    })?;

    info!(
        classifier = classifier.name(),
        synthesizer = synthesizer.name(),
        language = %config.language,
        "Pipeline ready"
    );

    Ok(Pipeline::new(
        classifier,
        synthesizer,
        config.pipeline_options(),
    ))
}

/// Creates the directory produced audio is served from.
pub async fn prepare_static_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create static directory {}", dir.display()))
}
