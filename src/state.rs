use std::path::Path;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::core::pipeline::Pipeline;
use crate::init;

/// Application state shared across HTTP handlers
///
/// The pipeline's classifier and synthesizer are built once at startup and
/// shared by every request.
#[derive(Debug)]
pub struct AppState {
    pub config: EngineConfig,
    pub pipeline: Pipeline,
}

impl AppState {
    /// Wraps an already-built pipeline.
    pub fn new(config: EngineConfig, pipeline: Pipeline) -> Arc<Self> {
        Arc::new(Self { config, pipeline })
    }

    /// Builds the backends named in `config` and prepares the static directory.
    pub async fn from_config(config: EngineConfig) -> anyhow::Result<Arc<Self>> {
        let pipeline = init::build_pipeline(&config)?;
        init::prepare_static_dir(&config.server.static_dir).await?;
        Ok(Self::new(config, pipeline))
    }

    /// Directory produced audio is written to and served from.
    pub fn static_dir(&self) -> &Path {
        &self.config.server.static_dir
    }
}
