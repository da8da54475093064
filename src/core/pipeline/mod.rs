//! Pipeline orchestrator.
//!
//! Runs one request end to end:
//!
//! ```text
//! text ─▶ classify ─▶ map ─▶ base synthesis ─▶ scratch file ─▶ decode ─▶ pitch/gain ─▶ encode ─▶ output
//!          (never fails)       (timeout-bound)   (NamedTempFile)        (blocking pool)           (atomic rename)
//! ```
//!
//! The classifier and synthesizer are shared `Arc`s built once; everything
//! else is owned by the request.

pub mod error;
pub mod stage;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

pub use error::{PipelineError, PipelineResult};
pub use stage::PipelineStage;
use stage::StageTracker;

use crate::core::audio::{AudioFormat, AudioTransformEngine, EncodedAudio};
use crate::core::classifier::{EmotionClassifier, TextClassifier};
use crate::core::emotion::{AcousticProfile, ClassificationResult, ProfileTable};
use crate::core::tts::{BaseSynthesizer, SpeechSynthesizer, SynthesizedAudio, decode_base_file};

/// Longest accepted input, in characters.
pub const MAX_TEXT_CHARS: usize = 5_000;

/// Default bound on base synthesis.
pub const DEFAULT_SYNTHESIS_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// Request / Outcome
// =============================================================================

/// One unit of work: text in, audio file out.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub id: Uuid,
    pub text: String,
    pub output_path: PathBuf,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            output_path: output_path.into(),
        }
    }

    /// Container implied by the output path.
    pub fn format(&self) -> AudioFormat {
        AudioFormat::from_path(&self.output_path)
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct SynthesisOutcome {
    pub request_id: Uuid,
    pub output_path: PathBuf,
    pub classification: ClassificationResult,
    pub profile: AcousticProfile,
    pub format: AudioFormat,
    pub sample_rate: u32,
    /// Duration of the encoded audio
    pub duration: Duration,
    /// Wall time of the whole run
    pub elapsed: Duration,
}

// =============================================================================
// Options
// =============================================================================

/// Per-pipeline settings.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Language code passed to the synthesizer
    pub language: String,
    pub synthesis_timeout: Duration,
    /// Scratch directory for intermediate audio; system temp when `None`
    pub temp_dir: Option<PathBuf>,
    pub profiles: ProfileTable,
    pub max_text_chars: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            synthesis_timeout: DEFAULT_SYNTHESIS_TIMEOUT,
            temp_dir: None,
            profiles: ProfileTable::standard(),
            max_text_chars: MAX_TEXT_CHARS,
        }
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Sequences classification, mapping, synthesis and transformation.
///
/// Cheap to clone; clones share the same backends.
#[derive(Debug, Clone)]
pub struct Pipeline {
    classifier: EmotionClassifier,
    synthesizer: BaseSynthesizer,
    engine: AudioTransformEngine,
    options: Arc<PipelineOptions>,
}

impl Pipeline {
    pub fn new(
        classifier: Arc<dyn TextClassifier>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            classifier: EmotionClassifier::new(classifier),
            synthesizer: BaseSynthesizer::new(synthesizer),
            engine: AudioTransformEngine::new(),
            options: Arc::new(options),
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn classifier(&self) -> &EmotionClassifier {
        &self.classifier
    }

    /// Runs a request to completion.
    pub async fn run(&self, request: SynthesisRequest) -> PipelineResult<SynthesisOutcome> {
        let span = info_span!("synthesis", request_id = %request.id);
        async move {
            let started = Instant::now();
            let mut tracker = StageTracker::new(request.id);
            match self.execute(&request, &mut tracker, started).await {
                Ok(outcome) => Ok(outcome),
                Err(e) => {
                    tracker.fail(&e);
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn execute(
        &self,
        request: &SynthesisRequest,
        tracker: &mut StageTracker,
        started: Instant,
    ) -> PipelineResult<SynthesisOutcome> {
        let text = self.validate_text(&request.text)?;

        tracker.advance();
        let classification = self.classifier.classify(text).await;
        info!(
            emotion = %classification.label(),
            confidence = classification.confidence(),
            "Detected emotion"
        );

        tracker.advance();
        let profile = self.options.profiles.profile_for(classification.label());
        debug!(?profile, "Selected acoustic profile");

        tracker.advance();
        let base = self.fetch_base(text, profile.use_slow_rate).await?;

        tracker.advance();
        let format = request.format();
        let encoded = self.transform(request.id, base, profile, format).await?;

        tracker.advance();
        let output_path = request.output_path.clone();
        let data = encoded.data.clone();
        tokio::task::spawn_blocking(move || write_atomically(&output_path, &data))
            .await
            .map_err(|e| PipelineError::Internal(format!("Output task failed: {e}")))??;

        tracker.advance();
        let elapsed = started.elapsed();
        info!(
            path = %request.output_path.display(),
            duration_ms = encoded.duration().as_millis() as u64,
            elapsed_ms = elapsed.as_millis() as u64,
            "Synthesis complete"
        );

        Ok(SynthesisOutcome {
            request_id: request.id,
            output_path: request.output_path.clone(),
            classification,
            profile,
            format,
            sample_rate: encoded.sample_rate,
            duration: encoded.duration(),
            elapsed,
        })
    }

    fn validate_text<'a>(&self, text: &'a str) -> PipelineResult<&'a str> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(PipelineError::InvalidInput(
                "text must not be empty".to_string(),
            ));
        }
        let chars = trimmed.chars().count();
        if chars > self.options.max_text_chars {
            return Err(PipelineError::InvalidInput(format!(
                "text is {chars} characters; the limit is {}",
                self.options.max_text_chars
            )));
        }
        Ok(trimmed)
    }

    async fn fetch_base(&self, text: &str, slow: bool) -> PipelineResult<SynthesizedAudio> {
        let timeout = self.options.synthesis_timeout;
        let audio = tokio::time::timeout(
            timeout,
            self.synthesizer.fetch(text, &self.options.language, slow),
        )
        .await
        .map_err(|_| PipelineError::SynthesisTimeout(timeout))??;
        Ok(audio)
    }

    /// Writes base audio to a scratch file, decodes it, applies the profile
    /// and encodes, all on the blocking pool.
    async fn transform(
        &self,
        request_id: Uuid,
        base: SynthesizedAudio,
        profile: AcousticProfile,
        format: AudioFormat,
    ) -> PipelineResult<EncodedAudio> {
        let engine = self.engine;
        let temp_dir = self.options.temp_dir.clone();

        tokio::task::spawn_blocking(move || -> PipelineResult<EncodedAudio> {
            let scratch = write_scratch(temp_dir.as_deref(), request_id, &base)?;
            debug!(path = %scratch.path().display(), bytes = base.data.len(), "Base audio staged");

            let raw = decode_base_file(scratch.path())?;
            debug!(
                sample_rate = raw.sample_rate(),
                channels = raw.channels(),
                frames = raw.frames(),
                "Base audio decoded"
            );
            let encoded = engine.apply_profile(raw, &profile, format)?;

            let scratch_path = scratch.path().to_path_buf();
            if let Err(e) = scratch.close() {
                warn!(path = %scratch_path.display(), error = %e, "Failed to remove scratch file");
            }
            Ok(encoded)
        })
        .await
        .map_err(|e| PipelineError::Internal(format!("Transform task failed: {e}")))?
    }
}

/// Creates the per-request scratch file holding base audio.
fn write_scratch(
    temp_dir: Option<&Path>,
    request_id: Uuid,
    base: &SynthesizedAudio,
) -> std::io::Result<NamedTempFile> {
    let prefix = format!("empathy-{request_id}-");
    let suffix = format!(".{}", base.extension);
    let mut builder = tempfile::Builder::new();
    builder.prefix(&prefix).suffix(&suffix);

    let mut file = match temp_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            builder.tempfile_in(dir)?
        }
        None => builder.tempfile()?,
    };
    file.write_all(&base.data)?;
    file.flush()?;
    Ok(file)
}

/// Writes `data` to `path` through a sibling temp file and a rename.
///
/// Missing parent directories are created. Readers never see a partial file.
pub fn write_atomically(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut staged = tempfile::Builder::new()
        .prefix(".empathy-")
        .suffix(".partial")
        .tempfile_in(parent)?;
    staged.write_all(data)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}
