pub mod audio;
pub mod classifier;
pub mod emotion;
pub mod pipeline;
pub mod tts;

// Re-export commonly used types for convenience
pub use audio::{AudioFormat, AudioTransformEngine, EncodedAudio, RawAudioBuffer, TransformError};

pub use classifier::{
    ClassifierConfig, ClassifierError, EmotionClassifier, LabelScore, TextClassifier,
    create_classifier,
};

pub use emotion::{AcousticProfile, ClassificationResult, EmotionLabel, ProfileTable, map_to_profile};

pub use pipeline::{
    Pipeline, PipelineError, PipelineOptions, PipelineResult, PipelineStage, SynthesisOutcome,
    SynthesisRequest,
};

pub use tts::{
    BaseSynthesizer, SpeechSynthesizer, SynthesisError, SynthesizedAudio, SynthesizerConfig,
    create_synthesizer,
};
