//! Emotion labels and the emotion-to-acoustic-profile mapper.
//!
//! ```text
//!  classifier output        closed label set           synthesis parameters
//!  ┌──────────────┐        ┌──────────────────┐        ┌───────────────────────┐
//!  │ "JOY", 0.95  │──────▶ │ EmotionLabel::Joy│──────▶ │ slow: false           │
//!  │ "optimism"   │──────▶ │ EmotionLabel::   │        │ pitch: +2 semitones   │
//!  │              │        │   Neutral        │        │ gain:  +3 dB          │
//!  └──────────────┘        └──────────────────┘        └───────────────────────┘
//!       normalize()              map_to_profile() / ProfileTable
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use empathy_engine::core::emotion::{EmotionLabel, map_to_profile};
//!
//! let profile = map_to_profile(EmotionLabel::normalize("Sadness"));
//! assert!(profile.use_slow_rate);
//! assert_eq!(profile.pitch_shift_semitones, -2);
//! ```

pub mod mapper;
pub mod types;

pub use mapper::{
    AcousticProfile, MAX_PITCH_SHIFT_SEMITONES, ProfileTable, map_to_profile, profile_for_label,
    semitone_ratio,
};
pub use types::{ClassificationResult, EmotionLabel};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        let _label = EmotionLabel::Joy;
        let _result = ClassificationResult::neutral();
        let _profile = AcousticProfile::NEUTRAL;
        let _table = ProfileTable::standard();
        let _ = map_to_profile(EmotionLabel::Fear);
        let _ = profile_for_label("fear");
        let _ = semitone_ratio(1);
    }

    #[test]
    fn test_normalized_classifier_label_drives_profile() {
        let profile = map_to_profile(EmotionLabel::normalize(" Surprise "));
        assert_eq!(profile.pitch_shift_semitones, 3);
        assert_eq!(profile.volume_gain_db, 3.0);
    }
}
