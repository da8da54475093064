//! Emotion-to-acoustic-profile mapping.
//!
//! Each [`EmotionLabel`] resolves to exactly one [`AcousticProfile`]. The
//! lookup is an exhaustive `match`, so adding a label without a profile does
//! not compile, and unknown strings are handled by the label parser rather
//! than by a missing-key branch here.

use serde::{Deserialize, Serialize};

use super::types::EmotionLabel;

/// Largest pitch shift (in semitones, either direction) the transform engine
/// accepts. Two octaves.
pub const MAX_PITCH_SHIFT_SEMITONES: i32 = 24;

// =============================================================================
// Acoustic Profile
// =============================================================================

/// Synthesis parameters derived from an emotion.
///
/// - `use_slow_rate` selects the base synthesizer's slow delivery.
/// - `pitch_shift_semitones` drives the resampling pitch shift.
/// - `volume_gain_db` is added uniformly to every sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcousticProfile {
    pub use_slow_rate: bool,
    pub pitch_shift_semitones: i32,
    pub volume_gain_db: f32,
}

impl AcousticProfile {
    /// The identity profile: normal rate, no pitch shift, no gain.
    pub const NEUTRAL: AcousticProfile = AcousticProfile::new(false, 0, 0.0);

    /// Creates a profile.
    #[inline]
    pub const fn new(use_slow_rate: bool, pitch_shift_semitones: i32, volume_gain_db: f32) -> Self {
        Self {
            use_slow_rate,
            pitch_shift_semitones,
            volume_gain_db,
        }
    }
}

impl Default for AcousticProfile {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Equal-tempered frequency ratio for a semitone interval, in `f64`.
///
/// # Example
///
/// ```rust
/// use empathy_engine::core::emotion::semitone_ratio;
///
/// assert_eq!(semitone_ratio(0), 1.0);
/// assert!((semitone_ratio(12) - 2.0).abs() < 1e-12);
/// assert!((semitone_ratio(-12) - 0.5).abs() < 1e-12);
/// ```
#[inline]
pub fn semitone_ratio(semitones: i32) -> f64 {
    2f64.powf(f64::from(semitones) / 12.0)
}

// =============================================================================
// Default Mapping
// =============================================================================

/// Maps a label through the built-in table.
///
/// Low-arousal negative emotions (sadness, fear, disgust) slow delivery and
/// lower pitch and volume; high-arousal emotions (joy, surprise, anger) raise
/// pitch and volume at normal rate.
///
/// | label    | slow  | semitones | gain dB |
/// |----------|-------|-----------|---------|
/// | joy      | false | +2        | +3      |
/// | love     | false | +1        | +2      |
/// | anger    | false | +1        | +4      |
/// | sadness  | true  | -2        | -3      |
/// | fear     | true  | -1        | -2      |
/// | surprise | false | +3        | +3      |
/// | disgust  | true  | -2        | -3      |
/// | neutral  | false | 0         | 0       |
pub const fn map_to_profile(label: EmotionLabel) -> AcousticProfile {
    match label {
        EmotionLabel::Joy => AcousticProfile::new(false, 2, 3.0),
        EmotionLabel::Love => AcousticProfile::new(false, 1, 2.0),
        EmotionLabel::Anger => AcousticProfile::new(false, 1, 4.0),
        EmotionLabel::Sadness => AcousticProfile::new(true, -2, -3.0),
        EmotionLabel::Fear => AcousticProfile::new(true, -1, -2.0),
        EmotionLabel::Surprise => AcousticProfile::new(false, 3, 3.0),
        EmotionLabel::Disgust => AcousticProfile::new(true, -2, -3.0),
        EmotionLabel::Neutral => AcousticProfile::NEUTRAL,
    }
}

/// Maps a raw label string; anything outside the closed set gets the
/// neutral profile.
#[inline]
pub fn profile_for_label(label: &str) -> AcousticProfile {
    map_to_profile(EmotionLabel::parse(label))
}

// =============================================================================
// Profile Table
// =============================================================================

/// A complete label-to-profile table.
///
/// Defaults to [`map_to_profile`]. Deployments can override individual rows
/// through configuration; every label still resolves to exactly one profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileTable {
    pub joy: AcousticProfile,
    pub love: AcousticProfile,
    pub anger: AcousticProfile,
    pub sadness: AcousticProfile,
    pub fear: AcousticProfile,
    pub surprise: AcousticProfile,
    pub disgust: AcousticProfile,
    pub neutral: AcousticProfile,
}

impl ProfileTable {
    /// The built-in table.
    pub const fn standard() -> Self {
        Self {
            joy: map_to_profile(EmotionLabel::Joy),
            love: map_to_profile(EmotionLabel::Love),
            anger: map_to_profile(EmotionLabel::Anger),
            sadness: map_to_profile(EmotionLabel::Sadness),
            fear: map_to_profile(EmotionLabel::Fear),
            surprise: map_to_profile(EmotionLabel::Surprise),
            disgust: map_to_profile(EmotionLabel::Disgust),
            neutral: map_to_profile(EmotionLabel::Neutral),
        }
    }

    /// Returns the profile for a label.
    pub const fn profile_for(&self, label: EmotionLabel) -> AcousticProfile {
        match label {
            EmotionLabel::Joy => self.joy,
            EmotionLabel::Love => self.love,
            EmotionLabel::Anger => self.anger,
            EmotionLabel::Sadness => self.sadness,
            EmotionLabel::Fear => self.fear,
            EmotionLabel::Surprise => self.surprise,
            EmotionLabel::Disgust => self.disgust,
            EmotionLabel::Neutral => self.neutral,
        }
    }

    /// Replaces the profile for one label.
    pub fn set(&mut self, label: EmotionLabel, profile: AcousticProfile) {
        let slot = match label {
            EmotionLabel::Joy => &mut self.joy,
            EmotionLabel::Love => &mut self.love,
            EmotionLabel::Anger => &mut self.anger,
            EmotionLabel::Sadness => &mut self.sadness,
            EmotionLabel::Fear => &mut self.fear,
            EmotionLabel::Surprise => &mut self.surprise,
            EmotionLabel::Disgust => &mut self.disgust,
            EmotionLabel::Neutral => &mut self.neutral,
        };
        *slot = profile;
    }

    /// Checks every row against the transform engine's limits.
    ///
    /// Returns one message per offending label.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        for label in EmotionLabel::all() {
            let profile = self.profile_for(*label);
            if profile.pitch_shift_semitones.abs() > MAX_PITCH_SHIFT_SEMITONES {
                issues.push(format!(
                    "Profile '{}': pitch shift {} is outside [-{max}, {max}] semitones",
                    label,
                    profile.pitch_shift_semitones,
                    max = MAX_PITCH_SHIFT_SEMITONES
                ));
            }
            if !profile.volume_gain_db.is_finite() {
                issues.push(format!("Profile '{}': volume gain must be finite", label));
            }
        }
        issues
    }
}

impl Default for ProfileTable {
    fn default() -> Self {
        Self::standard()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_rows() {
        assert_eq!(
            map_to_profile(EmotionLabel::Joy),
            AcousticProfile::new(false, 2, 3.0)
        );
        assert_eq!(
            map_to_profile(EmotionLabel::Love),
            AcousticProfile::new(false, 1, 2.0)
        );
        assert_eq!(
            map_to_profile(EmotionLabel::Anger),
            AcousticProfile::new(false, 1, 4.0)
        );
        assert_eq!(
            map_to_profile(EmotionLabel::Sadness),
            AcousticProfile::new(true, -2, -3.0)
        );
        assert_eq!(
            map_to_profile(EmotionLabel::Fear),
            AcousticProfile::new(true, -1, -2.0)
        );
        assert_eq!(
            map_to_profile(EmotionLabel::Surprise),
            AcousticProfile::new(false, 3, 3.0)
        );
        assert_eq!(
            map_to_profile(EmotionLabel::Disgust),
            AcousticProfile::new(true, -2, -3.0)
        );
        assert_eq!(map_to_profile(EmotionLabel::Neutral), AcousticProfile::NEUTRAL);
    }

    #[test]
    fn test_mapping_is_deterministic() {
        for label in EmotionLabel::all() {
            assert_eq!(map_to_profile(*label), map_to_profile(*label));
        }
    }

    #[test]
    fn test_unknown_labels_get_neutral_profile() {
        for raw in ["", "Joy", "JOY", "happy", "sad", "surprise!", "ñeutral", "🙂", "\u{200b}"] {
            assert_eq!(
                profile_for_label(raw),
                AcousticProfile::NEUTRAL,
                "label {raw:?} should resolve to neutral"
            );
        }
    }

    #[test]
    fn test_known_labels_by_string() {
        assert_eq!(profile_for_label("surprise").pitch_shift_semitones, 3);
        assert!(profile_for_label("fear").use_slow_rate);
    }

    #[test]
    fn test_slow_rate_only_for_low_arousal() {
        let slow: Vec<_> = EmotionLabel::all()
            .iter()
            .filter(|l| map_to_profile(**l).use_slow_rate)
            .copied()
            .collect();
        assert_eq!(
            slow,
            vec![EmotionLabel::Sadness, EmotionLabel::Fear, EmotionLabel::Disgust]
        );
    }

    #[test]
    fn test_semitone_ratio_values() {
        assert!((semitone_ratio(2) - 1.122_462_048_309_373).abs() < 1e-12);
        assert!((semitone_ratio(-2) - 0.890_898_718_140_339).abs() < 1e-12);
        assert!((semitone_ratio(7) * semitone_ratio(-7) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_table_matches_default_mapping() {
        let table = ProfileTable::default();
        for label in EmotionLabel::all() {
            assert_eq!(table.profile_for(*label), map_to_profile(*label));
        }
        assert!(table.validate().is_empty());
    }

    #[test]
    fn test_table_override_single_row() {
        let mut table = ProfileTable::standard();
        table.set(EmotionLabel::Anger, AcousticProfile::new(false, 4, 6.0));

        assert_eq!(
            table.profile_for(EmotionLabel::Anger),
            AcousticProfile::new(false, 4, 6.0)
        );
        assert_eq!(
            table.profile_for(EmotionLabel::Joy),
            map_to_profile(EmotionLabel::Joy)
        );
    }

    #[test]
    fn test_table_validate_reports_out_of_range() {
        let mut table = ProfileTable::standard();
        table.set(EmotionLabel::Surprise, AcousticProfile::new(false, 30, 3.0));
        table.set(EmotionLabel::Fear, AcousticProfile::new(true, -1, f32::NAN));

        let issues = table.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|i| i.contains("surprise")));
        assert!(issues.iter().any(|i| i.contains("fear")));
    }
}
