//! Generation configuration: raw caller input and its normalized form.
//!
//! Callers send a possibly-partial [`RawGenerationConfig`] (every field
//! optional, counts signed so that negative values are representable and
//! rejectable). [`RawGenerationConfig::normalize`] applies defaults and
//! validation, producing the [`GenerationConfig`] the rest of the pipeline
//! consumes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Subject used when the caller does not pick one.
pub const DEFAULT_SUBJECT: &str = "mathematics";

/// Question types used when the caller does not pick any.
pub const DEFAULT_QUESTION_TYPES: &[&str] = &["problem-solving", "conceptual"];

/// Question count used when no per-type or per-marks counts are configured.
pub const DEFAULT_QUESTION_COUNT: u32 = 10;

/// Requested difficulty for generated questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    Mixed,
}

impl Difficulty {
    /// Wire-format name (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Mixed => "mixed",
        }
    }

    /// Parse a difficulty from its wire form, case-insensitively.
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "mixed" => Ok(Difficulty::Mixed),
            other => Err(CoreError::InvalidConfig(format!(
                "unknown difficulty '{}' (expected easy, medium, hard, or mixed)",
                other
            ))),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied configuration, before defaulting and validation.
///
/// Field names match the upload form / JSON wire format.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawGenerationConfig {
    pub subject: Option<String>,
    pub level: Option<String>,
    pub question_types: Option<Vec<String>>,
    pub difficulty: Option<String>,
    pub custom_instructions: Option<String>,
    pub counts_by_type: Option<BTreeMap<String, i64>>,
    pub counts_by_marks: Option<BTreeMap<String, i64>>,
}

/// Fully-defaulted, validated generation configuration.
///
/// Subject and level are display-only and accepted verbatim; they are not
/// validated against a fixed list.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    pub subject: String,
    pub level: Option<String>,
    pub question_types: Vec<String>,
    pub difficulty: Difficulty,
    pub custom_instructions: Option<String>,
    pub counts_by_type: BTreeMap<String, u32>,
    pub counts_by_marks: BTreeMap<String, u32>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        RawGenerationConfig::default()
            .normalize()
            .expect("default config is valid")
    }
}

impl RawGenerationConfig {
    /// Apply defaults and validate, producing a [`GenerationConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if `question_types` is present
    /// but empty after filtering blank entries, if any count is negative,
    /// or if the difficulty string is not one of the known values.
    pub fn normalize(self) -> Result<GenerationConfig> {
        let subject = match self.subject {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => DEFAULT_SUBJECT.to_string(),
        };

        let level = self
            .level
            .and_then(|l| {
                let l = l.trim().to_string();
                (!l.is_empty()).then_some(l)
            });

        let question_types = match self.question_types {
            None => DEFAULT_QUESTION_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
            Some(types) => {
                let filtered: Vec<String> = types
                    .into_iter()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect();
                if filtered.is_empty() {
                    return Err(CoreError::InvalidConfig(
                        "questionTypes must contain at least one entry".to_string(),
                    ));
                }
                filtered
            }
        };

        let difficulty = match self.difficulty {
            None => Difficulty::default(),
            Some(d) => Difficulty::parse(&d)?,
        };

        let custom_instructions = self
            .custom_instructions
            .and_then(|i| {
                let i = i.trim().to_string();
                (!i.is_empty()).then_some(i)
            });

        let counts_by_type = validate_counts("countsByType", self.counts_by_type)?;
        let counts_by_marks = validate_counts("countsByMarks", self.counts_by_marks)?;

        Ok(GenerationConfig {
            subject,
            level,
            question_types,
            difficulty,
            custom_instructions,
            counts_by_type,
            counts_by_marks,
        })
    }
}

impl GenerationConfig {
    /// Total number of questions the prompt should request.
    ///
    /// Per-type counts take precedence over per-marks counts; when neither
    /// is configured the default of [`DEFAULT_QUESTION_COUNT`] applies.
    pub fn target_question_count(&self) -> u32 {
        let by_type: u32 = self.counts_by_type.values().sum();
        if by_type > 0 {
            return by_type;
        }
        let by_marks: u32 = self.counts_by_marks.values().sum();
        if by_marks > 0 {
            return by_marks;
        }
        DEFAULT_QUESTION_COUNT
    }
}

fn validate_counts(
    field: &str,
    counts: Option<BTreeMap<String, i64>>,
) -> Result<BTreeMap<String, u32>> {
    let Some(counts) = counts else {
        return Ok(BTreeMap::new());
    };

    let mut validated = BTreeMap::new();
    for (key, value) in counts {
        let value = u32::try_from(value).map_err(|_| {
            CoreError::InvalidConfig(format!(
                "{}['{}'] must be a non-negative integer, got {}",
                field, key, value
            ))
        })?;
        validated.insert(key, value);
    }
    Ok(validated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RawGenerationConfig::default().normalize().unwrap();

        assert_eq!(config.subject, "mathematics");
        assert_eq!(config.level, None);
        assert_eq!(config.question_types, vec!["problem-solving", "conceptual"]);
        assert_eq!(config.difficulty, Difficulty::Mixed);
        assert!(config.counts_by_type.is_empty());
        assert!(config.counts_by_marks.is_empty());
    }

    #[test]
    fn test_empty_question_types_rejected() {
        let raw = RawGenerationConfig {
            question_types: Some(vec![]),
            ..Default::default()
        };
        assert!(matches!(raw.normalize(), Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_blank_question_types_filtered_then_rejected() {
        let raw = RawGenerationConfig {
            question_types: Some(vec!["  ".to_string(), "".to_string()]),
            ..Default::default()
        };
        assert!(matches!(raw.normalize(), Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_negative_count_rejected() {
        let raw = RawGenerationConfig {
            counts_by_type: Some([("mcq".to_string(), -1)].into()),
            ..Default::default()
        };
        assert!(matches!(raw.normalize(), Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_unknown_difficulty_rejected() {
        let raw = RawGenerationConfig {
            difficulty: Some("brutal".to_string()),
            ..Default::default()
        };
        assert!(matches!(raw.normalize(), Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_difficulty_case_insensitive() {
        assert_eq!(Difficulty::parse("Hard").unwrap(), Difficulty::Hard);
        assert_eq!(Difficulty::parse("MIXED").unwrap(), Difficulty::Mixed);
    }

    #[test]
    fn test_subject_accepted_verbatim() {
        let raw = RawGenerationConfig {
            subject: Some("underwater basket weaving".to_string()),
            ..Default::default()
        };
        let config = raw.normalize().unwrap();
        assert_eq!(config.subject, "underwater basket weaving");
    }

    #[test]
    fn test_target_count_default() {
        let config = GenerationConfig::default();
        assert_eq!(config.target_question_count(), DEFAULT_QUESTION_COUNT);
    }

    #[test]
    fn test_target_count_by_type_takes_precedence() {
        let raw = RawGenerationConfig {
            counts_by_type: Some([("mcq".to_string(), 3), ("general".to_string(), 2)].into()),
            counts_by_marks: Some([("5".to_string(), 7)].into()),
            ..Default::default()
        };
        let config = raw.normalize().unwrap();
        assert_eq!(config.target_question_count(), 5);
    }

    #[test]
    fn test_target_count_falls_back_to_marks() {
        let raw = RawGenerationConfig {
            counts_by_type: Some([("mcq".to_string(), 0)].into()),
            counts_by_marks: Some([("2".to_string(), 4), ("10".to_string(), 2)].into()),
            ..Default::default()
        };
        let config = raw.normalize().unwrap();
        assert_eq!(config.target_question_count(), 6);
    }

    #[test]
    fn test_wire_format_field_names() {
        let json = r#"{
            "subject": "physics",
            "level": "undergraduate",
            "questionTypes": ["conceptual"],
            "difficulty": "hard",
            "countsByMarks": {"5": 2}
        }"#;
        let raw: RawGenerationConfig = serde_json::from_str(json).unwrap();
        let config = raw.normalize().unwrap();

        assert_eq!(config.subject, "physics");
        assert_eq!(config.level.as_deref(), Some("undergraduate"));
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.counts_by_marks.get("5"), Some(&2));
    }
}
