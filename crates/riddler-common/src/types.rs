//! Core types shared across Riddler components.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_PUZZLE_COUNT, MIN_PUZZLE_COUNT};
use crate::error::PuzzleError;

/// Puzzle difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(PuzzleError::InvalidArgument(format!(
                "Difficulty must be one of: easy, medium, hard (got '{}')",
                other
            ))),
        }
    }
}

/// Puzzle categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Logic,
    Math,
    Wordplay,
}

impl Category {
    pub const ALL: [Category; 4] = [Self::General, Self::Logic, Self::Math, Self::Wordplay];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Logic => "logic",
            Self::Math => "math",
            Self::Wordplay => "wordplay",
        }
    }

    /// Capitalized label for headers ("Wordplay")
    pub fn title(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Logic => "Logic",
            Self::Math => "Math",
            Self::Wordplay => "Wordplay",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::General
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(Self::General),
            "logic" => Ok(Self::Logic),
            "math" => Ok(Self::Math),
            "wordplay" => Ok(Self::Wordplay),
            other => Err(PuzzleError::InvalidArgument(format!(
                "Category must be one of: general, logic, math, wordplay (got '{}')",
                other
            ))),
        }
    }
}

/// Grouping of the template table. Not part of a record's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleKind {
    Riddle,
    Logic,
    Math,
    Wordplay,
}

/// Model provider selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    None,
    #[serde(rename = "openai")]
    OpenAi,
    Gemini,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Self::None, Self::OpenAi, Self::Gemini];

    /// Lenient parse: unknown or empty values select no provider
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Self::OpenAi,
            "gemini" => Self::Gemini,
            _ => Self::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
        }
    }

    pub fn is_remote(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl Default for Provider {
    fn default() -> Self {
        Self::None
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a generated set of puzzles came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    /// AI not requested
    Templates,
    /// AI requested, but unavailable, failed, or produced nothing usable
    TemplatesFallback,
    /// Every puzzle came from the model
    Ai,
    /// Model output topped up with templates
    AiToppedUp,
}

impl Provenance {
    pub fn is_ai(&self) -> bool {
        matches!(self, Self::Ai | Self::AiToppedUp)
    }
}

/// A question/answer pair tagged with difficulty and category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleRecord {
    pub question: String,
    pub answer: String,
    pub difficulty: Difficulty,
    pub category: Category,
}

impl PuzzleRecord {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        difficulty: Difficulty,
        category: Category,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            difficulty,
            category,
        }
    }

    /// Key used for case-insensitive question deduplication
    pub fn question_key(&self) -> String {
        self.question.to_lowercase()
    }
}

/// A validated request for puzzles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest {
    pub count: u32,
    pub difficulty: Difficulty,
    pub category: Category,
}

impl GenerationRequest {
    pub fn new(count: i64, difficulty: Difficulty, category: Category) -> Result<Self, PuzzleError> {
        Ok(Self {
            count: validate_count(count)?,
            difficulty,
            category,
        })
    }

    /// Build a request from raw user input
    pub fn parse(count: i64, difficulty: &str, category: &str) -> Result<Self, PuzzleError> {
        Self::new(count, difficulty.parse()?, category.parse()?)
    }

    pub fn count(&self) -> usize {
        self.count as usize
    }
}

/// Check a requested count against [MIN_PUZZLE_COUNT, MAX_PUZZLE_COUNT]
pub fn validate_count(count: i64) -> Result<u32, PuzzleError> {
    if count < MIN_PUZZLE_COUNT as i64 || count > MAX_PUZZLE_COUNT as i64 {
        return Err(PuzzleError::InvalidArgument(format!(
            "Count must be between {} and {}",
            MIN_PUZZLE_COUNT, MAX_PUZZLE_COUNT
        )));
    }
    Ok(count as u32)
}

/// Result of one generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generation {
    pub puzzles: Vec<PuzzleRecord>,
    pub provenance: Provenance,
    /// Provider that served the AI part, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    pub generated_at: DateTime<Utc>,
}

impl Generation {
    pub fn new(puzzles: Vec<PuzzleRecord>, provenance: Provenance, provider: Option<Provider>) -> Self {
        Self {
            puzzles,
            provenance,
            provider,
            generated_at: Utc::now(),
        }
    }

    /// One-line source description for the UI
    pub fn source_caption(&self) -> String {
        match (self.provenance, self.provider) {
            (Provenance::Ai, Some(p)) => format!("Source: AI ({})", p),
            (Provenance::AiToppedUp, Some(p)) => format!("Source: AI ({}) with template top-up", p),
            (Provenance::Ai | Provenance::AiToppedUp, None) => "Source: AI".to_string(),
            (Provenance::TemplatesFallback, _) => {
                "Source: Templates (AI requested but fell back)".to_string()
            }
            (Provenance::Templates, _) => "Source: Templates (offline)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" Easy ".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!(matches!(
            "extreme".parse::<Difficulty>(),
            Err(PuzzleError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("wordplay".parse::<Category>(), Ok(Category::Wordplay));
        assert!(matches!(
            "physics".parse::<Category>(),
            Err(PuzzleError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_count_bounds() {
        assert!(validate_count(0).is_err());
        assert!(validate_count(101).is_err());
        assert!(validate_count(-3).is_err());
        assert_eq!(validate_count(1), Ok(1));
        assert_eq!(validate_count(100), Ok(100));
    }

    #[test]
    fn test_request_parse_rejects_bad_enums() {
        assert!(GenerationRequest::parse(3, "extreme", "general").is_err());
        assert!(GenerationRequest::parse(3, "easy", "physics").is_err());

        let req = GenerationRequest::parse(3, "hard", "math").unwrap();
        assert_eq!(req.count(), 3);
        assert_eq!(req.difficulty, Difficulty::Hard);
        assert_eq!(req.category, Category::Math);
    }

    #[test]
    fn test_provider_lenient_parse() {
        assert_eq!(Provider::parse_lenient("OpenAI"), Provider::OpenAi);
        assert_eq!(Provider::parse_lenient("gemini "), Provider::Gemini);
        assert_eq!(Provider::parse_lenient("claude"), Provider::None);
        assert_eq!(Provider::parse_lenient(""), Provider::None);
    }

    #[test]
    fn test_record_serialization_field_names() {
        let record = PuzzleRecord::new("Q", "A", Difficulty::Easy, Category::Logic);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["question"], "Q");
        assert_eq!(json["answer"], "A");
        assert_eq!(json["difficulty"], "easy");
        assert_eq!(json["category"], "logic");
    }

    #[test]
    fn test_provenance_serialization() {
        assert_eq!(
            serde_json::to_string(&Provenance::TemplatesFallback).unwrap(),
            "\"templates-fallback\""
        );
        assert_eq!(serde_json::to_string(&Provenance::AiToppedUp).unwrap(), "\"ai-topped-up\"");
        assert_eq!(serde_json::to_string(&Provider::OpenAi).unwrap(), "\"openai\"");
    }
}
