//! Text and JSON rendering of puzzle lists.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;
use crate::types::PuzzleRecord;

/// Output format for rendered puzzles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(PuzzleError::InvalidArgument(format!(
                "Format must be one of: text, json (got '{}')",
                other
            ))),
        }
    }
}

/// Render puzzles in the requested format
pub fn format_output(puzzles: &[PuzzleRecord], format: OutputFormat) -> Result<String, PuzzleError> {
    match format {
        OutputFormat::Json => to_json(puzzles),
        OutputFormat::Text => Ok(to_text(puzzles)),
    }
}

/// Pretty JSON array with `question`, `answer`, `difficulty`, `category`
pub fn to_json(puzzles: &[PuzzleRecord]) -> Result<String, PuzzleError> {
    Ok(serde_json::to_string_pretty(puzzles)?)
}

/// Parse a JSON array produced by [`to_json`]
pub fn from_json(json: &str) -> Result<Vec<PuzzleRecord>, PuzzleError> {
    serde_json::from_str(json).map_err(|e| PuzzleError::InvalidArgument(e.to_string()))
}

/// Human-readable blocks, one per puzzle
pub fn to_text(puzzles: &[PuzzleRecord]) -> String {
    let mut lines = Vec::with_capacity(puzzles.len() * 4);
    for (i, puzzle) in puzzles.iter().enumerate() {
        lines.push(format!(
            "✨ Puzzle {}: {} ({})",
            i + 1,
            puzzle.category.title(),
            puzzle.difficulty.as_str().to_uppercase()
        ));
        lines.push(format!("   Q: {}", puzzle.question));
        lines.push(format!("   A: {}", puzzle.answer));
        lines.push(String::new());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateStore;
    use crate::types::{Category, Difficulty, GenerationRequest};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_text_layout() {
        let puzzles = vec![PuzzleRecord::new("Q?", "A!", Difficulty::Hard, Category::Wordplay)];
        let text = to_text(&puzzles);
        assert_eq!(text, "✨ Puzzle 1: Wordplay (HARD)\n   Q: Q?\n   A: A!\n");
    }

    #[test]
    fn test_json_round_trip() {
        let request = GenerationRequest::new(6, Difficulty::Easy, Category::Math).unwrap();
        let puzzles = TemplateStore::builtin().select_many(&request, &mut StdRng::seed_from_u64(4));

        let json = format_output(&puzzles, OutputFormat::Json).unwrap();
        let parsed = from_json(&json).unwrap();
        assert_eq!(parsed, puzzles);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
