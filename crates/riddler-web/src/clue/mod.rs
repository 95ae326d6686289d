//! Clue cards: hints and a small image per puzzle.

mod card;
mod hints;

pub use card::category_emoji;
pub use hints::make_hints;

use rand::Rng;
use serde::Serialize;

use riddler_common::PuzzleRecord;

/// Hints and rendered card for one puzzle
#[derive(Debug, Clone, Serialize)]
pub struct ClueCard {
    /// Base64 SVG data URL
    pub image_data: String,
    pub hints: Vec<String>,
}

impl ClueCard {
    /// Build the card for the puzzle at 1-based position `index`
    pub fn build<R: Rng + ?Sized>(index: usize, puzzle: &PuzzleRecord, rng: &mut R) -> Self {
        let hints = make_hints(&puzzle.answer, puzzle.category, rng);
        let image_data = card::render_data_url(index, puzzle, &hints);
        Self { image_data, hints }
    }
}

/// Cards for a whole result list, in order
pub fn cards_for(puzzles: &[PuzzleRecord]) -> Vec<ClueCard> {
    let mut rng = rand::rng();
    puzzles
        .iter()
        .enumerate()
        .map(|(i, p)| ClueCard::build(i + 1, p, &mut rng))
        .collect()
}
