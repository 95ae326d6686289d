//! Template puzzle store.
//!
//! A fixed table of puzzle records, grouped by puzzle kind, plus the
//! sampling operations used by every generation path:
//!
//! ```text
//! select_many:  Exact → SameDifficulty → AnyTemplate → WithReplacement
//! select_one:   Exact → SameDifficulty → built-in default
//! ```
//!
//! All sampling takes the RNG as a parameter, so a seeded RNG gives
//! reproducible selections.

use std::collections::HashSet;
use std::sync::LazyLock;

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::constants::fallback_puzzle;
use crate::error::PuzzleError;
use crate::types::{Category, Difficulty, GenerationRequest, PuzzleKind, PuzzleRecord};

/// One entry of the built-in table
struct TemplateEntry {
    kind: PuzzleKind,
    question: &'static str,
    answer: &'static str,
    difficulty: Difficulty,
    category: Category,
}

const BUILTIN_TEMPLATES: &[TemplateEntry] = &[
    TemplateEntry {
        kind: PuzzleKind::Riddle,
        question: "I speak without a mouth and hear without ears. I have no body, but I come alive with wind. What am I?",
        answer: "An echo",
        difficulty: Difficulty::Easy,
        category: Category::General,
    },
    TemplateEntry {
        kind: PuzzleKind::Riddle,
        question: "I have cities but no houses, forests but no trees, and water but no fish. What am I?",
        answer: "A map",
        difficulty: Difficulty::Easy,
        category: Category::General,
    },
    TemplateEntry {
        kind: PuzzleKind::Logic,
        question: "Three switches control three light bulbs in another room. You can toggle the switches, but can only enter the room once. How do you determine which switch controls which bulb?",
        answer: "Toggle switch 1 for 10 minutes (heating the bulb), then turn it off. Toggle switch 2 on, leave switch 3 off. Enter the room: warm bulb = switch 1, on bulb = switch 2, off bulb = switch 3.",
        difficulty: Difficulty::Hard,
        category: Category::Logic,
    },
    TemplateEntry {
        kind: PuzzleKind::Logic,
        question: "A man walks into a room and shoots himself. Another man walks in the same room but does not shoot himself and survives. How?",
        answer: "The first man shot himself in a mirror (suicide simulation); the second man shoots a real gun at a target or prop in the room.",
        difficulty: Difficulty::Medium,
        category: Category::Logic,
    },
    TemplateEntry {
        kind: PuzzleKind::Math,
        question: "If you have a bowl with 6 apples and you take away 4, how many do you have?",
        answer: "4 (the ones you took away)",
        difficulty: Difficulty::Easy,
        category: Category::Math,
    },
    TemplateEntry {
        kind: PuzzleKind::Math,
        question: "Two trains are running towards each other on the same track. Train A is moving at 60 mph and Train B at 40 mph. When they are 100 miles apart, a bird flies between them at 80 mph. The bird keeps flying until the trains collide. How far does the bird travel?",
        answer: "80 miles (the trains meet in 1 hour, and the bird flies at 80 mph for 1 hour)",
        difficulty: Difficulty::Hard,
        category: Category::Math,
    },
    TemplateEntry {
        kind: PuzzleKind::Wordplay,
        question: "What word becomes shorter the more letters you add to it?",
        answer: "Short (s-hort, sh-ort, sho-rt, short)",
        difficulty: Difficulty::Easy,
        category: Category::Wordplay,
    },
];

static BUILTIN_STORE: LazyLock<TemplateStore> = LazyLock::new(|| {
    let store = TemplateStore::from_entries(
        BUILTIN_TEMPLATES
            .iter()
            .map(|e| {
                (
                    e.kind,
                    PuzzleRecord::new(e.question, e.answer, e.difficulty, e.category),
                )
            })
            .collect(),
    );
    tracing::debug!(templates = store.len(), "Template store initialized");
    store
});

/// One stage of the sampling cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingStage {
    /// Same difficulty and category, without replacement
    Exact,
    /// Same difficulty, any category, without replacement
    SameDifficulty,
    /// Whole table, without replacement
    AnyTemplate,
    /// Whole table, with replacement (duplicates possible)
    WithReplacement,
}

/// Stage order for multi-puzzle selection
pub const MULTI_SELECTION_PLAN: [SamplingStage; 4] = [
    SamplingStage::Exact,
    SamplingStage::SameDifficulty,
    SamplingStage::AnyTemplate,
    SamplingStage::WithReplacement,
];

/// Stage order for single-puzzle selection; the default record follows
pub const SINGLE_SELECTION_PLAN: [SamplingStage; 2] =
    [SamplingStage::Exact, SamplingStage::SameDifficulty];

impl SamplingStage {
    /// Whether a record belongs to this stage's pool
    pub fn admits(&self, record: &PuzzleRecord, difficulty: Difficulty, category: Category) -> bool {
        match self {
            Self::Exact => record.difficulty == difficulty && record.category == category,
            Self::SameDifficulty => record.difficulty == difficulty,
            Self::AnyTemplate | Self::WithReplacement => true,
        }
    }

    pub fn with_replacement(&self) -> bool {
        matches!(self, Self::WithReplacement)
    }
}

/// Immutable table of template puzzles
#[derive(Debug, Clone)]
pub struct TemplateStore {
    records: Vec<PuzzleRecord>,
    kinds: Vec<PuzzleKind>,
}

impl TemplateStore {
    /// The process-wide built-in table
    pub fn builtin() -> &'static TemplateStore {
        &BUILTIN_STORE
    }

    pub fn from_entries(entries: Vec<(PuzzleKind, PuzzleRecord)>) -> Self {
        let (kinds, records) = entries.into_iter().unzip();
        Self { records, kinds }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PuzzleRecord] {
        &self.records
    }

    /// Records grouped under one puzzle kind
    pub fn by_kind(&self, kind: PuzzleKind) -> impl Iterator<Item = &PuzzleRecord> {
        self.kinds
            .iter()
            .zip(&self.records)
            .filter(move |(k, _)| **k == kind)
            .map(|(_, r)| r)
    }

    /// Indices of records admitted by a stage, in table order
    fn pool(&self, stage: SamplingStage, difficulty: Difficulty, category: Category) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| stage.admits(r, difficulty, category))
            .map(|(i, _)| i)
            .collect()
    }

    /// Pick one puzzle for a difficulty/category.
    ///
    /// Falls back to any puzzle of the same difficulty, then to a built-in
    /// default tagged with the requested difficulty and category.
    pub fn select_one<R: Rng + ?Sized>(
        &self,
        difficulty: Difficulty,
        category: Category,
        rng: &mut R,
    ) -> PuzzleRecord {
        for stage in SINGLE_SELECTION_PLAN {
            let pool = self.pool(stage, difficulty, category);
            if let Some(&idx) = pool.choose(rng) {
                tracing::trace!(stage = ?stage, pool = pool.len(), "Selected single template");
                return self.records[idx].clone();
            }
        }

        tracing::debug!(
            difficulty = %difficulty,
            category = %category,
            "No template for difficulty, using default puzzle"
        );
        PuzzleRecord::new(
            fallback_puzzle::QUESTION,
            fallback_puzzle::ANSWER,
            difficulty,
            category,
        )
    }

    /// Pick `count` puzzles following [`MULTI_SELECTION_PLAN`].
    ///
    /// Exactly `count` records come back unless the table is empty.
    /// Duplicates only appear once every template has been used.
    pub fn select_many<R: Rng + ?Sized>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> Vec<PuzzleRecord> {
        let count = request.count();
        let mut chosen: Vec<usize> = Vec::with_capacity(count);

        for stage in MULTI_SELECTION_PLAN {
            if chosen.len() >= count {
                break;
            }
            let pool = self.pool(stage, request.difficulty, request.category);
            if stage.with_replacement() {
                fill_with_replacement(&pool, &mut chosen, count, rng);
            } else {
                take_unique(&pool, &mut chosen, count, rng);
            }
        }

        chosen.truncate(count);
        chosen.shuffle(rng);
        chosen.into_iter().map(|i| self.records[i].clone()).collect()
    }

    /// Templates in multi-selection order that are not in `seen`
    ///
    /// Used to top up AI output once random sampling stops yielding new
    /// questions.
    pub fn unseen_in_plan_order<'a>(
        &'a self,
        difficulty: Difficulty,
        category: Category,
        seen: &'a HashSet<String>,
    ) -> impl Iterator<Item = &'a PuzzleRecord> + 'a {
        let mut visited = vec![false; self.records.len()];
        MULTI_SELECTION_PLAN
            .into_iter()
            .filter(|s| !s.with_replacement())
            .flat_map(move |stage| self.pool(stage, difficulty, category))
            .filter(move |&i| !std::mem::replace(&mut visited[i], true))
            .map(|i| &self.records[i])
            .filter(move |r| !seen.contains(&r.question_key()))
    }

    /// Validate raw input, then select
    pub fn generate<R: Rng + ?Sized>(
        &self,
        count: i64,
        difficulty: &str,
        category: &str,
        rng: &mut R,
    ) -> Result<Vec<PuzzleRecord>, PuzzleError> {
        let request = GenerationRequest::parse(count, difficulty, category)?;
        Ok(self.select_many(&request, rng))
    }
}

/// Sample without replacement from `pool`, skipping indices already chosen
fn take_unique<R: Rng + ?Sized>(pool: &[usize], chosen: &mut Vec<usize>, count: usize, rng: &mut R) {
    let need = count.saturating_sub(chosen.len());
    let remaining: Vec<usize> = pool.iter().copied().filter(|i| !chosen.contains(i)).collect();
    if remaining.is_empty() || need == 0 {
        return;
    }
    if remaining.len() <= need {
        chosen.extend(remaining);
    } else {
        chosen.extend(remaining.choose_multiple(rng, need).copied());
    }
}

fn fill_with_replacement<R: Rng + ?Sized>(
    pool: &[usize],
    chosen: &mut Vec<usize>,
    count: usize,
    rng: &mut R,
) {
    while chosen.len() < count {
        match pool.choose(rng) {
            Some(&idx) => chosen.push(idx),
            None => break,
        }
    }
}
