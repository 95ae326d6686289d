//! Puzzle generation endpoints.

use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use riddler_common::constants::{MAX_PUZZLE_COUNT, MAX_UI_COUNT, MIN_PUZZLE_COUNT};
use riddler_common::render::{OutputFormat, format_output};
use riddler_common::{
    Category, Difficulty, Generation, GenerationRequest, Provenance, Provider, PuzzleRecord,
};

use super::ApiError;
use crate::clue::{ClueCard, category_emoji, cards_for};
use crate::state::AppState;

#[derive(Serialize)]
pub struct CategoryOption {
    name: Category,
    title: &'static str,
    emoji: &'static str,
}

#[derive(Serialize)]
pub struct OptionsResponse {
    difficulties: [Difficulty; 3],
    categories: Vec<CategoryOption>,
    providers: [Provider; 3],
    formats: [OutputFormat; 2],
    min_count: u32,
    max_count: u32,
    max_ui_count: u32,
    default_count: u32,
}

/// Enumerations and limits for building the UI controls
pub async fn options(State(state): State<AppState>) -> Json<OptionsResponse> {
    Json(OptionsResponse {
        difficulties: Difficulty::ALL,
        categories: Category::ALL
            .into_iter()
            .map(|c| CategoryOption {
                name: c,
                title: c.title(),
                emoji: category_emoji(c),
            })
            .collect(),
        providers: Provider::ALL,
        formats: [OutputFormat::Text, OutputFormat::Json],
        min_count: MIN_PUZZLE_COUNT,
        max_count: MAX_PUZZLE_COUNT,
        max_ui_count: MAX_UI_COUNT,
        default_count: state.config.default_count,
    })
}

#[derive(Deserialize)]
pub struct SingleQuery {
    difficulty: Option<String>,
    category: Option<String>,
}

/// One template puzzle for a difficulty/category
pub async fn single_puzzle(
    State(state): State<AppState>,
    Query(params): Query<SingleQuery>,
) -> Result<Json<PuzzleRecord>, ApiError> {
    let difficulty = parse_or_default::<Difficulty>(params.difficulty.as_deref())?;
    let category = parse_or_default::<Category>(params.category.as_deref())?;

    let puzzle = state
        .puzzles
        .store()
        .select_one(difficulty, category, &mut rand::rng());

    Ok(Json(puzzle))
}

#[derive(Deserialize)]
pub struct ListQuery {
    count: Option<i64>,
    difficulty: Option<String>,
    category: Option<String>,
    format: Option<String>,
}

/// Template puzzles rendered as text or JSON
pub async fn template_puzzles(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let request = GenerationRequest::new(
        params.count.unwrap_or(state.config.default_count as i64),
        parse_or_default(params.difficulty.as_deref())?,
        parse_or_default(params.category.as_deref())?,
    )?;
    let format = match params.format.as_deref() {
        Some(f) => f.parse()?,
        None => OutputFormat::Json,
    };

    let generation = state.puzzles.from_templates(&request);
    let body = format_output(&generation.puzzles, format)?;

    let content_type = match format {
        OutputFormat::Json => "application/json",
        OutputFormat::Text => "text/plain; charset=utf-8",
    };
    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    count: i64,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    use_ai: bool,
    /// Session provider choice; falls back to the configured provider
    #[serde(default)]
    provider: Option<String>,
    /// Session key; used for this request only
    #[serde(default)]
    api_key: Option<String>,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    puzzles: Vec<PuzzleRecord>,
    provenance: Provenance,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider: Option<Provider>,
    generated_at: DateTime<Utc>,
    /// Human-readable source caption
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<String>,
    cards: Vec<ClueCard>,
}

impl GenerateResponse {
    fn new(generation: Generation, notice: Option<String>) -> Self {
        let source = generation.source_caption();
        let cards = cards_for(&generation.puzzles);
        Self {
            puzzles: generation.puzzles,
            provenance: generation.provenance,
            provider: generation.provider,
            generated_at: generation.generated_at,
            source,
            notice,
            cards,
        }
    }
}

/// Generate puzzles from templates or, when asked, a model provider
pub async fn generate_puzzles(
    State(state): State<AppState>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let request = GenerationRequest::new(
        payload.count,
        parse_or_default(payload.difficulty.as_deref())?,
        parse_or_default(payload.category.as_deref())?,
    )?;

    let settings = state.provider_defaults.with_session(
        payload.provider.as_deref().map(Provider::parse_lenient),
        payload.api_key.as_deref(),
    );

    tracing::debug!(
        count = request.count,
        difficulty = %request.difficulty,
        category = %request.category,
        use_ai = payload.use_ai,
        provider = %settings.provider,
        "Generating puzzles"
    );

    let outcome = state
        .puzzles
        .generate(&request, payload.use_ai, &settings)
        .await;

    tracing::info!(
        count = outcome.generation.puzzles.len(),
        provenance = ?outcome.generation.provenance,
        "Generated puzzles"
    );

    Ok(Json(GenerateResponse::new(outcome.generation, outcome.notice)))
}

/// Parse an optional query value, using the type's default when absent
fn parse_or_default<T>(value: Option<&str>) -> Result<T, riddler_common::PuzzleError>
where
    T: std::str::FromStr<Err = riddler_common::PuzzleError> + Default,
{
    match value {
        Some(v) if !v.trim().is_empty() => v.parse(),
        _ => Ok(T::default()),
    }
}
