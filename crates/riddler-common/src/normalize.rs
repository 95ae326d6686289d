//! Normalization of free-form model output into puzzle records.
//!
//! Three steps, each usable on its own:
//! 1. [`extract_items`] pulls a JSON list out of the raw text (code fences,
//!    wrapper objects, or a bare `[...]` span). Failure is `None`.
//! 2. [`normalize_items`] validates, coerces, and deduplicates the items.
//! 3. [`normalize_response`] tops up from the template store and tags the
//!    result with its provenance.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::Value;

use crate::constants::RESPONSE_WRAPPER_KEYS;
use crate::templates::TemplateStore;
use crate::types::{
    Category, Difficulty, Generation, GenerationRequest, Provenance, Provider, PuzzleRecord,
};

const FENCE: &str = "```";

/// Extract the list of candidate items from raw model text.
///
/// Returns `None` when nothing list-shaped can be parsed, or when the list
/// is empty.
pub fn extract_items(text: &str) -> Option<Vec<Value>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let candidate = fenced_payload(text).unwrap_or(text).trim();

    let items = match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => RESPONSE_WRAPPER_KEYS
            .iter()
            .find_map(|key| match map.get(*key) {
                Some(Value::Array(items)) => Some(items.clone()),
                _ => None,
            }),
        Ok(Value::Array(items)) => Some(items),
        Ok(_) => None,
        Err(_) => bracketed_list(candidate),
    };

    items.filter(|items| !items.is_empty())
}

/// Content of the preferred fenced block, if the text has fences.
///
/// A block labeled `json` wins (label stripped); otherwise the first block.
fn fenced_payload(text: &str) -> Option<&str> {
    if !text.contains(FENCE) {
        return None;
    }

    // Odd segments are inside fences
    let blocks: Vec<&str> = text.split(FENCE).skip(1).step_by(2).collect();

    for block in blocks.iter().copied() {
        let trimmed = block.trim_start();
        if trimmed
            .get(..4)
            .is_some_and(|label| label.eq_ignore_ascii_case("json"))
        {
            return Some(&trimmed[4..]);
        }
    }

    blocks.first().copied()
}

/// Parse the span from the first `[` to the last `]` as a list
fn bracketed_list(text: &str) -> Option<Vec<Value>> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Array(items)) => Some(items),
        _ => None,
    }
}

/// Stringify a JSON field the way a lenient reader would
fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Validate and deduplicate extracted items.
///
/// Looks at no more than `request.count` items. Items that are not objects, or
/// whose question or answer is blank, are dropped. Out-of-range difficulty
/// or category values fall back to the request's.
pub fn normalize_items(items: &[Value], request: &GenerationRequest) -> Vec<PuzzleRecord> {
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for item in items.iter().take(request.count()) {
        let Some(obj) = item.as_object() else {
            continue;
        };

        let question = field_text(obj.get("question")).trim().to_string();
        let answer = field_text(obj.get("answer")).trim().to_string();
        if question.is_empty() || answer.is_empty() {
            continue;
        }

        let difficulty = field_text(obj.get("difficulty"))
            .parse::<Difficulty>()
            .unwrap_or(request.difficulty);
        let category = field_text(obj.get("category"))
            .parse::<Category>()
            .unwrap_or(request.category);

        let record = PuzzleRecord::new(question, answer, difficulty, category);
        if seen.insert(record.question_key()) {
            records.push(record);
        }
    }

    records
}

/// Turn raw model text (or its absence) into a complete generation result.
///
/// `text` is `None` when the provider call failed. When no valid record
/// survives, the whole result comes from the template store and is tagged
/// [`Provenance::TemplatesFallback`].
pub fn normalize_response<R: Rng + ?Sized>(
    text: Option<&str>,
    request: &GenerationRequest,
    provider: Provider,
    store: &TemplateStore,
    rng: &mut R,
) -> Generation {
    let records = text
        .and_then(extract_items)
        .map(|items| normalize_items(&items, request))
        .unwrap_or_default();

    if records.is_empty() {
        tracing::info!(
            provider = %provider,
            "No usable puzzles in model response, falling back to templates"
        );
        let puzzles = store.select_many(request, rng);
        return Generation::new(puzzles, Provenance::TemplatesFallback, None);
    }

    let from_model = records.len();
    let mut puzzles = records;
    top_up(&mut puzzles, request, store, rng);

    let provenance = if puzzles.len() > from_model {
        Provenance::AiToppedUp
    } else {
        Provenance::Ai
    };

    tracing::debug!(
        provider = %provider,
        from_model = from_model,
        topped_up = puzzles.len() - from_model,
        "Normalized model response"
    );

    puzzles.shuffle(rng);
    puzzles.truncate(request.count());
    Generation::new(puzzles, provenance, Some(provider))
}

/// Append template puzzles with unseen questions until `count` is reached
/// or the store has nothing new left.
fn top_up<R: Rng + ?Sized>(
    puzzles: &mut Vec<PuzzleRecord>,
    request: &GenerationRequest,
    store: &TemplateStore,
    rng: &mut R,
) {
    let count = request.count();
    if puzzles.len() >= count {
        return;
    }

    let mut seen: HashSet<String> = puzzles.iter().map(PuzzleRecord::question_key).collect();

    let shortfall = GenerationRequest {
        count: (count - puzzles.len()) as u32,
        ..*request
    };
    for extra in store.select_many(&shortfall, rng) {
        if puzzles.len() >= count {
            return;
        }
        if seen.insert(extra.question_key()) {
            puzzles.push(extra);
        }
    }

    if puzzles.len() < count {
        let remaining: Vec<PuzzleRecord> = store
            .unseen_in_plan_order(request.difficulty, request.category, &seen)
            .take(count - puzzles.len())
            .cloned()
            .collect();
        puzzles.extend(remaining);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    const FENCED_ONE: &str = "```json\n{\"items\":[{\"question\":\"Q1\",\"answer\":\"A1\",\"difficulty\":\"easy\",\"category\":\"general\"}]}\n```";

    fn request(count: i64) -> GenerationRequest {
        GenerationRequest::new(count, Difficulty::Medium, Category::Logic).unwrap()
    }

    #[test]
    fn test_extract_fenced_json_block() {
        let items = extract_items(FENCED_ONE).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["question"], "Q1");
    }

    #[test]
    fn test_extract_prefers_json_labeled_block() {
        let text = "Here you go:\n```text\nnot this\n```\nand\n```JSON\n[{\"question\":\"Q\",\"answer\":\"A\"}]\n```";
        let items = extract_items(text).unwrap();
        assert_eq!(items[0]["answer"], "A");
    }

    #[test]
    fn test_extract_unlabeled_fence() {
        let text = "```\n{\"puzzles\": [{\"question\":\"Q\",\"answer\":\"A\"}]}\n```";
        assert_eq!(extract_items(text).unwrap().len(), 1);
    }

    #[test]
    fn test_extract_wrapper_keys_and_plain_list() {
        assert!(extract_items(r#"{"data": [{"question":"Q","answer":"A"}]}"#).is_some());
        assert!(extract_items(r#"{"result": [1]}"#).is_some());
        assert!(extract_items(r#"[{"question":"Q","answer":"A"}]"#).is_some());
        assert!(extract_items(r#"{"questions": [1]}"#).is_none());
        assert!(extract_items("42").is_none());
    }

    #[test]
    fn test_extract_bracket_scan() {
        let text = "Sure! Here are your puzzles: [{\"question\":\"Q\",\"answer\":\"A\"}] Enjoy.";
        assert_eq!(extract_items(text).unwrap().len(), 1);
    }

    #[test]
    fn test_extract_no_result() {
        assert!(extract_items("sorry, I can't help").is_none());
        assert!(extract_items("").is_none());
        assert!(extract_items("] backwards [").is_none());
        assert!(extract_items("[]").is_none());
        assert!(extract_items("{\"items\": []}").is_none());
    }

    #[test]
    fn test_normalize_single_item() {
        let items = extract_items(FENCED_ONE).unwrap();
        let records = normalize_items(&items, &request(3));
        assert_eq!(
            records,
            vec![PuzzleRecord::new("Q1", "A1", Difficulty::Easy, Category::General)]
        );
    }

    #[test]
    fn test_normalize_drops_invalid_and_coerces() {
        let items = vec![
            json!("just a string"),
            json!({"question": "  ", "answer": "A"}),
            json!({"question": "Q", "answer": null}),
            json!({"question": " Kept ", "answer": " Yes ", "difficulty": "HARD", "category": "physics"}),
            json!({"question": 12, "answer": 34}),
        ];
        let records = normalize_items(&items, &request(10));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].question, "Kept");
        assert_eq!(records[0].answer, "Yes");
        assert_eq!(records[0].difficulty, Difficulty::Hard);
        assert_eq!(records[0].category, Category::Logic);
        assert_eq!(records[1].question, "12");
        assert_eq!(records[1].difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_normalize_dedupes_case_insensitively() {
        let items = vec![
            json!({"question": "What is it?", "answer": "First"}),
            json!({"question": "WHAT IS IT?", "answer": "Second"}),
        ];
        let records = normalize_items(&items, &request(5));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].answer, "First");
    }

    #[test]
    fn test_normalize_only_reads_count_items() {
        let items: Vec<Value> = (0..6)
            .map(|i| json!({"question": format!("Q{}", i), "answer": "A"}))
            .collect();
        assert_eq!(normalize_items(&items, &request(4)).len(), 4);
    }

    #[test]
    fn test_response_tops_up_from_templates() {
        let store = TemplateStore::builtin();
        let mut rng = StdRng::seed_from_u64(17);
        let generation =
            normalize_response(Some(FENCED_ONE), &request(3), Provider::OpenAi, store, &mut rng);

        assert_eq!(generation.puzzles.len(), 3);
        assert_eq!(generation.provenance, Provenance::AiToppedUp);
        assert_eq!(generation.provider, Some(Provider::OpenAi));

        let from_ai = generation.puzzles.iter().filter(|p| p.question == "Q1").count();
        let from_templates = generation
            .puzzles
            .iter()
            .filter(|p| store.records().contains(p))
            .count();
        assert_eq!(from_ai, 1);
        assert_eq!(from_templates, 2);
    }

    #[test]
    fn test_response_fully_ai() {
        let text = r#"{"items": [
            {"question": "Q1", "answer": "A1"},
            {"question": "Q2", "answer": "A2"}
        ]}"#;
        let mut rng = StdRng::seed_from_u64(2);
        let generation = normalize_response(
            Some(text),
            &request(2),
            Provider::Gemini,
            TemplateStore::builtin(),
            &mut rng,
        );
        assert_eq!(generation.provenance, Provenance::Ai);
        assert_eq!(generation.puzzles.len(), 2);
    }

    #[test]
    fn test_response_unparseable_falls_back() {
        let store = TemplateStore::builtin();
        let mut rng = StdRng::seed_from_u64(23);
        let generation = normalize_response(
            Some("sorry, I can't help"),
            &request(5),
            Provider::OpenAi,
            store,
            &mut rng,
        );
        assert_eq!(generation.provenance, Provenance::TemplatesFallback);
        assert_eq!(generation.provider, None);
        assert_eq!(generation.puzzles.len(), 5);
        assert!(generation.puzzles.iter().all(|p| store.records().contains(p)));
    }

    #[test]
    fn test_response_missing_text_falls_back() {
        let mut rng = StdRng::seed_from_u64(29);
        let generation =
            normalize_response(None, &request(4), Provider::Gemini, TemplateStore::builtin(), &mut rng);
        assert_eq!(generation.provenance, Provenance::TemplatesFallback);
        assert_eq!(generation.puzzles.len(), 4);
    }

    #[test]
    fn test_top_up_never_duplicates_questions() {
        let store = TemplateStore::builtin();
        let mut rng = StdRng::seed_from_u64(31);
        // AI repeats a template question in different case
        let text = format!(
            r#"[{{"question": "{}", "answer": "x"}}]"#,
            store.records()[0].question.to_uppercase()
        );
        let generation =
            normalize_response(Some(&text), &request(20), Provider::OpenAi, store, &mut rng);

        let keys: HashSet<_> = generation.puzzles.iter().map(|p| p.question_key()).collect();
        assert_eq!(keys.len(), generation.puzzles.len());
        // One AI record plus the six other templates
        assert_eq!(generation.puzzles.len(), store.len());
    }
}
