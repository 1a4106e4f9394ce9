//! Upstream statistics normalization
//!
//! The public statistics providers disagree on key spelling and value types,
//! so every field is resolved through an ordered candidate-key table and a
//! shared numeric coercion. Missing data degrades per field: counts to 0,
//! ratios to null, rank to an empty string.

use serde_json::{Map, Number, Value};

use crate::api::types::{NormalizedStats, SolvedCounts};

// Candidate key spellings per field, tried in order.
const EASY_SOLVED_KEYS: &[&str] = &["easySolved", "easy_solved", "easy"];
const MEDIUM_SOLVED_KEYS: &[&str] = &["mediumSolved", "medium_solved", "medium"];
const HARD_SOLVED_KEYS: &[&str] = &["hardSolved", "hard_solved", "hard"];
const TOTAL_SOLVED_KEYS: &[&str] = &["totalSolved", "total_solved"];
const TOTAL_QUESTIONS_KEYS: &[&str] = &["totalQuestions", "total_questions"];
const ACCEPTANCE_RATE_KEYS: &[&str] = &["acceptanceRate", "acceptance_rate", "acRate"];
const RANK_KEYS: &[&str] = &["rank", "ranking", "globalRanking"];
const CONTEST_RATING_KEYS: &[&str] = &["contestRating", "contest_rating", "rating"];

// Per-difficulty question totals, summed when no explicit total is present.
const QUESTION_TOTAL_KEYS: &[&str] = &["totalEasy", "totalMedium", "totalHard"];

/// Reshape an untrusted upstream document into the stable stats schema.
///
/// `username` is the query value and wins only when the document does not
/// carry a username of its own.
pub fn normalize(doc: &Value, username: &str) -> NormalizedStats {
    let empty = Map::new();
    let doc = doc.as_object().unwrap_or(&empty);

    let username = match doc.get("username").and_then(Value::as_str) {
        Some(u) if !u.is_empty() => u.to_string(),
        _ => username.to_string(),
    };
    let profile_url = match doc.get("profileUrl").and_then(Value::as_str) {
        Some(u) => u.to_string(),
        None if username.is_empty() => String::new(),
        None => format!("https://leetcode.com/{username}/"),
    };

    let easy = count_field(doc, EASY_SOLVED_KEYS);
    let medium = count_field(doc, MEDIUM_SOLVED_KEYS);
    let hard = count_field(doc, HARD_SOLVED_KEYS);

    let total_solved = match first_present(doc, TOTAL_SOLVED_KEYS) {
        Some(value) => coerce_number(value),
        None => sum_numbers([&easy, &medium, &hard]),
    };

    let total_questions =
        optional_field(doc, TOTAL_QUESTIONS_KEYS).or_else(|| question_total_sum(doc));

    NormalizedStats {
        username,
        profile_url,
        rank: rank_field(doc),
        contest_rating: optional_field(doc, CONTEST_RATING_KEYS),
        total_solved,
        total_questions,
        acceptance_rate: optional_field(doc, ACCEPTANCE_RATE_KEYS),
        solved: SolvedCounts { easy, medium, hard },
        badges: badges_field(doc),
    }
}

/// First candidate key present in the document with a non-null value.
fn first_present<'a>(doc: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| doc.get(*key))
        .find(|value| !value.is_null())
}

/// A solved count: coerced number, 0 when no candidate key matches.
fn count_field(doc: &Map<String, Value>, keys: &[&str]) -> Number {
    first_present(doc, keys).map_or_else(|| Number::from(0), coerce_number)
}

/// A nullable numeric field: coerced when present, null when absent.
fn optional_field(doc: &Map<String, Value>, keys: &[&str]) -> Option<Number> {
    first_present(doc, keys).map(coerce_number)
}

/// Rank passes through as received when it is a string or a number;
/// anything else (including absence) becomes the empty string.
fn rank_field(doc: &Map<String, Value>) -> Value {
    match first_present(doc, RANK_KEYS) {
        Some(value @ (Value::String(_) | Value::Number(_))) => value.clone(),
        _ => Value::String(String::new()),
    }
}

/// Badges pass through only when upstream sent a genuine list.
fn badges_field(doc: &Map<String, Value>) -> Vec<Value> {
    match doc.get("badges") {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}

/// Sum of the per-difficulty question totals, when at least one is present.
fn question_total_sum(doc: &Map<String, Value>) -> Option<Number> {
    let parts: Vec<Number> = QUESTION_TOTAL_KEYS
        .iter()
        .filter_map(|key| doc.get(*key))
        .filter(|value| !value.is_null())
        .map(coerce_number)
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(sum_numbers(parts.iter()))
}

/// Numeric coercion shared by every field:
/// clean integer parse wins; a float without a fractional part is returned
/// as an integer-valued number; everything unparsable coerces to 0.
fn coerce_number(value: &Value) -> Number {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => float_to_number(f),
            _ => n.clone(),
        },
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                Number::from(i)
            } else if let Ok(f) = trimmed.parse::<f64>() {
                float_to_number(f)
            } else {
                Number::from(0)
            }
        }
        _ => Number::from(0),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn float_to_number(f: f64) -> Number {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Number::from(f as i64)
    } else {
        Number::from_f64(f).unwrap_or_else(|| Number::from(0))
    }
}

fn sum_numbers<'a, I>(numbers: I) -> Number
where
    I: IntoIterator<Item = &'a Number>,
{
    let total: f64 = numbers
        .into_iter()
        .map(|n| n.as_f64().unwrap_or(0.0))
        .sum();
    float_to_number(total)
}
