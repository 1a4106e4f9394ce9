// API type definitions module
// Request/response types for the portfolio JSON API

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

// ============== Projects ==============

/// One portfolio project, fixed at build time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub repo_url: &'static str,
    pub demo_url: &'static str,
}

// ============== Contact ==============

/// Contact form submission body.
///
/// Every field defaults to empty so a missing field reads as an empty value
/// and fails validation instead of JSON deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    /// Optional list of topics the visitor ticked on the form
    #[serde(default)]
    pub topics: Vec<String>,
}

// ============== Stats ==============

/// Coding-profile statistics in the stable schema served to the frontend,
/// regardless of which upstream shape was received.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedStats {
    pub username: String,
    pub profile_url: String,
    /// Global rank as reported upstream: a string, a number, or "" when the
    /// upstream document carries none.
    pub rank: Value,
    pub contest_rating: Option<Number>,
    pub total_solved: Number,
    pub total_questions: Option<Number>,
    pub acceptance_rate: Option<Number>,
    pub solved: SolvedCounts,
    /// Opaque badge values, passed through only when upstream sent a list
    pub badges: Vec<Value>,
}

/// Solved-problem counts by difficulty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolvedCounts {
    pub easy: Number,
    pub medium: Number,
    pub hard: Number,
}
