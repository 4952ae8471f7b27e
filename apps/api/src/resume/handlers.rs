//! Axum route handlers for the Resume API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::{ResumeRecord, Section};
use crate::resume::completeness::{compute_completeness_report, CompletenessReport};
use crate::resume::editing::{append_entry, remove_entry};
use crate::resume::extractor::{extract_with_report, ExtractionReport};
use crate::resume::validation::validate_value;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct AppendEntryRequest {
    #[serde(default)]
    pub record: Value,
    #[serde(default)]
    pub entry: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveEntryRequest {
    #[serde(default)]
    pub record: Value,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/extract
///
/// Best-effort extraction from a free-text narrative. Empty text is accepted
/// and yields the all-placeholder record.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractionReport>, AppError> {
    let chars = request.text.chars().count();
    if chars > state.config.max_text_chars {
        return Err(AppError::Validation(format!(
            "text is {chars} characters; the limit is {}",
            state.config.max_text_chars
        )));
    }

    let report = extract_with_report(&request.text);
    info!(
        chars,
        warnings = report.warnings.len(),
        empty_sections = report.sections.iter().filter(|s| s.is_empty).count(),
        "Extracted resume from narrative"
    );
    Ok(Json(report))
}

/// POST /api/v1/resume/validate
///
/// Accepts any JSON (including `null`) and returns a structurally complete record.
pub async fn handle_validate(Json(body): Json<Value>) -> Json<ResumeRecord> {
    Json(validate_value(&body))
}

/// GET /api/v1/resume/empty
pub async fn handle_empty() -> Json<ResumeRecord> {
    Json(ResumeRecord::empty())
}

/// POST /api/v1/resume/completeness
pub async fn handle_completeness(Json(body): Json<Value>) -> Json<CompletenessReport> {
    let record = validate_value(&body);
    Json(compute_completeness_report(&record))
}

/// POST /api/v1/resume/sections/:section/entries
pub async fn handle_append_entry(
    Path(section): Path<String>,
    Json(request): Json<AppendEntryRequest>,
) -> Result<Json<ResumeRecord>, AppError> {
    let section: Section = section.parse()?;
    let entry = match request.entry {
        Some(Value::Null) | None => None,
        Some(value @ Value::Object(_)) => Some(value),
        Some(other) => {
            return Err(AppError::UnprocessableEntity(format!(
                "entry must be an object, got {other}"
            )))
        }
    };

    let record = validate_value(&request.record);
    Ok(Json(append_entry(&record, section, entry.as_ref())))
}

/// POST /api/v1/resume/sections/:section/entries/:id/remove
pub async fn handle_remove_entry(
    Path((section, id)): Path<(String, u32)>,
    Json(request): Json<RemoveEntryRequest>,
) -> Result<Json<ResumeRecord>, AppError> {
    let section: Section = section.parse()?;
    let record = validate_value(&request.record);
    Ok(Json(remove_entry(&record, section, id)?))
}
