use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Category, Priority};
use crate::state::AppState;

// POST /api/tickets/classify/
#[derive(Deserialize)]
pub struct ClassifyRequest {
    pub description: Option<String>,
}

#[derive(Serialize)]
pub struct SuggestionResponse {
    suggested_category: Category,
    suggested_priority: Priority,
}

/// Suggests labels for a draft ticket. Classifier failures still answer 200
/// with the default labels; only a missing description is rejected.
pub async fn suggest_classification(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<SuggestionResponse>, AppError> {
    let description = req
        .description
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("description is required".to_string()))?;

    let suggestion = state.classifier.classify(&description).await;

    Ok(Json(SuggestionResponse {
        suggested_category: suggestion.category,
        suggested_priority: suggestion.priority,
    }))
}
