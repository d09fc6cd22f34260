use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Category, Priority, Ticket, TicketChanges, TicketStatus, MAX_TITLE_LEN};
use crate::services::tickets::{self, TicketDraft};
use crate::state::AppState;

/// Body for both create and partial update. Every field is optional at the
/// wire level so validation errors come back as readable 400s.
#[derive(Deserialize, Default)]
pub struct TicketRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

fn validate_title(title: String) -> Result<String, AppError> {
    if title.trim().is_empty() {
        return Err(AppError::BadRequest("title may not be blank".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::BadRequest(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(title)
}

fn validate_description(description: String) -> Result<String, AppError> {
    if description.trim().is_empty() {
        return Err(AppError::BadRequest("description may not be blank".to_string()));
    }
    Ok(description)
}

fn parse_label<T>(
    value: Option<String>,
    field: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, AppError> {
    value
        .map(|v| {
            parse(&v).ok_or_else(|| AppError::BadRequest(format!("\"{v}\" is not a valid {field}")))
        })
        .transpose()
}

// GET /api/tickets/
pub async fn list_tickets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Ticket>>, AppError> {
    let tickets = {
        let db = state.db()?;
        queries::list_tickets(&db)?
    };
    Ok(Json(tickets))
}

// POST /api/tickets/
pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TicketRequest>,
) -> Result<(StatusCode, Json<Ticket>), AppError> {
    let title = req
        .title
        .ok_or_else(|| AppError::BadRequest("title is required".to_string()))
        .and_then(validate_title)?;
    let description = req
        .description
        .ok_or_else(|| AppError::BadRequest("description is required".to_string()))
        .and_then(validate_description)?;

    let draft = TicketDraft {
        title,
        description,
        category: parse_label(req.category, "category", Category::parse)?,
        priority: parse_label(req.priority, "priority", Priority::parse)?,
        status: parse_label(req.status, "status", TicketStatus::parse)?,
    };

    let ticket = tickets::create_ticket(&state, draft).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

// GET /api/tickets/:id/
pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Ticket>, AppError> {
    let ticket = {
        let db = state.db()?;
        queries::get_ticket(&db, id)?
    };
    ticket
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("ticket {id}")))
}

// PATCH /api/tickets/:id/
pub async fn update_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<TicketRequest>,
) -> Result<Json<Ticket>, AppError> {
    let changes = TicketChanges {
        title: req.title.map(validate_title).transpose()?,
        description: req.description.map(validate_description).transpose()?,
        category: parse_label(req.category, "category", Category::parse)?,
        priority: parse_label(req.priority, "priority", Priority::parse)?,
        status: parse_label(req.status, "status", TicketStatus::parse)?,
    };

    let ticket = {
        let db = state.db()?;
        if changes.is_empty() {
            queries::get_ticket(&db, id)?
        } else {
            queries::update_ticket(&db, id, &changes)?
        }
    };

    match ticket {
        Some(ticket) => {
            tracing::info!(ticket_id = id, status = ticket.status.as_str(), "updated ticket");
            Ok(Json(ticket))
        }
        None => Err(AppError::NotFound(format!("ticket {id}"))),
    }
}
