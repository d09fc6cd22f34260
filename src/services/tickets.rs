use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Category, NewTicket, Priority, Ticket, TicketStatus};
use crate::state::AppState;

/// A validated create request. Labels left as `None` are filled by the classifier.
#[derive(Debug, Clone)]
pub struct TicketDraft {
    pub title: String,
    pub description: String,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub status: Option<TicketStatus>,
}

/// Creates a ticket, classifying the description once when the caller left
/// the category or priority out. Labels given explicitly always win.
pub async fn create_ticket(state: &AppState, draft: TicketDraft) -> Result<Ticket, AppError> {
    let (category, priority) = match (draft.category, draft.priority) {
        (Some(category), Some(priority)) => (category, priority),
        (category, priority) => {
            let suggested = state.classifier.classify(&draft.description).await;
            (
                category.unwrap_or(suggested.category),
                priority.unwrap_or(suggested.priority),
            )
        }
    };

    let new_ticket = NewTicket {
        title: draft.title,
        description: draft.description,
        category,
        priority,
        status: draft.status.unwrap_or_default(),
    };

    let ticket = {
        let db = state.db()?;
        queries::create_ticket(&db, &new_ticket)?
    };

    tracing::info!(
        ticket_id = ticket.id,
        category = ticket.category.as_str(),
        priority = ticket.priority.as_str(),
        "created ticket"
    );

    Ok(ticket)
}
