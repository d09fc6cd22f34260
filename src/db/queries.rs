use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::{Category, NewTicket, Priority, Ticket, TicketChanges, TicketStatus};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const TICKET_COLUMNS: &str = "id, title, description, category, priority, status, created_at";

fn ticket_from_row(row: &Row<'_>) -> rusqlite::Result<Ticket> {
    let category: String = row.get(3)?;
    let priority: String = row.get(4)?;
    let status: String = row.get(5)?;
    let created_at: String = row.get(6)?;

    Ok(Ticket {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        // CHECK constraints keep these columns inside their label sets
        category: Category::parse(&category).unwrap_or_default(),
        priority: Priority::parse(&priority).unwrap_or_default(),
        status: TicketStatus::parse(&status).unwrap_or_default(),
        created_at: NaiveDateTime::parse_from_str(&created_at, TIMESTAMP_FORMAT)
            .unwrap_or_else(|_| Utc::now().naive_utc()),
    })
}

pub fn create_ticket(conn: &Connection, ticket: &NewTicket) -> anyhow::Result<Ticket> {
    let created_at = Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string();

    conn.execute(
        "INSERT INTO tickets (title, description, category, priority, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            ticket.title,
            ticket.description,
            ticket.category.as_str(),
            ticket.priority.as_str(),
            ticket.status.as_str(),
            created_at,
        ],
    )?;

    let id = conn.last_insert_rowid();
    get_ticket(conn, id)?.ok_or_else(|| anyhow::anyhow!("ticket {id} missing after insert"))
}

pub fn get_ticket(conn: &Connection, id: i64) -> anyhow::Result<Option<Ticket>> {
    let ticket = conn
        .query_row(
            &format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = ?1"),
            params![id],
            ticket_from_row,
        )
        .optional()?;
    Ok(ticket)
}

/// All tickets, newest first.
pub fn list_tickets(conn: &Connection) -> anyhow::Result<Vec<Ticket>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TICKET_COLUMNS} FROM tickets ORDER BY created_at DESC, id DESC"
    ))?;

    let tickets = stmt
        .query_map([], ticket_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tickets)
}

/// Applies `changes` and returns the updated ticket, or `None` if it does not exist.
pub fn update_ticket(
    conn: &Connection,
    id: i64,
    changes: &TicketChanges,
) -> anyhow::Result<Option<Ticket>> {
    let updated = conn.execute(
        "UPDATE tickets SET
           title = COALESCE(?2, title),
           description = COALESCE(?3, description),
           category = COALESCE(?4, category),
           priority = COALESCE(?5, priority),
           status = COALESCE(?6, status)
         WHERE id = ?1",
        params![
            id,
            changes.title,
            changes.description,
            changes.category.map(|c| c.as_str()),
            changes.priority.map(|p| p.as_str()),
            changes.status.map(|s| s.as_str()),
        ],
    )?;

    if updated == 0 {
        return Ok(None);
    }
    get_ticket(conn, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn new_ticket(title: &str) -> NewTicket {
        NewTicket {
            title: title.to_string(),
            description: "Invoice shows the wrong amount".to_string(),
            category: Category::Billing,
            priority: Priority::Medium,
            status: TicketStatus::Open,
        }
    }

    #[test]
    fn test_create_and_get() {
        let conn = db::init_db(db::IN_MEMORY).unwrap();
        let created = create_ticket(&conn, &new_ticket("Wrong amount")).unwrap();

        let fetched = get_ticket(&conn, created.id).unwrap().unwrap();
        assert_eq!(fetched.title, "Wrong amount");
        assert_eq!(fetched.category, Category::Billing);
        assert_eq!(fetched.status, TicketStatus::Open);
        assert!(get_ticket(&conn, created.id + 1).unwrap().is_none());
    }

    #[test]
    fn test_list_newest_first() {
        let conn = db::init_db(db::IN_MEMORY).unwrap();
        create_ticket(&conn, &new_ticket("first")).unwrap();
        create_ticket(&conn, &new_ticket("second")).unwrap();

        let titles: Vec<String> = list_tickets(&conn)
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[test]
    fn test_partial_update() {
        let conn = db::init_db(db::IN_MEMORY).unwrap();
        let created = create_ticket(&conn, &new_ticket("Wrong amount")).unwrap();

        let changes = TicketChanges {
            status: Some(TicketStatus::InProgress),
            priority: Some(Priority::High),
            ..Default::default()
        };
        let updated = update_ticket(&conn, created.id, &changes).unwrap().unwrap();
        assert_eq!(updated.status, TicketStatus::InProgress);
        assert_eq!(updated.priority, Priority::High);
        assert_eq!(updated.title, "Wrong amount");
        assert_eq!(updated.category, Category::Billing);

        assert!(update_ticket(&conn, 9999, &changes).unwrap().is_none());
    }

    #[test]
    fn test_check_constraints_reject_unknown_labels() {
        let conn = db::init_db(db::IN_MEMORY).unwrap();
        let result = conn.execute(
            "INSERT INTO tickets (title, description, category, priority) VALUES ('t', 'd', 'invoice', 'low')",
            [],
        );
        assert!(result.is_err());
    }
}
