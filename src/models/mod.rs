pub mod classification;
pub mod ticket;

pub use classification::{Category, Classification, Priority};
pub use ticket::{NewTicket, Ticket, TicketChanges, TicketStatus, MAX_TITLE_LEN};
