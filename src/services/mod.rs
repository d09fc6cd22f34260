pub mod ai;
pub mod tickets;
