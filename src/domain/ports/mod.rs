pub mod clock;
pub mod ticket_store;
