#![allow(unused_imports)]
pub mod memory_store;
pub mod test_db;
pub mod ticket_helpers;

pub use memory_store::*;
pub use test_db::*;
pub use ticket_helpers::*;
