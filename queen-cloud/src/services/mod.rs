//! Domain operations
//!
//! Each module validates input, applies the business rules and talks to the
//! [`Store`](crate::db::Store). Handlers in `api` stay thin wrappers around
//! these functions.

pub mod dashboard;
pub mod identity;
pub mod inventory;
pub mod orders;
pub mod productions;
pub mod reports;
