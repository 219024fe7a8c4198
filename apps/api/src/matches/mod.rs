// Persistence gateway for grants, projects, and matches, plus the
// confirm/list handlers. The project insert and its dependent match insert
// always run in one transaction.

pub mod handlers;
pub mod store;
