/// Entities and their collection operations
///
/// This module contains the two stored entities and their CRUD operations
/// against the document store.
///
/// # Models
///
/// - `user`: User accounts with the denormalized list of owned task ids
/// - `task`: Tasks with an opaque JSON payload

pub mod task;
pub mod user;
