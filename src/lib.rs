//! # taskhub
//!
//! Minimal task-tracking backend: CRUD over users and their tasks, backed
//! by MongoDB. Users carry a denormalized list of the ids of the tasks they
//! own; handlers keep that list and the task documents in sync.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `db`: Document store connection
//! - `error`: Error handling and HTTP response mapping
//! - `models`: Entities and their collection operations
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
