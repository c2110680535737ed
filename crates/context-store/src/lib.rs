//! Context store: remembers which character each user rolls for, per chat.
//!
//! ## Modules
//!
//! - [`ContextRepository`] – storage trait
//! - [`InMemoryContextRepository`] – process-local map
//! - [`RedisContextRepository`] – JSON under `context:{key}`
//! - [`SqliteContextRepository`] – `contexts` table via sqlx
//! - [`ContextService`] – maps a missing context to [`ContextError::NotFound`]

mod error;
mod memory;
mod models;
mod redis_store;
mod repository;
mod service;
mod sqlite;

pub use error::ContextError;
pub use memory::InMemoryContextRepository;
pub use models::Context;
pub use redis_store::RedisContextRepository;
pub use repository::ContextRepository;
pub use service::ContextService;
pub use sqlite::SqliteContextRepository;
