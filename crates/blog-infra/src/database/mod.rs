//! Embedded SQLite store: connection management, entities and repositories.

mod connections;
mod sqlite_base;
mod sqlite_repo;

pub mod entity;

pub use connections::{DatabaseConfig, connect};
pub use sqlite_base::SqliteRepository;
pub use sqlite_repo::{SqliteCommentRepository, SqlitePostRepository, SqliteUserRepository};
