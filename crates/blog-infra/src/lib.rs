//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `sqlite` - Embedded SQLite store via SeaORM
//! - `auth` - JWT + Argon2 authentication

#[cfg(feature = "sqlite")]
pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "sqlite")]
pub use database::{
    DatabaseConfig, SqliteCommentRepository, SqlitePostRepository, SqliteUserRepository,
};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
