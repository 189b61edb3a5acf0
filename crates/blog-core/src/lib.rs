//! # Blog Core
//!
//! The domain layer of the blog backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, the ports infrastructure implements, and the entity services
//! that enforce validation and ownership rules.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
