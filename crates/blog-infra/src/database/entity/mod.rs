//! SeaORM entities mirroring the tables created by the migrator.

pub mod comment;
pub mod post;
pub mod user;
