//! # Blog API Server
//!
//! Actix-web application: route table, auth gate, error mapping and the
//! wiring of blog services onto a SQLite store.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;
