//! Dualstore API library.
//!
//! This crate provides the service functionality as a library, allowing it to
//! be tested and reused. The binary in `main.rs` is a thin shell around it.
//!
//! # Architecture
//!
//! Two structurally identical pipelines, one per entity, each backed by its
//! own `PostgreSQL` database:
//!
//! ```text
//! transport adapter (routes) -> request handler -> repository -> store
//! ```
//!
//! The customer and order pipelines never interact: no shared connections,
//! transactions, or locks. Everything generic over the entity shape lives in
//! [`db`] and [`handlers`]; the two entities differ only in field names, SQL,
//! and creation validation rules.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
