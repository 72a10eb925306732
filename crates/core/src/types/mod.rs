//! Core types for dualstore.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod customer;
pub mod id;
pub mod order;

pub use customer::Customer;
pub use id::*;
pub use order::Order;
