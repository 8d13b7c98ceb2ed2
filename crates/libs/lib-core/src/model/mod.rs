//! # Model Layer
//!
//! Entities and their SQLite-backed repositories.

pub mod store;
