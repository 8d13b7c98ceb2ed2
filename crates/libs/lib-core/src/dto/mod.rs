//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures used for communication between
//! clients and the backend via the REST API.

pub mod auth;
pub mod catalog;

pub use auth::*;
pub use catalog::*;
