//! Common types and utilities shared across multiway.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants (degree bounds, node capacities)
//! - Error types

pub mod config;
pub mod error;

pub use error::{Error, Result};
