//! # Rosetta Common
//!
//! Shared types, utilities, and common functionality for Rosetta.
//!
//! This crate provides the error type used by configuration and catalog
//! handling, plus the JavaScript-compatible value coercions the message
//! resolver relies on when substituting parameters and evaluating plural
//! rules.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use types::*;
pub use utils::*;
