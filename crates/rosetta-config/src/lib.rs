//! # Rosetta Config
//!
//! Configuration and catalog loading for Rosetta.
//!
//! This crate provides the application configuration schema, catalog file
//! loading in JSON, YAML and TOML, validation of both, and a catalog cache
//! that can be swapped atomically while translators keep reading.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use cache::*;
pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
