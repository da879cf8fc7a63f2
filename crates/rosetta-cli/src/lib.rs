//! # Rosetta CLI
//!
//! Library half of the `rosetta` binary: argument parsing, logging setup and
//! the resolve pipeline, kept here so it can be tested without a process.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod args;

pub use app::{bootstrap_subscriber, build_params, init_logging, load_config, resolve};
pub use args::{parse_param, Args};
