//! Testing infrastructure for jlog integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestWorld`: isolated log root, archive root, database and config file
//! - `fixtures`: builders for header, body and footer log lines

pub mod fixtures;
pub mod world;

pub use fixtures::{HeaderLine, body_line, footer_line, session_lines};
pub use world::{CliResult, TestWorld};
