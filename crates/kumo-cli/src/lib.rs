//! # Kumo CLI Library
//!
//! Command-line interface over the Kumo materialization stack: load JSON
//! table extracts against a bundled domain schema and export the resulting
//! graph in one or more exchange formats.

pub mod commands;

pub use commands::*;
