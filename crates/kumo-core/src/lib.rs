//! # Kumo Core
//!
//! Shared graph data model for the Kumo materialization stack: compact node
//! identifiers, typed literals, statements, and namespace prefix bindings.

pub mod model;
pub mod prefix;
pub mod vocab;

pub use model::{Literal, NodeId, Term, Triple, ValueType};
pub use prefix::PrefixMap;

// Error types
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid {expected} literal: {value:?}")]
    InvalidLiteral { value: String, expected: &'static str },

    #[error("unknown prefix in compact id: {0:?}")]
    UnknownPrefix(String),
}
