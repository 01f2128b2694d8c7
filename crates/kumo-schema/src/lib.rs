//! # Kumo Schema
//!
//! Schema registry for the materialization engine: class hierarchy, data and
//! object property declarations, and the per-column decoder registry that
//! fixes how each tabular source maps onto the ontology. Declarations are
//! registered on a builder and frozen before any data load.

pub mod model;
pub mod registry;

pub use model::{ClassDef, ColumnBinding, ColumnDecoder, DataPropertyDef, ObjectPropertyDef, TableMapping};
pub use registry::{Schema, SchemaBuilder};

// Error types
use thiserror::Error;

/// Fatal schema declaration errors, raised before any data is loaded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("duplicate declaration: {0}")]
    Duplicate(String),

    #[error("unknown class {class:?} referenced by {referrer}")]
    UnknownClass { class: String, referrer: String },

    #[error("unknown property {property:?} referenced by {referrer}")]
    UnknownProperty { property: String, referrer: String },

    #[error("inverse declarations of {property:?} and {inverse:?} are not symmetric")]
    AsymmetricInverse { property: String, inverse: String },

    #[error("invalid column binding {column:?} on table {table:?}: {reason}")]
    InvalidBinding {
        table: String,
        column: String,
        reason: String,
    },
}
