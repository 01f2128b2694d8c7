//! # Kumo Engine
//!
//! The relational-to-graph materialization pipeline: entity identity
//! resolution, fact assembly from tabular rows, referential repair of
//! dangling foreign keys, and run-level reporting. Single-threaded,
//! single-pass; a full reload is idempotent and may be re-run wholesale.

pub mod assembler;
pub mod materializer;
pub mod repair;
pub mod report;
pub mod resolver;

pub use assembler::{FactAssembler, RowOutcome};
pub use materializer::{MaterializeOptions, Materializer};
pub use repair::RepairPass;
pub use report::{LoadWarning, RunReport, TableStats};
pub use resolver::EntityResolver;

// Error types
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("no mapping registered for table {0:?}")]
    UnknownTable(String),

    #[error("business key for class {class} is empty after normalization (raw {raw:?})")]
    EmptyKey { class: String, raw: String },

    #[error(transparent)]
    Schema(#[from] kumo_schema::SchemaError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{normalize_key, slugify};

    mod normalization_tests {
        use super::*;

        #[test]
        fn test_normalize_key_trims() {
            assert_eq!(normalize_key(" 7 "), "7");
            assert_eq!(normalize_key("A-13"), "A-13");
        }

        #[test]
        fn test_normalize_key_sanitizes_local_name() {
            assert_eq!(normalize_key("a b/c"), "a_b_c");
        }

        #[test]
        fn test_slugify_case_folds() {
            assert_eq!(slugify("Action"), "action");
            assert_eq!(slugify(" action "), "action");
        }

        #[test]
        fn test_slugify_collapses_separators() {
            assert_eq!(slugify("Sci-Fi  &  Fantasy"), "sci_fi_fantasy");
        }

        #[test]
        fn test_slugify_empty_input() {
            assert_eq!(slugify("  ---  "), "");
        }
    }

    mod resolver_property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normalization_is_idempotent(raw in ".{0,40}") {
                let once = normalize_key(&raw);
                prop_assert_eq!(normalize_key(&once), once.clone());
                let slug = slugify(&raw);
                prop_assert_eq!(slugify(&slug), slug);
            }

            #[test]
            fn slug_is_lowercase_alnum_and_underscore(raw in ".{0,40}") {
                let slug = slugify(&raw);
                prop_assert!(slug
                    .chars()
                    .all(|c| c == '_' || (c.is_alphanumeric() && !c.is_uppercase())));
                prop_assert!(!slug.starts_with('_'));
                prop_assert!(!slug.ends_with('_'));
            }
        }
    }
}
