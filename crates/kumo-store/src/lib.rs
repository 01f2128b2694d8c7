//! # Kumo Store
//!
//! In-memory statement store for the materialization engine. One owned
//! instance is passed explicitly through the pipeline; independent runs
//! never share state.

pub mod store;

pub use store::{GraphStore, StoreStatistics};
