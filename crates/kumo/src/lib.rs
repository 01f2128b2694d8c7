//! # Kumo - Relational-to-Knowledge-Graph Materialization Stack
//!
//! Kumo converts flat relational extracts (tabular records with foreign-key
//! columns) into a typed knowledge graph conforming to a small fixed
//! ontology, then serializes that graph into multiple exchange formats.
//!
//! ## Quick Start
//!
//! ```rust
//! use kumo::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let schema = kumo::domains::media::schema();
//!     let mut materializer = Materializer::new(schema, MaterializeOptions::default());
//!
//!     materializer.load_table(
//!         "movies",
//!         &[json!({
//!             "id": "3",
//!             "title": "X",
//!             "director_id": "99",
//!             "genres": "Action|Comedy"
//!         })],
//!     )?;
//!
//!     let prefixes = materializer.schema().prefixes().clone();
//!     let (store, report) = materializer.finish();
//!     let turtle = kumo::serialize::to_string(&store, &prefixes, Format::Turtle)?;
//!
//!     println!("{} statements, {} stubs", store.len(), report.stub_count());
//!     println!("{}", turtle);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Kumo consists of several specialized crates:
//!
//! - **`kumo-core`**: graph data model, typed literals, namespace prefixes
//! - **`kumo-schema`**: schema registry and column decoder registry
//! - **`kumo-store`**: set-semantics statement store with pattern lookup
//! - **`kumo-engine`**: identity resolution, fact assembly, referential repair
//! - **`kumo-serialize`**: Turtle, RDF/XML, JSON-LD and N-Triples output
//! - **`kumo-domains`**: bundled media catalog and smart building examples

pub use kumo_core as core;
pub use kumo_domains as domains;
pub use kumo_engine as engine;
pub use kumo_schema as schema;
pub use kumo_serialize as serialize;
pub use kumo_store as store;

/// Common imports for working with the materialization pipeline
pub mod prelude {
    pub use kumo_core::{Literal, NodeId, PrefixMap, Term, Triple, ValueType};
    pub use kumo_engine::{
        EntityResolver, LoadWarning, MaterializeOptions, Materializer, RunReport,
    };
    pub use kumo_schema::{
        ClassDef, ColumnBinding, ColumnDecoder, DataPropertyDef, ObjectPropertyDef, Schema,
        SchemaBuilder, TableMapping,
    };
    pub use kumo_serialize::Format;
    pub use kumo_store::GraphStore;
}
