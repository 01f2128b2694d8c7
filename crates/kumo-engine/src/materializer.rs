//! Materialization pipeline: tables in, graph and run report out

use kumo_schema::Schema;
use kumo_store::GraphStore;
use serde_json::Value;
use tracing::info;

use crate::assembler::FactAssembler;
use crate::report::{LoadWarning, RunReport, TableStats};
use crate::EngineError;

/// Engine choices that are policy, not schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterializeOptions {
    /// Also assert the reverse edge for properties declaring an inverse
    pub materialize_inverses: bool,
    /// Seed the graph with the schema's own declaration statements
    pub emit_ontology: bool,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            materialize_inverses: false,
            emit_ontology: true,
        }
    }
}

/// Single-pass batch pipeline. Owns the store; each run gets its own
/// instance, so independent runs (and tests) never share state.
#[derive(Debug)]
pub struct Materializer {
    schema: Schema,
    options: MaterializeOptions,
    store: GraphStore,
    tables: Vec<TableStats>,
    warnings: Vec<LoadWarning>,
}

impl Materializer {
    pub fn new(schema: Schema, options: MaterializeOptions) -> Self {
        let mut store = GraphStore::new();
        if options.emit_ontology {
            for triple in schema.ontology_triples() {
                store.insert(triple);
            }
        }
        Self {
            schema,
            options,
            store,
            tables: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Stream one named tabular source through the pipeline, row by row.
    /// Row-level problems degrade to warnings; only an unmapped table name
    /// is an error.
    pub fn load_table(&mut self, table: &str, rows: &[Value]) -> Result<TableStats, EngineError> {
        let mapping = self
            .schema
            .mapping_for(table)
            .ok_or_else(|| EngineError::UnknownTable(table.to_string()))?
            .clone();

        let assembler = FactAssembler::new(&self.schema, self.options);
        let before = self.store.len();
        let mut rows_with_warnings = 0usize;

        for (row_index, row) in rows.iter().enumerate() {
            let outcome = assembler.process(&mut self.store, &mapping, row_index, row);
            if !outcome.warnings.is_empty() {
                rows_with_warnings += 1;
                self.warnings.extend(outcome.warnings);
            }
        }

        let stats = TableStats {
            table: table.to_string(),
            rows: rows.len(),
            rows_with_warnings,
            triples_added: self.store.len().saturating_sub(before),
        };
        info!(
            table,
            rows = stats.rows,
            rows_with_warnings = stats.rows_with_warnings,
            triples_added = stats.triples_added,
            "table loaded"
        );
        self.tables.push(stats.clone());
        Ok(stats)
    }

    /// Drain the pipeline: the accumulated graph plus the run report.
    pub fn finish(self) -> (GraphStore, RunReport) {
        let report = RunReport {
            tables: self.tables,
            total_triples: self.store.len(),
            warnings: self.warnings,
        };
        (self.store, report)
    }
}
