//! Run-level reporting: per-table statistics and collected warnings

use serde::{Deserialize, Serialize};

/// Non-fatal events collected during a load. Nothing here aborts a table;
/// everything lands in the run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadWarning {
    /// Unparsable scalar or malformed compound value; the offending
    /// attribute or edge was skipped, the rest of the row kept
    SourceRow {
        table: String,
        row: String,
        column: String,
        reason: String,
    },
    /// A referenced entity was never independently declared; a stub was
    /// synthesized to close the gap
    ReferentialGap { class: String, key: String },
    /// A functional property was re-asserted with a different value;
    /// the newer value replaced the older one
    FunctionalConflict {
        subject: String,
        property: String,
        previous: String,
        replacement: String,
    },
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadWarning::SourceRow {
                table,
                row,
                column,
                reason,
            } => write!(f, "{}[{}].{}: {}", table, row, column, reason),
            LoadWarning::ReferentialGap { class, key } => {
                write!(f, "stub {} created for dangling reference {:?}", class, key)
            }
            LoadWarning::FunctionalConflict {
                subject,
                property,
                previous,
                replacement,
            } => write!(
                f,
                "{} {} rewritten: {} -> {}",
                subject, property, previous, replacement
            ),
        }
    }
}

/// Outcome of loading one tabular source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableStats {
    pub table: String,
    pub rows: usize,
    pub rows_with_warnings: usize,
    pub triples_added: usize,
}

/// Outcome of a full materialization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub tables: Vec<TableStats>,
    pub total_triples: usize,
    pub warnings: Vec<LoadWarning>,
}

impl RunReport {
    pub fn stub_count(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, LoadWarning::ReferentialGap { .. }))
            .count()
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} statements materialized", self.total_triples)?;
        for stats in &self.tables {
            writeln!(
                f,
                "  {}: {} rows, {} with warnings, {} statements",
                stats.table, stats.rows, stats.rows_with_warnings, stats.triples_added
            )?;
        }
        if self.warnings.is_empty() {
            write!(f, "no warnings")
        } else {
            writeln!(f, "{} warnings:", self.warnings.len())?;
            for (i, warning) in self.warnings.iter().enumerate() {
                if i > 0 {
                    writeln!(f)?;
                }
                write!(f, "  {}", warning)?;
            }
            Ok(())
        }
    }
}
