//! # Kumo Serialize
//!
//! Renders an accumulated graph into exchange syntaxes: Turtle, RDF/XML,
//! JSON-LD and N-Triples. Namespace prefix bindings registered at schema
//! build time are preserved so output uses short names. Statement ordering
//! within a format is not a guaranteed invariant.

pub mod jsonld;
pub mod ntriples;
pub mod rdfxml;
pub mod turtle;

use std::fs;
use std::path::{Path, PathBuf};

use kumo_core::PrefixMap;
use kumo_store::GraphStore;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SerializeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Prefix(#[from] kumo_core::CoreError),

    #[error("line {line}: {reason}")]
    Syntax { line: usize, reason: String },
}

/// Supported exchange syntaxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    Turtle,
    RdfXml,
    JsonLd,
    NTriples,
}

impl Format {
    pub fn all() -> [Format; 4] {
        [Format::Turtle, Format::RdfXml, Format::JsonLd, Format::NTriples]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Format::Turtle => "turtle",
            Format::RdfXml => "rdf-xml",
            Format::JsonLd => "json-ld",
            Format::NTriples => "n-triples",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Format::Turtle => "ttl",
            Format::RdfXml => "rdf",
            Format::JsonLd => "jsonld",
            Format::NTriples => "nt",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "turtle" | "ttl" => Ok(Format::Turtle),
            "rdf-xml" | "rdfxml" | "rdf" | "xml" => Ok(Format::RdfXml),
            "json-ld" | "jsonld" => Ok(Format::JsonLd),
            "n-triples" | "ntriples" | "nt" => Ok(Format::NTriples),
            other => Err(format!("unknown format: {}", other)),
        }
    }
}

/// Render the graph in the requested syntax
pub fn to_string(
    store: &GraphStore,
    prefixes: &PrefixMap,
    format: Format,
) -> Result<String, SerializeError> {
    match format {
        Format::Turtle => turtle::to_string(store, prefixes),
        Format::RdfXml => rdfxml::to_string(store, prefixes),
        Format::JsonLd => jsonld::to_string(store, prefixes),
        Format::NTriples => ntriples::to_string(store, prefixes),
    }
}

/// Outcome of one file export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportStats {
    pub format: Format,
    pub path: PathBuf,
    pub bytes: u64,
    pub triples: usize,
}

/// Serialize the graph into one file
pub fn export(
    store: &GraphStore,
    prefixes: &PrefixMap,
    format: Format,
    path: &Path,
) -> Result<ExportStats, SerializeError> {
    let rendered = to_string(store, prefixes, format)?;
    fs::write(path, &rendered)?;
    let stats = ExportStats {
        format,
        path: path.to_path_buf(),
        bytes: rendered.len() as u64,
        triples: store.len(),
    };
    info!(format = format.name(), path = %path.display(), bytes = stats.bytes, "graph exported");
    Ok(stats)
}

/// Export every requested format into `dir` as `<basename>.<ext>`.
///
/// A failure is fatal only for its own format; the remaining formats still
/// complete. Failures come back alongside the successes.
pub fn export_all(
    store: &GraphStore,
    prefixes: &PrefixMap,
    formats: &[Format],
    dir: &Path,
    basename: &str,
) -> (Vec<ExportStats>, Vec<(Format, SerializeError)>) {
    let mut written = Vec::new();
    let mut failures = Vec::new();
    for &format in formats {
        let path = dir.join(format!("{}.{}", basename, format.extension()));
        match export(store, prefixes, format, &path) {
            Ok(stats) => written.push(stats),
            Err(err) => {
                error!(format = format.name(), %err, "export failed");
                failures.push((format, err));
            }
        }
    }
    (written, failures)
}

/// Escape a literal for the Turtle / N-Triples quoted form
pub(crate) fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}
