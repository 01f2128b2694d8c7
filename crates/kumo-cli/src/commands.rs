//! CLI command definitions and handlers

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use kumo_engine::{MaterializeOptions, Materializer};
use kumo_serialize::{export_all, to_string, Format};
use kumo_store::GraphStore;
use serde_json::Value;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "kumo")]
#[command(about = "Materialize relational extracts into a typed knowledge graph")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Load tabular sources and export the materialized graph
    Materialize {
        /// Bundled domain schema (see `kumo info`)
        #[arg(short, long)]
        domain: String,

        /// Table source as NAME=FILE.json, repeatable
        #[arg(short, long = "table", value_name = "NAME=FILE", value_parser = parse_table_spec)]
        tables: Vec<TableSpec>,

        /// Output format, repeatable
        #[arg(short, long = "format", default_value = "turtle", value_parser = parse_format)]
        formats: Vec<Format>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Basename for the exported files
        #[arg(long, default_value = "graph")]
        name: String,

        /// Also assert declared inverse edges
        #[arg(long)]
        inverses: bool,

        /// Print the run report as JSON instead of text
        #[arg(long)]
        report_json: bool,
    },

    /// Print the ontology declarations of a bundled schema
    Schema {
        /// Bundled domain schema
        #[arg(short, long)]
        domain: String,

        /// Output format
        #[arg(short, long, default_value = "turtle", value_parser = parse_format)]
        format: Format,
    },

    /// Show supported domains and formats
    Info,
}

/// One `NAME=FILE` table argument
#[derive(Debug, Clone)]
pub struct TableSpec {
    pub name: String,
    pub path: PathBuf,
}

fn parse_table_spec(raw: &str) -> Result<TableSpec, String> {
    match raw.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => Ok(TableSpec {
            name: name.to_string(),
            path: PathBuf::from(path),
        }),
        _ => Err(format!("expected NAME=FILE, got {:?}", raw)),
    }
}

fn parse_format(raw: &str) -> Result<Format, String> {
    raw.parse()
}

/// Command outcome; per-row warnings never fail a run, export failures do
pub struct ExecutionResult {
    pub success: bool,
}

pub fn execute(command: Commands) -> Result<ExecutionResult> {
    match command {
        Commands::Materialize {
            domain,
            tables,
            formats,
            out,
            name,
            inverses,
            report_json,
        } => materialize(domain, tables, formats, out, name, inverses, report_json),
        Commands::Schema { domain, format } => schema(domain, format),
        Commands::Info => info(),
    }
}

fn lookup_domain(name: &str) -> Result<kumo_schema::Schema> {
    kumo_domains::by_name(name).with_context(|| {
        format!(
            "unknown domain {:?}; bundled domains: {}",
            name,
            kumo_domains::names().join(", ")
        )
    })
}

#[allow(clippy::too_many_arguments)]
fn materialize(
    domain: String,
    tables: Vec<TableSpec>,
    formats: Vec<Format>,
    out: PathBuf,
    name: String,
    inverses: bool,
    report_json: bool,
) -> Result<ExecutionResult> {
    let schema = lookup_domain(&domain)?;
    let options = MaterializeOptions {
        materialize_inverses: inverses,
        ..Default::default()
    };
    let mut materializer = Materializer::new(schema, options);

    for spec in &tables {
        let rows = read_rows(spec)?;
        materializer
            .load_table(&spec.name, &rows)
            .with_context(|| format!("loading table {:?}", spec.name))?;
    }

    let prefixes = materializer.schema().prefixes().clone();
    let (store, report) = materializer.finish();

    fs::create_dir_all(&out)
        .with_context(|| format!("creating output directory {}", out.display()))?;
    let (written, failures) = export_all(&store, &prefixes, &formats, &out, &name);

    if report_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    for stats in &written {
        println!(
            "wrote {} ({} bytes, {} statements)",
            stats.path.display(),
            stats.bytes,
            stats.triples
        );
    }
    for (format, err) in &failures {
        eprintln!("export to {} failed: {}", format, err);
    }

    Ok(ExecutionResult {
        success: failures.is_empty(),
    })
}

fn read_rows(spec: &TableSpec) -> Result<Vec<Value>> {
    let raw = fs::read_to_string(&spec.path)
        .with_context(|| format!("reading {}", spec.path.display()))?;
    let parsed: Value = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", spec.path.display()))?;
    match parsed {
        Value::Array(rows) => Ok(rows),
        _ => bail!("{}: expected a JSON array of row objects", spec.path.display()),
    }
}

fn schema(domain: String, format: Format) -> Result<ExecutionResult> {
    let schema = lookup_domain(&domain)?;
    let mut store = GraphStore::new();
    for triple in schema.ontology_triples() {
        store.insert(triple);
    }
    let rendered = to_string(&store, schema.prefixes(), format)?;
    println!("{}", rendered);
    Ok(ExecutionResult { success: true })
}

fn info() -> Result<ExecutionResult> {
    println!("kumo {}", env!("CARGO_PKG_VERSION"));
    println!("domains: {}", kumo_domains::names().join(", "));
    let formats: Vec<&str> = Format::all().iter().map(|f| f.name()).collect();
    println!("formats: {}", formats.join(", "));
    Ok(ExecutionResult { success: true })
}
