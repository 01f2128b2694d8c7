//! # Kumo Domains
//!
//! Bundled example ontologies and table mappings: a media catalog and a
//! smart building. These are the demo schemas the CLI ships with and the
//! fixtures the end-to-end tests run against.

pub mod building;
pub mod media;

use kumo_schema::Schema;

/// Bundled domain by name, as selected on the command line
pub fn by_name(name: &str) -> Option<Schema> {
    match name {
        "media" => Some(media::schema()),
        "building" => Some(building::schema()),
        _ => None,
    }
}

pub fn names() -> [&'static str; 2] {
    ["media", "building"]
}
