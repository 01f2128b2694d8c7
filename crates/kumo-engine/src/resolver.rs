//! Entity identity resolution

use kumo_core::NodeId;
use kumo_schema::Schema;

use crate::EngineError;

/// Maps a business key to a stable graph identifier.
///
/// Resolution is a pure function of (class, normalized key): repeated
/// encounters of the same pair always yield the same node, across rows,
/// tables and runs. Deduplication against already-asserted statements is the
/// store's job, not the resolver's.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityResolver;

impl EntityResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a source identifier key, e.g. an `id` column value.
    pub fn resolve(&self, schema: &Schema, class: &str, raw_key: &str) -> Result<NodeId, EngineError> {
        let key = normalize_key(raw_key);
        if key.is_empty() {
            return Err(EngineError::EmptyKey {
                class: class.to_string(),
                raw: raw_key.to_string(),
            });
        }
        Ok(schema.instance_node(class, &key))
    }

    /// Resolve a name-derived key, e.g. a genre label. Labels are slugified
    /// so `"Action"` and `" action "` land on the same entity.
    pub fn resolve_label(&self, schema: &Schema, class: &str, raw_label: &str) -> Result<NodeId, EngineError> {
        let key = slugify(raw_label);
        if key.is_empty() {
            return Err(EngineError::EmptyKey {
                class: class.to_string(),
                raw: raw_label.to_string(),
            });
        }
        Ok(schema.instance_node(class, &key))
    }
}

/// Trim and make the key safe as a compact-id local name. Case is kept;
/// identifier keys like `"7"` or `"A-13"` pass through.
pub fn normalize_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Case-folded alphanumeric slug with single `_` separators
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_separator = false;
    for c in raw.trim().chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_separator = true;
        }
    }
    slug
}
