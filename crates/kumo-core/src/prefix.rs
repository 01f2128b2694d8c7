//! Namespace prefix bindings shared between schema and serializers

use std::collections::HashMap;

use crate::vocab;
use crate::CoreError;

/// Ordered prefix -> base IRI bindings.
///
/// Registration order is preserved so serializer output lists prefixes the
/// way the schema declared them.
#[derive(Debug, Clone, Default)]
pub struct PrefixMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl PrefixMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix map pre-seeded with the rdf / rdfs / owl / xsd bindings
    pub fn with_core() -> Self {
        let mut map = Self::new();
        map.insert("rdf", vocab::RDF_NS);
        map.insert("rdfs", vocab::RDFS_NS);
        map.insert("owl", vocab::OWL_NS);
        map.insert("xsd", vocab::XSD_NS);
        map
    }

    /// Bind a prefix. Re-binding an existing prefix replaces its base IRI.
    pub fn insert(&mut self, prefix: &str, iri: &str) {
        if let Some(&pos) = self.index.get(prefix) {
            self.entries[pos].1 = iri.to_string();
        } else {
            self.index
                .insert(prefix.to_string(), self.entries.len());
            self.entries.push((prefix.to_string(), iri.to_string()));
        }
    }

    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.index
            .get(prefix)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    /// Expand `prefix:local` into a full IRI
    pub fn expand(&self, curie: &str) -> Result<String, CoreError> {
        let (prefix, local) = curie
            .split_once(':')
            .ok_or_else(|| CoreError::UnknownPrefix(curie.to_string()))?;
        let base = self
            .get(prefix)
            .ok_or_else(|| CoreError::UnknownPrefix(curie.to_string()))?;
        Ok(format!("{}{}", base, local))
    }

    /// Compact a full IRI back to `prefix:local` when a binding matches.
    ///
    /// The longest matching base wins so nested namespaces compact correctly.
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.entries
            .iter()
            .filter(|(_, base)| iri.starts_with(base.as_str()))
            .max_by_key(|(_, base)| base.len())
            .map(|(prefix, base)| format!("{}:{}", prefix, &iri[base.len()..]))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, i)| (p.as_str(), i.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
