//! Referential repair: stub synthesis for dangling references

use kumo_core::{vocab, Literal, NodeId, Triple};
use kumo_schema::Schema;
use kumo_store::GraphStore;
use tracing::debug;

use crate::report::LoadWarning;

/// Closes referential gaps left by edges whose object entity was never
/// independently declared.
#[derive(Debug, Clone, Copy)]
pub struct RepairPass<'a> {
    schema: &'a Schema,
}

impl<'a> RepairPass<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Guarantee the node carries a class-membership statement.
    ///
    /// When it does not, a stub is synthesized: class membership plus the
    /// identifying business-key property, nothing else. The check against
    /// the store makes repair happen at most once per reference; returns the
    /// gap warning when a stub was actually created.
    pub fn ensure_declared(
        &self,
        store: &mut GraphStore,
        class: &str,
        node: &NodeId,
        raw_key: &str,
    ) -> Option<LoadWarning> {
        if store.has_type(node) {
            return None;
        }

        store.insert(Triple::edge(
            node.clone(),
            vocab::RDF_TYPE,
            self.schema.class_node(class),
        ));

        // schema validation guarantees every range class has a key property
        if let Some(key_prop) = self.schema.key_property_of(class) {
            let key = raw_key.trim();
            let literal = key_prop
                .value_type
                .parse(key)
                .unwrap_or_else(|_| Literal::str(key));
            store.insert(Triple::literal(
                node.clone(),
                self.schema.property_node(&key_prop.name),
                literal,
            ));
        }

        debug!(class, key = raw_key, node = node.as_str(), "synthesized stub entity");
        Some(LoadWarning::ReferentialGap {
            class: class.to_string(),
            key: raw_key.trim().to_string(),
        })
    }
}
