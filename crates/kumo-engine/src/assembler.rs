//! Fact assembly: one source row into class membership, literals and edges

use kumo_core::{vocab, Literal, NodeId, Triple};
use kumo_schema::{ColumnBinding, ColumnDecoder, DataPropertyDef, ObjectPropertyDef, Schema, TableMapping};
use kumo_store::GraphStore;
use serde_json::Value;
use tracing::warn;

use crate::materializer::MaterializeOptions;
use crate::repair::RepairPass;
use crate::report::LoadWarning;
use crate::resolver::EntityResolver;

/// Per-row outcome. Statement counts are derived from store deltas by the
/// materializer; the assembler reports degradation only.
#[derive(Debug, Default)]
pub struct RowOutcome {
    pub warnings: Vec<LoadWarning>,
    /// Row contributed nothing (not an object, or no usable business key)
    pub skipped: bool,
}

impl RowOutcome {
    fn warn_source(&mut self, table: &str, row: &str, column: &str, reason: String) {
        warn!(table, row, column, %reason, "skipping attribute");
        self.warnings.push(LoadWarning::SourceRow {
            table: table.to_string(),
            row: row.to_string(),
            column: column.to_string(),
            reason,
        });
    }
}

/// Turns one source record into the minimal set of statements asserting
/// class membership, data-property values and edges to related entities.
///
/// Malformed values degrade per attribute: the offending column is skipped
/// with a warning and the rest of the row survives.
#[derive(Debug, Clone, Copy)]
pub struct FactAssembler<'a> {
    schema: &'a Schema,
    options: MaterializeOptions,
    resolver: EntityResolver,
}

impl<'a> FactAssembler<'a> {
    pub fn new(schema: &'a Schema, options: MaterializeOptions) -> Self {
        Self {
            schema,
            options,
            resolver: EntityResolver::new(),
        }
    }

    pub fn process(
        &self,
        store: &mut GraphStore,
        mapping: &TableMapping,
        row_index: usize,
        row: &Value,
    ) -> RowOutcome {
        let mut out = RowOutcome::default();
        let fallback_id = format!("#{}", row_index);

        let Some(fields) = row.as_object() else {
            out.warn_source(&mapping.table, &fallback_id, "", "row is not an object".to_string());
            out.skipped = true;
            return out;
        };

        let raw_key = fields.get(&mapping.key_column).and_then(scalar_text);
        let Some(raw_key) = raw_key.filter(|k| !k.trim().is_empty()) else {
            out.warn_source(
                &mapping.table,
                &fallback_id,
                &mapping.key_column,
                "missing business key".to_string(),
            );
            out.skipped = true;
            return out;
        };
        let row_id = raw_key.trim().to_string();

        let resolved = if mapping.key_is_label {
            self.resolver.resolve_label(self.schema, &mapping.class, &raw_key)
        } else {
            self.resolver.resolve(self.schema, &mapping.class, &raw_key)
        };
        let entity = match resolved {
            Ok(node) => node,
            Err(err) => {
                out.warn_source(&mapping.table, &fallback_id, &mapping.key_column, err.to_string());
                out.skipped = true;
                return out;
            }
        };

        store.insert(Triple::edge(
            entity.clone(),
            vocab::RDF_TYPE,
            self.schema.class_node(&mapping.class),
        ));

        for binding in &mapping.columns {
            let Some(value) = fields.get(&binding.column) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            if let Some(prop) = self.schema.data_property(&binding.property) {
                self.assert_data(store, &mapping.table, &row_id, &entity, prop, binding, value, &mut out);
            } else if let Some(prop) = self.schema.object_property(&binding.property) {
                self.assert_edges(store, &mapping.table, &row_id, &entity, prop, binding, value, &mut out);
            }
        }

        out
    }

    #[allow(clippy::too_many_arguments)]
    fn assert_data(
        &self,
        store: &mut GraphStore,
        table: &str,
        row_id: &str,
        entity: &NodeId,
        prop: &DataPropertyDef,
        binding: &ColumnBinding,
        value: &Value,
        out: &mut RowOutcome,
    ) {
        let Some(text) = scalar_text(value) else {
            out.warn_source(table, row_id, &binding.column, "expected a scalar value".to_string());
            return;
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        let literal = match &binding.decoder {
            ColumnDecoder::Scalar => Literal::str(trimmed),
            ColumnDecoder::Typed(value_type) => match value_type.parse(trimmed) {
                Ok(literal) => literal,
                Err(err) => {
                    out.warn_source(table, row_id, &binding.column, err.to_string());
                    return;
                }
            },
            _ => return, // list decoders never pass schema validation here
        };
        self.assert_literal(store, entity, prop, literal, out);
    }

    /// Functional-aware literal assertion: a conflicting earlier value is
    /// replaced (last write wins) and the conflict reported.
    fn assert_literal(
        &self,
        store: &mut GraphStore,
        entity: &NodeId,
        prop: &DataPropertyDef,
        literal: Literal,
        out: &mut RowOutcome,
    ) {
        let prop_node = self.schema.property_node(&prop.name);
        if prop.functional {
            let existing: Vec<Literal> = store
                .objects_of(entity, &prop_node)
                .into_iter()
                .filter_map(|term| term.as_literal().cloned())
                .filter(|old| old != &literal)
                .collect();
            for old in existing {
                store.remove(&Triple::literal(entity.clone(), prop_node.clone(), old.clone()));
                warn!(
                    subject = entity.as_str(),
                    property = prop.name.as_str(),
                    previous = old.lexical.as_str(),
                    replacement = literal.lexical.as_str(),
                    "functional property rewritten"
                );
                out.warnings.push(LoadWarning::FunctionalConflict {
                    subject: entity.to_string(),
                    property: prop.name.clone(),
                    previous: old.lexical,
                    replacement: literal.lexical.clone(),
                });
            }
        }
        store.insert(Triple::literal(entity.clone(), prop_node, literal));
    }

    #[allow(clippy::too_many_arguments)]
    fn assert_edges(
        &self,
        store: &mut GraphStore,
        table: &str,
        row_id: &str,
        entity: &NodeId,
        prop: &ObjectPropertyDef,
        binding: &ColumnBinding,
        value: &Value,
        out: &mut RowOutcome,
    ) {
        let repair = RepairPass::new(self.schema);
        match &binding.decoder {
            ColumnDecoder::Scalar => {
                let Some(text) = scalar_text(value) else {
                    out.warn_source(table, row_id, &binding.column, "expected a scalar key".to_string());
                    return;
                };
                let raw = text.trim();
                if raw.is_empty() {
                    return;
                }
                match self.resolver.resolve(self.schema, &prop.range, raw) {
                    Ok(object) => {
                        self.link(store, &repair, entity, prop, &object, raw, out);
                    }
                    Err(err) => {
                        out.warn_source(table, row_id, &binding.column, err.to_string());
                    }
                }
            }
            ColumnDecoder::DelimitedList { delimiter, sentinels } => {
                let Some(text) = scalar_text(value) else {
                    out.warn_source(table, row_id, &binding.column, "expected a delimited string".to_string());
                    return;
                };
                for token in text.split(*delimiter) {
                    let token = token.trim();
                    if token.is_empty()
                        || sentinels.iter().any(|s| s.eq_ignore_ascii_case(token))
                    {
                        continue;
                    }
                    match self.resolver.resolve_label(self.schema, &prop.range, token) {
                        Ok(object) => {
                            self.link(store, &repair, entity, prop, &object, token, out);
                        }
                        Err(err) => {
                            out.warn_source(table, row_id, &binding.column, err.to_string());
                        }
                    }
                }
            }
            ColumnDecoder::NestedRecords { key_field, data_fields } => {
                let records = match decode_records(value) {
                    Ok(records) => records,
                    Err(reason) => {
                        out.warn_source(table, row_id, &binding.column, reason);
                        return;
                    }
                };
                for record in &records {
                    self.assert_nested(
                        store, &repair, table, row_id, entity, prop, binding, key_field,
                        data_fields, record, out,
                    );
                }
            }
            ColumnDecoder::Typed(_) => {} // never passes schema validation
        }
    }

    /// One child record: a fully declared range entity plus an edge to it.
    /// A malformed child skips itself, not its siblings.
    #[allow(clippy::too_many_arguments)]
    fn assert_nested(
        &self,
        store: &mut GraphStore,
        repair: &RepairPass<'_>,
        table: &str,
        row_id: &str,
        entity: &NodeId,
        prop: &ObjectPropertyDef,
        binding: &ColumnBinding,
        key_field: &str,
        data_fields: &[(String, String)],
        record: &Value,
        out: &mut RowOutcome,
    ) {
        let Some(fields) = record.as_object() else {
            out.warn_source(table, row_id, &binding.column, "nested record is not an object".to_string());
            return;
        };
        let raw_key = fields.get(key_field).and_then(scalar_text);
        let Some(raw_key) = raw_key.filter(|k| !k.trim().is_empty()) else {
            out.warn_source(
                table,
                row_id,
                &binding.column,
                format!("nested record missing key field {:?}", key_field),
            );
            return;
        };
        let child = match self.resolver.resolve(self.schema, &prop.range, &raw_key) {
            Ok(node) => node,
            Err(err) => {
                out.warn_source(table, row_id, &binding.column, err.to_string());
                return;
            }
        };

        store.insert(Triple::edge(
            child.clone(),
            vocab::RDF_TYPE,
            self.schema.class_node(&prop.range),
        ));
        if let Some(key_prop) = self.schema.key_property_of(&prop.range) {
            let key = raw_key.trim();
            let literal = key_prop
                .value_type
                .parse(key)
                .unwrap_or_else(|_| Literal::str(key));
            store.insert(Triple::literal(
                child.clone(),
                self.schema.property_node(&key_prop.name),
                literal,
            ));
        }

        for (field, property) in data_fields {
            let Some(value) = fields.get(field) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            let Some(child_prop) = self.schema.data_property(property) else {
                continue;
            };
            let Some(text) = scalar_text(value) else {
                out.warn_source(table, row_id, &binding.column, format!("field {:?} is not a scalar", field));
                continue;
            };
            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }
            match child_prop.value_type.parse(trimmed) {
                Ok(literal) => self.assert_literal(store, &child, child_prop, literal, out),
                Err(err) => {
                    out.warn_source(table, row_id, &binding.column, err.to_string());
                }
            }
        }

        self.link(store, repair, entity, prop, &child, raw_key.trim(), out);
    }

    /// Emit the edge (plus its declared inverse when enabled) and run the
    /// repair pass over the object end.
    fn link(
        &self,
        store: &mut GraphStore,
        repair: &RepairPass<'_>,
        subject: &NodeId,
        prop: &ObjectPropertyDef,
        object: &NodeId,
        raw_key: &str,
        out: &mut RowOutcome,
    ) {
        store.insert(Triple::edge(
            subject.clone(),
            self.schema.property_node(&prop.name),
            object.clone(),
        ));
        if self.options.materialize_inverses {
            if let Some(inverse) = &prop.inverse_of {
                store.insert(Triple::edge(
                    object.clone(),
                    self.schema.property_node(inverse),
                    subject.clone(),
                ));
            }
        }
        if let Some(warning) = repair.ensure_declared(store, &prop.range, object, raw_key) {
            out.warnings.push(warning);
        }
    }
}

/// Raw scalar cell as text; arrays/objects are not scalars
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Nested-record column: inline JSON array, or a JSON-encoded string
fn decode_records(value: &Value) -> Result<Vec<Value>, String> {
    match value {
        Value::Array(records) => Ok(records.clone()),
        Value::String(encoded) => {
            let parsed: Value = serde_json::from_str(encoded)
                .map_err(|e| format!("malformed nested record list: {}", e))?;
            match parsed {
                Value::Array(records) => Ok(records),
                _ => Err("nested record column is not a list".to_string()),
            }
        }
        _ => Err("nested record column is not a list".to_string()),
    }
}
