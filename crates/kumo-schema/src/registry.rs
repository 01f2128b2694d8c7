//! Schema registry: builder-time registration, frozen lookup, declaration triples

use std::collections::HashMap;

use kumo_core::{vocab, NodeId, PrefixMap, Triple};

use crate::model::{ClassDef, ColumnBinding, ColumnDecoder, DataPropertyDef, ObjectPropertyDef, TableMapping};
use crate::SchemaError;

/// Mutable registration phase. All declarations go in before `build()`
/// cross-checks them and freezes the schema.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    vocab_prefix: String,
    data_prefix: String,
    prefixes: PrefixMap,
    classes: Vec<ClassDef>,
    data_properties: Vec<DataPropertyDef>,
    object_properties: Vec<ObjectPropertyDef>,
    tables: Vec<TableMapping>,
}

impl SchemaBuilder {
    /// New builder with the ontology vocabulary namespace and the instance
    /// data namespace bound on top of the core rdf/rdfs/owl/xsd prefixes.
    pub fn new(vocab_prefix: &str, vocab_iri: &str, data_prefix: &str, data_iri: &str) -> Self {
        let mut prefixes = PrefixMap::with_core();
        prefixes.insert(vocab_prefix, vocab_iri);
        prefixes.insert(data_prefix, data_iri);
        Self {
            vocab_prefix: vocab_prefix.to_string(),
            data_prefix: data_prefix.to_string(),
            prefixes,
            classes: Vec::new(),
            data_properties: Vec::new(),
            object_properties: Vec::new(),
            tables: Vec::new(),
        }
    }

    pub fn prefix(mut self, prefix: &str, iri: &str) -> Self {
        self.prefixes.insert(prefix, iri);
        self
    }

    pub fn class(mut self, def: ClassDef) -> Self {
        self.classes.push(def);
        self
    }

    pub fn data_property(mut self, def: DataPropertyDef) -> Self {
        self.data_properties.push(def);
        self
    }

    pub fn object_property(mut self, def: ObjectPropertyDef) -> Self {
        self.object_properties.push(def);
        self
    }

    pub fn table(mut self, mapping: TableMapping) -> Self {
        self.tables.push(mapping);
        self
    }

    /// Validate all cross-references and freeze.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut classes = HashMap::new();
        for def in &self.classes {
            if classes.insert(def.name.clone(), def.clone()).is_some() {
                return Err(SchemaError::Duplicate(format!("class {}", def.name)));
            }
        }
        for def in &self.classes {
            if let Some(parent) = &def.parent {
                if !classes.contains_key(parent) {
                    return Err(SchemaError::UnknownClass {
                        class: parent.clone(),
                        referrer: format!("class {}", def.name),
                    });
                }
            }
        }

        let mut data_properties = HashMap::new();
        for def in &self.data_properties {
            if data_properties.insert(def.name.clone(), def.clone()).is_some() {
                return Err(SchemaError::Duplicate(format!("property {}", def.name)));
            }
            if !classes.contains_key(&def.domain) {
                return Err(SchemaError::UnknownClass {
                    class: def.domain.clone(),
                    referrer: format!("property {}", def.name),
                });
            }
        }

        let mut object_properties = HashMap::new();
        for def in &self.object_properties {
            if data_properties.contains_key(&def.name)
                || object_properties.insert(def.name.clone(), def.clone()).is_some()
            {
                return Err(SchemaError::Duplicate(format!("property {}", def.name)));
            }
            for (role, class) in [("domain", &def.domain), ("range", &def.range)] {
                if !classes.contains_key(class) {
                    return Err(SchemaError::UnknownClass {
                        class: class.clone(),
                        referrer: format!("{} of property {}", role, def.name),
                    });
                }
            }
        }

        // inverse-of pairs must both exist and point back at each other,
        // with mirrored domain/range
        for def in object_properties.values() {
            if let Some(inverse) = &def.inverse_of {
                let other = object_properties.get(inverse).ok_or_else(|| {
                    SchemaError::UnknownProperty {
                        property: inverse.clone(),
                        referrer: format!("inverse of {}", def.name),
                    }
                })?;
                let symmetric = other.inverse_of.as_deref() == Some(def.name.as_str())
                    && other.domain == def.range
                    && other.range == def.domain;
                if !symmetric {
                    return Err(SchemaError::AsymmetricInverse {
                        property: def.name.clone(),
                        inverse: inverse.clone(),
                    });
                }
            }
        }

        let schema = Schema {
            vocab_prefix: self.vocab_prefix,
            data_prefix: self.data_prefix,
            prefixes: self.prefixes,
            classes,
            data_properties,
            object_properties,
            tables: HashMap::new(),
        };

        let mut tables = HashMap::new();
        for mapping in &self.tables {
            if tables.contains_key(&mapping.table) {
                return Err(SchemaError::Duplicate(format!("table {}", mapping.table)));
            }
            schema.validate_mapping(mapping)?;
            tables.insert(mapping.table.clone(), mapping.clone());
        }

        Ok(Schema { tables, ..schema })
    }
}

/// Frozen schema: O(1) lookups, immutable after `SchemaBuilder::build`.
#[derive(Debug, Clone)]
pub struct Schema {
    vocab_prefix: String,
    data_prefix: String,
    prefixes: PrefixMap,
    classes: HashMap<String, ClassDef>,
    data_properties: HashMap<String, DataPropertyDef>,
    object_properties: HashMap<String, ObjectPropertyDef>,
    tables: HashMap<String, TableMapping>,
}

impl Schema {
    pub fn prefixes(&self) -> &PrefixMap {
        &self.prefixes
    }

    pub fn class(&self, name: &str) -> Option<&ClassDef> {
        self.classes.get(name)
    }

    pub fn data_property(&self, name: &str) -> Option<&DataPropertyDef> {
        self.data_properties.get(name)
    }

    pub fn object_property(&self, name: &str) -> Option<&ObjectPropertyDef> {
        self.object_properties.get(name)
    }

    pub fn mapping_for(&self, table: &str) -> Option<&TableMapping> {
        self.tables.get(table)
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableMapping> {
        self.tables.values()
    }

    /// Class name followed by its ancestors, root last
    pub fn ancestors<'a>(&'a self, class: &'a str) -> Vec<&'a str> {
        let mut chain = Vec::new();
        let mut current = Some(class);
        while let Some(name) = current {
            if chain.contains(&name) {
                break; // cycle guard; build() accepts only declared parents
            }
            chain.push(name);
            current = self.classes.get(name).and_then(|c| c.parent.as_deref());
        }
        chain
    }

    /// The identifying (inverse-functional) data property of a class,
    /// searching the class itself first and then its ancestors.
    pub fn key_property_of(&self, class: &str) -> Option<&DataPropertyDef> {
        self.ancestors(class).into_iter().find_map(|name| {
            self.data_properties
                .values()
                .find(|p| p.inverse_functional && p.domain == name)
        })
    }

    /// Data properties applicable to a class, own and inherited
    pub fn properties_of(&self, class: &str) -> Vec<&DataPropertyDef> {
        let chain = self.ancestors(class);
        let mut props: Vec<&DataPropertyDef> = self
            .data_properties
            .values()
            .filter(|p| chain.contains(&p.domain.as_str()))
            .collect();
        props.sort_by(|a, b| a.name.cmp(&b.name));
        props
    }

    /// Node for a declared class, e.g. `media:Movie`
    pub fn class_node(&self, name: &str) -> NodeId {
        NodeId::new(format!("{}:{}", self.vocab_prefix, name))
    }

    /// Node for a declared property, e.g. `media:directedBy`
    pub fn property_node(&self, name: &str) -> NodeId {
        NodeId::new(format!("{}:{}", self.vocab_prefix, name))
    }

    /// Instance node for a normalized business key, e.g. `mdb:Movie_3`
    pub fn instance_node(&self, class: &str, key: &str) -> NodeId {
        NodeId::new(format!("{}:{}_{}", self.data_prefix, class, key))
    }

    /// The schema's own declaration statements, emitted ahead of any data
    /// so consumers see the hierarchy the facts were asserted against.
    pub fn ontology_triples(&self) -> Vec<Triple> {
        let mut triples = Vec::new();

        let mut class_names: Vec<&String> = self.classes.keys().collect();
        class_names.sort();
        for name in class_names {
            let def = &self.classes[name];
            let node = self.class_node(name);
            triples.push(Triple::edge(node.clone(), vocab::RDF_TYPE, vocab::OWL_CLASS));
            if let Some(parent) = &def.parent {
                triples.push(Triple::edge(
                    node,
                    vocab::RDFS_SUBCLASS_OF,
                    self.class_node(parent),
                ));
            }
        }

        let mut data_names: Vec<&String> = self.data_properties.keys().collect();
        data_names.sort();
        for name in data_names {
            let def = &self.data_properties[name];
            let node = self.property_node(name);
            triples.push(Triple::edge(
                node.clone(),
                vocab::RDF_TYPE,
                vocab::OWL_DATATYPE_PROPERTY,
            ));
            triples.push(Triple::edge(
                node.clone(),
                vocab::RDFS_DOMAIN,
                self.class_node(&def.domain),
            ));
            triples.push(Triple::edge(
                node.clone(),
                vocab::RDFS_RANGE,
                def.value_type.datatype(),
            ));
            if def.functional {
                triples.push(Triple::edge(
                    node.clone(),
                    vocab::RDF_TYPE,
                    vocab::OWL_FUNCTIONAL_PROPERTY,
                ));
            }
            if def.inverse_functional {
                triples.push(Triple::edge(
                    node,
                    vocab::RDF_TYPE,
                    vocab::OWL_INVERSE_FUNCTIONAL_PROPERTY,
                ));
            }
        }

        let mut object_names: Vec<&String> = self.object_properties.keys().collect();
        object_names.sort();
        for name in object_names {
            let def = &self.object_properties[name];
            let node = self.property_node(name);
            triples.push(Triple::edge(
                node.clone(),
                vocab::RDF_TYPE,
                vocab::OWL_OBJECT_PROPERTY,
            ));
            triples.push(Triple::edge(
                node.clone(),
                vocab::RDFS_DOMAIN,
                self.class_node(&def.domain),
            ));
            triples.push(Triple::edge(
                node.clone(),
                vocab::RDFS_RANGE,
                self.class_node(&def.range),
            ));
            if let Some(inverse) = &def.inverse_of {
                triples.push(Triple::edge(
                    node,
                    vocab::OWL_INVERSE_OF,
                    self.property_node(inverse),
                ));
            }
        }

        triples
    }

    fn validate_mapping(&self, mapping: &TableMapping) -> Result<(), SchemaError> {
        if !self.classes.contains_key(&mapping.class) {
            return Err(SchemaError::UnknownClass {
                class: mapping.class.clone(),
                referrer: format!("table {}", mapping.table),
            });
        }

        let key_binding = mapping.binding_for(&mapping.key_column).ok_or_else(|| {
            SchemaError::InvalidBinding {
                table: mapping.table.clone(),
                column: mapping.key_column.clone(),
                reason: "key column has no binding".to_string(),
            }
        })?;
        if self.data_property(&key_binding.property).is_none() {
            return Err(SchemaError::InvalidBinding {
                table: mapping.table.clone(),
                column: mapping.key_column.clone(),
                reason: "key column must bind a data property".to_string(),
            });
        }

        for binding in &mapping.columns {
            self.validate_binding(mapping, binding)?;
        }
        Ok(())
    }

    fn validate_binding(
        &self,
        mapping: &TableMapping,
        binding: &ColumnBinding,
    ) -> Result<(), SchemaError> {
        let invalid = |reason: &str| SchemaError::InvalidBinding {
            table: mapping.table.clone(),
            column: binding.column.clone(),
            reason: reason.to_string(),
        };

        if let Some(prop) = self.data_property(&binding.property) {
            match binding.decoder {
                ColumnDecoder::Scalar | ColumnDecoder::Typed(_) => {}
                _ => return Err(invalid("list decoders require an object property")),
            }
            if !self.ancestors(&mapping.class).contains(&prop.domain.as_str()) {
                return Err(invalid("property domain does not cover the table class"));
            }
        } else if let Some(prop) = self.object_property(&binding.property) {
            if matches!(binding.decoder, ColumnDecoder::Typed(_)) {
                return Err(invalid("typed decoder requires a data property"));
            }
            if !self.ancestors(&mapping.class).contains(&prop.domain.as_str()) {
                return Err(invalid("property domain does not cover the table class"));
            }
            // stubs synthesized for this range need an identifying property
            if self.key_property_of(&prop.range).is_none() {
                return Err(invalid("range class declares no identifying property"));
            }
            if let ColumnDecoder::NestedRecords { data_fields, .. } = &binding.decoder {
                for (_, property) in data_fields {
                    let child = self.data_property(property).ok_or_else(|| {
                        invalid(&format!("unknown nested data property {}", property))
                    })?;
                    if !self.ancestors(&prop.range).contains(&child.domain.as_str()) {
                        return Err(invalid("nested property domain does not cover the range class"));
                    }
                }
            }
        } else {
            return Err(SchemaError::UnknownProperty {
                property: binding.property.clone(),
                referrer: format!("table {} column {}", mapping.table, binding.column),
            });
        }
        Ok(())
    }
}
