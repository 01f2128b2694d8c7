//! Schema declarations: classes, properties, table mappings, column decoders

use kumo_core::ValueType;
use serde::{Deserialize, Serialize};

/// Ontology class with an optional single parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
    pub name: String,
    pub parent: Option<String>,
}

impl ClassDef {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            parent: None,
        }
    }

    pub fn with_parent<S: Into<String>, P: Into<String>>(name: S, parent: P) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent.into()),
        }
    }
}

/// Data property: literal-valued, owned by a domain class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPropertyDef {
    pub name: String,
    pub domain: String,
    pub value_type: ValueType,
    pub functional: bool,
    pub inverse_functional: bool,
}

impl DataPropertyDef {
    pub fn new<S: Into<String>, D: Into<String>>(name: S, domain: D, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            value_type,
            functional: false,
            inverse_functional: false,
        }
    }

    /// At most one value per subject
    pub fn functional(mut self) -> Self {
        self.functional = true;
        self
    }

    /// The value identifies its subject; marks the class business key
    pub fn inverse_functional(mut self) -> Self {
        self.inverse_functional = true;
        self
    }
}

/// Object property: an edge between a domain class and a range class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectPropertyDef {
    pub name: String,
    pub domain: String,
    pub range: String,
    pub inverse_of: Option<String>,
}

impl ObjectPropertyDef {
    pub fn new<S, D, R>(name: S, domain: D, range: R) -> Self
    where
        S: Into<String>,
        D: Into<String>,
        R: Into<String>,
    {
        Self {
            name: name.into(),
            domain: domain.into(),
            range: range.into(),
            inverse_of: None,
        }
    }

    pub fn inverse_of<S: Into<String>>(mut self, inverse: S) -> Self {
        self.inverse_of = Some(inverse.into());
        self
    }
}

/// Closed set of column decoders, bound per column at registration time.
///
/// Every source column is decoded by exactly one of these; there is no
/// per-value format sniffing during the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnDecoder {
    /// Raw string scalar; a data property stores it verbatim, an object
    /// property treats it as a foreign-key reference
    Scalar,
    /// Scalar parsed into a typed literal
    Typed(ValueType),
    /// Delimiter-joined token list, one range entity per surviving token
    DelimitedList {
        delimiter: char,
        sentinels: Vec<String>,
    },
    /// List of child records (inline JSON array or JSON-encoded string),
    /// one range entity per record
    NestedRecords {
        /// Record field carrying the child business key
        key_field: String,
        /// (record field, data property) pairs copied onto the child
        data_fields: Vec<(String, String)>,
    },
}

impl ColumnDecoder {
    pub fn delimited(delimiter: char, sentinels: &[&str]) -> Self {
        ColumnDecoder::DelimitedList {
            delimiter,
            sentinels: sentinels.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn nested(key_field: &str, data_fields: &[(&str, &str)]) -> Self {
        ColumnDecoder::NestedRecords {
            key_field: key_field.to_string(),
            data_fields: data_fields
                .iter()
                .map(|(f, p)| (f.to_string(), p.to_string()))
                .collect(),
        }
    }
}

/// Binds one source column to a property through a decoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnBinding {
    pub column: String,
    pub property: String,
    pub decoder: ColumnDecoder,
}

impl ColumnBinding {
    pub fn new<C: Into<String>, P: Into<String>>(column: C, property: P, decoder: ColumnDecoder) -> Self {
        Self {
            column: column.into(),
            property: property.into(),
            decoder,
        }
    }
}

/// Maps one named tabular source onto a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMapping {
    pub table: String,
    pub class: String,
    /// Column carrying the business key of every row
    pub key_column: String,
    /// Key is a human label (slugified) rather than a source identifier
    pub key_is_label: bool,
    pub columns: Vec<ColumnBinding>,
}

impl TableMapping {
    pub fn new<T: Into<String>, C: Into<String>, K: Into<String>>(
        table: T,
        class: C,
        key_column: K,
    ) -> Self {
        Self {
            table: table.into(),
            class: class.into(),
            key_column: key_column.into(),
            key_is_label: false,
            columns: Vec::new(),
        }
    }

    pub fn label_key(mut self) -> Self {
        self.key_is_label = true;
        self
    }

    pub fn column(mut self, binding: ColumnBinding) -> Self {
        self.columns.push(binding);
        self
    }

    pub fn binding_for(&self, column: &str) -> Option<&ColumnBinding> {
        self.columns.iter().find(|b| b.column == column)
    }
}
