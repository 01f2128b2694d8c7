//! JSON-LD writer: @context from the prefix bindings, @graph of subject nodes

use itertools::Itertools;
use kumo_core::{vocab, Literal, NodeId, PrefixMap, Term, ValueType};
use kumo_store::GraphStore;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::SerializeError;

/// JSON-LD document with context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonLdDocument {
    #[serde(rename = "@context")]
    pub context: Value,
    #[serde(rename = "@graph")]
    pub graph: Vec<Value>,
}

pub fn to_document(store: &GraphStore, prefixes: &PrefixMap) -> JsonLdDocument {
    let mut context = Map::new();
    for (prefix, iri) in prefixes.iter() {
        context.insert(prefix.to_string(), Value::String(iri.to_string()));
    }

    let rdf_type = NodeId::new(vocab::RDF_TYPE);
    let subjects = store
        .iter()
        .map(|t| &t.subject)
        .unique()
        .sorted()
        .collect::<Vec<_>>();

    let mut graph = Vec::with_capacity(subjects.len());
    for subject in subjects {
        let mut node = Map::new();
        node.insert("@id".to_string(), Value::String(subject.to_string()));

        let types = store
            .objects_of(subject, &rdf_type)
            .into_iter()
            .filter_map(|term| term.as_node())
            .map(|n| Value::String(n.to_string()))
            .sorted_by(|a, b| a.as_str().cmp(&b.as_str()))
            .collect::<Vec<_>>();
        if !types.is_empty() {
            node.insert("@type".to_string(), collapse(types));
        }

        let statements = store.find(Some(subject), None, None);
        let predicates = statements
            .iter()
            .map(|t| &t.predicate)
            .filter(|p| **p != rdf_type)
            .unique()
            .sorted()
            .collect::<Vec<_>>();
        for predicate in predicates {
            let values = statements
                .iter()
                .filter(|t| &t.predicate == predicate)
                .map(|t| render_term(&t.object))
                .collect::<Vec<_>>();
            node.insert(predicate.to_string(), collapse(values));
        }

        graph.push(Value::Object(node));
    }

    JsonLdDocument {
        context: Value::Object(context),
        graph,
    }
}

pub fn to_string(store: &GraphStore, prefixes: &PrefixMap) -> Result<String, SerializeError> {
    let document = to_document(store, prefixes);
    Ok(serde_json::to_string_pretty(&document)?)
}

fn render_term(term: &Term) -> Value {
    match term {
        Term::Node(node) => json!({ "@id": node.to_string() }),
        Term::Literal(literal) => render_literal(literal),
    }
}

fn render_literal(literal: &Literal) -> Value {
    if literal.datatype == ValueType::Str {
        Value::String(literal.lexical.clone())
    } else {
        json!({
            "@value": literal.lexical,
            "@type": literal.datatype.datatype(),
        })
    }
}

/// Single values stay scalars; repeated values become arrays
fn collapse(mut values: Vec<Value>) -> Value {
    match values.len() {
        1 => values.remove(0),
        _ => Value::Array(values),
    }
}
