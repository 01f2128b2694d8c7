//! Turtle writer: prefix directives and subject-grouped statement blocks

use itertools::Itertools;
use kumo_core::{Literal, PrefixMap, Term, ValueType};
use kumo_store::GraphStore;

use crate::{escape_literal, SerializeError};

pub fn to_string(store: &GraphStore, prefixes: &PrefixMap) -> Result<String, SerializeError> {
    let mut out = String::new();
    for (prefix, iri) in prefixes.iter() {
        out.push_str(&format!("@prefix {}: <{}> .\n", prefix, iri));
    }

    let subjects = store
        .iter()
        .map(|t| &t.subject)
        .unique()
        .sorted()
        .collect::<Vec<_>>();

    for subject in subjects {
        out.push('\n');
        let statements = store.find(Some(subject), None, None);
        let predicates = statements
            .iter()
            .map(|t| &t.predicate)
            .unique()
            .sorted()
            .collect::<Vec<_>>();

        out.push_str(subject.as_str());
        for (index, predicate) in predicates.iter().enumerate() {
            let objects = statements
                .iter()
                .filter(|t| &&t.predicate == predicate)
                .map(|t| render_term(&t.object))
                .sorted()
                .join(", ");
            let separator = if index == 0 { " " } else { " ;\n    " };
            out.push_str(&format!("{}{} {}", separator, predicate, objects));
        }
        out.push_str(" .\n");
    }

    Ok(out)
}

fn render_term(term: &Term) -> String {
    match term {
        Term::Node(node) => node.to_string(),
        Term::Literal(literal) => render_literal(literal),
    }
}

fn render_literal(literal: &Literal) -> String {
    let quoted = format!("\"{}\"", escape_literal(&literal.lexical));
    if literal.datatype == ValueType::Str {
        quoted
    } else {
        format!("{}^^{}", quoted, literal.datatype.datatype())
    }
}
