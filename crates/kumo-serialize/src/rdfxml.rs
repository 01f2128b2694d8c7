//! RDF/XML writer: one rdf:Description element per subject

use itertools::Itertools;
use kumo_core::{PrefixMap, Term, ValueType};
use kumo_store::GraphStore;

use crate::SerializeError;

pub fn to_string(store: &GraphStore, prefixes: &PrefixMap) -> Result<String, SerializeError> {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<rdf:RDF");
    for (prefix, iri) in prefixes.iter() {
        out.push_str(&format!("\n    xmlns:{}=\"{}\"", prefix, escape_attribute(iri)));
    }
    out.push_str(">\n");

    let subjects = store
        .iter()
        .map(|t| &t.subject)
        .unique()
        .sorted()
        .collect::<Vec<_>>();

    for subject in subjects {
        let about = prefixes.expand(subject.as_str())?;
        out.push_str(&format!(
            "  <rdf:Description rdf:about=\"{}\">\n",
            escape_attribute(&about)
        ));
        let statements = store
            .find(Some(subject), None, None)
            .into_iter()
            .sorted_by(|a, b| a.predicate.cmp(&b.predicate))
            .collect::<Vec<_>>();
        for statement in statements {
            let element = statement.predicate.as_str();
            match &statement.object {
                Term::Node(node) => {
                    let resource = prefixes.expand(node.as_str())?;
                    out.push_str(&format!(
                        "    <{} rdf:resource=\"{}\"/>\n",
                        element,
                        escape_attribute(&resource)
                    ));
                }
                Term::Literal(literal) if literal.datatype == ValueType::Str => {
                    out.push_str(&format!(
                        "    <{}>{}</{}>\n",
                        element,
                        escape_text(&literal.lexical),
                        element
                    ));
                }
                Term::Literal(literal) => {
                    let datatype = prefixes.expand(literal.datatype.datatype())?;
                    out.push_str(&format!(
                        "    <{} rdf:datatype=\"{}\">{}</{}>\n",
                        element,
                        escape_attribute(&datatype),
                        escape_text(&literal.lexical),
                        element
                    ));
                }
            }
        }
        out.push_str("  </rdf:Description>\n");
    }

    out.push_str("</rdf:RDF>\n");
    Ok(out)
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
