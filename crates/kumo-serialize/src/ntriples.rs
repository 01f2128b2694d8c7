//! N-Triples writer and reader: one absolute-IRI statement per line.
//!
//! The reader exists for round-trip verification of the writer's own
//! dialect; it is not a general-purpose RDF parser.

use kumo_core::{Literal, NodeId, PrefixMap, Term, Triple, ValueType};
use kumo_store::GraphStore;

use crate::{escape_literal, SerializeError};

pub fn to_string(store: &GraphStore, prefixes: &PrefixMap) -> Result<String, SerializeError> {
    let mut lines = Vec::with_capacity(store.len());
    for triple in store.iter() {
        let subject = prefixes.expand(triple.subject.as_str())?;
        let predicate = prefixes.expand(triple.predicate.as_str())?;
        let object = match &triple.object {
            Term::Node(node) => format!("<{}>", prefixes.expand(node.as_str())?),
            Term::Literal(literal) => render_literal(literal, prefixes)?,
        };
        lines.push(format!("<{}> <{}> {} .", subject, predicate, object));
    }
    lines.sort();
    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    Ok(out)
}

fn render_literal(literal: &Literal, prefixes: &PrefixMap) -> Result<String, SerializeError> {
    let quoted = format!("\"{}\"", escape_literal(&literal.lexical));
    if literal.datatype == ValueType::Str {
        Ok(quoted)
    } else {
        let datatype = prefixes.expand(literal.datatype.datatype())?;
        Ok(format!("{}^^<{}>", quoted, datatype))
    }
}

/// Parse the writer's dialect back into statements. IRIs are compacted
/// through the same prefix map so the result is directly comparable with
/// the store that produced it.
pub fn parse(input: &str, prefixes: &PrefixMap) -> Result<Vec<Triple>, SerializeError> {
    let mut triples = Vec::new();
    for (index, raw_line) in input.lines().enumerate() {
        let line = index + 1;
        let mut rest = raw_line.trim();
        if rest.is_empty() || rest.starts_with('#') {
            continue;
        }

        let subject = take_iri(&mut rest, line)?;
        let predicate = take_iri(&mut rest, line)?;
        let object = take_term(&mut rest, line, prefixes)?;

        rest = rest.trim_start();
        if rest != "." {
            return Err(syntax(line, "expected terminating '.'"));
        }

        triples.push(Triple {
            subject: compact(&subject, prefixes),
            predicate: compact(&predicate, prefixes),
            object,
        });
    }
    Ok(triples)
}

fn compact(iri: &str, prefixes: &PrefixMap) -> NodeId {
    NodeId::new(prefixes.compact(iri).unwrap_or_else(|| iri.to_string()))
}

fn syntax(line: usize, reason: &str) -> SerializeError {
    SerializeError::Syntax {
        line,
        reason: reason.to_string(),
    }
}

fn take_iri(rest: &mut &str, line: usize) -> Result<String, SerializeError> {
    *rest = rest.trim_start();
    let inner = rest
        .strip_prefix('<')
        .ok_or_else(|| syntax(line, "expected '<'"))?;
    let end = inner
        .find('>')
        .ok_or_else(|| syntax(line, "unterminated IRI"))?;
    let iri = inner[..end].to_string();
    *rest = &inner[end + 1..];
    Ok(iri)
}

fn take_term(
    rest: &mut &str,
    line: usize,
    prefixes: &PrefixMap,
) -> Result<Term, SerializeError> {
    *rest = rest.trim_start();
    if rest.starts_with('<') {
        let iri = take_iri(rest, line)?;
        return Ok(Term::Node(compact(&iri, prefixes)));
    }

    let lexical = take_quoted(rest, line)?;
    if let Some(after) = rest.strip_prefix("^^") {
        *rest = after;
        let datatype_iri = take_iri(rest, line)?;
        let datatype = datatype_for(&datatype_iri, prefixes)
            .ok_or_else(|| syntax(line, "unsupported literal datatype"))?;
        Ok(Term::Literal(Literal { lexical, datatype }))
    } else {
        Ok(Term::Literal(Literal {
            lexical,
            datatype: ValueType::Str,
        }))
    }
}

fn take_quoted(rest: &mut &str, line: usize) -> Result<String, SerializeError> {
    let inner = rest
        .strip_prefix('"')
        .ok_or_else(|| syntax(line, "expected a node or literal object"))?;
    let mut lexical = String::new();
    let mut chars = inner.char_indices();
    while let Some((offset, c)) = chars.next() {
        match c {
            '"' => {
                *rest = &inner[offset + 1..];
                return Ok(lexical);
            }
            '\\' => match chars.next() {
                Some((_, '"')) => lexical.push('"'),
                Some((_, '\\')) => lexical.push('\\'),
                Some((_, 'n')) => lexical.push('\n'),
                Some((_, 'r')) => lexical.push('\r'),
                Some((_, 't')) => lexical.push('\t'),
                _ => return Err(syntax(line, "unsupported escape sequence")),
            },
            other => lexical.push(other),
        }
    }
    Err(syntax(line, "unterminated literal"))
}

fn datatype_for(iri: &str, prefixes: &PrefixMap) -> Option<ValueType> {
    match prefixes.compact(iri)?.as_str() {
        "xsd:string" => Some(ValueType::Str),
        "xsd:integer" => Some(ValueType::Int),
        "xsd:double" => Some(ValueType::Float),
        "xsd:boolean" => Some(ValueType::Bool),
        "xsd:date" => Some(ValueType::Date),
        _ => None,
    }
}
