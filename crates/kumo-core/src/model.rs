//! Graph data model: nodes, typed literals, statements

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Graph node identifier in compact `prefix:LocalName` form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into (prefix, local name). Returns `None` for non-compact ids.
    pub fn split(&self) -> Option<(&str, &str)> {
        self.0.split_once(':')
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::new(s)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId::new(s)
    }
}

/// Value types a data property may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Str,
    Int,
    Float,
    Bool,
    Date,
}

impl ValueType {
    /// XSD datatype for this value type, in compact form
    pub fn datatype(&self) -> &'static str {
        match self {
            ValueType::Str => "xsd:string",
            ValueType::Int => "xsd:integer",
            ValueType::Float => "xsd:double",
            ValueType::Bool => "xsd:boolean",
            ValueType::Date => "xsd:date",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Str => "string",
            ValueType::Int => "integer",
            ValueType::Float => "float",
            ValueType::Bool => "boolean",
            ValueType::Date => "date",
        }
    }

    /// Parse a raw scalar into a canonical literal of this type.
    ///
    /// Input is trimmed first; the canonical lexical form is what gets
    /// stored and serialized, so `" 07 "` and `"7"` yield the same literal.
    pub fn parse(&self, raw: &str) -> Result<Literal, CoreError> {
        let raw = raw.trim();
        let invalid = || CoreError::InvalidLiteral {
            value: raw.to_string(),
            expected: self.name(),
        };
        let lexical = match self {
            ValueType::Str => raw.to_string(),
            ValueType::Int => raw.parse::<i64>().map_err(|_| invalid())?.to_string(),
            ValueType::Float => {
                let f = raw.parse::<f64>().map_err(|_| invalid())?;
                if !f.is_finite() {
                    return Err(invalid());
                }
                f.to_string()
            }
            ValueType::Bool => match raw {
                "true" | "1" => "true".to_string(),
                "false" | "0" => "false".to_string(),
                _ => return Err(invalid()),
            },
            ValueType::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| invalid())?
                .format("%Y-%m-%d")
                .to_string(),
        };
        Ok(Literal {
            lexical,
            datatype: *self,
        })
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Typed literal value, kept as canonical lexical form plus datatype.
///
/// Lexical storage keeps the type `Eq + Hash` so statements can live in a
/// set; floats are canonicalized through `f64` display on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    pub datatype: ValueType,
}

impl Literal {
    pub fn str<S: Into<String>>(s: S) -> Self {
        Self {
            lexical: s.into(),
            datatype: ValueType::Str,
        }
    }

    pub fn int(v: i64) -> Self {
        Self {
            lexical: v.to_string(),
            datatype: ValueType::Int,
        }
    }

    pub fn float(v: f64) -> Self {
        Self {
            lexical: v.to_string(),
            datatype: ValueType::Float,
        }
    }

    pub fn bool(v: bool) -> Self {
        Self {
            lexical: v.to_string(),
            datatype: ValueType::Bool,
        }
    }

    pub fn date(v: NaiveDate) -> Self {
        Self {
            lexical: v.format("%Y-%m-%d").to_string(),
            datatype: ValueType::Date,
        }
    }

    pub fn is_string(&self) -> bool {
        self.datatype == ValueType::Str
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_string() {
            write!(f, "{:?}", self.lexical)
        } else {
            write!(f, "{:?}^^{}", self.lexical, self.datatype.datatype())
        }
    }
}

/// Statement object position: another node or a literal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Term {
    Node(NodeId),
    Literal(Literal),
}

impl Term {
    pub fn as_node(&self) -> Option<&NodeId> {
        match self {
            Term::Node(n) => Some(n),
            Term::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Node(_) => None,
            Term::Literal(l) => Some(l),
        }
    }
}

impl From<NodeId> for Term {
    fn from(n: NodeId) -> Self {
        Term::Node(n)
    }
}

impl From<Literal> for Term {
    fn from(l: Literal) -> Self {
        Term::Literal(l)
    }
}

/// One (subject, predicate, object) statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: NodeId,
    pub predicate: NodeId,
    pub object: Term,
}

impl Triple {
    pub fn new<S, P, O>(subject: S, predicate: P, object: O) -> Self
    where
        S: Into<NodeId>,
        P: Into<NodeId>,
        O: Into<Term>,
    {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Statement with a node object
    pub fn edge<S, P, O>(subject: S, predicate: P, object: O) -> Self
    where
        S: Into<NodeId>,
        P: Into<NodeId>,
        O: Into<NodeId>,
    {
        Self::new(subject, predicate, Term::Node(object.into()))
    }

    /// Statement with a literal object
    pub fn literal<S, P>(subject: S, predicate: P, value: Literal) -> Self
    where
        S: Into<NodeId>,
        P: Into<NodeId>,
    {
        Self::new(subject, predicate, Term::Literal(value))
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.object {
            Term::Node(n) => write!(f, "{} {} {}", self.subject, self.predicate, n),
            Term::Literal(l) => write!(f, "{} {} {}", self.subject, self.predicate, l),
        }
    }
}
