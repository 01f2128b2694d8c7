//! Statement store with set semantics and indexed pattern lookup

use kumo_core::{vocab, NodeId, Term, Triple};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// In-memory statement accumulator.
///
/// Set, not multiset: `insert` is idempotent and reports whether the
/// statement was new, which is the insert-if-absent primitive the
/// materializer's check-before-write paths rely on. Iteration follows
/// insertion order, though serializers treat ordering as unspecified.
#[derive(Debug, Default)]
pub struct GraphStore {
    triples: Vec<Triple>,
    positions: HashMap<Triple, usize>,
    subject_index: HashMap<NodeId, Vec<usize>>,
    predicate_index: HashMap<NodeId, Vec<usize>>,
    object_index: HashMap<Term, Vec<usize>>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a statement. Returns `false` when it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.positions.contains_key(&triple) {
            return false;
        }
        let index = self.triples.len();
        self.positions.insert(triple.clone(), index);
        self.subject_index
            .entry(triple.subject.clone())
            .or_default()
            .push(index);
        self.predicate_index
            .entry(triple.predicate.clone())
            .or_default()
            .push(index);
        self.object_index
            .entry(triple.object.clone())
            .or_default()
            .push(index);
        self.triples.push(triple);
        true
    }

    pub fn contains(&self, subject: &NodeId, predicate: &NodeId, object: &Term) -> bool {
        self.positions.contains_key(&Triple {
            subject: subject.clone(),
            predicate: predicate.clone(),
            object: object.clone(),
        })
    }

    /// Remove a statement. Only the functional-property overwrite path uses
    /// this; indexes are rebuilt afterwards.
    pub fn remove(&mut self, triple: &Triple) -> bool {
        match self.positions.remove(triple) {
            Some(index) => {
                self.triples.remove(index);
                self.rebuild_indices();
                true
            }
            None => false,
        }
    }

    /// Find statements matching a pattern, most selective index first
    pub fn find(
        &self,
        subject: Option<&NodeId>,
        predicate: Option<&NodeId>,
        object: Option<&Term>,
    ) -> Vec<&Triple> {
        let candidates: Vec<&Triple> = if let Some(subj) = subject {
            self.gather(self.subject_index.get(subj))
        } else if let Some(pred) = predicate {
            self.gather(self.predicate_index.get(pred))
        } else if let Some(obj) = object {
            self.gather(self.object_index.get(obj))
        } else {
            self.triples.iter().collect()
        };

        candidates
            .into_iter()
            .filter(|t| {
                subject.map_or(true, |s| &t.subject == s)
                    && predicate.map_or(true, |p| &t.predicate == p)
                    && object.map_or(true, |o| &t.object == o)
            })
            .collect()
    }

    /// Whether the subject has at least one class-membership statement.
    /// The repair pass keys its check-before-write on this.
    pub fn has_type(&self, subject: &NodeId) -> bool {
        let rdf_type = NodeId::new(vocab::RDF_TYPE);
        self.subject_index
            .get(subject)
            .is_some_and(|indices| indices.iter().any(|&i| self.triples[i].predicate == rdf_type))
    }

    /// Asserted objects for (subject, predicate)
    pub fn objects_of(&self, subject: &NodeId, predicate: &NodeId) -> Vec<&Term> {
        self.subject_index
            .get(subject)
            .map(|indices| {
                indices
                    .iter()
                    .filter(|&&i| &self.triples[i].predicate == predicate)
                    .map(|&i| &self.triples[i].object)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn statistics(&self) -> StoreStatistics {
        StoreStatistics {
            total_triples: self.triples.len(),
            subject_count: self.subject_index.len(),
        }
    }

    fn gather(&self, indices: Option<&Vec<usize>>) -> Vec<&Triple> {
        indices
            .map(|indices| indices.iter().map(|&i| &self.triples[i]).collect())
            .unwrap_or_default()
    }

    fn rebuild_indices(&mut self) {
        self.positions.clear();
        self.subject_index.clear();
        self.predicate_index.clear();
        self.object_index.clear();
        for (index, triple) in self.triples.iter().enumerate() {
            self.positions.insert(triple.clone(), index);
            self.subject_index
                .entry(triple.subject.clone())
                .or_default()
                .push(index);
            self.predicate_index
                .entry(triple.predicate.clone())
                .or_default()
                .push(index);
            self.object_index
                .entry(triple.object.clone())
                .or_default()
                .push(index);
        }
    }
}

/// Store statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStatistics {
    pub total_triples: usize,
    pub subject_count: usize,
}
