use std::collections::BTreeSet;
use std::fmt::{self, Display};

use term::{PatternTerm, Term};

/// A concrete triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Triple {
        Triple {
            subject,
            predicate,
            object,
        }
    }
}

/// One N-Triples line, without the line break.
impl Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// A triple where any component may be a wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: PatternTerm,
    pub predicate: PatternTerm,
    pub object: PatternTerm,
}

impl TriplePattern {
    pub fn matches(&self, triple: &Triple) -> bool {
        self.subject.matches(&triple.subject)
            && self.predicate.matches(&triple.predicate)
            && self.object.matches(&triple.object)
    }

    /// The triple this pattern denotes, if no component is a wildcard.
    pub fn as_triple(&self) -> Option<Triple> {
        Some(Triple::new(
            self.subject.as_term()?.clone(),
            self.predicate.as_term()?.clone(),
            self.object.as_term()?.clone(),
        ))
    }
}

/// The triples of one named graph, with set semantics.
///
/// Triples are kept ordered so serialized files are stable across flushes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    triples: BTreeSet<Triple>,
}

impl Graph {
    pub fn new() -> Graph {
        Graph::default()
    }

    /// Returns `false` if the triple was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    pub fn remove(&mut self, triple: &Triple) -> bool {
        self.triples.remove(triple)
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    pub fn matching<'a>(&'a self, pattern: &'a TriplePattern) -> impl Iterator<Item = &'a Triple> {
        self.triples.iter().filter(move |triple| pattern.matches(triple))
    }

    /// Remove every triple matching `pattern`, returning how many went.
    pub fn remove_matching(&mut self, pattern: &TriplePattern) -> usize {
        if let Some(triple) = pattern.as_triple() {
            return usize::from(self.remove(&triple));
        }
        let before = self.triples.len();
        self.triples.retain(|triple| !pattern.matches(triple));
        before - self.triples.len()
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Graph {
            triples: iter.into_iter().collect(),
        }
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.triples.extend(iter)
    }
}

#[cfg(test)]
mod tests {
    use term::{PatternTerm, Term};

    use super::{Graph, Triple, TriplePattern};

    fn triple(s: &str, p: &str, o: Term) -> Triple {
        Triple::new(
            Term::uri(format!("http://example.org/{s}")),
            Term::uri(format!("http://example.org/{p}")),
            o,
        )
    }

    #[test]
    fn set_semantics() {
        let mut graph = Graph::new();
        assert!(graph.insert(triple("s", "p", Term::literal("o"))));
        assert!(!graph.insert(triple("s", "p", Term::literal("o"))));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn remove_matching_wildcards() {
        let mut graph: Graph = [
            triple("a", "name", Term::literal("A")),
            triple("b", "name", Term::literal("B")),
            triple("a", "age", Term::literal("3")),
        ]
        .into_iter()
        .collect();
        let pattern = TriplePattern {
            subject: PatternTerm::Any,
            predicate: Term::uri("http://example.org/name").into(),
            object: PatternTerm::Any,
        };
        assert_eq!(graph.matching(&pattern).count(), 2);
        assert_eq!(graph.remove_matching(&pattern), 2);
        assert_eq!(graph.len(), 1);
        assert!(graph.contains(&triple("a", "age", Term::literal("3"))));
    }

    #[test]
    fn remove_matching_concrete() {
        let mut graph: Graph = [triple("a", "p", Term::literal("x"))].into_iter().collect();
        let pattern = TriplePattern {
            subject: Term::uri("http://example.org/a").into(),
            predicate: Term::uri("http://example.org/p").into(),
            object: Term::literal("y").into(),
        };
        assert_eq!(graph.remove_matching(&pattern), 0);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn display_is_an_ntriples_line() {
        assert_eq!(
            triple("s", "p", Term::lang_literal("hé", "fr")).to_string(),
            "<http://example.org/s> <http://example.org/p> \"hé\"@fr ."
        );
    }
}
