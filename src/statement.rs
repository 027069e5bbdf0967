use term::{PatternTerm, Position, Term};

use crate::error::{Result, StoreError, check_uri};
use crate::graph::{Triple, TriplePattern};

/// A triple or pattern, optionally naming the graph it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Statement {
    pub subject: PatternTerm,
    pub predicate: PatternTerm,
    pub object: PatternTerm,
    pub graph: Option<String>,
}

impl Statement {
    pub fn new(
        subject: impl Into<PatternTerm>,
        predicate: impl Into<PatternTerm>,
        object: impl Into<PatternTerm>,
    ) -> Statement {
        Statement {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            graph: None,
        }
    }

    /// Parse lexical forms; an empty component is a wildcard.
    pub fn parse(subject: &str, predicate: &str, object: &str) -> Result<Statement> {
        Ok(Statement::new(
            PatternTerm::parse_subject(subject)?,
            PatternTerm::parse_predicate(predicate)?,
            PatternTerm::parse_object(object)?,
        ))
    }

    pub fn in_graph(mut self, graph: impl Into<String>) -> Statement {
        self.graph = Some(graph.into());
        self
    }

    pub(crate) fn from_triple(triple: Triple, graph: &str) -> Statement {
        Statement::new(triple.subject, triple.predicate, triple.object).in_graph(graph)
    }

    /// No wildcards and no blank nodes.
    pub fn is_concrete(&self) -> bool {
        [&self.subject, &self.predicate, &self.object]
            .into_iter()
            .all(|part| part.as_term().is_some_and(|term| !term.is_blank_node()))
    }

    /// The graph URI named by the statement itself, checked.
    pub(crate) fn graph_uri(&self) -> Result<Option<&str>> {
        self.graph.as_deref().map(check_uri).transpose()
    }

    /// The storable triple, for statements that must be concrete.
    pub(crate) fn to_triple(&self) -> Result<Triple> {
        let pattern = self.pattern()?;
        let triple = pattern.as_triple().ok_or_else(|| {
            StoreError::InvalidPattern(format!("statement contains a wildcard: {self}"))
        })?;
        triple.subject.check(Position::Subject)?;
        triple.predicate.check(Position::Predicate)?;
        triple.object.check(Position::Object)?;
        Ok(triple)
    }

    /// The pattern to match against a graph. Blank nodes are refused here
    /// too; a bound blank node could never match a stored triple.
    pub(crate) fn pattern(&self) -> Result<TriplePattern> {
        for part in [&self.subject, &self.predicate, &self.object] {
            if let Some(Term::BlankNode(label)) = part.as_term() {
                return Err(StoreError::UnsupportedFeature(format!(
                    "no support for blank nodes (_:{label})"
                )));
            }
        }
        Ok(TriplePattern {
            subject: self.subject.clone(),
            predicate: self.predicate.clone(),
            object: self.object.clone(),
        })
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for part in [&self.subject, &self.predicate, &self.object] {
            match part {
                PatternTerm::Bound(term) => write!(f, "{term} ")?,
                PatternTerm::Any => f.write_str("* ")?,
            }
        }
        match &self.graph {
            Some(graph) => write!(f, "<{graph}> ."),
            None => f.write_str("."),
        }
    }
}
