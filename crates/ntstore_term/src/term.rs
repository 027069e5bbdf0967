use std::fmt::{self, Display};

use crate::error::{Result, TermError};
use crate::lexical;
use crate::uri::is_valid_uri;

/// The position a term occupies in a triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Subject,
    Predicate,
    Object,
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Subject => f.write_str("subject"),
            Position::Predicate => f.write_str("predicate"),
            Position::Object => f.write_str("object"),
        }
    }
}

/// What sets a literal apart from a plain string. A literal carries either a
/// datatype or a language tag, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LiteralKind {
    Plain,
    Typed(String),
    Language(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    value: String,
    kind: LiteralKind,
}

impl Literal {
    pub fn new(value: impl Into<String>, kind: LiteralKind) -> Literal {
        Literal {
            value: value.into(),
            kind,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> &LiteralKind {
        &self.kind
    }

    pub fn datatype(&self) -> Option<&str> {
        match &self.kind {
            LiteralKind::Typed(datatype) => Some(datatype),
            _ => None,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match &self.kind {
            LiteralKind::Language(language) => Some(language),
            _ => None,
        }
    }
}

/// An RDF term.
///
/// Blank nodes can be represented so that they are recognised and refused
/// with a precise error; the store never holds one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Uri(String),
    Literal(Literal),
    BlankNode(String),
}

impl Term {
    pub fn uri(uri: impl Into<String>) -> Term {
        Term::Uri(uri.into())
    }

    pub fn literal(value: impl Into<String>) -> Term {
        Term::Literal(Literal::new(value, LiteralKind::Plain))
    }

    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Term {
        Term::Literal(Literal::new(value, LiteralKind::Typed(datatype.into())))
    }

    pub fn lang_literal(value: impl Into<String>, language: impl Into<String>) -> Term {
        Term::Literal(Literal::new(value, LiteralKind::Language(language.into())))
    }

    pub fn blank_node(label: impl Into<String>) -> Term {
        Term::BlankNode(label.into())
    }

    /// Parse a subject: `<iri>`. Blank nodes are refused.
    pub fn parse_subject(input: &str) -> Result<Term> {
        lexical::subject(input).and_then(reject_blank)
    }

    /// Parse a predicate: `<iri>`.
    pub fn parse_predicate(input: &str) -> Result<Term> {
        lexical::predicate(input)
    }

    /// Parse an object: a literal in any of its three forms or `<iri>`.
    /// Blank nodes are refused.
    pub fn parse_object(input: &str) -> Result<Term> {
        lexical::object(input).and_then(reject_blank)
    }

    pub fn as_uri(&self) -> Option<&str> {
        match self {
            Term::Uri(uri) => Some(uri),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    pub fn is_blank_node(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    /// Check that the term may be stored at `position`.
    pub fn check(&self, position: Position) -> Result<()> {
        match (self, position) {
            (Term::BlankNode(label), _) => Err(TermError::unsupported(format!(
                "no support for blank nodes (_:{label})"
            ))),
            (Term::Uri(uri), _) if !is_valid_uri(uri) => Err(TermError::invalid(format!(
                "{position} is not a valid URI: {uri}"
            ))),
            (Term::Uri(_), _) => Ok(()),
            (Term::Literal(literal), Position::Object) => match literal.kind() {
                LiteralKind::Typed(datatype) if !is_valid_uri(datatype) => Err(
                    TermError::invalid(format!("literal datatype is not a valid URI: {datatype}")),
                ),
                LiteralKind::Language(tag) if !lexical::is_language_tag(tag) => Err(
                    TermError::invalid(format!("literal language tag is malformed: {tag:?}")),
                ),
                _ => Ok(()),
            },
            (Term::Literal(_), _) => Err(TermError::invalid(format!(
                "a literal cannot be used as {position}"
            ))),
        }
    }
}

fn reject_blank(term: Term) -> Result<Term> {
    term.check(Position::Object)?;
    Ok(term)
}

/// Writes the N-Triples lexical form.
impl Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Uri(uri) => write!(f, "<{}>", lexical::escape_iri(uri)),
            Term::BlankNode(label) => write!(f, "_:{label}"),
            Term::Literal(literal) => {
                write!(f, "\"{}\"", lexical::escape_literal(literal.value()))?;
                match literal.kind() {
                    LiteralKind::Plain => Ok(()),
                    LiteralKind::Typed(datatype) => {
                        write!(f, "^^<{}>", lexical::escape_iri(datatype))
                    }
                    LiteralKind::Language(language) => write!(f, "@{language}"),
                }
            }
        }
    }
}

/// A pattern component: a bound term or a wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatternTerm {
    Bound(Term),
    Any,
}

impl PatternTerm {
    /// Like [`Term::parse_subject`], with an empty input meaning [`PatternTerm::Any`].
    pub fn parse_subject(input: &str) -> Result<PatternTerm> {
        Self::parse_with(input, Term::parse_subject)
    }

    /// Like [`Term::parse_predicate`], with an empty input meaning [`PatternTerm::Any`].
    pub fn parse_predicate(input: &str) -> Result<PatternTerm> {
        Self::parse_with(input, Term::parse_predicate)
    }

    /// Like [`Term::parse_object`], with an empty input meaning [`PatternTerm::Any`].
    pub fn parse_object(input: &str) -> Result<PatternTerm> {
        Self::parse_with(input, Term::parse_object)
    }

    fn parse_with(input: &str, parse: fn(&str) -> Result<Term>) -> Result<PatternTerm> {
        if input.trim().is_empty() {
            return Ok(PatternTerm::Any);
        }
        parse(input).map(PatternTerm::Bound)
    }

    pub fn matches(&self, term: &Term) -> bool {
        match self {
            PatternTerm::Any => true,
            PatternTerm::Bound(bound) => bound == term,
        }
    }

    pub fn as_term(&self) -> Option<&Term> {
        match self {
            PatternTerm::Bound(term) => Some(term),
            PatternTerm::Any => None,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, PatternTerm::Any)
    }
}

impl From<Term> for PatternTerm {
    fn from(term: Term) -> Self {
        PatternTerm::Bound(term)
    }
}

impl From<Option<Term>> for PatternTerm {
    fn from(term: Option<Term>) -> Self {
        term.map_or(PatternTerm::Any, PatternTerm::Bound)
    }
}
