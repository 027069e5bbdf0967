//! N-Triples term grammar
//!
//! Parses and writes the lexical forms of subjects, predicates and objects
//! (`<iri>`, `"value"`, `"value"@lang`, `"value"^^<datatype>`, `_:label`),
//! and validates absolute URIs. No I/O happens here.

mod error;
mod lexical;
mod term;
mod uri;

pub use error::{Result, TermError};
pub use term::{Literal, LiteralKind, PatternTerm, Position, Term};
pub use uri::is_valid_uri;
