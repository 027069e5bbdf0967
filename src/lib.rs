//! A file-backed RDF triple store.
//!
//! Each named graph lives in its own N-Triples file under a base directory.
//! A metadata document (`.store` by default) records which graph URI maps to
//! which file and which graph is the default. Graphs are read on first use,
//! kept in memory, and written back on [`Store::flush`] or [`Store::close`].
//!
//! ```no_run
//! use ntstore::{AddOptions, MatchOptions, Statement, Store, StoreConfig};
//!
//! # fn main() -> Result<(), ntstore::StoreError> {
//! let mut store = Store::open(&StoreConfig::new("/var/lib/graphs"));
//! store.initialize()?;
//! store.add_graph("https://example.org/people", "people.nt")?;
//! store.set_default_graph("https://example.org/people")?;
//!
//! let alice = Statement::parse(
//!     "<https://example.org/alice>",
//!     "<http://xmlns.com/foaf/0.1/name>",
//!     "\"Alice\"@en",
//! )?;
//! store.add_statements(&[alice], None, AddOptions::default())?;
//!
//! let names = Statement::parse("", "<http://xmlns.com/foaf/0.1/name>", "")?;
//! for found in store.match_statements(&[names], None, MatchOptions::default())? {
//!     println!("{found}");
//! }
//! store.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! A store instance is meant for one thread; nothing guards against a second
//! process writing the same base directory.

mod cache;
mod config;
mod error;
mod fs;
mod graph;
mod metadata;
mod ntriples;
mod statement;
mod store;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use fs::{Filesystem, LocalFs};
pub use graph::{Graph, Triple, TriplePattern};
pub use metadata::{StoreMapping, decode as decode_metadata, encode as encode_metadata};
pub use ntriples::{NTriples, TripleCodec};
pub use statement::Statement;
pub use store::{AddOptions, MatchOptions, Store};
pub use term::{Literal, LiteralKind, PatternTerm, Position, Term, TermError, is_valid_uri};
