//! The store engine
//!
//! Lifecycle: uninitialized, initialized, closed. Every operation except
//! [`Store::initialize`] requires an initialized store; closing is final.
//!
//! The graph a statement applies to is, in order of precedence: the graph
//! named by the statement, the graph passed to the call, the store's
//! default graph.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::cache::GraphCache;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError, check_uri};
use crate::fs::{Filesystem, LocalFs};
use crate::metadata::{self, StoreMapping};
use crate::ntriples::{NTriples, TripleCodec};
use crate::statement::Statement;

#[derive(Debug, Clone, Copy, Default)]
pub struct AddOptions {
    /// Save every graph touched by the call before returning.
    pub flush: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MatchOptions {
    /// Stop after this many distinct results.
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Uninitialized,
    Initialized,
    Closed,
}

pub struct Store<F = LocalFs, C = NTriples> {
    fs: F,
    cache: GraphCache<C>,
    metadata_file: PathBuf,
    default_graph: Option<String>,
    lifecycle: Lifecycle,
}

impl Store {
    /// A store over the local disk, reading N-Triples files.
    pub fn open(config: &StoreConfig) -> Store {
        Store::with_collaborators(
            LocalFs::new(&config.base_dir),
            NTriples,
            &config.metadata_file,
        )
    }
}

impl<F: Filesystem, C: TripleCodec> Store<F, C> {
    pub fn with_collaborators(fs: F, codec: C, metadata_file: impl Into<PathBuf>) -> Store<F, C> {
        Store {
            fs,
            cache: GraphCache::new(codec),
            metadata_file: metadata_file.into(),
            default_graph: None,
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.lifecycle == Lifecycle::Initialized
    }

    /// Load the metadata document, or write an empty one if the base
    /// directory has never held a store. Calling this again is a no-op.
    pub fn initialize(&mut self) -> Result<()> {
        match self.lifecycle {
            Lifecycle::Initialized => return Ok(()),
            Lifecycle::Closed => return Err(closed()),
            Lifecycle::Uninitialized => {}
        }

        info!(target: "store", base_dir = %self.fs.base().display(), "using base dir");
        self.fs.check_base()?;
        if self.fs.exists(&self.metadata_file)? {
            let document = self.fs.read_to_string(&self.metadata_file)?;
            let mapping = metadata::decode(&document)?;
            info!(target: "store", graphs = mapping.entries.len(), "metadata loaded");
            self.apply_mapping(mapping);
        } else {
            info!(target: "store", "no metadata found, initializing base dir for the first time");
            self.apply_mapping(StoreMapping::default());
            self.save_mapping()?;
        }

        self.lifecycle = Lifecycle::Initialized;
        info!(target: "store", "initialized");
        Ok(())
    }

    pub fn set_default_graph(&mut self, uri: &str) -> Result<()> {
        self.ensure_initialized()?;
        self.default_graph = Some(check_uri(uri)?.to_owned());
        Ok(())
    }

    pub fn default_graph(&self) -> Result<Option<&str>> {
        self.ensure_initialized()?;
        Ok(self.default_graph.as_deref())
    }

    /// Register `uri` as backed by `path`, relative to the base directory.
    /// Re-registering a URI drops whatever was cached for it.
    pub fn add_graph(&mut self, uri: &str, path: &str) -> Result<()> {
        self.ensure_initialized()?;
        if path.trim().is_empty() {
            return Err(StoreError::Validation(format!("path for {uri} is empty")));
        }
        self.fs.check_path(Path::new(path))?;
        self.cache.register(uri, path)
    }

    /// Returns whether the graph was registered.
    pub fn remove_graph(&mut self, uri: &str) -> Result<bool> {
        self.ensure_initialized()?;
        self.cache.unregister(uri)
    }

    pub fn contains_graph(&self, uri: &str) -> Result<bool> {
        self.ensure_initialized()?;
        Ok(self.cache.contains(check_uri(uri)?))
    }

    /// Registered graph URIs, sorted.
    pub fn available_graphs(&self) -> Result<Vec<String>> {
        self.ensure_initialized()?;
        Ok(self.cache.graph_uris().map(str::to_owned).collect())
    }

    /// Whether the graph's file has been read into memory yet.
    pub fn is_graph_loaded(&self, uri: &str) -> Result<bool> {
        self.ensure_initialized()?;
        Ok(self.cache.is_loaded(check_uri(uri)?))
    }

    /// Forget every registered graph and its cached content.
    pub fn clear_graphs(&mut self) -> Result<()> {
        self.ensure_initialized()?;
        self.cache.clear();
        Ok(())
    }

    /// The current default graph and registrations.
    pub fn mapping(&self) -> Result<StoreMapping> {
        self.ensure_initialized()?;
        Ok(self.snapshot())
    }

    /// Insert concrete statements in order. Not atomic: when a statement
    /// fails, the ones before it stay applied.
    pub fn add_statements(
        &mut self,
        statements: &[Statement],
        graph: Option<&str>,
        options: AddOptions,
    ) -> Result<()> {
        self.ensure_initialized()?;
        if statements.is_empty() {
            return Err(StoreError::Validation("no statements given".into()));
        }
        let graph = graph.map(check_uri).transpose()?;

        let mut touched = BTreeSet::new();
        for statement in statements {
            let uri = self.resolve_graph(statement, graph)?;
            let triple = statement.to_triple()?;
            let inserted = self.cache.update(&self.fs, &uri, |target| {
                let inserted = target.insert(triple);
                (inserted, inserted)
            })?;
            if !inserted {
                debug!(target: "store", graph = %uri, "statement already present");
            }
            touched.insert(uri);
        }
        debug!(target: "store", count = statements.len(), graphs = touched.len(), "statements added");

        if options.flush {
            for uri in &touched {
                self.cache.save(&self.fs, uri)?;
            }
        }
        Ok(())
    }

    /// Remove the triples each statement matches. A concrete statement
    /// removes at most itself; absent triples are ignored. Not atomic.
    pub fn delete_statements(&mut self, statements: &[Statement], graph: Option<&str>) -> Result<()> {
        self.ensure_initialized()?;
        let graph = graph.map(check_uri).transpose()?;

        for statement in statements {
            let uri = self.resolve_graph(statement, graph)?;
            let pattern = statement.pattern()?;
            let removed = self.cache.update(&self.fs, &uri, |target| {
                let removed = target.remove_matching(&pattern);
                (removed, removed > 0)
            })?;
            debug!(target: "store", graph = %uri, removed, "statements deleted");
        }
        Ok(())
    }

    /// Every stored statement matched by any of `statements`, each tagged
    /// with the graph it was found in.
    pub fn match_statements(
        &mut self,
        statements: &[Statement],
        graph: Option<&str>,
        options: MatchOptions,
    ) -> Result<BTreeSet<Statement>> {
        self.ensure_initialized()?;
        let graph = graph.map(check_uri).transpose()?;

        let mut results = BTreeSet::new();
        'patterns: for statement in statements {
            let uri = self.resolve_graph(statement, graph)?;
            let pattern = statement.pattern()?;
            let source = self.cache.get(&self.fs, &uri)?;
            for triple in source.matching(&pattern) {
                if options.limit.is_some_and(|limit| results.len() >= limit) {
                    break 'patterns;
                }
                results.insert(Statement::from_triple(triple.clone(), &uri));
            }
        }
        Ok(results)
    }

    /// Whether [`Store::match_statements`] would find anything. Stops at the
    /// first match.
    pub fn has_match(&mut self, statements: &[Statement], graph: Option<&str>) -> Result<bool> {
        self.ensure_initialized()?;
        let graph = graph.map(check_uri).transpose()?;

        for statement in statements {
            let uri = self.resolve_graph(statement, graph)?;
            let pattern = statement.pattern()?;
            if self.cache.get(&self.fs, &uri)?.matching(&pattern).next().is_some() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Save every modified graph and the metadata document.
    pub fn flush(&mut self) -> Result<()> {
        self.ensure_initialized()?;
        let uris: Vec<String> = self.cache.graph_uris().map(str::to_owned).collect();
        for uri in &uris {
            self.cache.save(&self.fs, uri)?;
        }
        self.save_mapping()
    }

    /// Flush, then release every cached graph. Any later call fails, except
    /// `close` itself.
    pub fn close(&mut self) -> Result<()> {
        if self.lifecycle == Lifecycle::Closed {
            return Ok(());
        }
        self.flush()?;
        self.cache.clear();
        self.lifecycle = Lifecycle::Closed;
        info!(target: "store", "closed");
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<()> {
        match self.lifecycle {
            Lifecycle::Initialized => Ok(()),
            Lifecycle::Uninitialized => Err(StoreError::State("store is not initialized".into())),
            Lifecycle::Closed => Err(closed()),
        }
    }

    fn resolve_graph(&self, statement: &Statement, graph: Option<&str>) -> Result<String> {
        let uri = match (statement.graph_uri()?, graph, self.default_graph.as_deref()) {
            (Some(uri), _, _) | (None, Some(uri), _) | (None, None, Some(uri)) => uri,
            (None, None, None) => return Err(StoreError::NoGraphResolved),
        };
        Ok(uri.to_owned())
    }

    fn apply_mapping(&mut self, mapping: StoreMapping) {
        self.default_graph = mapping.default_graph;
        self.cache.replace(mapping.entries);
    }

    fn snapshot(&self) -> StoreMapping {
        StoreMapping {
            default_graph: self.default_graph.clone(),
            entries: self.cache.entries(),
        }
    }

    fn save_mapping(&self) -> Result<()> {
        let document = metadata::encode(&self.snapshot())?;
        self.fs.write(&self.metadata_file, &document)?;
        debug!(target: "store", path = %self.metadata_file.display(), "metadata saved");
        Ok(())
    }
}

fn closed() -> StoreError {
    StoreError::State("store is closed".into())
}
