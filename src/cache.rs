//! Registered graphs and their lazily loaded contents

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::error::{Result, StoreError, check_uri};
use crate::fs::Filesystem;
use crate::graph::Graph;
use crate::ntriples::TripleCodec;

#[derive(Debug)]
struct GraphRecord {
    path: String,
    graph: Option<Graph>,
    modified: bool,
}

/// Owns, per graph URI, the backing file path and the graph once it has
/// been read. A graph stays cached until it is unregistered, re-registered
/// or the cache is cleared.
#[derive(Debug)]
pub(crate) struct GraphCache<C> {
    codec: C,
    records: BTreeMap<String, GraphRecord>,
}

impl<C: TripleCodec> GraphCache<C> {
    pub(crate) fn new(codec: C) -> GraphCache<C> {
        GraphCache {
            codec,
            records: BTreeMap::new(),
        }
    }

    /// Insert or overwrite the record for `uri`. Previously cached content
    /// is dropped even when it was never saved.
    pub(crate) fn register(&mut self, uri: &str, path: &str) -> Result<()> {
        check_uri(uri)?;
        let record = GraphRecord {
            path: path.to_owned(),
            graph: None,
            modified: false,
        };
        if let Some(stale) = self.records.insert(uri.to_owned(), record) {
            if stale.modified {
                warn!(target: "cache", graph = uri, path = %stale.path, "discarding unsaved changes");
            } else if stale.graph.is_some() {
                debug!(target: "cache", graph = uri, "evicted cached graph");
            }
        }
        Ok(())
    }

    /// Returns whether a record was removed.
    pub(crate) fn unregister(&mut self, uri: &str) -> Result<bool> {
        check_uri(uri)?;
        Ok(self.records.remove(uri).is_some())
    }

    pub(crate) fn contains(&self, uri: &str) -> bool {
        self.records.contains_key(uri)
    }

    pub(crate) fn graph_uris(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// The URI to path mapping, without loaded content.
    pub(crate) fn entries(&self) -> BTreeMap<String, String> {
        self.records
            .iter()
            .map(|(uri, record)| (uri.clone(), record.path.clone()))
            .collect()
    }

    /// Drop everything and register `entries` in one go. The entries must
    /// already be validated.
    pub(crate) fn replace(&mut self, entries: BTreeMap<String, String>) {
        self.records = entries
            .into_iter()
            .map(|(uri, path)| {
                let record = GraphRecord {
                    path,
                    graph: None,
                    modified: false,
                };
                (uri, record)
            })
            .collect();
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }

    pub(crate) fn is_loaded(&self, uri: &str) -> bool {
        self.records
            .get(uri)
            .is_some_and(|record| record.graph.is_some())
    }

    pub(crate) fn get<F: Filesystem>(&mut self, fs: &F, uri: &str) -> Result<&Graph> {
        let (graph, _) = self.load(fs, uri)?;
        Ok(&*graph)
    }

    /// Run `edit` against the graph. It returns whether the graph changed;
    /// only a change marks the graph as needing a save.
    pub(crate) fn update<F, T>(
        &mut self,
        fs: &F,
        uri: &str,
        edit: impl FnOnce(&mut Graph) -> (T, bool),
    ) -> Result<T>
    where
        F: Filesystem,
    {
        let (graph, modified) = self.load(fs, uri)?;
        let (out, changed) = edit(graph);
        *modified |= changed;
        Ok(out)
    }

    /// Write the graph back if it was loaded and modified. Returns whether
    /// anything was written.
    pub(crate) fn save<F: Filesystem>(&mut self, fs: &F, uri: &str) -> Result<bool> {
        let record = self
            .records
            .get_mut(uri)
            .ok_or_else(|| StoreError::NotFound(uri.to_owned()))?;
        let Some(graph) = record.graph.as_ref().filter(|_| record.modified) else {
            return Ok(false);
        };
        let text = self.codec.serialize(graph);
        fs.write(Path::new(&record.path), &text)?;
        info!(target: "cache", graph = uri, path = %record.path, triples = graph.len(), "saved graph");
        record.modified = false;
        Ok(true)
    }

    fn load<F: Filesystem>(&mut self, fs: &F, uri: &str) -> Result<(&mut Graph, &mut bool)> {
        let record = self
            .records
            .get_mut(uri)
            .ok_or_else(|| StoreError::NotFound(uri.to_owned()))?;
        let graph = match record.graph.take() {
            Some(graph) => graph,
            None => {
                let path = fs.base().join(&record.path);
                let loaded = fs
                    .read_to_string(Path::new(&record.path))
                    .and_then(|text| self.codec.parse(&text));
                match loaded {
                    Ok((graph, count)) => {
                        info!(target: "cache", graph = uri, path = %path.display(), triples = count, "graph loaded");
                        graph
                    }
                    Err(err) => {
                        error!(target: "cache", graph = uri, path = %path.display(), error = %err, "unable to load graph");
                        return Err(err);
                    }
                }
            }
        };
        Ok((record.graph.insert(graph), &mut record.modified))
    }
}
