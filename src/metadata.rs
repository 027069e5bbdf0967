//! The store's metadata document
//!
//! ```json
//! {
//!   "defaultGraph": "https://example.org/g1",
//!   "mapping": {
//!     "https://example.org/g1": "g1.nt"
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value as JsonValue;
use term::is_valid_uri;

use crate::error::{Result, StoreError};

const DEFAULT_GRAPH: &str = "defaultGraph";
const MAPPING: &str = "mapping";

/// Which graph URI lives in which file, and which graph is the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreMapping {
    pub default_graph: Option<String>,
    /// Graph URI to path relative to the base directory
    pub entries: BTreeMap<String, String>,
}

#[derive(Serialize)]
struct Document<'a> {
    #[serde(rename = "defaultGraph")]
    default_graph: Option<&'a str>,
    mapping: &'a BTreeMap<String, String>,
}

/// Encode as pretty JSON. `defaultGraph` is written as `null` when unset and
/// `mapping` is always an object.
pub fn encode(mapping: &StoreMapping) -> Result<String> {
    let document = Document {
        default_graph: mapping.default_graph.as_deref(),
        mapping: &mapping.entries,
    };
    serde_json::to_string_pretty(&document)
        .map_err(|e| StoreError::CorruptMetadata(format!("unable to encode metadata: {e}")))
}

/// Decode and fully validate a metadata document.
pub fn decode(document: &str) -> Result<StoreMapping> {
    let value: JsonValue = serde_json::from_str(document)
        .map_err(|e| corrupt(format!("can't decode metadata document: {e}")))?;
    let object = value
        .as_object()
        .ok_or_else(|| corrupt("metadata should be a JSON object"))?;

    let default_graph = match object.get(DEFAULT_GRAPH) {
        None => return Err(corrupt("key defaultGraph not found")),
        Some(JsonValue::Null) => None,
        Some(JsonValue::String(uri)) if is_valid_uri(uri) => Some(uri.to_owned()),
        Some(value) => {
            return Err(corrupt(format!("defaultGraph is not a valid URI: {value}")));
        }
    };

    let mapping = match object.get(MAPPING) {
        None => return Err(corrupt("key mapping not found")),
        Some(JsonValue::Object(mapping)) => mapping,
        Some(value) => return Err(corrupt(format!("mapping is not an object: {value}"))),
    };
    let mut entries = BTreeMap::new();
    for (uri, path) in mapping {
        if !is_valid_uri(uri) {
            return Err(corrupt(format!("graph URI {uri} is not a valid URI")));
        }
        let JsonValue::String(path) = path else {
            return Err(corrupt(format!("path for URI {uri} is not a string")));
        };
        entries.insert(uri.to_owned(), path.to_owned());
    }

    Ok(StoreMapping {
        default_graph,
        entries,
    })
}

fn corrupt(message: impl Into<String>) -> StoreError {
    StoreError::CorruptMetadata(message.into())
}
