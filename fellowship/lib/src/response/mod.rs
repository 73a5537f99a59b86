//! The paginated response envelope.
//!
//! Every collection and lookup endpoint wraps its documents in the same
//! envelope. Pagination metadata is optional on the wire: missing or `null`
//! fields read as `0`, and a missing `docs` array reads as empty. Property
//! names are matched case-insensitively.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::model::Model;

const ENVELOPE_KEYS: &[&str] = &["docs", "total", "limit", "offset", "page", "pages"];

/// One page of documents plus pagination metadata.
///
/// Counters are signed; negative values from the server are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub docs: Vec<T>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub offset: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pages: i64,
}

impl<T> Default for ApiResponse<T> {
    fn default() -> Self {
        Self {
            docs: Vec::new(),
            total: 0,
            limit: 0,
            offset: 0,
            page: 0,
            pages: 0,
        }
    }
}

impl<T> ApiResponse<T> {
    /// Consumes the envelope, keeping only the documents.
    pub fn into_docs(self) -> Vec<T> {
        self.docs
    }

    /// Consumes the envelope, keeping only the first document.
    pub fn into_first(self) -> Option<T> {
        self.docs.into_iter().next()
    }
}

impl<T: Model> ApiResponse<T> {
    /// Parses a response body.
    ///
    /// Envelope keys and the keys of each document are matched to their
    /// declared names ignoring ASCII case before deserializing.
    ///
    /// ## Errors
    ///
    /// Returns an error if the body is not JSON, or is JSON of the wrong
    /// shape (for example `docs` is not an array). A body that fails to
    /// parse never reads as an empty page.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let mut value: Value = serde_json::from_slice(body)?;
        canonicalize_keys(&mut value, ENVELOPE_KEYS);

        if let Some(Value::Array(docs)) = value.get_mut("docs") {
            let fields = T::wire_names();
            for doc in docs {
                canonicalize_keys(doc, &fields);
            }
        }

        serde_json::from_value(value)
    }
}

/// Renames object keys that match a known name case-insensitively.
///
/// An exact match always wins; a case-variant is dropped into place only
/// when the canonical key is absent.
fn canonicalize_keys(value: &mut Value, known: &[&str]) {
    let Value::Object(map) = value else {
        return;
    };

    let renames: Vec<(String, &str)> = map
        .keys()
        .filter(|key| !known.contains(&key.as_str()))
        .filter_map(|key| {
            known
                .iter()
                .find(|k| k.eq_ignore_ascii_case(key))
                .map(|k| (key.clone(), *k))
        })
        .collect();

    for (from, to) in renames {
        if map.contains_key(to) {
            continue;
        }
        if let Some(v) = map.remove(&from) {
            map.insert(to.to_string(), v);
        }
    }
}

fn null_as_default<'de, D, V>(deserializer: D) -> Result<V, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de> + Default,
{
    Ok(Option::<V>::deserialize(deserializer)?.unwrap_or_default())
}
