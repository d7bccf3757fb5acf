//! The persisted short-link index and its store on the publishing branch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entry::ShortLinkEntry;
use crate::github::{GitObjectGateway, RefName, RepositoryLocator};

/// Path of the index document in the published tree.
pub const INDEX_DOCUMENT_PATH: &str = "index.json";

/// Mapping from short URL to target URL.
///
/// Keys enumerate in sorted order, so the serialised document is canonical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkIndex(BTreeMap<String, String>);

impl LinkIndex {
    /// An index with no links.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Number of links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the index holds no links.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Target for a short URL.
    #[must_use]
    pub fn get(&self, from: &str) -> Option<&str> {
        self.0.get(from).map(String::as_str)
    }

    /// Links in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(from, to)| (from.as_str(), to.as_str()))
    }

    /// Returns a copy of the index with `entry` set, replacing any previous
    /// target for the same short URL.
    #[must_use]
    pub fn merge(&self, entry: &ShortLinkEntry) -> Self {
        let mut merged = self.0.clone();
        merged.insert(entry.from.to_string(), entry.to.to_string());
        Self(merged)
    }

    /// Decodes an index document.
    ///
    /// # Errors
    ///
    /// Returns the decoder error when `document` is not a JSON object of
    /// strings.
    pub fn from_document(document: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(document)
    }

    /// Encodes the index as its canonical JSON document.
    ///
    /// # Errors
    ///
    /// Returns the encoder error; a string map does not fail to encode in
    /// practice.
    pub fn to_document(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Reads the index from the tip of the publishing branch.
pub struct IndexStore<'a, Gateway>
where
    Gateway: GitObjectGateway,
{
    gateway: &'a Gateway,
    repository: &'a RepositoryLocator,
}

impl<'a, Gateway> IndexStore<'a, Gateway>
where
    Gateway: GitObjectGateway,
{
    /// Creates a store over `repository`.
    #[must_use]
    pub const fn new(gateway: &'a Gateway, repository: &'a RepositoryLocator) -> Self {
        Self {
            gateway,
            repository,
        }
    }

    /// Loads the index published on `pointer`.
    ///
    /// A missing branch, a missing document and an undecodable document all
    /// yield an empty index; the cause is logged.
    pub async fn load(&self, pointer: &RefName) -> LinkIndex {
        let document = match self
            .gateway
            .get_content(self.repository, pointer, INDEX_DOCUMENT_PATH)
            .await
        {
            Ok(Some(document)) => document,
            Ok(None) => {
                tracing::info!("no {INDEX_DOCUMENT_PATH} on {pointer}; starting a new index");
                return LinkIndex::new();
            }
            Err(error) => {
                tracing::warn!("failed to read {INDEX_DOCUMENT_PATH} from {pointer}: {error}");
                return LinkIndex::new();
            }
        };

        LinkIndex::from_document(&document).unwrap_or_else(|error| {
            tracing::warn!("ignoring unreadable {INDEX_DOCUMENT_PATH} on {pointer}: {error}");
            LinkIndex::new()
        })
    }
}
