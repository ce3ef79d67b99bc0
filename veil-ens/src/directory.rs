//! Static directory of published meta-addresses.
//!
//! The on-disk format matches the meta-address shape the HTTP API uses:
//!
//! ```json
//! {
//!   "alice.eth": { "pSpend": "11…", "pView": "22…" }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use veil_core::error::{Result, VeilError};
use veil_core::traits::MetaAddressResolver;
use veil_core::types::MetaAddress;

use crate::resolver::normalize_name;

/// One directory record as stored in JSON.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Spend key (64 hex characters)
    #[serde(rename = "pSpend")]
    pub spend_key: String,
    /// View key (64 hex characters)
    #[serde(rename = "pView")]
    pub view_key: String,
}

/// Resolver backed by a fixed name → meta-address table.
///
/// Names are matched case-insensitively after trimming.
#[derive(Debug, Default)]
pub struct DirectoryResolver {
    entries: RwLock<HashMap<String, MetaAddress>>,
}

impl DirectoryResolver {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a directory from its JSON form.
    ///
    /// Every entry is validated; one bad key rejects the whole file.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, DirectoryEntry> = serde_json::from_str(json)?;
        let directory = Self::new();

        for (name, entry) in raw {
            let meta = MetaAddress::from_hex_parts(&entry.spend_key, &entry.view_key)
                .map_err(|e| VeilError::ConfigError(format!("directory entry {:?}: {}", name, e)))?;
            directory.insert(&name, meta)?;
        }

        Ok(directory)
    }

    /// Loads a directory from a JSON file.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            VeilError::ConfigError(format!("cannot read directory {}: {}", path.display(), e))
        })?;
        let directory = Self::from_json_str(&json)?;
        info!(entries = directory.len(), "Loaded meta-address directory");
        Ok(directory)
    }

    /// Publishes (or replaces) a meta-address under a name.
    pub fn insert(&self, name: &str, meta: MetaAddress) -> Result<()> {
        let key = normalize_name(name)?.to_lowercase();
        self.entries.write().insert(key, meta);
        Ok(())
    }

    /// Returns the number of published names.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is published.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl MetaAddressResolver for DirectoryResolver {
    #[instrument(skip(self))]
    async fn resolve(&self, name: &str) -> Result<MetaAddress> {
        let key = normalize_name(name)?.to_lowercase();
        match self.entries.read().get(&key) {
            Some(meta) => {
                debug!(name = %key, "Resolved from directory");
                Ok(meta.clone())
            }
            None => Err(VeilError::NotRegistered(key)),
        }
    }

    fn backend(&self) -> &'static str {
        "directory"
    }
}
