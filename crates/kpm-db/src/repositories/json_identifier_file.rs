//! `plugin_identifiers.json` implementation of the `IdentifierStore` trait.
//!
//! The ledger is a JSON object keyed by plugin key:
//!
//! ```json
//! {
//!   "stripe": {
//!     "plugin_name": "stripe",
//!     "group_id": "org.kill-bill.billing.plugin.java",
//!     "artifact_id": "stripe-plugin",
//!     "packaging": "jar",
//!     "version": "4.0.1",
//!     "language": "java"
//!   }
//! }
//! ```
//!
//! A missing or blank file reads as an empty ledger. Writes go to a sibling
//! temp file which is then renamed over the ledger, so readers never see a
//! half-written document.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use kpm_core::{IdentifierStore, PluginIdentifier, RepositoryError};

type Ledger = BTreeMap<String, PluginIdentifier>;

/// Identifier ledger kept in a JSON file.
pub struct JsonIdentifierFile {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonIdentifierFile {
    /// Create a store over the ledger at `path`. The file need not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_ledger(&self) -> Result<Ledger, RepositoryError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Ledger::new()),
            Err(e) => {
                return Err(RepositoryError::Storage(format!(
                    "{}: {e}",
                    self.path.display()
                )));
            }
        };

        if text.trim().is_empty() {
            return Ok(Ledger::new());
        }

        let mut ledger: Ledger = serde_json::from_str(&text).map_err(|e| {
            RepositoryError::Serialization(format!("{}: {e}", self.path.display()))
        })?;
        for (key, record) in &mut ledger {
            record.plugin_key.clone_from(key);
        }
        Ok(ledger)
    }

    async fn write_ledger(&self, ledger: &Ledger) -> Result<(), RepositoryError> {
        let json = serde_json::to_vec_pretty(ledger)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepositoryError::Storage(format!("{}: {e}", parent.display())))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| RepositoryError::Storage(format!("{}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| RepositoryError::Storage(format!("{}: {e}", self.path.display())))?;
        Ok(())
    }
}

#[async_trait]
impl IdentifierStore for JsonIdentifierFile {
    async fn list_identifiers(&self) -> Result<Vec<PluginIdentifier>, RepositoryError> {
        Ok(self.read_ledger().await?.into_values().collect())
    }

    async fn get(&self, plugin_key: &str) -> Result<PluginIdentifier, RepositoryError> {
        self.read_ledger()
            .await?
            .remove(plugin_key)
            .ok_or_else(|| RepositoryError::NotFound(format!("plugin '{plugin_key}'")))
    }

    async fn upsert(&self, record: &PluginIdentifier) -> Result<(), RepositoryError> {
        if record.plugin_key.trim().is_empty() {
            return Err(RepositoryError::Constraint(
                "plugin key must not be empty".to_string(),
            ));
        }

        let _guard = self.write_lock.lock().await;
        let mut ledger = self.read_ledger().await?;
        ledger.insert(record.plugin_key.clone(), record.clone());
        self.write_ledger(&ledger).await?;

        tracing::debug!(
            plugin_key = %record.plugin_key,
            path = %self.path.display(),
            "Stored plugin identifier"
        );
        Ok(())
    }

    async fn remove(&self, plugin_key: &str) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut ledger = self.read_ledger().await?;
        if ledger.remove(plugin_key).is_none() {
            return Err(RepositoryError::NotFound(format!("plugin '{plugin_key}'")));
        }
        self.write_ledger(&ledger).await
    }
}
