//! Persistent cache implementations
//!
//! Successful results are stored under `"headline-analysis-" + url`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use async_trait::async_trait;
use tokio::fs;
use tokio::sync::{Mutex, RwLock};

use shared::{process_debug, ProcessId};
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::traits::PersistentCache;

pub const CACHE_KEY_PREFIX: &str = "headline-analysis-";

/// Storage key for a URL's result
pub fn cache_key(url: &str) -> String {
    format!("{CACHE_KEY_PREFIX}{url}")
}

/// In-process cache, lost on exit
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersistentCache for MemoryCache {
    async fn get(&self, key: &str) -> AnalyzerResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AnalyzerResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Cache persisted as a single JSON object file.
///
/// The file is read on first access and rewritten in full on every `set`
/// through a sibling temp file and a rename.
#[derive(Debug)]
pub struct FileCache {
    path: PathBuf,
    entries: Mutex<Option<HashMap<String, String>>>,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, operation: &str, error: impl std::fmt::Display) -> AnalyzerError {
        AnalyzerError::Storage {
            operation: operation.to_string(),
            path: self.path.display().to_string(),
            message: error.to_string(),
        }
    }

    async fn load(&self) -> AnalyzerResult<HashMap<String, String>> {
        if fs::metadata(&self.path).await.is_err() {
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.storage_error("read", e))?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }

        let entries: HashMap<String, String> =
            serde_json::from_str(&content).map_err(|e| self.storage_error("parse", e))?;
        process_debug!(
            ProcessId::current(),
            "📂 Loaded {} cached analyses from {}",
            entries.len(),
            self.path.display()
        );
        Ok(entries)
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> AnalyzerResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.storage_error("create directory", e))?;
        }

        let content = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, content)
            .await
            .map_err(|e| self.storage_error("write", e))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| self.storage_error("rename", e))?;
        Ok(())
    }
}

#[async_trait]
impl PersistentCache for FileCache {
    async fn get(&self, key: &str) -> AnalyzerResult<Option<String>> {
        let mut guard = self.entries.lock().await;
        if guard.is_none() {
            *guard = Some(self.load().await?);
        }
        Ok(guard.as_ref().and_then(|entries| entries.get(key).cloned()))
    }

    async fn set(&self, key: &str, value: &str) -> AnalyzerResult<()> {
        let mut guard = self.entries.lock().await;
        let mut entries = match guard.take() {
            Some(entries) => entries,
            None => self.load().await?,
        };
        entries.insert(key.to_string(), value.to_string());

        let persisted = self.persist(&entries).await;
        *guard = Some(entries);
        persisted?;

        process_debug!(ProcessId::current(), "💾 Cached analysis under {}", key);
        Ok(())
    }
}
