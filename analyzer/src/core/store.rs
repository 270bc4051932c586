//! Analysis state management
//!
//! Pure per-URL record keeping that can be tested independently without
//! network or storage dependencies.

use std::collections::HashMap;
use shared::AnalysisRecord;

/// Per-URL analysis records plus the most recently requested URL
#[derive(Debug, Default)]
pub struct AnalysisStore {
    records: HashMap<String, AnalysisRecord>,
    current_url: Option<String>,
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot for a reader.
    ///
    /// A completed record for `url` is returned when one exists; every other
    /// case gets the process-wide current state.
    pub fn get_snapshot(&self, url: Option<&str>) -> AnalysisRecord {
        if let Some(record) = url
            .and_then(|url| self.records.get(url))
            .filter(|record| !record.in_progress)
        {
            return record.clone();
        }
        self.current_state()
    }

    /// Record of the most recently requested URL, or the idle state
    pub fn current_state(&self) -> AnalysisRecord {
        self.current_url
            .as_ref()
            .and_then(|url| self.records.get(url))
            .cloned()
            .unwrap_or_else(AnalysisRecord::idle)
    }

    /// Overwrite the entry for `url`
    pub fn put(&mut self, url: &str, record: AnalysisRecord) {
        self.records.insert(url.to_string(), record);
    }

    pub fn get(&self, url: &str) -> Option<&AnalysisRecord> {
        self.records.get(url)
    }

    /// Mark `url` in progress and make it the current URL
    pub fn begin(&mut self, url: &str) -> AnalysisRecord {
        let record = AnalysisRecord::pending(url);
        self.put(url, record.clone());
        self.current_url = Some(url.to_string());
        record
    }
}
