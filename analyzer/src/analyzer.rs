//! Analysis orchestration
//!
//! The `Analyzer` owns the per-URL store and drives the remote workflow
//! sequence. Callers get a snapshot immediately; the remote run happens on
//! a spawned task whose completion is written back into the store and
//! broadcast to subscribers.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::{AbortHandle, JoinHandle};

use shared::{
    process_debug, process_info, process_warn, AnalysisRecord, AnalyzerConfig, OutputPolicy,
    ProcessId,
};
use crate::core::{extract_output, AnalysisStore};
use crate::error::AnalyzerResult;
use crate::services::{cache_key, FileCache, RealWorkflowClient};
use crate::traits::{AnalysisInput, PersistentCache, WorkflowClient};

/// Error recorded for a run stopped through `Analyzer::cancel`
pub const CANCELLED_MESSAGE: &str = "Analysis cancelled";

const COMPLETION_CHANNEL_CAPACITY: usize = 256;

/// Request orchestrator and owner of the analysis store
pub struct Analyzer<C>
where
    C: WorkflowClient,
{
    client: Arc<C>,
    persisted: Option<Arc<dyn PersistentCache>>,
    task: Arc<str>,
    output_policy: OutputPolicy,

    store: Arc<RwLock<AnalysisStore>>,
    in_flight: Arc<Mutex<HashMap<String, AbortHandle>>>,
    completions: broadcast::Sender<AnalysisRecord>,
}

impl<C> Clone for Analyzer<C>
where
    C: WorkflowClient,
{
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            persisted: self.persisted.clone(),
            task: self.task.clone(),
            output_policy: self.output_policy,
            store: self.store.clone(),
            in_flight: self.in_flight.clone(),
            completions: self.completions.clone(),
        }
    }
}

impl Analyzer<RealWorkflowClient> {
    /// Analyzer talking to the configured workflow service, with a file
    /// cache when `cache_file` is set
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        let analyzer = Self::new(RealWorkflowClient::from_config(config), config);
        match &config.cache_file {
            Some(path) => analyzer.with_persistent_cache(Arc::new(FileCache::new(path.clone()))),
            None => analyzer,
        }
    }
}

impl<C> Analyzer<C>
where
    C: WorkflowClient + 'static,
{
    /// Create an analyzer with an empty store and no persistent cache
    pub fn new(client: C, config: &AnalyzerConfig) -> Self {
        let (completions, _) = broadcast::channel(COMPLETION_CHANNEL_CAPACITY);
        Self {
            client: Arc::new(client),
            persisted: None,
            task: Arc::from(config.task.as_str()),
            output_policy: config.output_policy,
            store: Arc::new(RwLock::new(AnalysisStore::new())),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            completions,
        }
    }

    /// Consult `cache` before any remote call and store successful results in it
    pub fn with_persistent_cache(mut self, cache: Arc<dyn PersistentCache>) -> Self {
        self.persisted = Some(cache);
        self
    }

    pub fn output_policy(&self) -> OutputPolicy {
        self.output_policy
    }

    /// Analyze `url`, returning the current snapshot without waiting for
    /// the remote run.
    ///
    /// Persisted results and completed in-memory results are returned as
    /// they are. A run already in flight for `url` is joined rather than
    /// duplicated. Otherwise a new run is spawned and its in-progress
    /// record returned.
    pub async fn analyze(&self, url: &str) -> AnalysisRecord {
        if let Some(result) = self.persisted_result(url).await {
            process_debug!(ProcessId::current(), "📦 Persisted cache hit for {}", url);
            return AnalysisRecord::succeeded(url, result);
        }

        let mut store = self.store.write().await;

        if let Some(record) = store.get(url) {
            if record.has_result() {
                process_debug!(ProcessId::current(), "📦 Cache hit for {}", url);
                return record.clone();
            }
            if record.in_progress {
                process_debug!(ProcessId::current(), "⏳ Analysis already running for {}", url);
                return record.clone();
            }
        }

        let snapshot = store.begin(url);
        process_info!(ProcessId::current(), "🔍 Starting analysis of {}", url);

        // Registered under the store lock so completion cannot overtake it
        let handle = self.spawn_run(url.to_string());
        self.in_flight
            .lock()
            .await
            .insert(url.to_string(), handle.abort_handle());

        snapshot
    }

    /// Analyze `url` and wait for the run to finish
    pub async fn analyze_and_wait(&self, url: &str) -> AnalysisRecord {
        // Subscribe first so the completion cannot slip past
        let mut updates = self.subscribe();
        let snapshot = self.analyze(url).await;
        if !snapshot.in_progress {
            return snapshot;
        }

        loop {
            match updates.recv().await {
                Ok(record) if record.url == url => return record,
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    process_debug!(ProcessId::current(), "Completion listener lagged by {}", skipped);
                    if let Some(record) = self.completed_record(url).await {
                        return record;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => {
                    return self.completed_record(url).await.unwrap_or(snapshot);
                }
            }
        }
    }

    /// Snapshot for a reader: the completed record for `url` when there is
    /// one, the process-wide current state otherwise
    pub async fn get_snapshot(&self, url: Option<&str>) -> AnalysisRecord {
        self.store.read().await.get_snapshot(url)
    }

    /// Overwrite the store entry for `url`
    pub async fn put(&self, url: &str, record: AnalysisRecord) {
        self.store.write().await.put(url, record);
    }

    /// Persisted result for `url`, `None` without a persistent cache
    pub async fn get_persisted(&self, url: &str) -> AnalyzerResult<Option<String>> {
        match &self.persisted {
            Some(cache) => cache.get(&cache_key(url)).await,
            None => Ok(None),
        }
    }

    /// Persist a successful result for `url`; a no-op without a persistent cache
    pub async fn set_persisted(&self, url: &str, result: &str) -> AnalyzerResult<()> {
        match &self.persisted {
            Some(cache) => cache.set(&cache_key(url), result).await,
            None => Ok(()),
        }
    }

    /// Receive every record that finishes from now on
    pub fn subscribe(&self) -> broadcast::Receiver<AnalysisRecord> {
        self.completions.subscribe()
    }

    /// Abort the in-flight run for `url`.
    ///
    /// Returns false when nothing was running. A cancelled run is recorded
    /// as failed with `CANCELLED_MESSAGE`.
    pub async fn cancel(&self, url: &str) -> bool {
        let record = {
            let mut store = self.store.write().await;
            let Some(handle) = self.in_flight.lock().await.remove(url) else {
                return false;
            };
            handle.abort();

            let record = AnalysisRecord::failed(url, CANCELLED_MESSAGE);
            store.put(url, record.clone());
            record
        };

        process_warn!(ProcessId::current(), "🛑 Cancelled analysis of {}", url);
        let _ = self.completions.send(record);
        true
    }

    /// Number of runs currently in flight
    pub async fn in_flight_count(&self) -> usize {
        self.in_flight.lock().await.len()
    }

    fn spawn_run(&self, url: String) -> JoinHandle<()> {
        let analyzer = self.clone();
        tokio::spawn(async move {
            let outcome = analyzer.run_workflow(&url).await;
            analyzer.complete(&url, outcome).await;
        })
    }

    /// create-run, then start-async, then output extraction
    async fn run_workflow(&self, url: &str) -> AnalyzerResult<String> {
        let run_id = self.client.create_run().await?;

        let input = AnalysisInput {
            url: url.to_string(),
            task: self.task.to_string(),
        };
        let response = self.client.start_run(&run_id, &input).await?;

        extract_output(&response, self.output_policy)
    }

    async fn complete(&self, url: &str, outcome: AnalyzerResult<String>) {
        let record = AnalysisRecord::from_outcome(url, outcome.map_err(|e| e.to_string()));

        {
            let mut store = self.store.write().await;

            // A cancel that won the store lock already recorded the outcome
            if self.in_flight.lock().await.remove(url).is_none() {
                process_debug!(ProcessId::current(), "Dropping result of cancelled run for {}", url);
                return;
            }
            store.put(url, record.clone());

            if let Some(result) = &record.result {
                if let Err(e) = self.set_persisted(url, result).await {
                    process_warn!(ProcessId::current(), "⚠️ Could not persist analysis of {}: {}", url, e);
                }
            }
        }

        match &record.error {
            None => {
                process_info!(ProcessId::current(), "✅ Analysis of {} complete", url);
            }
            Some(error) => {
                process_warn!(ProcessId::current(), "❌ Analysis of {} failed: {}", url, error);
            }
        }

        // No subscribers is fine
        let _ = self.completions.send(record);
    }

    async fn persisted_result(&self, url: &str) -> Option<String> {
        match self.get_persisted(url).await {
            Ok(result) => result,
            Err(e) => {
                process_warn!(ProcessId::current(), "⚠️ Persisted cache read failed for {}: {}", url, e);
                None
            }
        }
    }

    async fn completed_record(&self, url: &str) -> Option<AnalysisRecord> {
        self.store
            .read()
            .await
            .get(url)
            .filter(|record| record.is_complete())
            .cloned()
    }
}
