//! Test helpers and builder patterns for analyzer tests

use std::sync::Arc;
use std::time::Duration;

use analyzer::services::RealWorkflowClient;
use analyzer::{Analyzer, AnalyzerError, MockWorkflowClient, PersistentCache};
use serde_json::Value;
use shared::{AnalysisRecord, AnalyzerConfig, OutputPolicy};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate, Times};

use super::fixtures::TestFixtures;

pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Builder for analyzers backed by a mocked workflow client
pub struct AnalyzerBuilder {
    client: MockWorkflowClient,
    config: AnalyzerConfig,
    cache: Option<Arc<dyn PersistentCache>>,
}

impl AnalyzerBuilder {
    /// Builder with a client that expects no calls
    pub fn new() -> Self {
        let mut client = MockWorkflowClient::new();
        client.expect_create_run().times(0);
        client.expect_start_run().times(0);

        Self {
            client,
            config: TestFixtures::config("http://localhost:4111"),
            cache: None,
        }
    }

    /// Builder whose client runs exactly `runs` successful workflows
    /// answering with `response`
    pub fn with_successful_runs(runs: usize, response: Value) -> Self {
        let mut client = MockWorkflowClient::new();
        client
            .expect_create_run()
            .times(runs)
            .returning(|| Ok(TestFixtures::RUN_ID.to_string()));
        client
            .expect_start_run()
            .times(runs)
            .returning(move |_, _| Ok(response.clone()));

        Self {
            client,
            ..Self::new()
        }
    }

    pub fn with_client(mut self, client: MockWorkflowClient) -> Self {
        self.client = client;
        self
    }

    pub fn with_output_policy(mut self, policy: OutputPolicy) -> Self {
        self.config.output_policy = policy;
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn PersistentCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build(self) -> Analyzer<MockWorkflowClient> {
        let analyzer = Analyzer::new(self.client, &self.config);
        match self.cache {
            Some(cache) => analyzer.with_persistent_cache(cache),
            None => analyzer,
        }
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Common test helper functions
pub struct TestHelpers;

impl TestHelpers {
    /// Analyzer talking to `server` over HTTP
    pub fn http_analyzer(server: &MockServer) -> Analyzer<RealWorkflowClient> {
        Analyzer::from_config(&TestFixtures::config(&server.uri()))
    }

    pub fn strict_http_analyzer(server: &MockServer) -> Analyzer<RealWorkflowClient> {
        Analyzer::from_config(&TestFixtures::strict_config(&server.uri()))
    }

    /// Mount a create-run endpoint expected to be hit `expected` times
    pub async fn mount_create_run(
        server: &MockServer,
        response: ResponseTemplate,
        expected: impl Into<Times>,
    ) {
        Mock::given(method("POST"))
            .and(path(TestFixtures::CREATE_RUN_PATH))
            .respond_with(response)
            .expect(expected)
            .mount(server)
            .await;
    }

    /// Mount a start-async endpoint expected to be hit `expected` times
    pub async fn mount_start(
        server: &MockServer,
        response: ResponseTemplate,
        expected: impl Into<Times>,
    ) {
        Mock::given(method("POST"))
            .and(path(TestFixtures::START_PATH))
            .respond_with(response)
            .expect(expected)
            .mount(server)
            .await;
    }

    /// Mount both endpoints for `runs` successful runs returning `body`
    pub async fn mount_workflow(server: &MockServer, body: Value, runs: u64) {
        Self::mount_create_run(
            server,
            ResponseTemplate::new(200).set_body_json(TestFixtures::create_run_response()),
            runs,
        )
        .await;
        Self::mount_start(server, ResponseTemplate::new(200).set_body_json(body), runs).await;
    }

    /// Run `analyze_and_wait`, failing the test if it takes too long
    pub async fn analyze_to_completion<C>(analyzer: &Analyzer<C>, url: &str) -> AnalysisRecord
    where
        C: analyzer::WorkflowClient + 'static,
    {
        tokio::time::timeout(TEST_TIMEOUT, analyzer.analyze_and_wait(url))
            .await
            .expect("analysis did not finish in time")
    }

    /// Assert a finished record carrying `expected` as its result
    pub fn assert_succeeded(record: &AnalysisRecord, url: &str, expected: &str) {
        assert_eq!(record.url, url);
        assert!(!record.in_progress, "record should be complete: {record:?}");
        assert_eq!(record.result.as_deref(), Some(expected));
        assert_eq!(record.error, None);
    }

    /// Assert a finished record whose error starts with `prefix`
    pub fn assert_failed(record: &AnalysisRecord, url: &str, prefix: &str) {
        assert_eq!(record.url, url);
        assert!(!record.in_progress, "record should be complete: {record:?}");
        assert_eq!(record.result, None);
        let error = record.error.as_deref().unwrap_or_default();
        assert!(error.starts_with(prefix), "unexpected error: {error}");
    }

    pub fn create_run_failure() -> AnalyzerError {
        AnalyzerError::CreateRun {
            status: 500,
            body: "workflow crashed".to_string(),
        }
    }
}
