//! Runtime configuration shared by the analyzer and the webserver

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::{SharedError, SharedResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:4111";
pub const DEFAULT_WORKFLOW_ID: &str = "headlineMeterWorkflow";
pub const ANALYSIS_TASK: &str = "Analyze this headline or article URL. Provide an assessment of its tone, potential bias, and emotional impact.";

pub const ENV_BASE_URL: &str = "HEADLINE_METER_BASE_URL";
pub const ENV_WORKFLOW_ID: &str = "HEADLINE_METER_WORKFLOW_ID";
pub const ENV_OUTPUT_POLICY: &str = "HEADLINE_METER_OUTPUT_POLICY";
pub const ENV_CACHE_FILE: &str = "HEADLINE_METER_CACHE_FILE";

/// What to do when a workflow response carries no recognizable output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputPolicy {
    /// Use the serialized response body as the output text
    #[default]
    RawFallback,
    /// Fail the analysis
    Required,
}

impl fmt::Display for OutputPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputPolicy::RawFallback => write!(f, "raw-fallback"),
            OutputPolicy::Required => write!(f, "required"),
        }
    }
}

impl FromStr for OutputPolicy {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raw-fallback" | "raw" | "fallback" => Ok(OutputPolicy::RawFallback),
            "required" | "strict" => Ok(OutputPolicy::Required),
            _ => Err(SharedError::InvalidConfig {
                field: "output_policy".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Workflow service and cache configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Base URL of the workflow service
    pub base_url: String,
    pub workflow_id: String,
    /// Instruction sent with every run
    pub task: String,
    pub output_policy: OutputPolicy,
    /// Enables the persisted result cache when set
    pub cache_file: Option<PathBuf>,
}

/// Values given on the command line, each replacing its environment value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub workflow_id: Option<String>,
    pub output_policy: Option<String>,
    pub cache_file: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            workflow_id: DEFAULT_WORKFLOW_ID.to_string(),
            task: ANALYSIS_TASK.to_string(),
            output_policy: OutputPolicy::default(),
            cache_file: None,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from `HEADLINE_METER_*` environment variables
    pub fn from_env() -> SharedResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> SharedResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(workflow_id) = lookup(ENV_WORKFLOW_ID) {
            config.workflow_id = workflow_id;
        }
        if let Some(policy) = lookup(ENV_OUTPUT_POLICY) {
            config.output_policy = policy.parse()?;
        }
        if let Some(cache_file) = lookup(ENV_CACHE_FILE).filter(|v| !v.trim().is_empty()) {
            config.cache_file = Some(PathBuf::from(cache_file));
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply command line overrides on top of the loaded values
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> SharedResult<Self> {
        if let Some(base_url) = overrides.base_url {
            self.base_url = base_url;
        }
        if let Some(workflow_id) = overrides.workflow_id {
            self.workflow_id = workflow_id;
        }
        if let Some(policy) = overrides.output_policy {
            self.output_policy = policy.parse()?;
        }
        if let Some(cache_file) = overrides.cache_file {
            self.cache_file = Some(cache_file);
        }

        self.validate()?;
        Ok(self)
    }

    /// Check that the base URL is an absolute http(s) URL and the workflow id is set
    pub fn validate(&self) -> SharedResult<()> {
        let parsed = url::Url::parse(&self.base_url).map_err(|_| SharedError::InvalidUrl {
            input: self.base_url.clone(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SharedError::InvalidUrl {
                input: self.base_url.clone(),
            });
        }

        if self.workflow_id.trim().is_empty() {
            return Err(SharedError::InvalidConfig {
                field: "workflow_id".to_string(),
                value: self.workflow_id.clone(),
            });
        }

        Ok(())
    }

    /// Base URL without trailing slashes, ready for path concatenation
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
