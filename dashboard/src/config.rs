//! Dashboard configuration
//!
//! ## Configuration Sources
//! Values are resolved in increasing precedence:
//! 1. Built-in defaults
//! 2. JSON config file (`--config`)
//! 3. Environment: `.env` file (if present) and process environment
//! 4. Command line flags
//!
//! ## Environment Variables
//! - `DASHBOARD_API_URL`: evaluation service base URL
//! - `DASHBOARD_REFRESH_SECS`: auto-refresh interval in seconds

use serde::{Deserialize, Serialize};
use shared::SharedError;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::time::Duration;

use crate::error::{DashboardError, DashboardResult};

pub const ENV_API_URL: &str = "DASHBOARD_API_URL";
pub const ENV_REFRESH_SECS: &str = "DASHBOARD_REFRESH_SECS";

/// How responses from overlapping full refreshes are reconciled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshOrdering {
    /// Whichever response resolves last is applied
    #[default]
    LastResolvedWins,
    /// Responses issued before the latest applied one are discarded
    LatestIssuedWins,
}

/// Full dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub refresh_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub audit_log_limit: u32,
    pub refresh_ordering: RefreshOrdering,
    /// Vendor display name -> backend sample identifier
    pub vendor_samples: HashMap<String, String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            refresh_interval_secs: 30,
            request_timeout_secs: 30,
            audit_log_limit: 50,
            refresh_ordering: RefreshOrdering::default(),
            vendor_samples: HashMap::new(),
        }
    }
}

impl DashboardConfig {
    /// Load a config file; missing keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> DashboardResult<Self> {
        serde_json::from_str(raw).map_err(|e| {
            DashboardError::SharedError(SharedError::DeserializationError {
                message: e.to_string(),
            })
        })
    }

    /// Apply overrides from `.env` and the process environment
    pub fn apply_env(&mut self) -> DashboardResult<()> {
        // No .env file is fine
        let _ = dotenv::dotenv();
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> DashboardResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(secs) = lookup(ENV_REFRESH_SECS) {
            self.refresh_interval_secs = secs.trim().parse().map_err(|_| SharedError::InvalidConfig {
                field: ENV_REFRESH_SECS.to_string(),
                value: secs.clone(),
            })?;
        }
        Ok(())
    }

    /// Add a `VENDOR=SAMPLE` mapping as given on the command line
    pub fn add_sample_arg(&mut self, arg: &str) -> DashboardResult<()> {
        let (vendor, sample) = arg.split_once('=').ok_or_else(|| SharedError::InvalidConfig {
            field: "sample".to_string(),
            value: arg.to_string(),
        })?;
        self.vendor_samples
            .insert(vendor.trim().to_string(), sample.trim().to_string());
        Ok(())
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(DashboardError::config("api_base_url must not be empty"));
        }
        if self.refresh_interval_secs == 0 {
            return Err(DashboardError::config("refresh_interval_secs must be greater than zero"));
        }
        if self.request_timeout_secs == 0 {
            return Err(DashboardError::config("request_timeout_secs must be greater than zero"));
        }
        for (vendor, sample) in &self.vendor_samples {
            if vendor.is_empty() || sample.is_empty() {
                return Err(SharedError::InvalidConfig {
                    field: "vendor_samples".to_string(),
                    value: format!("{vendor}={sample}"),
                }
                .into());
            }
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn sample_registry(&self) -> SampleRegistry {
        SampleRegistry::new(self.vendor_samples.clone())
    }
}

/// Vendor name -> sample identifier lookup used by the analysis flow
///
/// Vendors without an entry are simply not analyzable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleRegistry {
    samples: HashMap<String, String>,
}

impl SampleRegistry {
    pub fn new(samples: HashMap<String, String>) -> Self {
        Self { samples }
    }

    /// Exact-match lookup on the vendor display name
    pub fn sample_for(&self, vendor_name: &str) -> Option<&str> {
        self.samples.get(vendor_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Entries in vendor order, for startup enumeration
    pub fn entries(&self) -> BTreeMap<&str, &str> {
        self.samples
            .iter()
            .map(|(vendor, sample)| (vendor.as_str(), sample.as_str()))
            .collect()
    }
}
