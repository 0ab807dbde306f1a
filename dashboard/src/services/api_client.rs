//! REST API client for the evaluation service
//!
//! Provides the HTTP implementation of `EvaluationApi` against `{base}/api`

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use shared::{AuditEntry, Component, ContractEvaluation, component_debug};
use std::time::Duration;
use url::Url;

use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::traits::EvaluationApi;

#[derive(Deserialize)]
struct ResultsEnvelope {
    #[serde(default)]
    results: Option<Vec<ContractEvaluation>>,
}

#[derive(Deserialize)]
struct AuditEnvelope {
    #[serde(default)]
    entries: Option<Vec<AuditEntry>>,
}

/// HTTP client for the evaluation service
#[derive(Clone)]
pub struct HttpEvaluationApi {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpEvaluationApi {
    /// Create a client; a bare `host:port` is treated as `http://host:port`
    pub fn new(base_url: &str, timeout: Duration) -> DashboardResult<Self> {
        let base = if base_url.starts_with("http") {
            base_url.to_string()
        } else {
            format!("http://{}", base_url)
        };

        let base_url = Url::parse(&base).map_err(|e| DashboardError::config(format!("Invalid API URL {}: {}", base, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(DashboardError::config(format!("API URL cannot be a base: {}", base)));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, client })
    }

    pub fn from_config(config: &DashboardConfig) -> DashboardResult<Self> {
        Self::new(&config.api_base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/{segments...}` with each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    async fn get(&self, url: Url) -> reqwest::Result<Response> {
        component_debug!(Component::Api, url = %url, "GET");
        self.client.get(url).send().await
    }
}

/// Turn a non-2xx status into a short reason string
fn status_reason(status: StatusCode) -> String {
    format!("HTTP {}", status)
}

#[async_trait]
impl EvaluationApi for HttpEvaluationApi {
    async fn fetch_evaluations(&self) -> DashboardResult<Vec<ContractEvaluation>> {
        let response = self.get(self.endpoint(&["results"])).await.map_err(DashboardError::fetch)?;
        if !response.status().is_success() {
            return Err(DashboardError::fetch(status_reason(response.status())));
        }

        let envelope: ResultsEnvelope = response.json().await.map_err(DashboardError::fetch)?;
        Ok(envelope.results.unwrap_or_default())
    }

    async fn evaluate_sample(&self, sample_name: &str) -> DashboardResult<ContractEvaluation> {
        let url = self.endpoint(&["evaluate-sample", sample_name]);
        component_debug!(Component::Api, url = %url, "POST");

        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|e| DashboardError::analysis(sample_name, e))?;
        if !response.status().is_success() {
            return Err(DashboardError::analysis(sample_name, status_reason(response.status())));
        }

        response
            .json::<ContractEvaluation>()
            .await
            .map_err(|e| DashboardError::analysis(sample_name, e))
    }

    async fn fetch_evaluation(&self, contract_id: &str) -> DashboardResult<ContractEvaluation> {
        let failure = |reason: String| DashboardError::ContractFetchFailure {
            contract_id: contract_id.to_string(),
            reason,
        };

        let response = self
            .get(self.endpoint(&["results", contract_id]))
            .await
            .map_err(|e| failure(e.to_string()))?;
        if !response.status().is_success() {
            return Err(failure(status_reason(response.status())));
        }

        response
            .json::<ContractEvaluation>()
            .await
            .map_err(|e| failure(e.to_string()))
    }

    async fn fetch_audit_log(&self, limit: u32) -> DashboardResult<Vec<AuditEntry>> {
        let failure = |reason: String| DashboardError::AuditLogFailure { reason };

        let mut url = self.endpoint(&["audit-log"]);
        url.query_pairs_mut().append_pair("limit", &limit.to_string());

        let response = self.get(url).await.map_err(|e| failure(e.to_string()))?;
        if !response.status().is_success() {
            return Err(failure(status_reason(response.status())));
        }

        let envelope: AuditEnvelope = response.json().await.map_err(|e| failure(e.to_string()))?;
        Ok(envelope.entries.unwrap_or_default())
    }

    async fn health(&self) -> DashboardResult<serde_json::Value> {
        let failure = |reason: String| DashboardError::HealthCheckFailure { reason };

        let response = self
            .get(self.endpoint(&["health"]))
            .await
            .map_err(|e| failure(e.to_string()))?;
        if !response.status().is_success() {
            return Err(failure(status_reason(response.status())));
        }

        response.json().await.map_err(|e| failure(e.to_string()))
    }
}
