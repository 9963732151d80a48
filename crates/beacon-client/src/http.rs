//! reqwest-based [`NotifyApi`] implementation.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use beacon_core::config::backend::BackendConfig;
use beacon_core::error::{AppError, ErrorKind};
use beacon_core::result::AppResult;
use beacon_entity::completion::ExerciseCompletion;
use beacon_entity::notification::StatusUpdate;

use crate::api::{EventReport, NotifyApi, ScheduleRequest, SendRequest};

/// HTTP client for the clinic backend REST API and cloud functions.
#[derive(Debug, Clone)]
pub struct HttpNotifyApi {
    client: reqwest::Client,
    api_base_url: String,
    functions_base_url: String,
}

impl HttpNotifyApi {
    /// Build a client from backend configuration.
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            functions_base_url: config.functions_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post_json<T: Serialize + ?Sized>(&self, url: String, body: &T) -> AppResult<()> {
        debug!(url = %url, "POST");
        self.client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(network_err(&url))?
            .error_for_status()
            .map_err(network_err(&url))?;
        Ok(())
    }
}

#[async_trait]
impl NotifyApi for HttpNotifyApi {
    async fn post_status(&self, update: &StatusUpdate) -> AppResult<()> {
        self.post_json(format!("{}/api/notifications/status", self.api_base_url), update)
            .await
    }

    async fn sync_exercise(&self, payload: &Value) -> AppResult<()> {
        self.post_json(format!("{}/api/exercises/sync", self.api_base_url), payload)
            .await
    }

    async fn schedule_notification(&self, request: &ScheduleRequest) -> AppResult<()> {
        self.post_json(
            format!("{}/schedule-notifications", self.functions_base_url),
            request,
        )
        .await
    }

    async fn send_notification(&self, request: &SendRequest) -> AppResult<()> {
        self.post_json(
            format!("{}/send-notification", self.functions_base_url),
            request,
        )
        .await
    }

    async fn log_event(&self, report: &EventReport) -> AppResult<()> {
        self.post_json(
            format!("{}/process-notification-events", self.functions_base_url),
            report,
        )
        .await
    }

    async fn confirm_appointment(&self, appointment_id: &str) -> AppResult<()> {
        let url = format!(
            "{}/api/appointments/{appointment_id}/confirm",
            self.api_base_url
        );
        debug!(url = %url, "POST");
        self.client
            .post(&url)
            .send()
            .await
            .map_err(network_err(&url))?
            .error_for_status()
            .map_err(network_err(&url))?;
        Ok(())
    }

    async fn list_completions(
        &self,
        patient_id: &str,
        limit: u32,
    ) -> AppResult<Vec<ExerciseCompletion>> {
        let url = format!("{}/api/exercises/completions", self.api_base_url);
        self.client
            .get(&url)
            .query(&[("patientId", patient_id), ("limit", &limit.to_string())])
            .send()
            .await
            .map_err(network_err(&url))?
            .error_for_status()
            .map_err(network_err(&url))?
            .json::<Vec<ExerciseCompletion>>()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Serialization,
                    format!("Invalid completions response: {e}"),
                    e,
                )
            })
    }

    async fn count_completions(
        &self,
        patient_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> AppResult<u64> {
        let url = format!("{}/api/exercises/completions/count", self.api_base_url);
        let mut query: Vec<(&str, String)> = vec![("patientId", patient_id.to_string())];
        if let Some(since) = since {
            query.push(("since", since.to_rfc3339()));
        }
        let body: Value = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(network_err(&url))?
            .error_for_status()
            .map_err(network_err(&url))?
            .json()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Serialization,
                    format!("Invalid count response: {e}"),
                    e,
                )
            })?;
        Ok(body["count"].as_u64().unwrap_or(0))
    }

    async fn health(&self) -> AppResult<bool> {
        let url = format!("{}/api/health", self.api_base_url);
        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

fn network_err(url: &str) -> impl Fn(reqwest::Error) -> AppError + '_ {
    move |e| {
        AppError::with_source(
            ErrorKind::Network,
            format!("Request to {url} failed: {e}"),
            e,
        )
    }
}
