//! Completion history access.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use beacon_client::NotifyApi;
use beacon_core::result::AppResult;

/// Read access to a patient's completion history, as the milestone
/// engine needs it. Kept separate from [`NotifyApi`] so tests can feed
/// the engine canned histories.
#[async_trait]
pub trait CompletionSource: Send + Sync {
    /// Lifetime completion total for a patient.
    async fn total_completions(&self, patient_id: &str) -> AppResult<u64>;

    /// Completions at or after `since`.
    async fn completions_since(&self, patient_id: &str, since: DateTime<Utc>) -> AppResult<u64>;

    /// Calendar days of the most recent completions, newest first, at
    /// most `limit` completions deep.
    async fn recent_completion_days(
        &self,
        patient_id: &str,
        limit: u32,
    ) -> AppResult<Vec<NaiveDate>>;
}

/// [`CompletionSource`] backed by the clinic backend API.
#[derive(Clone)]
pub struct BackendCompletionSource {
    api: Arc<dyn NotifyApi>,
}

impl BackendCompletionSource {
    pub fn new(api: Arc<dyn NotifyApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CompletionSource for BackendCompletionSource {
    async fn total_completions(&self, patient_id: &str) -> AppResult<u64> {
        self.api.count_completions(patient_id, None).await
    }

    async fn completions_since(&self, patient_id: &str, since: DateTime<Utc>) -> AppResult<u64> {
        self.api.count_completions(patient_id, Some(since)).await
    }

    async fn recent_completion_days(
        &self,
        patient_id: &str,
        limit: u32,
    ) -> AppResult<Vec<NaiveDate>> {
        let completions = self.api.list_completions(patient_id, limit).await?;
        Ok(completions
            .iter()
            .map(|c| c.completed_at.date_naive())
            .collect())
    }
}
