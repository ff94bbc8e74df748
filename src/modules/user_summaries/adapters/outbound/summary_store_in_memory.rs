// In memory summary store.
//
// Purpose
// - Exercise the aggregator without a database, and back local development.
//
// Responsibilities
// - Keep one row per user in a map, created on first increment.
// - Apply each increment under the write lock so concurrent adds never get lost.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::modules::user_summaries::adapters::outbound::summary_store::{
    SummaryStore, SummaryStoreError,
};
use crate::modules::user_summaries::core::summary::{SummaryDelta, UserSummary};

#[derive(Default)]
pub struct InMemorySummaryStore {
    rows: RwLock<HashMap<String, UserSummary>>,
    is_offline: bool,
}

impl InMemorySummaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn get(&self, user_id: &str) -> Option<UserSummary> {
        self.rows.read().await.get(user_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl SummaryStore for InMemorySummaryStore {
    async fn increment(
        &self,
        user_id: &str,
        delta: &SummaryDelta,
        last_updated: DateTime<Utc>,
    ) -> Result<(), SummaryStoreError> {
        if self.is_offline {
            return Err(SummaryStoreError::Backend("Summary store offline".into()));
        }

        let mut guard = self.rows.write().await;
        let mut row = guard
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| UserSummary::empty(user_id, last_updated));
        row.apply(delta, last_updated)
            .map_err(|_| SummaryStoreError::Overflow {
                user_id: user_id.to_string(),
            })?;
        guard.insert(user_id.to_string(), row);
        Ok(())
    }
}
