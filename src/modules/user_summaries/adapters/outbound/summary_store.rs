// Port for the durable summary store.
//
// Contract
// - `increment` adds the delta onto the row for `user_id` and sets `last_updated`,
//   creating the row with zeroed fields when it does not exist yet.
// - The add must be atomic inside the store. Callers never read-modify-write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::modules::user_summaries::core::summary::SummaryDelta;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SummaryStoreError {
    #[error("summary for user {user_id} would overflow")]
    Overflow { user_id: String },

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait SummaryStore: Send + Sync {
    async fn increment(
        &self,
        user_id: &str,
        delta: &SummaryDelta,
        last_updated: DateTime<Utc>,
    ) -> Result<(), SummaryStoreError>;
}
