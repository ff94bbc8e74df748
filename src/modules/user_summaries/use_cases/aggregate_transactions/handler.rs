// Aggregator: apply a batch of ledger change records to the per-user summaries.
//
// Responsibilities
// - Skip every record that is not a creation.
// - Decode created records, compute their delta and issue one atomic increment each.
// - Attribute every failure to its own record and keep going.
//
// Boundaries
// - Stateless between calls. Concurrency safety for a row is the store's job.

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::modules::user_summaries::adapters::outbound::summary_store::SummaryStore;
use crate::modules::user_summaries::core::summary::SummaryDelta;
use crate::modules::user_summaries::core::transaction::EventKind;
use crate::modules::user_summaries::use_cases::aggregate_transactions::decode::{
    decode, event_kind,
};
use crate::modules::user_summaries::use_cases::aggregate_transactions::outcome::{
    BatchResult, RecordOutcome,
};
use crate::shared::core::clock::Clock;
use crate::shared::infrastructure::change_stream::ChangeRecord;

pub struct Aggregator<TStore>
where
    TStore: SummaryStore + ?Sized,
{
    store: Arc<TStore>,
    clock: Arc<dyn Clock>,
    max_concurrent_increments: usize,
}

impl<TStore> Aggregator<TStore>
where
    TStore: SummaryStore + ?Sized,
{
    pub fn new(store: Arc<TStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            max_concurrent_increments: 1,
        }
    }

    /// Number of increments kept in flight within one batch. Values below 1 mean 1.
    pub fn with_max_concurrent_increments(mut self, limit: usize) -> Self {
        self.max_concurrent_increments = limit.max(1);
        self
    }

    pub async fn process(&self, batch: &[ChangeRecord]) -> BatchResult {
        // Built up front: a lazily mapped stream over `self` is not Send for every lifetime.
        let pending: Vec<_> = batch
            .iter()
            .enumerate()
            .map(|(index, record)| self.process_record(index, record))
            .collect();
        let outcomes: Vec<RecordOutcome> = stream::iter(pending)
            .buffered(self.max_concurrent_increments)
            .collect()
            .await;

        let result = BatchResult { outcomes };
        info!(
            records = batch.len(),
            applied = result.applied(),
            skipped = result.skipped(),
            malformed = result.malformed(),
            store_failed = result.store_failed(),
            "Processed change batch"
        );
        result
    }

    async fn process_record(&self, index: usize, record: &ChangeRecord) -> RecordOutcome {
        let event_id = record.event_id.as_deref().unwrap_or_default();

        let kind = event_kind(record);
        if kind != EventKind::Created {
            debug!(index, event_id, ?kind, "Skipping change record");
            return RecordOutcome::Skipped { kind };
        }

        let event = match decode(record) {
            Ok(event) => event,
            Err(error) => {
                warn!(index, event_id, %error, "Malformed change record");
                return RecordOutcome::Malformed { error };
            }
        };

        let delta = SummaryDelta::from(&event);
        match self
            .store
            .increment(&event.user_id, &delta, self.clock.now())
            .await
        {
            Ok(()) => {
                info!(index, event_id, user_id = %event.user_id, "Updated summary");
                RecordOutcome::Applied {
                    user_id: event.user_id,
                    delta,
                }
            }
            Err(error) => {
                error!(index, event_id, user_id = %event.user_id, %error, "Error updating summary");
                RecordOutcome::StoreFailed {
                    user_id: event.user_id,
                    error,
                }
            }
        }
    }
}
