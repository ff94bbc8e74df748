use serde::Serialize;

use crate::modules::user_summaries::adapters::outbound::summary_store::SummaryStoreError;
use crate::modules::user_summaries::core::summary::SummaryDelta;
use crate::modules::user_summaries::core::transaction::EventKind;
use crate::modules::user_summaries::use_cases::aggregate_transactions::decode::DecodeError;

pub const SUCCESS_MESSAGE: &str = "Summary updated successfully";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Applied { user_id: String, delta: SummaryDelta },
    Skipped { kind: EventKind },
    Malformed { error: DecodeError },
    StoreFailed { user_id: String, error: SummaryStoreError },
}

impl RecordOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, RecordOutcome::Applied { .. })
    }
}

/// Outcomes in the same order as the records of the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub outcomes: Vec<RecordOutcome>,
}

impl BatchResult {
    pub fn applied(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Applied { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Skipped { .. }))
    }

    pub fn malformed(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Malformed { .. }))
    }

    pub fn store_failed(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::StoreFailed { .. }))
    }

    pub fn failed(&self) -> usize {
        self.malformed() + self.store_failed()
    }

    fn count(&self, predicate: impl Fn(&RecordOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }
}

/// Fixed-shape reply to the invoking runtime. Per-record failures never change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
}

impl From<&BatchResult> for InvocationResponse {
    fn from(_: &BatchResult) -> Self {
        Self {
            status_code: 200,
            body: serde_json::Value::from(SUCCESS_MESSAGE).to_string(),
        }
    }
}
