use crate::modules::user_summaries::adapters::outbound::summary_store::SummaryStore;
use crate::modules::user_summaries::use_cases::aggregate_transactions::handler::Aggregator;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator<dyn SummaryStore>>,
}
