use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use ledger_summaries::modules::user_summaries::adapters::outbound::summary_store::SummaryStore;
#[cfg(feature = "dynamo")]
use ledger_summaries::modules::user_summaries::adapters::outbound::summary_store_dynamo::DynamoSummaryStore;
use ledger_summaries::modules::user_summaries::adapters::outbound::summary_store_in_memory::InMemorySummaryStore;
use ledger_summaries::modules::user_summaries::use_cases::aggregate_transactions::handler::Aggregator;
use ledger_summaries::shared::core::clock::SystemClock;
use ledger_summaries::shell::config::{Config, ConfigError, StoreBackend};
use ledger_summaries::shell::http::router;
use ledger_summaries::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env()?;
    let store = summary_store(&config).await?;
    let aggregator = Aggregator::new(store, Arc::new(SystemClock))
        .with_max_concurrent_increments(config.max_concurrent_increments);

    let state = AppState {
        aggregator: Arc::new(aggregator),
    };

    tracing::info!(store = ?config.store, "Invocation endpoint: http://{}/invocations", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn summary_store(config: &Config) -> Result<Arc<dyn SummaryStore>, ConfigError> {
    match config.store {
        StoreBackend::Memory => Ok(Arc::new(InMemorySummaryStore::new())),
        #[cfg(feature = "dynamo")]
        StoreBackend::Dynamo => Ok(Arc::new(
            DynamoSummaryStore::new(
                config.summary_table.clone(),
                config.dynamodb_endpoint_url.as_deref(),
            )
            .await,
        )),
        #[cfg(not(feature = "dynamo"))]
        StoreBackend::Dynamo => Err(ConfigError::DynamoUnavailable),
    }
}
