//! DynamoDB SummaryStore implementation.
//!
//! Table schema:
//! - UserId: user identifier (String, partition key)
//! - total_revenue, cogs, trapped_capital: running totals (Number)
//! - last_updated: ISO-8601 UTC timestamp (String)

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::modules::user_summaries::adapters::outbound::summary_store::{
    SummaryStore, SummaryStoreError,
};
use crate::modules::user_summaries::core::summary::{SummaryDelta, format_last_updated};

const KEY_ATTRIBUTE: &str = "UserId";

/// `if_not_exists` makes a missing row or field count as zero, so the first
/// increment creates the row.
const UPDATE_EXPRESSION: &str = "SET total_revenue = if_not_exists(total_revenue, :zero) + :rev, \
     cogs = if_not_exists(cogs, :zero) + :cogs, \
     trapped_capital = if_not_exists(trapped_capital, :zero) + :cap, \
     last_updated = :now";

pub struct DynamoSummaryStore {
    client: Client,
    table_name: String,
}

impl DynamoSummaryStore {
    pub async fn new(table_name: impl Into<String>, endpoint_url: Option<&str>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        let client = if let Some(endpoint) = endpoint_url {
            let dynamo_config = aws_sdk_dynamodb::config::Builder::from(&config)
                .endpoint_url(endpoint)
                .build();
            Client::from_conf(dynamo_config)
        } else {
            Client::new(&config)
        };

        let table_name = table_name.into();
        info!(table = %table_name, "Connected to DynamoDB for user summaries");

        Self { client, table_name }
    }

    fn expression_values(delta: &SummaryDelta, at: DateTime<Utc>) -> HashMap<String, AttributeValue> {
        HashMap::from([
            (":zero".to_string(), AttributeValue::N("0".to_string())),
            (":rev".to_string(), AttributeValue::N(delta.total_revenue.to_string())),
            (":cogs".to_string(), AttributeValue::N(delta.cogs.to_string())),
            (":cap".to_string(), AttributeValue::N(delta.trapped_capital.to_string())),
            (":now".to_string(), AttributeValue::S(format_last_updated(at))),
        ])
    }
}

#[async_trait]
impl SummaryStore for DynamoSummaryStore {
    async fn increment(
        &self,
        user_id: &str,
        delta: &SummaryDelta,
        last_updated: DateTime<Utc>,
    ) -> Result<(), SummaryStoreError> {
        self.client
            .update_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, AttributeValue::S(user_id.to_string()))
            .update_expression(UPDATE_EXPRESSION)
            .set_expression_attribute_values(Some(Self::expression_values(delta, last_updated)))
            .send()
            .await
            .map_err(|e| {
                SummaryStoreError::Backend(format!(
                    "DynamoDB update_item failed: {}",
                    aws_sdk_dynamodb::error::DisplayErrorContext(&e)
                ))
            })?;

        debug!(
            user_id = %user_id,
            table = %self.table_name,
            "Incremented user summary in DynamoDB"
        );

        Ok(())
    }
}
