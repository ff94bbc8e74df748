// Runtime configuration read from the environment.
//
// Parsing goes through a key lookup so tests never touch the process environment.

use std::net::SocketAddr;
use thiserror::Error;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_SUMMARY_TABLE: &str = "ZunoUserSummary";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Dynamo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub store: StoreBackend,
    pub summary_table: String,
    pub dynamodb_endpoint_url: Option<String>,
    pub max_concurrent_increments: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is not a valid socket address: {value:?}")]
    InvalidAddr { key: &'static str, value: String },

    #[error("{key} must be `memory` or `dynamo`, got {value:?}")]
    UnknownStore { key: &'static str, value: String },

    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidConcurrency { key: &'static str, value: String },

    #[error("the dynamo summary store needs the `dynamo` feature")]
    DynamoUnavailable,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = lookup("LEDGER_SUMMARIES_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr.parse().map_err(|_| ConfigError::InvalidAddr {
            key: "LEDGER_SUMMARIES_ADDR",
            value: addr.clone(),
        })?;

        let store = match lookup("SUMMARY_STORE").as_deref() {
            None | Some("memory") => StoreBackend::Memory,
            Some("dynamo") if cfg!(feature = "dynamo") => StoreBackend::Dynamo,
            Some("dynamo") => return Err(ConfigError::DynamoUnavailable),
            Some(other) => {
                return Err(ConfigError::UnknownStore {
                    key: "SUMMARY_STORE",
                    value: other.to_string(),
                });
            }
        };

        let max_concurrent_increments = match lookup("MAX_CONCURRENT_INCREMENTS") {
            Some(value) => match value.parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    return Err(ConfigError::InvalidConcurrency {
                        key: "MAX_CONCURRENT_INCREMENTS",
                        value,
                    });
                }
            },
            None => 1,
        };

        Ok(Self {
            addr,
            store,
            summary_table: lookup("SUMMARY_TABLE").unwrap_or_else(|| DEFAULT_SUMMARY_TABLE.to_string()),
            dynamodb_endpoint_url: lookup("DYNAMODB_ENDPOINT_URL"),
            max_concurrent_increments,
        })
    }
}
