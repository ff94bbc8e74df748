// Composition root for the user_summaries bounded context.
//
// Responsibilities
// - Read config from environment.
// - Instantiate the configured summary store.
// - Wire the store into the aggregator and expose it over HTTP.

pub mod config;
pub mod http;
pub mod state;
