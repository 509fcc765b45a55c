//! Outbound request plumbing
//!
//! This module provides the network-facing half of the bot:
//! - GraphQL payload construction
//! - Randomized browser-like headers
//! - A resilient executor that retries every call through fresh proxies

pub mod executor;
pub mod graphql;
pub mod headers;
pub mod queries;

pub use executor::{Executor, HttpTransport, RequestSpec, Transport};
pub use graphql::GraphqlRequest;
