//! Tapgrind - Tap-Game Automation Client
//!
//! A multi-account automation client for a tap-based mini-game, written in
//! Rust.
//!
//! ## Features
//!
//! - Rotating outbound proxy pool with startup liveness validation
//! - Uniform retry-and-failover executor around every network call
//! - Per-account GraphQL login, state queries, tap batches, and boosters
//! - Bounded-concurrency account processing that loops indefinitely
//! - Randomized browser-like request headers per call

pub mod client;
pub mod config;
pub mod error;
pub mod game;
pub mod models;
pub mod pool;
pub mod repository;
pub mod runner;

pub use config::Config;
pub use error::{BotError, Result};
