//! Game-facing logic
//!
//! `api` wraps each GraphQL operation for one account; `driver` plays the
//! tap loop on top of it.

pub mod api;
pub mod driver;

pub use api::{BoosterKind, GameApi};
pub use driver::{next_action, Action, Driver, GameView};
