#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Connect Four session core: board rules, game lifecycle and the stores
//! sessions are persisted in.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod entities;
pub mod errors;
pub mod infra;
pub mod realtime;
pub mod repos;
pub mod services;
pub mod state;
pub mod telemetry;

// Re-exports for public API
pub use adapters::{MemoryStore, SeaStore};
pub use config::store::{ConfigError, StoreBackend, StoreConfig};
pub use errors::{DomainError, ErrorCode};
pub use infra::store::connect_store;
pub use realtime::{ChangeEvent, ChangeFeed, Collection, DocumentChange};
pub use services::game_flow::{GameFlowMutationResult, GameFlowService};
pub use services::lobby::{GameView, LobbyService, LobbyView, OpponentRelation};
pub use services::players::PlayerService;
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
