//! Store implementations.

pub mod games_sea;
pub mod memory_store;
pub mod players_sea;
pub mod sea_store;

pub use memory_store::MemoryStore;
pub use sea_store::SeaStore;
