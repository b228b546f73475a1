//! Repository traits for the domain layer.
//!
//! The session controller talks to the document store only through these
//! traits. Implementations live in `crate::adapters`.

pub mod games;
pub mod players;

pub use games::{Game, GameCreate, GameStore, GameUpdate};
pub use players::{Player, PlayerStore};
