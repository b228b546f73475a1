//! Services: validate player actions against the domain and persist them
//! through the stores held by [`crate::AppState`].

pub mod game_flow;
pub mod lobby;
pub mod players;
