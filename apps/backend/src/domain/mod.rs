//! Domain layer: pure game logic types and helpers.

pub mod board;
pub mod game_transition;
pub mod player_view;
pub mod status;

pub use board::{evaluate, resolve_drop, Board, Cell, Outcome, COLS, ROWS};
pub use status::{GameStatus, Seat};
