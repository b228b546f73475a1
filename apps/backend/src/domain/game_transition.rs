// apps/backend/src/domain/game_transition.rs

use crate::domain::status::{GameStatus, Seat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLifecycleView {
    pub version: i32,
    pub status: GameStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    /// Edge-triggered: the turn passed to a specific seat.
    TurnBecame { seat: Seat },

    /// Edge-triggered: Game moved from Invite -> a player's turn
    GameStarted,

    /// Edge-triggered: Game reached a terminal status
    GameEnded { status: GameStatus },
}

/// Derive domain transitions from before/after lifecycle state.
pub fn derive_game_transitions(
    before: &GameLifecycleView,
    after: &GameLifecycleView,
) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    // 1. Game start (Invite -> live)
    if before.status == GameStatus::Invite && after.status.is_live() {
        transitions.push(GameTransition::GameStarted);
    }

    // 2. Turn change
    if let Some(seat) = after.status.seat_to_move() {
        if before.status.seat_to_move() != Some(seat) {
            transitions.push(GameTransition::TurnBecame { seat });
        }
    }

    // 3. Game end (!terminal -> terminal)
    if !before.status.is_terminal() && after.status.is_terminal() {
        transitions.push(GameTransition::GameEnded {
            status: after.status,
        });
    }

    transitions
}
