//! What a single participant sees of a session.

use crate::domain::board::Cell;
use crate::domain::status::{GameStatus, Seat};

/// Per-viewer facts derived from the session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatView {
    pub seat: Seat,
    pub my_mark: Cell,
    pub is_my_turn: bool,
}

impl SeatView {
    pub fn new(status: GameStatus, seat: Seat) -> Self {
        Self {
            seat,
            my_mark: seat.mark(),
            is_my_turn: status.seat_to_move() == Some(seat),
        }
    }
}

/// Banner for a finished session; `None` while it is still open.
pub fn outcome_text(status: GameStatus, player1_name: &str, player2_name: &str) -> Option<String> {
    match status {
        GameStatus::Draw => Some("Draw!".to_string()),
        GameStatus::Player1Won => Some(format!("{player1_name} wins!")),
        GameStatus::Player2Won => Some(format!("{player2_name} wins!")),
        GameStatus::Invite | GameStatus::Player1Turn | GameStatus::Player2Turn => None,
    }
}
