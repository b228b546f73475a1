//! Session status and the transition table over it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::board::{Cell, Outcome};
use crate::errors::domain::{DomainError, InfraErrorKind};

/// One of the two participants of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    Player1,
    Player2,
}

impl Seat {
    /// Mark this seat places on the board.
    pub fn mark(self) -> Cell {
        match self {
            Seat::Player1 => Cell::Player1,
            Seat::Player2 => Cell::Player2,
        }
    }

    pub fn other(self) -> Seat {
        match self {
            Seat::Player1 => Seat::Player2,
            Seat::Player2 => Seat::Player1,
        }
    }

    fn turn(self) -> GameStatus {
        match self {
            Seat::Player1 => GameStatus::Player1Turn,
            Seat::Player2 => GameStatus::Player2Turn,
        }
    }
}

/// Phase of a session.
///
/// `Player1Won`, `Player2Won` and `Draw` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Invite,
    Player1Turn,
    Player2Turn,
    Player1Won,
    Player2Won,
    Draw,
}

impl GameStatus {
    pub const ALL: [GameStatus; 6] = [
        GameStatus::Invite,
        GameStatus::Player1Turn,
        GameStatus::Player2Turn,
        GameStatus::Player1Won,
        GameStatus::Player2Won,
        GameStatus::Draw,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Player1Won | GameStatus::Player2Won | GameStatus::Draw
        )
    }

    /// True while a player is expected to move.
    pub fn is_live(self) -> bool {
        self.seat_to_move().is_some()
    }

    /// Seat whose turn this status names.
    pub fn seat_to_move(self) -> Option<Seat> {
        match self {
            GameStatus::Player1Turn => Some(Seat::Player1),
            GameStatus::Player2Turn => Some(Seat::Player2),
            _ => None,
        }
    }

    /// Status after the player to move dropped a piece and the board
    /// evaluated to `outcome`. `None` if no move is legal in this status.
    pub fn after_move(self, outcome: Outcome) -> Option<GameStatus> {
        let mover = self.seat_to_move()?;
        let next = match outcome {
            Outcome::Ongoing => mover.other().turn(),
            Outcome::Player1 => GameStatus::Player1Won,
            Outcome::Player2 => GameStatus::Player2Won,
            Outcome::Draw => GameStatus::Draw,
        };
        Some(next)
    }

    /// Status after the invitee accepts. The invitee moves first.
    pub fn after_accept(self) -> Option<GameStatus> {
        match self {
            GameStatus::Invite => Some(GameStatus::Player2Turn),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::Invite => "invite",
            GameStatus::Player1Turn => "player1_turn",
            GameStatus::Player2Turn => "player2_turn",
            GameStatus::Player1Won => "player1_won",
            GameStatus::Player2Won => "player2_won",
            GameStatus::Draw => "draw",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("unknown game status '{s}'"),
                )
            })
    }
}
