//! Error codes for the session core.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE.

use core::fmt;

/// Centralized error codes.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that callers
/// may surface or log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Move validation
    /// Acting player does not hold the turn
    NotYourTurn,
    /// Column index outside 0..7
    InvalidColumn,
    /// Column has no empty row
    ColumnFull,
    /// Action not allowed in the current status
    PhaseMismatch,

    // Lifecycle validation
    /// Player name empty after trimming
    BlankName,
    /// Challenger and target are the same player
    SelfChallenge,
    /// An invite between the two players is already pending
    InviteExists,
    /// General validation error
    ValidationError,

    // Resource Not Found
    GameNotFound,
    PlayerNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Conditional write lost against a concurrent write
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Read or write to the external store failed
    StoreUnavailable,
    /// Stored document could not be decoded
    DataCorruption,
    Internal,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 16] = [
        Self::NotYourTurn,
        Self::InvalidColumn,
        Self::ColumnFull,
        Self::PhaseMismatch,
        Self::BlankName,
        Self::SelfChallenge,
        Self::InviteExists,
        Self::ValidationError,
        Self::GameNotFound,
        Self::PlayerNotFound,
        Self::NotFound,
        Self::OptimisticLock,
        Self::Conflict,
        Self::StoreUnavailable,
        Self::DataCorruption,
        Self::Internal,
    ];

    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::InvalidColumn => "INVALID_COLUMN",
            Self::ColumnFull => "COLUMN_FULL",
            Self::PhaseMismatch => "PHASE_MISMATCH",

            Self::BlankName => "BLANK_NAME",
            Self::SelfChallenge => "SELF_CHALLENGE",
            Self::InviteExists => "INVITE_EXISTS",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
