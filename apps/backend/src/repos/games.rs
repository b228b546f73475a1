//! Game repository: domain model, write DTOs and the store trait.

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::board::Board;
use crate::domain::status::{GameStatus, Seat};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Game domain model
///
/// One session between two players. Converted from whatever representation
/// the backing store uses when loaded through a [`GameStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: String,
    pub board: Board,
    pub status: GameStatus,
    pub player1_id: String,
    pub player2_id: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    /// Bumped by the store on every write.
    pub lock_version: i32,
}

impl Game {
    /// Seat `player_id` occupies in this game, if any.
    pub fn seat_of(&self, player_id: &str) -> Option<Seat> {
        if self.player1_id == player_id {
            Some(Seat::Player1)
        } else if self.player2_id == player_id {
            Some(Seat::Player2)
        } else {
            None
        }
    }

    pub fn player_id(&self, seat: Seat) -> &str {
        match seat {
            Seat::Player1 => &self.player1_id,
            Seat::Player2 => &self.player2_id,
        }
    }

    pub fn involves(&self, player_id: &str) -> bool {
        self.seat_of(player_id).is_some()
    }

    /// Player id whose turn the current status names.
    pub fn player_to_move(&self) -> Option<&str> {
        self.status.seat_to_move().map(|seat| self.player_id(seat))
    }
}

/// DTO for creating a new game.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub player1_id: String,
    pub player2_id: String,
    pub status: GameStatus,
    pub board: Board,
}

impl GameCreate {
    /// Invite from `challenger_id` to `target_id` on an empty board.
    pub fn invite(challenger_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            player1_id: challenger_id.into(),
            player2_id: target_id.into(),
            status: GameStatus::Invite,
            board: Board::empty(),
        }
    }

    pub fn with_status(mut self, status: GameStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }
}

/// Conditional update of a game.
///
/// Applied only if the stored game still has `expected_status` and
/// `expected_version`; board and status change together or not at all.
#[derive(Debug, Clone)]
pub struct GameUpdate {
    pub id: String,
    pub expected_status: GameStatus,
    pub expected_version: i32,
    pub board: Option<Board>,
    pub status: Option<GameStatus>,
}

impl GameUpdate {
    /// Update guarded by the state `game` was loaded in.
    pub fn guarded_by(game: &Game) -> Self {
        Self {
            id: game.id.clone(),
            expected_status: game.status,
            expected_version: game.lock_version,
            board: None,
            status: None,
        }
    }

    pub fn with_board(mut self, board: Board) -> Self {
        self.board = Some(board);
        self
    }

    pub fn with_status(mut self, status: GameStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[async_trait]
pub trait GameStore: Send + Sync {
    async fn find_by_id(&self, game_id: &str) -> Result<Option<Game>, DomainError>;

    /// Insert a new game; the store assigns the id.
    async fn create_game(&self, dto: GameCreate) -> Result<Game, DomainError>;

    /// Compare-and-swap update.
    ///
    /// Fails with `NotFound(Game)` if the game is gone and with
    /// `Conflict(OptimisticLock)` if its status or version moved on.
    async fn update_game(&self, dto: GameUpdate) -> Result<Game, DomainError>;

    /// Delete a game still in `expected_status`. Same failure modes as
    /// [`GameStore::update_game`].
    async fn delete_game(&self, game_id: &str, expected_status: GameStatus)
        -> Result<(), DomainError>;

    async fn list_games(&self) -> Result<Vec<Game>, DomainError>;
}

/// Find game by ID or return error if not found.
pub async fn require_game(store: &dyn GameStore, game_id: &str) -> Result<Game, DomainError> {
    store.find_by_id(game_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
    })
}

/// All games `player_id` takes part in.
pub async fn find_for_player(
    store: &dyn GameStore,
    player_id: &str,
) -> Result<Vec<Game>, DomainError> {
    let games = store.list_games().await?;
    Ok(games.into_iter().filter(|g| g.involves(player_id)).collect())
}
