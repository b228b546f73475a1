use tracing::{debug, info};

use super::{GameFlowMutationResult, GameFlowService};
use crate::domain::board::{evaluate, resolve_drop, COLS};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::games::require_game;
use crate::state::app_state::AppState;

impl GameFlowService {
    /// Drop a piece for `player_id` into `column`.
    ///
    /// Checks run in a fixed order (turn, column range, column space) and any
    /// failure returns before the store is written. A concurrent write that
    /// lands first makes this call fail with `OPTIMISTIC_LOCK`.
    pub async fn submit_move(
        &self,
        state: &AppState,
        game_id: &str,
        player_id: &str,
        column: i32,
    ) -> Result<GameFlowMutationResult, DomainError> {
        debug!(game_id, player_id, column, "Submitting move");

        let game = require_game(state.games.as_ref(), game_id).await?;

        let seat = match game.status.seat_to_move() {
            Some(seat) if game.player_id(seat) == player_id => seat,
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::NotYourTurn,
                    format!(
                        "Player {player_id} cannot move in game {game_id} (status {})",
                        game.status
                    ),
                ))
            }
        };

        let col = usize::try_from(column)
            .ok()
            .filter(|c| *c < COLS)
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidColumn,
                    format!("Column must be in 0..{COLS}, got {column}"),
                )
            })?;

        let row = resolve_drop(&game.board, col).ok_or_else(|| {
            DomainError::validation(ValidationKind::ColumnFull, format!("Column {col} is full"))
        })?;

        let board = game.board.with_mark(row, col, seat.mark());
        let outcome = evaluate(&board);
        let next_status = game.status.after_move(outcome).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("No move is possible in status {}", game.status),
            )
        })?;

        let result = self
            .run_mutation(state, &game, |update| {
                update.with_board(board).with_status(next_status)
            })
            .await?;

        info!(
            game_id,
            player_id,
            column,
            row,
            status = %result.final_game.status,
            lock_version = result.final_version(),
            "Move persisted"
        );

        Ok(result)
    }
}
