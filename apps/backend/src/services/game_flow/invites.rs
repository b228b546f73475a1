use tracing::{debug, info};

use super::{GameFlowMutationResult, GameFlowService};
use crate::domain::status::{GameStatus, Seat};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::games::{find_for_player, require_game};
use crate::repos::players::require_player;
use crate::repos::{Game, GameCreate};
use crate::state::app_state::AppState;

fn require_invite(game: &Game) -> Result<(), DomainError> {
    if game.status != GameStatus::Invite {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("Game {} is not an open invite (status {})", game.id, game.status),
        ));
    }
    Ok(())
}

impl GameFlowService {
    /// Challenge `target_id` to a new game. The challenger becomes player 1.
    pub async fn create_invite(
        &self,
        state: &AppState,
        challenger_id: &str,
        target_id: &str,
    ) -> Result<Game, DomainError> {
        debug!(challenger_id, target_id, "Creating invite");

        futures::try_join!(
            require_player(state.players.as_ref(), challenger_id),
            require_player(state.players.as_ref(), target_id),
        )?;

        if challenger_id == target_id {
            return Err(DomainError::validation(
                ValidationKind::SelfChallenge,
                "Players cannot challenge themselves",
            ));
        }

        let pending = find_for_player(state.games.as_ref(), challenger_id)
            .await?
            .into_iter()
            .find(|g| g.status == GameStatus::Invite && g.involves(target_id));
        if let Some(existing) = pending {
            return Err(DomainError::validation(
                ValidationKind::InviteExists,
                format!(
                    "Invite {} between {challenger_id} and {target_id} is still pending",
                    existing.id
                ),
            ));
        }

        let game = state
            .games
            .create_game(GameCreate::invite(challenger_id, target_id))
            .await?;

        info!(game_id = %game.id, challenger_id, target_id, "Invite created");
        Ok(game)
    }

    /// Start the game. Only the invited player may accept, and they move first.
    pub async fn accept_invite(
        &self,
        state: &AppState,
        game_id: &str,
        player_id: &str,
    ) -> Result<GameFlowMutationResult, DomainError> {
        let game = require_game(state.games.as_ref(), game_id).await?;
        require_invite(&game)?;

        if game.seat_of(player_id) != Some(Seat::Player2) {
            return Err(DomainError::validation(
                ValidationKind::NotYourTurn,
                format!("Only the invited player may accept game {game_id}"),
            ));
        }

        let next_status = game.status.after_accept().ok_or_else(|| {
            DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("Game {game_id} cannot be accepted"),
            )
        })?;

        let result = self
            .run_mutation(state, &game, |update| update.with_status(next_status))
            .await?;

        info!(game_id, player_id, "Invite accepted");
        Ok(result)
    }

    /// Remove an open invite. The invited player declines; the challenger
    /// may withdraw.
    pub async fn decline_invite(
        &self,
        state: &AppState,
        game_id: &str,
        player_id: &str,
    ) -> Result<(), DomainError> {
        let game = require_game(state.games.as_ref(), game_id).await?;
        require_invite(&game)?;

        if !game.involves(player_id) {
            return Err(DomainError::validation(
                ValidationKind::NotYourTurn,
                format!("Player {player_id} is not part of game {game_id}"),
            ));
        }

        state.games.delete_game(game_id, GameStatus::Invite).await?;

        info!(game_id, player_id, "Invite declined");
        Ok(())
    }
}
