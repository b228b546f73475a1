//! Player registry service.

use tracing::info;

use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::players::require_player;
use crate::repos::Player;
use crate::state::app_state::AppState;

#[derive(Debug, Default, Clone, Copy)]
pub struct PlayerService;

impl PlayerService {
    pub fn new() -> Self {
        Self
    }

    /// Register a player under `name`, trimmed. Blank names are rejected.
    pub async fn register_player(
        &self,
        state: &AppState,
        name: &str,
    ) -> Result<Player, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::BlankName,
                "Player name must not be blank",
            ));
        }

        let player = state.players.create_player(name).await?;
        info!(player_id = %player.id, name = %player.name, "Player registered");
        Ok(player)
    }

    pub async fn find_player(
        &self,
        state: &AppState,
        player_id: &str,
    ) -> Result<Player, DomainError> {
        require_player(state.players.as_ref(), player_id).await
    }

    /// All players in registration order.
    pub async fn list_players(&self, state: &AppState) -> Result<Vec<Player>, DomainError> {
        state.players.list_players().await
    }
}
