//! Player repository: domain model and store trait.

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub created_at: OffsetDateTime,
}

#[async_trait]
pub trait PlayerStore: Send + Sync {
    async fn find_player(&self, player_id: &str) -> Result<Option<Player>, DomainError>;

    /// Insert a player; the store assigns the id.
    async fn create_player(&self, name: &str) -> Result<Player, DomainError>;

    async fn list_players(&self) -> Result<Vec<Player>, DomainError>;
}

/// Find player by ID or return error if not found.
pub async fn require_player(
    store: &dyn PlayerStore,
    player_id: &str,
) -> Result<Player, DomainError> {
    store.find_player(player_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Player, format!("Player {player_id} not found"))
    })
}
