//! SeaORM-backed store. Works against any connection sea-orm was built for.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::debug;
use ulid::Ulid;

use crate::adapters::games_sea::{self, GameGuardedUpdate, GameInsert};
use crate::adapters::players_sea;
use crate::domain::board::Board;
use crate::domain::status::GameStatus;
use crate::entities::{games, players};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::db_errors::map_db_err;
use crate::realtime::{ChangeEvent, ChangeFeed};
use crate::repos::{Game, GameCreate, GameStore, GameUpdate, Player, PlayerStore};

#[derive(Debug, Clone)]
pub struct SeaStore {
    db: DatabaseConnection,
    feed: ChangeFeed,
}

impl SeaStore {
    /// Wrap an already migrated connection.
    pub fn new(db: DatabaseConnection, feed: ChangeFeed) -> Self {
        Self { db, feed }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }
}

fn encode_board(board: &Board) -> Result<String, DomainError> {
    serde_json::to_string(board).map_err(|e| {
        DomainError::infra(InfraErrorKind::Other("Serialize".into()), e.to_string())
    })
}

impl TryFrom<games::Model> for Game {
    type Error = DomainError;

    fn try_from(model: games::Model) -> Result<Self, Self::Error> {
        let board: Board = serde_json::from_str(&model.board).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Game {} has an unreadable board: {e}", model.id),
            )
        })?;
        Ok(Game {
            id: model.id,
            board,
            status: model.status.into(),
            player1_id: model.player1_id,
            player2_id: model.player2_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            lock_version: model.lock_version,
        })
    }
}

impl From<players::Model> for Player {
    fn from(model: players::Model) -> Self {
        Player {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl GameStore for SeaStore {
    async fn find_by_id(&self, game_id: &str) -> Result<Option<Game>, DomainError> {
        let model = games_sea::find_by_id(&self.db, game_id)
            .await
            .map_err(map_db_err)?;
        model.map(Game::try_from).transpose()
    }

    async fn create_game(&self, dto: GameCreate) -> Result<Game, DomainError> {
        let insert = GameInsert {
            id: Ulid::new().to_string(),
            board: encode_board(&dto.board)?,
            status: dto.status.into(),
            player1_id: dto.player1_id,
            player2_id: dto.player2_id,
        };
        let model = games_sea::create_game(&self.db, insert)
            .await
            .map_err(map_db_err)?;
        let game = Game::try_from(model)?;

        debug!(game_id = %game.id, status = %game.status, "sql store created game");
        self.feed.publish(ChangeEvent::game(&game));
        Ok(game)
    }

    async fn update_game(&self, dto: GameUpdate) -> Result<Game, DomainError> {
        let update = GameGuardedUpdate {
            id: dto.id,
            expected_status: dto.expected_status.into(),
            expected_lock_version: dto.expected_version,
            board: dto.board.as_ref().map(encode_board).transpose()?,
            status: dto.status.map(Into::into),
        };
        let model = games_sea::update_game(&self.db, update)
            .await
            .map_err(map_db_err)?;
        let game = Game::try_from(model)?;

        self.feed.publish(ChangeEvent::game(&game));
        Ok(game)
    }

    async fn delete_game(
        &self,
        game_id: &str,
        expected_status: GameStatus,
    ) -> Result<(), DomainError> {
        games_sea::delete_game(&self.db, game_id, expected_status.into())
            .await
            .map_err(map_db_err)?;

        self.feed.publish(ChangeEvent::game_deleted(game_id));
        Ok(())
    }

    async fn list_games(&self) -> Result<Vec<Game>, DomainError> {
        games_sea::list_games(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(Game::try_from)
            .collect()
    }
}

#[async_trait]
impl PlayerStore for SeaStore {
    async fn find_player(&self, player_id: &str) -> Result<Option<Player>, DomainError> {
        let model = players_sea::find_by_id(&self.db, player_id)
            .await
            .map_err(map_db_err)?;
        Ok(model.map(Player::from))
    }

    async fn create_player(&self, name: &str) -> Result<Player, DomainError> {
        let model = players_sea::create_player(&self.db, Ulid::new().to_string(), name)
            .await
            .map_err(map_db_err)?;
        let player = Player::from(model);

        self.feed.publish(ChangeEvent::player(&player));
        Ok(player)
    }

    async fn list_players(&self) -> Result<Vec<Player>, DomainError> {
        let models = players_sea::list_players(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(models.into_iter().map(Player::from).collect())
    }
}
