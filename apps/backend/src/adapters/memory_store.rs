//! In-process store for single-owner deployments and tests.
//!
//! Every read-check-write runs inside one mutex critical section, so a
//! conditional update observes exactly the state it replaces.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use time::OffsetDateTime;
use tracing::debug;
use ulid::Ulid;

use crate::domain::status::GameStatus;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::realtime::{ChangeEvent, ChangeFeed};
use crate::repos::{Game, GameCreate, GameStore, GameUpdate, Player, PlayerStore};

#[derive(Debug, Default)]
struct Tables {
    players: BTreeMap<String, Player>,
    games: BTreeMap<String, Game>,
}

#[derive(Debug)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    feed: ChangeFeed,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new(feed: ChangeFeed) -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            feed,
            offline: AtomicBool::new(false),
        }
    }

    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    /// Make every call fail with `StoreUnavailable` until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), DomainError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(DomainError::infra(
                InfraErrorKind::StoreUnavailable,
                "memory store is offline",
            ));
        }
        Ok(())
    }

    /// Locate `id` and check it is still in the expected status (and version,
    /// when given). Distinguishes NotFound from a lost race.
    fn check_guard<'a>(
        games: &'a mut BTreeMap<String, Game>,
        id: &str,
        expected_status: GameStatus,
        expected_version: Option<i32>,
    ) -> Result<&'a mut Game, DomainError> {
        let game = games.get_mut(id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("Game {id} not found"))
        })?;
        let version_matches = expected_version.is_none_or(|v| v == game.lock_version);
        if game.status != expected_status || !version_matches {
            return Err(DomainError::conflict(
                ConflictKind::OptimisticLock,
                format!(
                    "Game {id} changed concurrently: expected {expected_status} (version {expected_version:?}), found {} (version {})",
                    game.status, game.lock_version
                ),
            ));
        }
        Ok(game)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(ChangeFeed::default())
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn find_by_id(&self, game_id: &str) -> Result<Option<Game>, DomainError> {
        self.ensure_online()?;
        Ok(self.tables.lock().games.get(game_id).cloned())
    }

    async fn create_game(&self, dto: GameCreate) -> Result<Game, DomainError> {
        self.ensure_online()?;
        let now = OffsetDateTime::now_utc();
        let game = Game {
            id: Ulid::new().to_string(),
            board: dto.board,
            status: dto.status,
            player1_id: dto.player1_id,
            player2_id: dto.player2_id,
            created_at: now,
            updated_at: now,
            lock_version: 1,
        };

        let mut tables = self.tables.lock();
        tables.games.insert(game.id.clone(), game.clone());
        self.feed.publish(ChangeEvent::game(&game));
        drop(tables);

        debug!(game_id = %game.id, "memory store created game");
        Ok(game)
    }

    async fn update_game(&self, dto: GameUpdate) -> Result<Game, DomainError> {
        self.ensure_online()?;
        let mut tables = self.tables.lock();
        let game = Self::check_guard(
            &mut tables.games,
            &dto.id,
            dto.expected_status,
            Some(dto.expected_version),
        )?;

        if let Some(board) = dto.board {
            game.board = board;
        }
        if let Some(status) = dto.status {
            game.status = status;
        }
        game.lock_version += 1;
        game.updated_at = OffsetDateTime::now_utc();

        let updated = game.clone();
        self.feed.publish(ChangeEvent::game(&updated));
        Ok(updated)
    }

    async fn delete_game(
        &self,
        game_id: &str,
        expected_status: GameStatus,
    ) -> Result<(), DomainError> {
        self.ensure_online()?;
        let mut tables = self.tables.lock();
        Self::check_guard(&mut tables.games, game_id, expected_status, None)?;
        tables.games.remove(game_id);
        self.feed.publish(ChangeEvent::game_deleted(game_id));
        Ok(())
    }

    async fn list_games(&self) -> Result<Vec<Game>, DomainError> {
        self.ensure_online()?;
        let mut games: Vec<Game> = self.tables.lock().games.values().cloned().collect();
        games.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(games)
    }
}

#[async_trait]
impl PlayerStore for MemoryStore {
    async fn find_player(&self, player_id: &str) -> Result<Option<Player>, DomainError> {
        self.ensure_online()?;
        Ok(self.tables.lock().players.get(player_id).cloned())
    }

    async fn create_player(&self, name: &str) -> Result<Player, DomainError> {
        self.ensure_online()?;
        let player = Player {
            id: Ulid::new().to_string(),
            name: name.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };

        let mut tables = self.tables.lock();
        tables.players.insert(player.id.clone(), player.clone());
        self.feed.publish(ChangeEvent::player(&player));
        Ok(player)
    }

    async fn list_players(&self) -> Result<Vec<Player>, DomainError> {
        self.ensure_online()?;
        let mut players: Vec<Player> = self.tables.lock().players.values().cloned().collect();
        players.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(players)
    }
}
