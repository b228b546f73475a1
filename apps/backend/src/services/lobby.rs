//! Lobby queries: who a player can challenge and what they are playing.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::board::{Board, Cell};
use crate::domain::player_view::{outcome_text, SeatView};
use crate::domain::status::{GameStatus, Seat};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::games::{find_for_player, require_game};
use crate::repos::players::require_player;
use crate::repos::{Game, Player};
use crate::state::app_state::AppState;

/// How another player relates to the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpponentRelation {
    None,
    /// The viewer challenged them; the game id of the pending invite.
    InviteSent(String),
    /// They challenged the viewer.
    InviteReceived(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpponentEntry {
    pub player: Player,
    pub relation: OpponentRelation,
}

/// A session as one of its participants sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct GameView {
    pub game_id: String,
    pub status: GameStatus,
    pub board: Board,
    pub my_seat: Seat,
    pub my_mark: Cell,
    pub is_my_turn: bool,
    pub opponent_id: String,
    pub outcome_text: Option<String>,
    pub lock_version: i32,
}

impl GameView {
    /// `None` if `viewer_id` does not take part in `game`.
    pub fn for_player(
        game: &Game,
        viewer_id: &str,
        player1_name: &str,
        player2_name: &str,
    ) -> Option<Self> {
        let seat = game.seat_of(viewer_id)?;
        let view = SeatView::new(game.status, seat);
        Some(Self {
            game_id: game.id.clone(),
            status: game.status,
            board: game.board,
            my_seat: seat,
            my_mark: view.my_mark,
            is_my_turn: view.is_my_turn,
            opponent_id: game.player_id(seat.other()).to_string(),
            outcome_text: outcome_text(game.status, player1_name, player2_name),
            lock_version: game.lock_version,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LobbyView {
    pub player: Player,
    pub opponents: Vec<OpponentEntry>,
    /// Game the player is currently taking turns in, if any.
    pub live_game: Option<GameView>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LobbyService;

impl LobbyService {
    pub fn new() -> Self {
        Self
    }

    pub async fn lobby_for(
        &self,
        state: &AppState,
        player_id: &str,
    ) -> Result<LobbyView, DomainError> {
        let (player, players, games) = futures::try_join!(
            require_player(state.players.as_ref(), player_id),
            state.players.list_players(),
            find_for_player(state.games.as_ref(), player_id),
        )?;

        let names: HashMap<&str, &str> = players
            .iter()
            .map(|p| (p.id.as_str(), p.name.as_str()))
            .collect();

        let opponents = players
            .iter()
            .filter(|p| p.id != player_id)
            .map(|other| OpponentEntry {
                player: other.clone(),
                relation: relation_to(&games, player_id, &other.id),
            })
            .collect();

        let live_game = games.iter().find(|g| g.status.is_live()).and_then(|g| {
            GameView::for_player(
                g,
                player_id,
                display_name(&names, &g.player1_id),
                display_name(&names, &g.player2_id),
            )
        });

        debug!(
            player_id,
            opponents = players.len().saturating_sub(1),
            has_live_game = live_game.is_some(),
            "Lobby loaded"
        );

        Ok(LobbyView {
            player,
            opponents,
            live_game,
        })
    }

    /// View of one game for `player_id`, with player names resolved.
    pub async fn game_view(
        &self,
        state: &AppState,
        game_id: &str,
        player_id: &str,
    ) -> Result<GameView, DomainError> {
        let game = require_game(state.games.as_ref(), game_id).await?;
        let (player1, player2) = futures::try_join!(
            require_player(state.players.as_ref(), &game.player1_id),
            require_player(state.players.as_ref(), &game.player2_id),
        )?;

        GameView::for_player(&game, player_id, &player1.name, &player2.name).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::NotYourTurn,
                format!("Player {player_id} is not part of game {game_id}"),
            )
        })
    }
}

fn display_name<'a>(names: &HashMap<&'a str, &'a str>, id: &'a str) -> &'a str {
    names.get(id).copied().unwrap_or(id)
}

fn relation_to(games: &[Game], viewer_id: &str, other_id: &str) -> OpponentRelation {
    let invite = games
        .iter()
        .find(|g| g.status == GameStatus::Invite && g.involves(other_id));
    match invite {
        Some(game) if game.player1_id == viewer_id => OpponentRelation::InviteSent(game.id.clone()),
        Some(game) => OpponentRelation::InviteReceived(game.id.clone()),
        None => OpponentRelation::None,
    }
}
