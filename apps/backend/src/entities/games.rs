use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::status::GameStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum DbGameStatus {
    #[sea_orm(string_value = "invite")]
    Invite,
    #[sea_orm(string_value = "player1_turn")]
    Player1Turn,
    #[sea_orm(string_value = "player2_turn")]
    Player2Turn,
    #[sea_orm(string_value = "player1_won")]
    Player1Won,
    #[sea_orm(string_value = "player2_won")]
    Player2Won,
    #[sea_orm(string_value = "draw")]
    Draw,
}

impl From<GameStatus> for DbGameStatus {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::Invite => DbGameStatus::Invite,
            GameStatus::Player1Turn => DbGameStatus::Player1Turn,
            GameStatus::Player2Turn => DbGameStatus::Player2Turn,
            GameStatus::Player1Won => DbGameStatus::Player1Won,
            GameStatus::Player2Won => DbGameStatus::Player2Won,
            GameStatus::Draw => DbGameStatus::Draw,
        }
    }
}

impl From<DbGameStatus> for GameStatus {
    fn from(status: DbGameStatus) -> Self {
        match status {
            DbGameStatus::Invite => GameStatus::Invite,
            DbGameStatus::Player1Turn => GameStatus::Player1Turn,
            DbGameStatus::Player2Turn => GameStatus::Player2Turn,
            DbGameStatus::Player1Won => GameStatus::Player1Won,
            DbGameStatus::Player2Won => GameStatus::Player2Won,
            DbGameStatus::Draw => GameStatus::Draw,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// JSON array of 42 cell codes.
    #[sea_orm(column_type = "Text")]
    pub board: String,
    pub status: DbGameStatus,
    #[sea_orm(column_name = "player1_id")]
    pub player1_id: String,
    #[sea_orm(column_name = "player2_id")]
    pub player2_id: String,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::players::Entity",
        from = "Column::Player1Id",
        to = "super::players::Column::Id"
    )]
    Player1,
    #[sea_orm(
        belongs_to = "super::players::Entity",
        from = "Column::Player2Id",
        to = "super::players::Column::Id"
    )]
    Player2,
}

impl ActiveModelBehavior for ActiveModel {}
