//! SeaORM adapter for player repository - generic over ConnectionTrait.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};

use crate::entities::players;

// Adapter functions return DbErr; the store maps to DomainError via map_db_err.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id.to_string())
        .one(conn)
        .await
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: String,
    name: &str,
) -> Result<players::Model, sea_orm::DbErr> {
    let player_active = players::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    player_active.insert(conn).await
}

pub async fn list_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .order_by_asc(players::Column::CreatedAt)
        .order_by_asc(players::Column::Id)
        .all(conn)
        .await
}
