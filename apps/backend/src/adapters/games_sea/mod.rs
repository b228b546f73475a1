//! SeaORM adapter for game repository - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::games::{self, DbGameStatus};

// Adapter functions return DbErr; the store maps to DomainError via map_db_err.

/// Column values for a new game row. The board is already JSON-encoded.
#[derive(Debug, Clone)]
pub struct GameInsert {
    pub id: String,
    pub board: String,
    pub status: DbGameStatus,
    pub player1_id: String,
    pub player2_id: String,
}

/// Column values for a guarded update.
#[derive(Debug, Clone)]
pub struct GameGuardedUpdate {
    pub id: String,
    pub expected_status: DbGameStatus,
    pub expected_lock_version: i32,
    pub board: Option<String>,
    pub status: Option<DbGameStatus>,
}

/// Build the `OPTIMISTIC_LOCK:` error payload understood by `map_db_err`.
fn optimistic_lock_error(
    expected_status: DbGameStatus,
    expected_lock_version: Option<i32>,
    actual: &games::Model,
) -> sea_orm::DbErr {
    let payload = serde_json::json!({
        "expected_status": expected_status.to_value(),
        "expected": expected_lock_version,
        "actual_status": actual.status.to_value(),
        "actual": actual.lock_version,
    });
    sea_orm::DbErr::Custom(format!("OPTIMISTIC_LOCK:{payload}"))
}

fn game_not_found(id: &str) -> sea_orm::DbErr {
    sea_orm::DbErr::Custom(format!("GAME_NOT_FOUND:{id}"))
}

/// Helper: Apply optimistic update with status + lock version check, then refetch.
///
/// - Adds lock_version increment and updated_at to the update
/// - Filters by id, expected status and expected lock_version
/// - Checks rows_affected to distinguish NotFound vs OptimisticLock
/// - Refetches and returns the updated model
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: &str,
    expected_status: DbGameStatus,
    expected_lock_version: i32,
    configure_update: F,
) -> Result<games::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(sea_orm::UpdateMany<games::Entity>) -> sea_orm::UpdateMany<games::Entity>,
{
    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(games::Entity::update_many())
        .col_expr(games::Column::UpdatedAt, Expr::value(now))
        .col_expr(
            games::Column::LockVersion,
            Expr::col(games::Column::LockVersion).add(1),
        )
        .filter(games::Column::Id.eq(id))
        .filter(games::Column::Status.eq(expected_status))
        .filter(games::Column::LockVersion.eq(expected_lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        // Either the game doesn't exist or the guard doesn't match
        return match find_by_id(conn, id).await? {
            Some(game) => Err(optimistic_lock_error(
                expected_status,
                Some(expected_lock_version),
                &game,
            )),
            None => Err(game_not_found(id)),
        };
    }

    require_game(conn, id).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id.to_string()).one(conn).await
}

/// Find game by ID or return a `GAME_NOT_FOUND` error.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<games::Model, sea_orm::DbErr> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| game_not_found(game_id))
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameInsert,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let game_active = games::ActiveModel {
        id: Set(dto.id),
        board: Set(dto.board),
        status: Set(dto.status),
        player1_id: Set(dto.player1_id),
        player2_id: Set(dto.player2_id),
        created_at: Set(now),
        updated_at: Set(now),
        lock_version: Set(1),
    };

    game_active.insert(conn).await
}

/// Update board and/or status, guarded by status and lock version.
pub async fn update_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameGuardedUpdate,
) -> Result<games::Model, sea_orm::DbErr> {
    optimistic_update_then_fetch(
        conn,
        &dto.id,
        dto.expected_status,
        dto.expected_lock_version,
        |mut update| {
            if let Some(board) = dto.board {
                update = update.col_expr(games::Column::Board, Expr::value(board));
            }
            if let Some(status) = dto.status {
                update = update.col_expr(games::Column::Status, Expr::value(status));
            }
            update
        },
    )
    .await
}

/// Delete a game only while it is in `expected_status`.
pub async fn delete_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
    expected_status: DbGameStatus,
) -> Result<(), sea_orm::DbErr> {
    let delete_result = games::Entity::delete_many()
        .filter(games::Column::Id.eq(id))
        .filter(games::Column::Status.eq(expected_status))
        .exec(conn)
        .await?;

    if delete_result.rows_affected == 0 {
        return match find_by_id(conn, id).await? {
            Some(game) => Err(optimistic_lock_error(expected_status, None, &game)),
            None => Err(game_not_found(id)),
        };
    }

    Ok(())
}

pub async fn list_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .order_by_asc(games::Column::CreatedAt)
        .order_by_asc(games::Column::Id)
        .all(conn)
        .await
}
