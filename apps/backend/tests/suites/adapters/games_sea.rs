// SeaORM game adapter tests against migrated in-memory SQLite.

use connect_four::adapters::games_sea::{self, GameGuardedUpdate, GameInsert};
use connect_four::adapters::players_sea;
use connect_four::entities::games::DbGameStatus;
use connect_four::infra::db_errors::map_db_err;
use connect_four::repos::GameStore;
use connect_four::{DomainError, ErrorCode};
use sea_orm::DbErr;

use crate::support::test_state::sqlite_store;

fn insert(id: &str, player1_id: &str, player2_id: &str) -> GameInsert {
    GameInsert {
        id: id.to_string(),
        board: serde_json::to_string(&vec![0u8; 42]).unwrap_or_default(),
        status: DbGameStatus::Invite,
        player1_id: player1_id.to_string(),
        player2_id: player2_id.to_string(),
    }
}

#[tokio::test]
async fn test_guarded_update_bumps_version() -> Result<(), DomainError> {
    let store = sqlite_store().await?;
    let db = store.connection();
    players_sea::create_player(db, "p1".into(), "Ann").await?;
    players_sea::create_player(db, "p2".into(), "Ben").await?;
    let created = games_sea::create_game(db, insert("g1", "p1", "p2")).await?;
    assert_eq!(created.lock_version, 1);

    let updated = games_sea::update_game(
        db,
        GameGuardedUpdate {
            id: "g1".into(),
            expected_status: DbGameStatus::Invite,
            expected_lock_version: 1,
            board: None,
            status: Some(DbGameStatus::Player2Turn),
        },
    )
    .await?;

    assert_eq!(updated.lock_version, 2);
    assert_eq!(updated.status, DbGameStatus::Player2Turn);
    assert_eq!(updated.board, created.board);
    Ok(())
}

#[tokio::test]
async fn test_guard_mismatch_reports_lock_payload() -> Result<(), DomainError> {
    let store = sqlite_store().await?;
    let db = store.connection();
    players_sea::create_player(db, "p1".into(), "Ann").await?;
    players_sea::create_player(db, "p2".into(), "Ben").await?;
    games_sea::create_game(db, insert("g1", "p1", "p2")).await?;

    let err: DbErr = games_sea::update_game(
        db,
        GameGuardedUpdate {
            id: "g1".into(),
            expected_status: DbGameStatus::Player1Turn,
            expected_lock_version: 1,
            board: None,
            status: Some(DbGameStatus::Player2Turn),
        },
    )
    .await
    .unwrap_err();

    match &err {
        DbErr::Custom(msg) => {
            assert!(msg.starts_with("OPTIMISTIC_LOCK:"), "{msg}");
            assert!(msg.contains("\"actual_status\":\"invite\""), "{msg}");
        }
        other => panic!("expected custom error, got {other:?}"),
    }
    let domain = map_db_err(err);
    assert_eq!(domain.code(), ErrorCode::OptimisticLock);
    assert!(domain.to_string().contains("found invite at version 1"), "{domain}");
    Ok(())
}

#[tokio::test]
async fn test_unknown_player_reference_is_rejected() -> Result<(), DomainError> {
    let store = sqlite_store().await?;
    let db = store.connection();
    players_sea::create_player(db, "p1".into(), "Ann").await?;

    let err = games_sea::create_game(db, insert("g1", "p1", "ghost"))
        .await
        .unwrap_err();
    assert_eq!(map_db_err(err).code(), ErrorCode::PlayerNotFound);
    assert!(games_sea::find_by_id(db, "g1").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_undecodable_board_is_data_corruption() -> Result<(), DomainError> {
    let store = sqlite_store().await?;
    let db = store.connection();
    players_sea::create_player(db, "p1".into(), "Ann").await?;
    players_sea::create_player(db, "p2".into(), "Ben").await?;
    let mut row = insert("g1", "p1", "p2");
    row.board = "[1,2,3]".into();
    games_sea::create_game(db, row).await?;

    let err = store.find_by_id("g1").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::DataCorruption);
    assert!(store.list_games().await.is_err());
    Ok(())
}
