use connect_four::{connect_store, DomainError, ErrorCode, StoreConfig};
use migration::{count_applied_migrations, Migrator, MigratorTrait};

use crate::support::test_state::sqlite_store;

#[tokio::test]
async fn test_memory_config_starts_empty() -> Result<(), DomainError> {
    let state = connect_store(&StoreConfig::memory()).await?;
    assert!(state.games.list_games().await?.is_empty());
    assert!(state.players.list_players().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_sql_config_runs_migrations() -> Result<(), DomainError> {
    let state = connect_store(&StoreConfig::sql("sqlite::memory:")).await?;
    assert!(state.games.list_games().await?.is_empty());

    let store = sqlite_store().await?;
    let applied = count_applied_migrations(store.connection()).await?;
    assert_eq!(applied, Migrator::migrations().len());
    Ok(())
}

#[tokio::test]
async fn test_unreachable_database_is_store_unavailable() {
    let config = StoreConfig::sql("sqlite:///nonexistent-dir/c4/games.db?mode=ro");
    let err = connect_store(&config).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::StoreUnavailable);
}

#[tokio::test]
async fn test_feed_capacity_comes_from_config() -> Result<(), DomainError> {
    let mut config = StoreConfig::memory();
    config.feed_capacity = 2;
    let state = connect_store(&config).await?;

    let mut subscription = state.feed.subscribe_all();
    for name in ["Ann", "Ben", "Cid"] {
        state.players.create_player(name).await?;
    }
    // capacity 2: the oldest event was overwritten and is skipped
    let first = subscription.recv().await.expect("feed open");
    let player = state.players.find_player(&first.id).await?.expect("exists");
    assert_eq!(player.name, "Ben");
    Ok(())
}
