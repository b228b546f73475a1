use connect_four::domain::GameStatus;
use connect_four::repos::GameCreate;
use connect_four::{DomainError, ErrorCode, GameFlowService, PlayerService};

use crate::support::factory::register_pair;
use crate::support::test_state::memory_store_state;

#[tokio::test]
async fn test_offline_store_surfaces_store_unavailable() -> Result<(), DomainError> {
    let (store, state) = memory_store_state();
    let (alice, bob) = register_pair(&state).await?;
    let invite = GameFlowService::new()
        .create_invite(&state, &alice.id, &bob.id)
        .await?;

    store.set_offline(true);

    let err = GameFlowService::new()
        .accept_invite(&state, &invite.id, &bob.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::StoreUnavailable);

    let err = PlayerService::new()
        .register_player(&state, "Carol")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::StoreUnavailable);

    assert!(state.games.list_games().await.is_err());
    assert!(state
        .games
        .create_game(GameCreate::invite(&alice.id, &bob.id))
        .await
        .is_err());

    store.set_offline(false);

    let accepted = GameFlowService::new()
        .accept_invite(&state, &invite.id, &bob.id)
        .await?;
    assert_eq!(accepted.final_game.status, GameStatus::Player2Turn);
    assert_eq!(state.games.list_games().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_state_shares_the_store_feed() -> Result<(), DomainError> {
    let (store, state) = memory_store_state();
    let _subscription = state.feed.subscribe_all();
    assert_eq!(store.feed().subscriber_count(), 1);
    Ok(())
}
