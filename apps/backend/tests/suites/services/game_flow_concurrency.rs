use connect_four::domain::{Board, Cell, GameStatus};
use connect_four::repos::games::require_game;
use connect_four::repos::GameUpdate;
use connect_four::{DomainError, ErrorCode, GameFlowService};

use crate::support::factory::{register_pair, seed_game, started_game};
use crate::support::test_backends;

#[tokio::test]
async fn test_stale_write_is_rejected_and_winner_kept() -> Result<(), DomainError> {
    for (backend, state) in test_backends().await? {
        let (game, _alice, bob) = started_game(&state).await?;

        let winner = GameFlowService::new()
            .submit_move(&state, &game.id, &bob.id, 3)
            .await?
            .final_game;

        // a second writer still holding the pre-move snapshot
        let stale = GameUpdate::guarded_by(&game)
            .with_board(game.board.with_mark(5, 0, Cell::Player2))
            .with_status(GameStatus::Player1Turn);
        let err = state.games.update_game(stale).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::OptimisticLock, "{backend}");

        let stored = require_game(state.games.as_ref(), &game.id).await?;
        assert_eq!(stored, winner, "{backend}");
    }
    Ok(())
}

#[tokio::test]
async fn test_status_guard_alone_rejects_write() -> Result<(), DomainError> {
    for (backend, state) in test_backends().await? {
        let (alice, bob) = register_pair(&state).await?;
        let game = seed_game(&state, &alice, &bob, GameStatus::Player1Turn, Board::empty()).await?;

        let mut update = GameUpdate::guarded_by(&game).with_status(GameStatus::Player2Turn);
        update.expected_status = GameStatus::Player2Turn;
        let err = state.games.update_game(update).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::OptimisticLock, "{backend}");
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_submits_accept_exactly_one() -> Result<(), DomainError> {
    for (backend, state) in test_backends().await? {
        let (game, _alice, bob) = started_game(&state).await?;

        let mut handles = Vec::new();
        for column in 0..7 {
            let state = state.clone();
            let game_id = game.id.clone();
            let bob_id = bob.id.clone();
            handles.push(tokio::spawn(async move {
                GameFlowService::new()
                    .submit_move(&state, &game_id, &bob_id, column)
                    .await
            }));
        }

        let mut accepted = 0;
        for handle in handles {
            match handle.await.expect("task panicked") {
                Ok(_) => accepted += 1,
                Err(err) => assert!(
                    matches!(err.code(), ErrorCode::OptimisticLock | ErrorCode::NotYourTurn),
                    "{backend}: unexpected rejection {err}"
                ),
            }
        }
        assert_eq!(accepted, 1, "{backend}");

        let stored = require_game(state.games.as_ref(), &game.id).await?;
        assert_eq!(stored.board.count(Cell::Player2), 1, "{backend}");
        assert_eq!(stored.status, GameStatus::Player1Turn, "{backend}");
        assert_eq!(stored.lock_version, game.lock_version + 1, "{backend}");
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_accepts_start_game_once() -> Result<(), DomainError> {
    for (backend, state) in test_backends().await? {
        let (alice, bob) = register_pair(&state).await?;
        let invite = GameFlowService::new()
            .create_invite(&state, &alice.id, &bob.id)
            .await?;

        let attempts = (0..4).map(|_| {
            let state = state.clone();
            let invite_id = invite.id.clone();
            let bob_id = bob.id.clone();
            tokio::spawn(async move {
                GameFlowService::new()
                    .accept_invite(&state, &invite_id, &bob_id)
                    .await
            })
        });
        let results = futures::future::join_all(attempts).await;
        let accepted = results
            .into_iter()
            .map(|r| r.expect("task panicked"))
            .filter(Result::is_ok)
            .count();
        assert_eq!(accepted, 1, "{backend}");
    }
    Ok(())
}
