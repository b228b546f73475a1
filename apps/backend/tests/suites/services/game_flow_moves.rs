use connect_four::domain::{Board, Cell, GameStatus};
use connect_four::domain::game_transition::GameTransition;
use connect_four::domain::Seat;
use connect_four::repos::games::require_game;
use connect_four::{DomainError, ErrorCode, GameFlowService};

use crate::support::factory::{drawn_board_codes, play, register_pair, seed_game, started_game};
use crate::support::test_backends;

#[tokio::test]
async fn test_first_drop_lands_on_bottom_row() -> Result<(), DomainError> {
    for (backend, state) in test_backends().await? {
        let (alice, bob) = register_pair(&state).await?;
        let game = seed_game(&state, &alice, &bob, GameStatus::Player1Turn, Board::empty()).await?;

        let result = GameFlowService::new()
            .submit_move(&state, &game.id, &alice.id, 0)
            .await?;

        let after = result.final_game;
        assert_eq!(after.board.cells()[35], Cell::Player1, "{backend}");
        assert_eq!(after.board.count(Cell::Player1), 1, "{backend}");
        assert_eq!(after.status, GameStatus::Player2Turn, "{backend}");
        assert_eq!(after.lock_version, game.lock_version + 1, "{backend}");
        assert_eq!(result.old_version, game.lock_version);
        assert_eq!(
            result.transitions,
            vec![GameTransition::TurnBecame { seat: Seat::Player2 }]
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_vertical_four_wins_for_player1() -> Result<(), DomainError> {
    for (backend, state) in test_backends().await? {
        let (alice, bob) = register_pair(&state).await?;
        let mut codes = vec![0u8; 42];
        for idx in [35, 28, 21] {
            codes[idx] = 1;
        }
        for idx in [41, 34, 40] {
            codes[idx] = 2;
        }
        let board = Board::from_codes(&codes)?;
        let game = seed_game(&state, &alice, &bob, GameStatus::Player1Turn, board).await?;

        let result = GameFlowService::new()
            .submit_move(&state, &game.id, &alice.id, 0)
            .await?;

        assert_eq!(result.final_game.board.cells()[14], Cell::Player1, "{backend}");
        assert_eq!(result.final_game.status, GameStatus::Player1Won, "{backend}");
        assert_eq!(
            result.transitions,
            vec![GameTransition::GameEnded {
                status: GameStatus::Player1Won
            }]
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_last_empty_cell_without_alignment_draws() -> Result<(), DomainError> {
    for (backend, state) in test_backends().await? {
        let (alice, bob) = register_pair(&state).await?;
        let mut codes = drawn_board_codes();
        // top of column 6 belongs to player 2
        assert_eq!(codes[6], 2);
        codes[6] = 0;
        let game = seed_game(
            &state,
            &alice,
            &bob,
            GameStatus::Player2Turn,
            Board::from_codes(&codes)?,
        )
        .await?;

        let after = GameFlowService::new()
            .submit_move(&state, &game.id, &bob.id, 6)
            .await?
            .final_game;

        assert!(after.board.is_full(), "{backend}");
        assert_eq!(after.status, GameStatus::Draw, "{backend}");
    }
    Ok(())
}

#[tokio::test]
async fn test_played_out_game_reaches_player1_win() -> Result<(), DomainError> {
    for (backend, state) in test_backends().await? {
        let (game, alice, bob) = started_game(&state).await?;
        assert_eq!(game.status, GameStatus::Player2Turn);

        let finished = play(
            &state,
            &game.id,
            &[
                (&bob, 6),
                (&alice, 0),
                (&bob, 6),
                (&alice, 0),
                (&bob, 6),
                (&alice, 0),
                (&bob, 5),
                (&alice, 0),
            ],
        )
        .await?;

        assert_eq!(finished.status, GameStatus::Player1Won, "{backend}");
        for idx in [35, 28, 21, 14] {
            assert_eq!(finished.board.cells()[idx], Cell::Player1, "{backend} idx {idx}");
        }
        assert_eq!(finished.board.count(Cell::Player2), 4);
    }
    Ok(())
}

#[tokio::test]
async fn test_wrong_player_is_rejected_without_write() -> Result<(), DomainError> {
    for (backend, state) in test_backends().await? {
        let (alice, bob) = register_pair(&state).await?;
        let game = seed_game(&state, &alice, &bob, GameStatus::Player1Turn, Board::empty()).await?;

        let err = GameFlowService::new()
            .submit_move(&state, &game.id, &bob.id, 3)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotYourTurn, "{backend}");

        let stored = require_game(state.games.as_ref(), &game.id).await?;
        assert_eq!(stored, game, "{backend}: rejected move must not write");
    }
    Ok(())
}

#[tokio::test]
async fn test_outsider_cannot_move() -> Result<(), DomainError> {
    let state = crate::support::build_test_state().await?;
    let (game, _alice, _bob) = started_game(&state).await?;
    let outsider = crate::support::factory::register(&state, "Mallory").await?;

    let err = GameFlowService::new()
        .submit_move(&state, &game.id, &outsider.id, 0)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotYourTurn);
    Ok(())
}

#[tokio::test]
async fn test_column_out_of_range_is_rejected() -> Result<(), DomainError> {
    for (backend, state) in test_backends().await? {
        let (game, _alice, bob) = started_game(&state).await?;
        let service = GameFlowService::new();

        for column in [-1, 7, 100, i32::MIN] {
            let err = service
                .submit_move(&state, &game.id, &bob.id, column)
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidColumn, "{backend} column {column}");
        }

        let stored = require_game(state.games.as_ref(), &game.id).await?;
        assert_eq!(stored.lock_version, game.lock_version, "{backend}");
    }
    Ok(())
}

#[tokio::test]
async fn test_full_column_is_rejected() -> Result<(), DomainError> {
    for (backend, state) in test_backends().await? {
        let (alice, bob) = register_pair(&state).await?;
        let mut codes = vec![0u8; 42];
        for row in 0..6 {
            codes[row * 7 + 2] = if row % 2 == 0 { 1 } else { 2 };
        }
        let game = seed_game(
            &state,
            &alice,
            &bob,
            GameStatus::Player1Turn,
            Board::from_codes(&codes)?,
        )
        .await?;

        let err = GameFlowService::new()
            .submit_move(&state, &game.id, &alice.id, 2)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ColumnFull, "{backend}");

        let stored = require_game(state.games.as_ref(), &game.id).await?;
        assert_eq!(stored.board, game.board, "{backend}");
    }
    Ok(())
}

#[tokio::test]
async fn test_terminal_games_reject_every_move() -> Result<(), DomainError> {
    let state = crate::support::build_test_state().await?;
    let (alice, bob) = register_pair(&state).await?;
    let service = GameFlowService::new();

    for status in [GameStatus::Player1Won, GameStatus::Player2Won, GameStatus::Draw] {
        let game = seed_game(&state, &alice, &bob, status, Board::empty()).await?;
        for player in [&alice, &bob] {
            let err = service
                .submit_move(&state, &game.id, &player.id, 0)
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::NotYourTurn, "{status}");
        }
        let err = service
            .accept_invite(&state, &game.id, &bob.id)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::PhaseMismatch, "{status}");
        let err = service
            .decline_invite(&state, &game.id, &bob.id)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::PhaseMismatch, "{status}");

        let stored = require_game(state.games.as_ref(), &game.id).await?;
        assert_eq!(stored, game);
    }
    Ok(())
}

#[tokio::test]
async fn test_moving_in_an_invite_is_rejected() -> Result<(), DomainError> {
    let state = crate::support::build_test_state().await?;
    let (alice, bob) = register_pair(&state).await?;
    let invite = GameFlowService::new()
        .create_invite(&state, &alice.id, &bob.id)
        .await?;

    for player in [&alice, &bob] {
        let err = GameFlowService::new()
            .submit_move(&state, &invite.id, &player.id, 0)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotYourTurn);
    }
    Ok(())
}

#[tokio::test]
async fn test_missing_game_is_not_found() -> Result<(), DomainError> {
    for (backend, state) in test_backends().await? {
        let (alice, _bob) = register_pair(&state).await?;
        let err = GameFlowService::new()
            .submit_move(&state, "01HZZZZZZZZZZZZZZZZZZZZZZZ", &alice.id, 0)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::GameNotFound, "{backend}");
        assert!(err.is_not_found());
    }
    Ok(())
}
