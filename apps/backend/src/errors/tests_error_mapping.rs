// Unit tests for DomainError -> ErrorCode mapping
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::ErrorCode;

#[test]
fn maps_move_validation() {
    let cases = [
        (ValidationKind::NotYourTurn, ErrorCode::NotYourTurn),
        (ValidationKind::InvalidColumn, ErrorCode::InvalidColumn),
        (ValidationKind::ColumnFull, ErrorCode::ColumnFull),
        (ValidationKind::PhaseMismatch, ErrorCode::PhaseMismatch),
        (
            ValidationKind::Other("whatever".into()),
            ErrorCode::ValidationError,
        ),
    ];
    for (kind, code) in cases {
        assert_eq!(DomainError::validation(kind, "x").code(), code);
    }
}

#[test]
fn maps_conflicts() {
    let lock = DomainError::conflict(ConflictKind::OptimisticLock, "stale");
    assert_eq!(lock.code().as_str(), "OPTIMISTIC_LOCK");

    let other = DomainError::conflict(ConflictKind::Other("x".into()), "generic");
    assert_eq!(other.code().as_str(), "CONFLICT");
}

#[test]
fn maps_not_found() {
    let game = DomainError::not_found(NotFoundKind::Game, "no game");
    assert_eq!(game.code(), ErrorCode::GameNotFound);
    assert!(game.is_not_found());

    let player = DomainError::not_found(NotFoundKind::Player, "no player");
    assert_eq!(player.code(), ErrorCode::PlayerNotFound);
}

#[test]
fn maps_infra() {
    let down = DomainError::infra(InfraErrorKind::StoreUnavailable, "down");
    assert_eq!(down.code().as_str(), "STORE_UNAVAILABLE");
    assert!(!down.is_not_found());

    let corrupt = DomainError::infra(InfraErrorKind::DataCorruption, "bad board");
    assert_eq!(corrupt.code(), ErrorCode::DataCorruption);
}

#[test]
fn display_includes_detail() {
    let err = DomainError::validation(ValidationKind::ColumnFull, "column 3 is full");
    assert!(err.to_string().contains("column 3 is full"));
}
