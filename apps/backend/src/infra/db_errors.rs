//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; the store converts it here so services
//! only ever see `DomainError`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

#[derive(serde::Deserialize)]
struct LockInfo {
    expected_status: String,
    expected: Option<i32>,
    actual_status: String,
    actual: i32,
}

/// Only games reference another table, so a violation always means a
/// missing player.
fn is_foreign_key_violation(e: &sea_orm::DbErr) -> bool {
    let msg = e.to_string();
    msg.contains("FOREIGN KEY constraint failed")
        || msg.contains("violates foreign key constraint")
        || msg.contains("23503")
}

/// Translate a `DbErr` into a `DomainError`.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    match &e {
        sea_orm::DbErr::RecordNotFound(detail) => {
            DomainError::not_found(NotFoundKind::Other("Record".into()), detail.clone())
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with("GAME_NOT_FOUND:") => {
            let game_id = msg.trim_start_matches("GAME_NOT_FOUND:");
            warn!(game_id, "Game not found");
            DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with("OPTIMISTIC_LOCK:") => {
            let json_str = msg.trim_start_matches("OPTIMISTIC_LOCK:");
            match serde_json::from_str::<LockInfo>(json_str) {
                Ok(info) => {
                    warn!(
                        expected_status = %info.expected_status,
                        expected = ?info.expected,
                        actual_status = %info.actual_status,
                        actual = info.actual,
                        "Optimistic lock conflict detected"
                    );
                    DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "Game was modified concurrently (expected {} at version {:?}, found {} at version {}). Reload and retry.",
                            info.expected_status, info.expected, info.actual_status, info.actual
                        ),
                    )
                }
                Err(_) => {
                    warn!("Optimistic lock conflict detected (version info unavailable)");
                    DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        "Game was modified concurrently; reload and retry",
                    )
                }
            }
        }
        sea_orm::DbErr::Json(detail) | sea_orm::DbErr::Type(detail) => {
            error!(raw_error = %detail, "Stored row could not be decoded");
            DomainError::infra(InfraErrorKind::DataCorruption, detail.clone())
        }
        _ if is_foreign_key_violation(&e) => {
            warn!(raw_error = %e, "Foreign key violation");
            DomainError::not_found(
                NotFoundKind::Player,
                "Game references a player that does not exist",
            )
        }
        _ => {
            error!(raw_error = %e, "Store operation failed");
            DomainError::infra(InfraErrorKind::StoreUnavailable, e.to_string())
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
