//! Game flow service - applies player actions to sessions.
//!
//! Every accepted action is exactly one conditional write; rejected actions
//! never touch the store.

mod invites;
mod mutation;
mod player_actions;

pub use mutation::GameFlowMutationResult;

/// Game flow service. Stateless; the store comes from the `AppState` passed
/// to each call.
#[derive(Debug, Default, Clone, Copy)]
pub struct GameFlowService;

impl GameFlowService {
    pub fn new() -> Self {
        Self
    }
}
