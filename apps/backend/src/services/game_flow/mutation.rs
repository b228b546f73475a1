use crate::domain::game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
use crate::errors::domain::DomainError;
use crate::repos::{Game, GameUpdate};
use crate::services::game_flow::GameFlowService;
use crate::state::app_state::AppState;

#[derive(Debug, Clone)]
pub struct GameFlowMutationResult {
    pub final_game: Game,
    pub old_version: i32,
    pub transitions: Vec<GameTransition>,
}

impl GameFlowMutationResult {
    pub fn final_version(&self) -> i32 {
        self.final_game.lock_version
    }
}

fn lifecycle_view(game: &Game) -> GameLifecycleView {
    GameLifecycleView {
        version: game.lock_version,
        status: game.status,
    }
}

impl GameFlowService {
    /// Persist a change to `before` as one compare-and-swap keyed by the
    /// status and version it was loaded with.
    pub(super) async fn run_mutation<F>(
        &self,
        state: &AppState,
        before: &Game,
        configure_update: F,
    ) -> Result<GameFlowMutationResult, DomainError>
    where
        F: FnOnce(GameUpdate) -> GameUpdate,
    {
        let update = configure_update(GameUpdate::guarded_by(before));
        let final_game = state.games.update_game(update).await?;

        let transitions =
            derive_game_transitions(&lifecycle_view(before), &lifecycle_view(&final_game));

        Ok(GameFlowMutationResult {
            final_game,
            old_version: before.lock_version,
            transitions,
        })
    }
}
