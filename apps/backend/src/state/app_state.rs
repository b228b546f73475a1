use std::sync::Arc;

use crate::adapters::MemoryStore;
use crate::realtime::ChangeFeed;
use crate::repos::{GameStore, PlayerStore};

/// Shared handles every service call runs against.
#[derive(Clone)]
pub struct AppState {
    pub games: Arc<dyn GameStore>,
    pub players: Arc<dyn PlayerStore>,
    /// Change feed the stores publish to.
    pub feed: ChangeFeed,
}

/// Implemented by stores that serve both collections and publish to a feed.
pub trait SharedStore: GameStore + PlayerStore + 'static {
    fn change_feed(&self) -> &ChangeFeed;
}

impl SharedStore for MemoryStore {
    fn change_feed(&self) -> &ChangeFeed {
        self.feed()
    }
}

impl SharedStore for crate::adapters::SeaStore {
    fn change_feed(&self) -> &ChangeFeed {
        self.feed()
    }
}

impl AppState {
    pub fn new(
        games: Arc<dyn GameStore>,
        players: Arc<dyn PlayerStore>,
        feed: ChangeFeed,
    ) -> Self {
        Self {
            games,
            players,
            feed,
        }
    }

    /// State backed by a single store serving both collections.
    pub fn from_store<S: SharedStore>(store: Arc<S>) -> Self {
        let feed = store.change_feed().clone();
        Self {
            games: store.clone(),
            players: store,
            feed,
        }
    }

    /// Fresh in-memory state with the default feed capacity.
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::default()))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("feed_subscribers", &self.feed.subscriber_count())
            .finish_non_exhaustive()
    }
}
