use serde::Serialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::repos::{Game, Player};

pub const DEFAULT_FEED_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Players,
    Games,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentChange {
    Player(Player),
    Game(Game),
    Deleted,
}

/// One created, updated or deleted document.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub collection: Collection,
    pub id: String,
    pub change: DocumentChange,
}

impl ChangeEvent {
    pub fn player(player: &Player) -> Self {
        Self {
            collection: Collection::Players,
            id: player.id.clone(),
            change: DocumentChange::Player(player.clone()),
        }
    }

    pub fn game(game: &Game) -> Self {
        Self {
            collection: Collection::Games,
            id: game.id.clone(),
            change: DocumentChange::Game(game.clone()),
        }
    }

    pub fn game_deleted(game_id: &str) -> Self {
        Self {
            collection: Collection::Games,
            id: game_id.to_string(),
            change: DocumentChange::Deleted,
        }
    }
}

/// Fan-out of store changes to any number of subscribers.
///
/// Stores publish after a write has been applied. Delivery is independent of
/// the writer's own completion, so a subscriber may see a change before the
/// call that caused it returns.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, event: ChangeEvent) {
        debug!(collection = ?event.collection, id = %event.id, "publishing change");
        // no subscribers is fine
        let _ = self.sender.send(event);
    }

    /// Subscribe to changes in one collection.
    pub fn subscribe(&self, collection: Collection) -> FeedSubscription {
        FeedSubscription {
            receiver: self.sender.subscribe(),
            collection: Some(collection),
        }
    }

    /// Subscribe to changes in every collection.
    pub fn subscribe_all(&self) -> FeedSubscription {
        FeedSubscription {
            receiver: self.sender.subscribe(),
            collection: None,
        }
    }

    /// Run `callback` for each change in `collection` on a background task.
    ///
    /// The task ends when the feed is dropped or the handle is aborted.
    pub fn on_change<F>(&self, collection: Collection, mut callback: F) -> JoinHandle<()>
    where
        F: FnMut(ChangeEvent) + Send + 'static,
    {
        let mut subscription = self.subscribe(collection);
        tokio::spawn(async move {
            while let Some(event) = subscription.recv().await {
                callback(event);
            }
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_CAPACITY)
    }
}

pub struct FeedSubscription {
    receiver: broadcast::Receiver<ChangeEvent>,
    collection: Option<Collection>,
}

impl FeedSubscription {
    /// Next matching change, or `None` once the feed is closed.
    ///
    /// A subscriber that falls behind skips the events it missed and keeps
    /// going; callers reload documents they care about.
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => {
                    if self.collection.is_none_or(|c| c == event.collection) {
                        return Some(event);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "change feed subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next matching change if one is already queued.
    pub fn try_recv(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.collection.is_none_or(|c| c == event.collection) {
                        return Some(event);
                    }
                }
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "change feed subscriber lagged");
                }
                Err(_) => return None,
            }
        }
    }
}
