//! Change notifications for the `players` and `games` collections.

pub mod feed;

pub use feed::{
    ChangeEvent, ChangeFeed, Collection, DocumentChange, FeedSubscription, DEFAULT_FEED_CAPACITY,
};
