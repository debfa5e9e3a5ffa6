//! Application Services

mod activity_feed;

pub use activity_feed::{ActivityChannel, ActivityEntry, ActivityFeed};
