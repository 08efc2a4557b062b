//! EventFeed port - the real-time message source.

use async_trait::async_trait;
use thiserror::Error;

/// Failures of the real-time feed. Any of these ends the session: the feed is
/// the sole source of external input and there is no reconnection policy.
#[derive(Debug, Clone, Error)]
pub enum FeedError {
    #[error("Failed to establish feed connection: {0}")]
    Connect(String),

    #[error("Failed to read from feed: {0}")]
    Read(String),
}

/// Port for consuming framed text messages from the real-time feed.
///
/// The feed is read-only from the core's perspective; nothing is ever sent
/// back through it.
#[async_trait]
pub trait EventFeed: Send {
    /// Next framed text message, `Ok(None)` once the peer closes the feed.
    async fn next_frame(&mut self) -> Result<Option<String>, FeedError>;
}
