//! WebSocket feed adapter - tokio-tungstenite implementation of `EventFeed`.

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info};

use crate::ports::{EventFeed, FeedError};

/// `EventFeed` over a live WebSocket connection.
///
/// The feed is consume-only: frames are read, nothing is written back.
/// Reconnection is out of scope; any read error ends the session.
pub struct WsEventFeed {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsEventFeed {
    /// Dials the feed URL. The auth token is expected to already be encoded
    /// in the URL's query string.
    pub async fn connect(url: &str) -> Result<Self, FeedError> {
        let (stream, _) = connect_async(url)
            .await
            .map_err(|err| FeedError::Connect(err.to_string()))?;
        info!("connected to real-time feed");
        Ok(Self { stream })
    }
}

#[async_trait]
impl EventFeed for WsEventFeed {
    async fn next_frame(&mut self) -> Result<Option<String>, FeedError> {
        loop {
            match self.stream.next().await {
                None => return Ok(None),
                Some(Ok(Message::Text(text))) => return Ok(Some(text)),
                Some(Ok(Message::Close(_))) => return Ok(None),
                Some(Ok(other)) => {
                    // Pings, pongs and binary frames carry no events.
                    debug!(frame = ?other, "skipping non-text frame");
                }
                Some(Err(err)) => return Err(FeedError::Read(err.to_string())),
            }
        }
    }
}
