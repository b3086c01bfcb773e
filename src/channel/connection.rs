//! WebSocket connection with tokio-tungstenite.

use crate::base::error::ChatError;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::{connect_async, tungstenite, MaybeTlsStream, WebSocketStream};
use url::Url;

/// Type alias for the WebSocket stream.
type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A single bidirectional text channel.
///
/// Cloneable handle around a split WebSocket stream; clones share the same
/// underlying connection so one task may receive while another sends.
#[derive(Clone)]
pub struct Channel {
    sink: Arc<Mutex<SplitSink<WsStream, tungstenite::Message>>>,
    stream: Arc<Mutex<SplitStream<WsStream>>>,
    url: Url,
}

impl Channel {
    /// Connect to a chat server.
    ///
    /// # Example
    /// ```ignore
    /// let channel = Channel::connect("ws://localhost:3000").await?;
    /// ```
    pub async fn connect(url: &str) -> Result<Self, ChatError> {
        let url = Url::parse(url).map_err(|_| ChatError::InvalidUrl)?;

        // Validate scheme
        if url.scheme() != "ws" && url.scheme() != "wss" {
            return Err(ChatError::InvalidUrl);
        }

        let (ws_stream, _response) = connect_async(url.as_str()).await.map_err(|e| {
            tracing::debug!("channel connect error: {:?}", e);
            ChatError::ConnectionFailed
        })?;

        let (sink, stream) = ws_stream.split();

        Ok(Self {
            sink: Arc::new(Mutex::new(sink)),
            stream: Arc::new(Mutex::new(stream)),
            url,
        })
    }

    /// Get the URL this channel is connected to.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Send a bare text frame. The payload goes out verbatim, with no
    /// envelope on the send path.
    pub async fn send_text(&self, text: impl Into<String>) -> Result<(), ChatError> {
        let mut sink = self.sink.lock().await;
        sink.send(tungstenite::Message::Text(text.into()))
            .await
            .map_err(|e| {
                tracing::debug!("channel send error: {:?}", e);
                ChatError::ConnectionClosed
            })
    }

    /// Receive the next text payload.
    ///
    /// Binary frames are decoded as UTF-8 (lossily); ping/pong frames are
    /// skipped. Returns `None` once the peer closes the connection.
    pub async fn recv_text(&self) -> Result<Option<String>, ChatError> {
        let mut stream = self.stream.lock().await;
        loop {
            match stream.next().await {
                Some(Ok(tungstenite::Message::Text(text))) => return Ok(Some(text)),
                Some(Ok(tungstenite::Message::Binary(bytes))) => {
                    return Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
                }
                Some(Ok(tungstenite::Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    tracing::debug!("channel recv error: {:?}", e);
                    return Err(ChatError::ConnectionClosed);
                }
            }
        }
    }

    /// Send a close frame. The remote end completes the closing handshake,
    /// which surfaces to the receive side as end-of-stream.
    pub async fn close(&self) -> Result<(), ChatError> {
        let mut sink = self.sink.lock().await;
        sink.send(tungstenite::Message::Close(None))
            .await
            .map_err(|e| {
                tracing::debug!("channel close error: {:?}", e);
                ChatError::ConnectionClosed
            })
    }
}
