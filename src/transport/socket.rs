//! Frame-oriented socket transport
//!
//! Each connection runs [`serve_connection`] in its own task. Frames on one
//! connection are handled strictly in arrival order: the next frame is not read
//! until the previous response has been written.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::ws::{Message as WsMessage, WebSocket};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::errors::TransportError;
use crate::mcp::context::{RequestContext, TransportKind};
use crate::mcp::server::McpServer;

/// One inbound unit read from a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A protocol document.
    Data(Vec<u8>),
    /// Ping/pong and other frames carrying no document.
    Control,
    /// The peer closed the connection or the stream ended.
    Close,
}

#[async_trait]
pub trait FrameConnection: Send {
    async fn recv_frame(&mut self) -> Result<Frame, TransportError>;
    async fn send_frame(&mut self, payload: String) -> Result<(), TransportError>;
}

#[async_trait]
impl FrameConnection for WebSocket {
    async fn recv_frame(&mut self) -> Result<Frame, TransportError> {
        let frame = match self.recv().await {
            None => Frame::Close,
            Some(Err(err)) => return Err(err.into()),
            Some(Ok(WsMessage::Text(text))) => Frame::Data(text.as_str().as_bytes().to_vec()),
            Some(Ok(WsMessage::Binary(bytes))) => Frame::Data(bytes.to_vec()),
            Some(Ok(WsMessage::Ping(_) | WsMessage::Pong(_))) => Frame::Control,
            Some(Ok(WsMessage::Close(_))) => Frame::Close,
        };
        Ok(frame)
    }

    async fn send_frame(&mut self, payload: String) -> Result<(), TransportError> {
        self.send(WsMessage::Text(payload.into())).await?;
        Ok(())
    }
}

/// Drives one connection until the peer disconnects, an I/O error occurs, or
/// `shutdown` fires. The session context is cancelled on every exit path.
pub async fn serve_connection<C>(server: Arc<McpServer>, mut connection: C, shutdown: CancellationToken)
where
    C: FrameConnection,
{
    let session_token = shutdown.child_token();
    let _cancel_on_exit = session_token.clone().drop_guard();
    let ctx = RequestContext::new(TransportKind::WebSocket, session_token);

    info!(session = ctx.session_id(), "socket session opened");

    match run_session(&server, &mut connection, &ctx).await {
        Ok(()) => info!(session = ctx.session_id(), "socket session closed"),
        Err(err) => warn!(
            session = ctx.session_id(),
            error = %err,
            "socket session ended with error"
        ),
    }
}

async fn run_session<C>(
    server: &McpServer,
    connection: &mut C,
    ctx: &RequestContext,
) -> Result<(), TransportError>
where
    C: FrameConnection,
{
    loop {
        let frame = tokio::select! {
            _ = ctx.cancellation().cancelled() => {
                debug!(session = ctx.session_id(), "socket session cancelled");
                return Ok(());
            }
            frame = connection.recv_frame() => frame?,
        };

        let data = match frame {
            Frame::Data(data) => data,
            Frame::Control => continue,
            Frame::Close => return Ok(()),
        };

        if let Some(response) = server.process_message(ctx, &data).await {
            let payload = serde_json::to_string(&response)?;
            connection.send_frame(payload).await?;
        }
    }
}
