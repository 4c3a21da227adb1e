//! Newline-delimited stdio transport.
//!
//! - stdin carries one JSON document per line
//! - stdout carries one response document per line
//! - logs go to stderr only
//!
//! Lines are processed one at a time, so a slow handler delays every line
//! behind it.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::errors::TransportError;
use crate::mcp::context::{RequestContext, TransportKind};
use crate::mcp::server::McpServer;

/// Runs the server over the process's stdin and stdout until end-of-stream or
/// until `shutdown` fires.
pub async fn serve_stdio(server: Arc<McpServer>, shutdown: CancellationToken) -> Result<(), TransportError> {
    let ctx = RequestContext::new(TransportKind::Stdio, shutdown.child_token());
    info!(session = ctx.session_id(), "stdio session opened");

    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();
    let outcome = run_line_loop(&server, reader, writer, &ctx).await;

    info!(session = ctx.session_id(), "stdio session closed");
    outcome
}

/// Reads lines from `reader`, dispatches each non-blank one, and writes any
/// response followed by `\n` to `writer`.
///
/// Lines that fail validation are answered with an error document and the loop
/// carries on. Only a read or write failure ends it early.
pub async fn run_line_loop<R, W>(
    server: &McpServer,
    mut reader: R,
    mut writer: W,
    ctx: &RequestContext,
) -> Result<(), TransportError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = Vec::new();

    loop {
        line.clear();
        let bytes_read = tokio::select! {
            _ = ctx.cancellation().cancelled() => {
                debug!(session = ctx.session_id(), "stdio session cancelled");
                break;
            }
            read = reader.read_until(b'\n', &mut line) => read?,
        };

        // EOF
        if bytes_read == 0 {
            break;
        }

        let payload = line.trim_ascii();
        if payload.is_empty() {
            continue;
        }

        let Some(response) = server.process_message(ctx, payload).await else {
            continue;
        };

        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        writer.write_all(&encoded).await?;
        writer.flush().await?;
    }

    writer.flush().await?;
    Ok(())
}
