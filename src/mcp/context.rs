//! Per-session request context handed to handlers

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio_util::sync::CancellationToken;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    WebSocket,
    Stdio,
    Http,
}

impl TransportKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WebSocket => "websocket",
            Self::Stdio => "stdio",
            Self::Http => "http",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Context shared by every request arriving on one connection or line session.
///
/// The cancellation token fires when the connection closes or the server shuts
/// down. Handlers are expected to watch it; the dispatcher never aborts them.
#[derive(Debug, Clone)]
pub struct RequestContext {
    session_id: u64,
    transport: TransportKind,
    cancellation: CancellationToken,
}

impl RequestContext {
    pub fn new(transport: TransportKind, cancellation: CancellationToken) -> Self {
        Self {
            session_id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            transport,
            cancellation,
        }
    }

    /// A context with its own token, not tied to any connection.
    pub fn detached(transport: TransportKind) -> Self {
        Self::new(transport, CancellationToken::new())
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn transport(&self) -> TransportKind {
        self.transport
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_get_distinct_ids() {
        let first = RequestContext::detached(TransportKind::Stdio);
        let second = RequestContext::detached(TransportKind::Stdio);
        assert_ne!(first.session_id(), second.session_id());
    }

    #[test]
    fn cancelling_parent_reaches_session() {
        let shutdown = CancellationToken::new();
        let ctx = RequestContext::new(TransportKind::WebSocket, shutdown.child_token());
        assert!(!ctx.is_cancelled());

        shutdown.cancel();
        assert!(ctx.is_cancelled());
    }
}
