//! Transport drivers feeding the shared [`McpServer`](crate::mcp::server::McpServer)
//!
//! - [`socket`]: one task per WebSocket connection, one JSON document per frame.
//! - [`stdio`]: a single sequential loop over newline-delimited stdin/stdout.
//!
//! Both end only the affected session on I/O failure; the server and its
//! registry are never touched by a transport error.

pub mod socket;
pub mod stdio;

pub use socket::{serve_connection, Frame, FrameConnection};
pub use stdio::{run_line_loop, serve_stdio};
