//! HTTP surface for the Model Context Protocol
//!
//! Routes the `/mcp` endpoint (WebSocket and POST) plus health and discovery.

pub mod handlers;
