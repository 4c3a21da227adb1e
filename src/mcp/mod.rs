//! Model Context Protocol core
//!
//! Envelope validation, the capability registry, resource URI matching and the
//! dispatcher that ties them together. Nothing in here knows about sockets.

pub mod context;
pub mod pattern;
pub mod registry;
pub mod rpc;
pub mod server;
pub mod types;
