//! Beer catalog domain registered on the protocol engine
//!
//! Provides the `CatalogProvider` abstraction with its in-memory implementation
//! and the tool and resource registrars built on top of it.

pub mod catalog;
pub mod resources;
mod seed;
pub mod tools;
pub mod utils;
