//! Capability registry mapping tool names and resource URI patterns to handlers
//!
//! Both maps sit behind one read-write lock. Registrations happen at startup;
//! lookups take the read lock only long enough to clone the handler `Arc`, so a
//! handler never runs while the lock is held.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::HandlerError;
use crate::mcp::context::RequestContext;
use crate::mcp::pattern::best_match;
use crate::mcp::types::{Resource, ResourceContent, Tool, ToolResult};

#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(
        &self,
        ctx: RequestContext,
        arguments: Map<String, Value>,
    ) -> Result<ToolResult, HandlerError>;
}

#[async_trait]
pub trait ResourceHandler: Send + Sync {
    async fn read(&self, ctx: RequestContext, uri: String) -> Result<ResourceContent, HandlerError>;
}

#[async_trait]
impl<F, Fut> ToolHandler for F
where
    F: Fn(RequestContext, Map<String, Value>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ToolResult, HandlerError>> + Send + 'static,
{
    async fn call(
        &self,
        ctx: RequestContext,
        arguments: Map<String, Value>,
    ) -> Result<ToolResult, HandlerError> {
        self(ctx, arguments).await
    }
}

#[async_trait]
impl<F, Fut> ResourceHandler for F
where
    F: Fn(RequestContext, String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ResourceContent, HandlerError>> + Send + 'static,
{
    async fn read(&self, ctx: RequestContext, uri: String) -> Result<ResourceContent, HandlerError> {
        self(ctx, uri).await
    }
}

/// Supplies tool handlers and the descriptors advertised by `tools/list`.
pub trait ToolRegistrar {
    fn register_tools(&self, registry: &Registry);
    fn tool_definitions(&self) -> Vec<Tool>;
}

/// Supplies resource handlers and the descriptors advertised by `resources/list`.
pub trait ResourceRegistrar {
    fn register_resources(&self, registry: &Registry);
    fn resource_definitions(&self) -> Vec<Resource>;
}

#[derive(Default)]
struct Entries {
    tools: HashMap<String, Arc<dyn ToolHandler>>,
    resources: HashMap<String, Arc<dyn ResourceHandler>>,
}

#[derive(Default)]
pub struct Registry {
    entries: RwLock<Entries>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `name`, replacing any previous handler.
    pub fn register_tool<H>(&self, name: impl Into<String>, handler: H)
    where
        H: ToolHandler + 'static,
    {
        let name = name.into();
        debug!(tool = %name, "registered tool handler");
        self.write().tools.insert(name, Arc::new(handler));
    }

    /// Registers `handler` for a URI pattern, replacing any previous handler.
    pub fn register_resource<H>(&self, pattern: impl Into<String>, handler: H)
    where
        H: ResourceHandler + 'static,
    {
        let pattern = pattern.into();
        debug!(pattern = %pattern, "registered resource handler");
        self.write().resources.insert(pattern, Arc::new(handler));
    }

    pub fn tool(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.read().tools.get(name).cloned()
    }

    /// Resolves `uri` against the registered patterns, most specific first.
    pub fn resolve_resource(&self, uri: &str) -> Option<Arc<dyn ResourceHandler>> {
        let entries = self.read();
        let pattern = best_match(entries.resources.keys().map(String::as_str), uri)?;
        entries.resources.get(pattern).cloned()
    }

    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().tools.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn resource_patterns(&self) -> Vec<String> {
        let mut patterns: Vec<String> = self.read().resources.keys().cloned().collect();
        patterns.sort();
        patterns
    }

    // Handlers never run under the lock, so a poisoned lock still holds
    // consistent maps.
    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
