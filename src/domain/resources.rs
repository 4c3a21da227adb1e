//! Read-only catalog resources
//!
//! Each URI scheme gets one handler registered on a `scheme://*` pattern; the
//! handler picks the concrete document from the full URI and answers unknown
//! paths with `MethodNotFound`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::domain::catalog::{BeerQuery, BreweryQuery, CatalogProvider};
use crate::domain::utils::RESOURCE_SAMPLE_LIMIT;
use crate::errors::{HandlerError, ProtocolError};
use crate::mcp::context::RequestContext;
use crate::mcp::registry::{Registry, ResourceHandler, ResourceRegistrar};
use crate::mcp::types::{Resource, ResourceContent};

pub const BJCP_STYLES_URI: &str = "bjcp://styles";
pub const BJCP_CATEGORIES_URI: &str = "bjcp://categories";
pub const BJCP_STYLE_PREFIX: &str = "bjcp://styles/";
pub const BEER_CATALOG_URI: &str = "beers://catalog";
pub const BREWERY_DIRECTORY_URI: &str = "breweries://directory";

pub struct CatalogResources {
    catalog: Arc<dyn CatalogProvider>,
}

impl CatalogResources {
    pub fn new(catalog: Arc<dyn CatalogProvider>) -> Self {
        Self { catalog }
    }
}

impl ResourceRegistrar for CatalogResources {
    fn register_resources(&self, registry: &Registry) {
        registry.register_resource("bjcp://*", BjcpResource::new(self.catalog.clone()));
        registry.register_resource("beers://*", BeerResource::new(self.catalog.clone()));
        registry.register_resource("breweries://*", BreweryResource::new(self.catalog.clone()));
    }

    fn resource_definitions(&self) -> Vec<Resource> {
        vec![
            Resource::json(
                BJCP_STYLES_URI,
                "BJCP Beer Styles",
                "Complete BJCP beer style guidelines database",
            ),
            Resource::json(
                "bjcp://styles/{code}",
                "BJCP Style Details",
                "Detailed information for a specific BJCP style",
            ),
            Resource::json(
                BJCP_CATEGORIES_URI,
                "BJCP Categories",
                "List of all BJCP beer categories",
            ),
            Resource::json(BEER_CATALOG_URI, "Beer Catalog", "Commercial beer database"),
            Resource::json(
                BREWERY_DIRECTORY_URI,
                "Brewery Directory",
                "Searchable directory of breweries",
            ),
        ]
    }
}

fn generated_at() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn not_found(kind: &str, uri: &str) -> HandlerError {
    ProtocolError::method_not_found(format!("{kind} resource not found: {uri}")).into()
}

pub struct BjcpResource {
    catalog: Arc<dyn CatalogProvider>,
}

impl BjcpResource {
    pub fn new(catalog: Arc<dyn CatalogProvider>) -> Self {
        Self { catalog }
    }

    async fn styles_summary(&self) -> Result<Value, HandlerError> {
        let categories = self.catalog.categories().await?;
        let styles = self.catalog.styles().await?;
        Ok(json!({
            "description": "BJCP Beer Style Guidelines",
            "version": self.catalog.guideline_version(),
            "categories": categories,
            "total_styles": styles.len(),
            "usage": {
                "lookup_by_code": "bjcp://styles/{code}",
                "example": "bjcp://styles/21A",
            },
            "generated_at": generated_at(),
        }))
    }

    async fn categories(&self) -> Result<Value, HandlerError> {
        let categories = self.catalog.categories().await?;
        Ok(json!({
            "count": categories.len(),
            "categories": categories,
        }))
    }

    async fn style_detail(&self, code: &str) -> Result<Value, HandlerError> {
        match self.catalog.style_by_code(code).await {
            Ok(style) => Ok(serde_json::to_value(style)?),
            Err(err) if err.is_lookup_miss() => Err(ProtocolError::method_not_found(format!(
                "BJCP style not found: {code}"
            ))
            .into()),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl ResourceHandler for BjcpResource {
    async fn read(&self, _ctx: RequestContext, uri: String) -> Result<ResourceContent, HandlerError> {
        let body = if uri == BJCP_STYLES_URI {
            self.styles_summary().await?
        } else if uri == BJCP_CATEGORIES_URI {
            self.categories().await?
        } else if let Some(code) = uri.strip_prefix(BJCP_STYLE_PREFIX) {
            self.style_detail(code).await?
        } else {
            return Err(not_found("BJCP", &uri));
        };

        Ok(ResourceContent::json(uri, &body))
    }
}

pub struct BeerResource {
    catalog: Arc<dyn CatalogProvider>,
}

impl BeerResource {
    pub fn new(catalog: Arc<dyn CatalogProvider>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl ResourceHandler for BeerResource {
    async fn read(&self, _ctx: RequestContext, uri: String) -> Result<ResourceContent, HandlerError> {
        if uri != BEER_CATALOG_URI {
            return Err(not_found("Beer", &uri));
        }

        let query = BeerQuery {
            limit: RESOURCE_SAMPLE_LIMIT,
            ..BeerQuery::default()
        };
        let beers = self
            .catalog
            .search_beers(&query)
            .await
            .map_err(|err| format!("failed to get beer catalog sample: {err}"))?;

        let body = json!({
            "description": "Commercial Beer Catalog",
            "sample_beers": beers,
            "usage": {
                "search_tool": "Use the search_beers tool to query specific beers",
                "parameters": "name, style, brewery, location",
            },
            "generated_at": generated_at(),
        });
        Ok(ResourceContent::json(uri, &body))
    }
}

pub struct BreweryResource {
    catalog: Arc<dyn CatalogProvider>,
}

impl BreweryResource {
    pub fn new(catalog: Arc<dyn CatalogProvider>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl ResourceHandler for BreweryResource {
    async fn read(&self, _ctx: RequestContext, uri: String) -> Result<ResourceContent, HandlerError> {
        if uri != BREWERY_DIRECTORY_URI {
            return Err(not_found("Brewery", &uri));
        }

        let query = BreweryQuery {
            limit: RESOURCE_SAMPLE_LIMIT,
            ..BreweryQuery::default()
        };
        let breweries = self
            .catalog
            .search_breweries(&query)
            .await
            .map_err(|err| format!("failed to get brewery directory sample: {err}"))?;

        let body = json!({
            "description": "Brewery Directory",
            "sample_breweries": breweries,
            "usage": {
                "search_tool": "Use the find_breweries tool to query specific breweries",
                "parameters": "name, location, city, state, country",
            },
            "generated_at": generated_at(),
        });
        Ok(ResourceContent::json(uri, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::InMemoryCatalog;
    use crate::errors::ErrorCode;
    use crate::mcp::context::TransportKind;

    fn registry() -> Registry {
        let registry = Registry::new();
        CatalogResources::new(Arc::new(InMemoryCatalog::seeded())).register_resources(&registry);
        registry
    }

    async fn read(uri: &str) -> Result<Value, ProtocolError> {
        let handler = registry()
            .resolve_resource(uri)
            .ok_or_else(|| ProtocolError::method_not_found("unmatched"))?;
        let content = handler
            .read(RequestContext::detached(TransportKind::Stdio), uri.to_string())
            .await
            .map_err(ProtocolError::from_handler_error)?;

        assert_eq!(content.uri, uri);
        assert_eq!(content.mime_type, "application/json");
        Ok(serde_json::from_str(content.text.as_deref().unwrap_or_default()).expect("json body"))
    }

    #[tokio::test]
    async fn styles_summary_counts_styles() {
        let body = read(BJCP_STYLES_URI).await.expect("read succeeds");
        assert_eq!(body["version"], "2021");
        assert_eq!(body["total_styles"], 9);
        assert_eq!(body["usage"]["example"], "bjcp://styles/21A");
        assert!(body["generated_at"].as_str().is_some_and(|at| at.ends_with('Z')));
    }

    #[tokio::test]
    async fn categories_lists_unique_categories() {
        let body = read(BJCP_CATEGORIES_URI).await.expect("read succeeds");
        let count = body["count"].as_u64().expect("count");
        assert_eq!(
            body["categories"].as_array().map(|items| items.len() as u64),
            Some(count)
        );
    }

    #[tokio::test]
    async fn style_detail_returns_style_json() {
        let body = read("bjcp://styles/21A").await.expect("read succeeds");
        assert_eq!(body["name"], "American IPA");
        assert_eq!(body["vitals"]["ibu_max"], 70);
    }

    #[tokio::test]
    async fn unknown_style_is_method_not_found() {
        let err = read("bjcp://styles/99Z").await.expect_err("unknown style");
        assert_eq!(err.error_code(), ErrorCode::MethodNotFound);
        assert_eq!(err.message, "BJCP style not found: 99Z");
    }

    #[tokio::test]
    async fn unknown_path_under_known_scheme_is_method_not_found() {
        let err = read("beers://cellar").await.expect_err("unknown path");
        assert_eq!(err.error_code(), ErrorCode::MethodNotFound);
        assert_eq!(err.message, "Beer resource not found: beers://cellar");
    }

    #[tokio::test]
    async fn catalog_samples_are_bounded() {
        let beers = read(BEER_CATALOG_URI).await.expect("read succeeds");
        let sample = beers["sample_beers"].as_array().expect("array");
        assert_eq!(sample.len(), RESOURCE_SAMPLE_LIMIT);

        let breweries = read(BREWERY_DIRECTORY_URI).await.expect("read succeeds");
        assert!(breweries["sample_breweries"].as_array().is_some_and(|items| {
            !items.is_empty() && items.len() <= RESOURCE_SAMPLE_LIMIT
        }));
    }
}
