//! Catalog tools exposed via Model Context Protocol
//!
//! `bjcp_lookup`, `search_beers` and `find_breweries`, each backed by a shared
//! [`CatalogProvider`]. Argument problems surface as `InvalidParams` errors that
//! echo the caller's arguments; backend failures become internal errors.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::domain::catalog::{Beer, BeerQuery, BjcpStyle, Brewery, BreweryQuery, CatalogProvider};
use crate::domain::utils::{
    is_valid_style_code, lenient_limit, parse_limit, provided_params, string_arg,
};
use crate::errors::{HandlerError, ProtocolError};
use crate::mcp::context::RequestContext;
use crate::mcp::registry::{Registry, ToolHandler, ToolRegistrar};
use crate::mcp::types::{integer_schema, object_schema, string_schema, Tool, ToolResult};

pub const BJCP_LOOKUP: &str = "bjcp_lookup";
pub const SEARCH_BEERS: &str = "search_beers";
pub const FIND_BREWERIES: &str = "find_breweries";

/// Registers the catalog tools.
pub struct CatalogTools {
    catalog: Arc<dyn CatalogProvider>,
}

impl CatalogTools {
    pub fn new(catalog: Arc<dyn CatalogProvider>) -> Self {
        Self { catalog }
    }
}

impl ToolRegistrar for CatalogTools {
    fn register_tools(&self, registry: &Registry) {
        registry.register_tool(BJCP_LOOKUP, BjcpLookupTool::new(self.catalog.clone()));
        registry.register_tool(SEARCH_BEERS, SearchBeersTool::new(self.catalog.clone()));
        registry.register_tool(FIND_BREWERIES, FindBreweriesTool::new(self.catalog.clone()));
    }

    fn tool_definitions(&self) -> Vec<Tool> {
        vec![
            Tool::new(
                BJCP_LOOKUP,
                "Look up BJCP beer style information by style code or name",
                object_schema(
                    vec![
                        (
                            "style_code",
                            string_schema("BJCP style code (e.g., '21A' for American IPA)"),
                        ),
                        (
                            "style_name",
                            string_schema("BJCP style name (e.g., 'American IPA')"),
                        ),
                    ],
                    &[],
                ),
            ),
            Tool::new(
                SEARCH_BEERS,
                "Search for commercial beers by name, style, brewery, or location",
                object_schema(
                    vec![
                        ("name", string_schema("Beer name to search for")),
                        ("style", string_schema("Beer style to filter by")),
                        ("brewery", string_schema("Brewery name to filter by")),
                        (
                            "location",
                            string_schema("Location (city, state, country) to filter by"),
                        ),
                        (
                            "limit",
                            integer_schema("Maximum number of results (default: 20, max: 100)"),
                        ),
                    ],
                    &[],
                ),
            ),
            Tool::new(
                FIND_BREWERIES,
                "Find breweries by name, location, city, state, or country",
                object_schema(
                    vec![
                        ("name", string_schema("Brewery name to search for")),
                        (
                            "location",
                            string_schema("General location search (city, state, country)"),
                        ),
                        ("city", string_schema("City to filter by")),
                        ("state", string_schema("State to filter by")),
                        ("country", string_schema("Country to filter by")),
                        (
                            "limit",
                            integer_schema("Maximum number of results (default: 20, max: 100)"),
                        ),
                    ],
                    &[],
                ),
            ),
        ]
    }
}

pub struct BjcpLookupTool {
    catalog: Arc<dyn CatalogProvider>,
}

impl BjcpLookupTool {
    pub fn new(catalog: Arc<dyn CatalogProvider>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl ToolHandler for BjcpLookupTool {
    async fn call(
        &self,
        _ctx: RequestContext,
        arguments: Map<String, Value>,
    ) -> Result<ToolResult, HandlerError> {
        let style_code = arguments.get("style_code").and_then(Value::as_str);
        let style_name = arguments.get("style_name").and_then(Value::as_str);

        let (lookup, key) = match (style_code, style_name) {
            (None, None) => {
                return Err(ProtocolError::invalid_params(
                    "either 'style_code' or 'style_name' parameter is required",
                )
                .with_data(provided_params(&arguments))
                .into());
            }
            (Some(code), _) => {
                let code = code.trim().to_ascii_uppercase();
                if !is_valid_style_code(&code) {
                    return Err(ProtocolError::invalid_params("invalid style_code format")
                        .with_data(json!({ "style_code": code }))
                        .into());
                }
                (self.catalog.style_by_code(&code).await, code)
            }
            (None, Some(name)) if !name.trim().is_empty() => {
                (self.catalog.style_by_name(name).await, name.to_string())
            }
            (None, Some(_)) => {
                return Err(
                    ProtocolError::invalid_params("style_code or style_name cannot be empty").into(),
                );
            }
        };

        match lookup {
            Ok(style) => Ok(ToolResult::text(format_style(&style))),
            Err(err) if err.is_lookup_miss() => {
                debug!(lookup = %key, error = %err, "bjcp lookup missed");
                Err(ProtocolError::invalid_params(format!("BJCP style not found for: {key}")).into())
            }
            Err(err) => Err(err.into()),
        }
    }
}

pub struct SearchBeersTool {
    catalog: Arc<dyn CatalogProvider>,
}

impl SearchBeersTool {
    pub fn new(catalog: Arc<dyn CatalogProvider>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl ToolHandler for SearchBeersTool {
    async fn call(
        &self,
        _ctx: RequestContext,
        arguments: Map<String, Value>,
    ) -> Result<ToolResult, HandlerError> {
        let query = BeerQuery {
            name: string_arg(&arguments, "name"),
            style: string_arg(&arguments, "style"),
            brewery: string_arg(&arguments, "brewery"),
            location: string_arg(&arguments, "location"),
            limit: parse_limit(&arguments)?,
        };

        if !query.has_criteria() {
            return Err(ProtocolError::invalid_params(
                "at least one search parameter is required (name, style, brewery, or location)",
            )
            .with_data(provided_params(&arguments))
            .into());
        }

        let beers = self
            .catalog
            .search_beers(&query)
            .await
            .map_err(|err| format!("failed to search beers: {err}"))?;

        Ok(ToolResult::text(format_beers(&beers)))
    }
}

pub struct FindBreweriesTool {
    catalog: Arc<dyn CatalogProvider>,
}

impl FindBreweriesTool {
    pub fn new(catalog: Arc<dyn CatalogProvider>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl ToolHandler for FindBreweriesTool {
    async fn call(
        &self,
        _ctx: RequestContext,
        arguments: Map<String, Value>,
    ) -> Result<ToolResult, HandlerError> {
        let query = BreweryQuery {
            name: string_arg(&arguments, "name"),
            location: string_arg(&arguments, "location"),
            city: string_arg(&arguments, "city"),
            state: string_arg(&arguments, "state"),
            country: string_arg(&arguments, "country"),
            limit: lenient_limit(&arguments),
        };

        if !query.has_criteria() {
            return Err(ProtocolError::invalid_params(
                "at least one search parameter is required (name, location, city, state, or country)",
            )
            .with_data(provided_params(&arguments))
            .into());
        }

        let breweries = self
            .catalog
            .search_breweries(&query)
            .await
            .map_err(|err| format!("failed to search breweries: {err}"))?;

        Ok(ToolResult::text(format_breweries(&breweries)))
    }
}

fn format_style(style: &BjcpStyle) -> String {
    let v = &style.vitals;
    format!(
        "**BJCP Style {code}: {name}**\n\n\
         **Category:** {category}\n\n\
         **Overall Impression:** {impression}\n\
         - **ABV:** {:.1} - {:.1}%\n\
         - **IBU:** {} - {}\n\
         - **SRM:** {:.1} - {:.1}\n\
         - **OG:** {:.3} - {:.3}\n\
         - **FG:** {:.3} - {:.3}\n\n\
         **Appearance:** {appearance}\n\n\
         **Aroma:** {aroma}\n\n\
         **Flavor:** {flavor}\n\n\
         **Mouthfeel:** {mouthfeel}\n\n\
         **Commercial Examples:** {examples}",
        v.abv_min,
        v.abv_max,
        v.ibu_min,
        v.ibu_max,
        v.srm_min,
        v.srm_max,
        v.og_min,
        v.og_max,
        v.fg_min,
        v.fg_max,
        code = style.code,
        name = style.name,
        category = style.category,
        impression = style.overall_impression,
        appearance = style.appearance,
        aroma = style.aroma,
        flavor = style.flavor,
        mouthfeel = style.mouthfeel,
        examples = style.commercial_examples.join(", "),
    )
}

fn format_beers(beers: &[Beer]) -> String {
    if beers.is_empty() {
        return "No beers found matching your search criteria.".to_string();
    }

    let mut out = format!("**Found {} beer(s):**\n\n", beers.len());
    for (index, beer) in beers.iter().enumerate() {
        let _ = writeln!(out, "**{}. {}**", index + 1, beer.name);
        let _ = writeln!(out, "- **Brewery:** {}", beer.brewery);
        let _ = writeln!(out, "- **Style:** {}", beer.style);
        let _ = writeln!(out, "- **ABV:** {:.1}%", beer.abv);
        out.push('\n');
    }
    out
}

fn format_breweries(breweries: &[Brewery]) -> String {
    if breweries.is_empty() {
        return "No breweries found matching your search criteria.".to_string();
    }

    let mut out = format!("**Found {} brewery(ies):**\n\n", breweries.len());
    for (index, brewery) in breweries.iter().enumerate() {
        let _ = writeln!(out, "**{}. {}**", index + 1, brewery.name);
        if !brewery.brewery_type.is_empty() {
            let _ = writeln!(out, "- **Type:** {}", brewery.brewery_type);
        }

        let location: Vec<&str> = [&brewery.city, &brewery.state, &brewery.country]
            .into_iter()
            .map(String::as_str)
            .filter(|part| !part.is_empty())
            .collect();
        if !location.is_empty() {
            let _ = writeln!(out, "- **Location:** {}", location.join(", "));
        }
        if !brewery.website_url.is_empty() {
            let _ = writeln!(out, "- **Website:** {}", brewery.website_url);
        }
        if !brewery.phone.is_empty() {
            let _ = writeln!(out, "- **Phone:** {}", brewery.phone);
        }
        out.push('\n');
    }
    out
}
