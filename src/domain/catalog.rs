//! Beer catalog data model and the provider abstraction behind the tools and
//! resources.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::seed;

/// Shortest name fragment accepted by [`CatalogProvider::style_by_name`].
pub const MIN_SEARCH_LENGTH: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vitals {
    pub abv_min: f64,
    pub abv_max: f64,
    pub ibu_min: u32,
    pub ibu_max: u32,
    pub srm_min: f64,
    pub srm_max: f64,
    pub og_min: f64,
    pub og_max: f64,
    pub fg_min: f64,
    pub fg_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BjcpStyle {
    pub code: String,
    pub name: String,
    pub category: String,
    pub overall_impression: String,
    pub appearance: String,
    pub aroma: String,
    pub flavor: String,
    pub mouthfeel: String,
    pub commercial_examples: Vec<String>,
    pub vitals: Vitals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Beer {
    pub name: String,
    pub style: String,
    pub brewery: String,
    pub city: String,
    pub country: String,
    pub abv: f64,
    pub ibu: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Brewery {
    pub name: String,
    pub brewery_type: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    pub website_url: String,
}

/// Beer search criteria. Text filters are case-insensitive substring matches
/// and all present filters must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeerQuery {
    pub name: Option<String>,
    pub style: Option<String>,
    pub brewery: Option<String>,
    /// Matched against the brewery's city or country.
    pub location: Option<String>,
    pub limit: usize,
}

impl BeerQuery {
    pub fn has_criteria(&self) -> bool {
        self.name.is_some() || self.style.is_some() || self.brewery.is_some() || self.location.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BreweryQuery {
    pub name: Option<String>,
    /// Matched against city, state or country.
    pub location: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub limit: usize,
}

impl BreweryQuery {
    pub fn has_criteria(&self) -> bool {
        self.name.is_some()
            || self.location.is_some()
            || self.city.is_some()
            || self.state.is_some()
            || self.country.is_some()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("BJCP style not found: {0}")]
    StyleNotFound(String),
    #[error("search term cannot be empty")]
    EmptySearchTerm,
    #[error("search term too short: minimum 2 characters required")]
    SearchTermTooShort,
    #[error("search term must contain alphabetic characters")]
    NonAlphabeticSearchTerm,
    #[error("catalog backend unavailable: {0}")]
    Unavailable(String),
}

impl CatalogError {
    /// Whether the lookup itself was at fault rather than the backend.
    pub fn is_lookup_miss(&self) -> bool {
        !matches!(self, Self::Unavailable(_))
    }
}

#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// BJCP guideline edition the styles come from.
    fn guideline_version(&self) -> &str;
    async fn style_by_code(&self, code: &str) -> Result<BjcpStyle, CatalogError>;
    async fn style_by_name(&self, name: &str) -> Result<BjcpStyle, CatalogError>;
    async fn styles(&self) -> Result<Vec<BjcpStyle>, CatalogError>;
    async fn categories(&self) -> Result<Vec<String>, CatalogError>;
    async fn search_beers(&self, query: &BeerQuery) -> Result<Vec<Beer>, CatalogError>;
    async fn search_breweries(&self, query: &BreweryQuery) -> Result<Vec<Brewery>, CatalogError>;
}

/// Read-only catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    version: String,
    styles: BTreeMap<String, BjcpStyle>,
    categories: Vec<String>,
    beers: Vec<Beer>,
    breweries: Vec<Brewery>,
}

impl InMemoryCatalog {
    pub fn new(
        version: impl Into<String>,
        styles: Vec<BjcpStyle>,
        beers: Vec<Beer>,
        breweries: Vec<Brewery>,
    ) -> Self {
        let mut categories: Vec<String> = Vec::new();
        for style in &styles {
            if !categories.contains(&style.category) {
                categories.push(style.category.clone());
            }
        }

        Self {
            version: version.into(),
            styles: styles
                .into_iter()
                .map(|style| (style.code.to_ascii_uppercase(), style))
                .collect(),
            categories,
            beers,
            breweries,
        }
    }

    /// Catalog preloaded with a sample of BJCP 2021 styles and South African
    /// breweries and beers.
    pub fn seeded() -> Self {
        Self::new("2021", seed::styles(), seed::beers(), seed::breweries())
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    fn guideline_version(&self) -> &str {
        &self.version
    }

    async fn style_by_code(&self, code: &str) -> Result<BjcpStyle, CatalogError> {
        self.styles
            .get(&code.trim().to_ascii_uppercase())
            .cloned()
            .ok_or_else(|| CatalogError::StyleNotFound(code.to_string()))
    }

    async fn style_by_name(&self, name: &str) -> Result<BjcpStyle, CatalogError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::EmptySearchTerm);
        }
        if trimmed.chars().count() < MIN_SEARCH_LENGTH {
            return Err(CatalogError::SearchTermTooShort);
        }
        if !trimmed.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(CatalogError::NonAlphabeticSearchTerm);
        }

        let needle = trimmed.to_lowercase();
        let lowered = |style: &BjcpStyle| style.name.to_lowercase();

        // Exact, then prefix, then substring.
        let found = self
            .styles
            .values()
            .find(|style| lowered(style) == needle)
            .or_else(|| self.styles.values().find(|style| lowered(style).starts_with(&needle)))
            .or_else(|| self.styles.values().find(|style| lowered(style).contains(&needle)));

        found
            .cloned()
            .ok_or_else(|| CatalogError::StyleNotFound(name.to_string()))
    }

    async fn styles(&self) -> Result<Vec<BjcpStyle>, CatalogError> {
        Ok(self.styles.values().cloned().collect())
    }

    async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.categories.clone())
    }

    async fn search_beers(&self, query: &BeerQuery) -> Result<Vec<Beer>, CatalogError> {
        let beers = self
            .beers
            .iter()
            .filter(|beer| {
                matches_filter(query.name.as_deref(), &[beer.name.as_str()])
                    && matches_filter(query.style.as_deref(), &[beer.style.as_str()])
                    && matches_filter(query.brewery.as_deref(), &[beer.brewery.as_str()])
                    && matches_filter(
                        query.location.as_deref(),
                        &[beer.city.as_str(), beer.country.as_str()],
                    )
            })
            .take(query.limit)
            .cloned()
            .collect();
        Ok(beers)
    }

    async fn search_breweries(&self, query: &BreweryQuery) -> Result<Vec<Brewery>, CatalogError> {
        let mut breweries: Vec<Brewery> = self
            .breweries
            .iter()
            .filter(|brewery| {
                matches_filter(query.name.as_deref(), &[brewery.name.as_str()])
                    && matches_filter(query.city.as_deref(), &[brewery.city.as_str()])
                    && matches_filter(query.state.as_deref(), &[brewery.state.as_str()])
                    && matches_filter(query.country.as_deref(), &[brewery.country.as_str()])
                    && matches_filter(
                        query.location.as_deref(),
                        &[
                            brewery.city.as_str(),
                            brewery.state.as_str(),
                            brewery.country.as_str(),
                        ],
                    )
            })
            .cloned()
            .collect();

        breweries.sort_by(|left, right| left.name.cmp(&right.name));
        breweries.truncate(query.limit);
        Ok(breweries)
    }
}

fn matches_filter(filter: Option<&str>, fields: &[&str]) -> bool {
    let Some(filter) = filter else {
        return true;
    };
    let needle = filter.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::seeded()
    }

    #[tokio::test]
    async fn style_lookup_by_code_ignores_case() {
        let style = catalog().style_by_code("21a").await.expect("style exists");
        assert_eq!(style.code, "21A");
        assert_eq!(style.name, "American IPA");

        let err = catalog().style_by_code("99Z").await.expect_err("unknown code");
        assert!(matches!(err, CatalogError::StyleNotFound(code) if code == "99Z"));
    }

    #[tokio::test]
    async fn style_lookup_by_name_prefers_exact_match() {
        let style = catalog()
            .style_by_name("american ipa")
            .await
            .expect("style exists");
        assert_eq!(style.code, "21A");

        let style = catalog().style_by_name("Sweet").await.expect("prefix match");
        assert_eq!(style.name, "Sweet Stout");

        let style = catalog().style_by_name("common").await.expect("substring match");
        assert_eq!(style.name, "California Common");
    }

    #[tokio::test]
    async fn style_lookup_by_name_validates_search_term() {
        let catalog = catalog();
        assert!(matches!(
            catalog.style_by_name("  ").await,
            Err(CatalogError::EmptySearchTerm)
        ));
        assert!(matches!(
            catalog.style_by_name("a").await,
            Err(CatalogError::SearchTermTooShort)
        ));
        assert!(matches!(
            catalog.style_by_name("123").await,
            Err(CatalogError::NonAlphabeticSearchTerm)
        ));
    }

    #[tokio::test]
    async fn categories_are_unique() {
        let categories = catalog().categories().await.expect("categories");
        let mut deduped = categories.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(categories.len(), deduped.len());
        assert!(categories.contains(&"IPA".to_string()));
    }

    #[tokio::test]
    async fn beer_search_combines_filters_and_limit() {
        let query = BeerQuery {
            style: Some("ipa".to_string()),
            limit: 100,
            ..BeerQuery::default()
        };
        let beers = catalog().search_beers(&query).await.expect("search");
        assert!(!beers.is_empty());
        assert!(beers
            .iter()
            .all(|beer| beer.style.to_lowercase().contains("ipa")));

        let query = BeerQuery {
            style: Some("ipa".to_string()),
            brewery: Some("darling".to_string()),
            limit: 100,
            ..BeerQuery::default()
        };
        let beers = catalog().search_beers(&query).await.expect("search");
        assert_eq!(beers.len(), 1);
        assert_eq!(beers[0].name, "Warlord Imperial IPA");

        let query = BeerQuery {
            style: Some("lager".to_string()),
            limit: 2,
            ..BeerQuery::default()
        };
        assert_eq!(catalog().search_beers(&query).await.expect("search").len(), 2);
    }

    #[tokio::test]
    async fn brewery_search_sorts_by_name() {
        let query = BreweryQuery {
            location: Some("cape town".to_string()),
            limit: 20,
            ..BreweryQuery::default()
        };
        let breweries = catalog().search_breweries(&query).await.expect("search");
        assert!(breweries.len() > 1);
        let names: Vec<&str> = breweries.iter().map(|brewery| brewery.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn query_criteria_detection() {
        assert!(!BeerQuery::default().has_criteria());
        assert!(BeerQuery {
            location: Some("Durban".to_string()),
            ..BeerQuery::default()
        }
        .has_criteria());
        assert!(!BreweryQuery::default().has_criteria());
    }
}
