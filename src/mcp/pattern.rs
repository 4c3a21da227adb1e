//! Resource URI pattern matching
//!
//! A pattern is either `*` (matches everything), a prefix followed by a single
//! trailing `*`, or an exact URI. Comparison is byte-wise and case-sensitive.
//!
//! When several registered patterns match one URI the most specific wins: an
//! exact pattern beats any wildcard, a longer prefix beats a shorter one, and the
//! bare `*` is consulted last. Routing therefore never depends on map order.

const WILDCARD: char = '*';
const SCHEME_SEPARATOR: &str = "://";

/// How closely a pattern describes a URI. Variants are ordered weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Specificity {
    Any,
    Prefix(usize),
    Exact,
}

pub fn match_specificity(pattern: &str, uri: &str) -> Option<Specificity> {
    if pattern == "*" {
        return Some(Specificity::Any);
    }

    if let Some(prefix) = pattern.strip_suffix(WILDCARD) {
        return uri
            .starts_with(prefix)
            .then_some(Specificity::Prefix(prefix.len()));
    }

    (pattern == uri).then_some(Specificity::Exact)
}

pub fn matches_pattern(pattern: &str, uri: &str) -> bool {
    match_specificity(pattern, uri).is_some()
}

/// Picks the most specific pattern matching `uri`.
pub fn best_match<'a, I>(patterns: I, uri: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    patterns
        .into_iter()
        .filter_map(|pattern| match_specificity(pattern, uri).map(|rank| (rank, pattern)))
        .max_by_key(|(rank, _)| *rank)
        .map(|(_, pattern)| pattern)
}

/// Minimal syntactic check: a leading ASCII letter and a `://` separator.
pub fn is_valid_uri(uri: &str) -> bool {
    uri.starts_with(|c: char| c.is_ascii_alphabetic()) && uri.contains(SCHEME_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_wildcard_matches_within_scheme_only() {
        assert!(matches_pattern("bjcp://*", "bjcp://styles/21A"));
        assert!(matches_pattern("bjcp://*", "bjcp://"));
        assert!(!matches_pattern("bjcp://*", "beers://catalog"));
        assert!(!matches_pattern("bjcp://*", "BJCP://styles"));
    }

    #[test]
    fn lone_wildcard_matches_everything() {
        assert!(matches_pattern("*", "beers://catalog"));
        assert!(matches_pattern("*", ""));
    }

    #[test]
    fn plain_pattern_requires_exact_equality() {
        assert!(matches_pattern("beers://catalog", "beers://catalog"));
        assert!(!matches_pattern("beers://catalog", "beers://catalog/1"));
        assert!(!matches_pattern("beers://catalog", "beers://Catalog"));
    }

    #[test]
    fn most_specific_pattern_wins() {
        let patterns = ["*", "bjcp://*", "bjcp://styles/*", "bjcp://styles/21A"];

        assert_eq!(
            best_match(patterns, "bjcp://styles/21A"),
            Some("bjcp://styles/21A")
        );
        assert_eq!(
            best_match(patterns, "bjcp://styles/10A"),
            Some("bjcp://styles/*")
        );
        assert_eq!(best_match(patterns, "bjcp://categories"), Some("bjcp://*"));
        assert_eq!(best_match(patterns, "beers://catalog"), Some("*"));
        assert_eq!(best_match(["bjcp://*"], "beers://catalog"), None);
    }

    #[test]
    fn uri_syntax_check() {
        assert!(is_valid_uri("bjcp://styles"));
        assert!(is_valid_uri("a://"));
        assert!(!is_valid_uri("/version"));
        assert!(!is_valid_uri("bjcp:styles"));
        assert!(!is_valid_uri("1bjcp://styles"));
        assert!(!is_valid_uri("://styles"));
        assert!(!is_valid_uri(""));
    }
}
