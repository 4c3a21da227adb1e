//! Argument extraction and validation shared by the catalog tools

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Map, Value};

use crate::errors::ProtocolError;

pub const DEFAULT_SEARCH_LIMIT: usize = 20;
pub const MAX_SEARCH_LIMIT: usize = 100;
pub const RESOURCE_SAMPLE_LIMIT: usize = 10;

/// Returns the argument as a string when present, a string, and not blank.
pub fn string_arg(args: &Map<String, Value>, key: &str) -> Option<String> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Strict `limit` parsing for `search_beers`.
///
/// Absent or `null` yields the default. Integers and numeric strings are
/// accepted, values above the maximum are capped, zero and negatives fail.
pub fn parse_limit(args: &Map<String, Value>) -> Result<usize, ProtocolError> {
    let limit = match args.get("limit") {
        None | Some(Value::Null) => return Ok(DEFAULT_SEARCH_LIMIT),
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|value| value.trunc() as i64)),
        Some(Value::String(text)) => text.trim().parse::<i64>().ok(),
        Some(_) => None,
    }
    .ok_or_else(|| ProtocolError::invalid_params("limit must be an integer"))?;

    if limit <= 0 {
        return Err(ProtocolError::invalid_params("limit must be greater than zero"));
    }

    Ok(usize::try_from(limit)
        .unwrap_or(MAX_SEARCH_LIMIT)
        .min(MAX_SEARCH_LIMIT))
}

/// Forgiving `limit` parsing for `find_breweries`: anything unusable or out of
/// range falls back to the default.
pub fn lenient_limit(args: &Map<String, Value>) -> usize {
    let limit = match args.get("limit") {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|value| value.trunc() as i64)),
        Some(Value::String(text)) => text.trim().parse::<i64>().ok(),
        _ => None,
    };

    match limit.and_then(|value| usize::try_from(value).ok()) {
        Some(value) if (1..=MAX_SEARCH_LIMIT).contains(&value) => value,
        _ => DEFAULT_SEARCH_LIMIT,
    }
}

/// BJCP codes are a one or two digit category followed by a subcategory letter,
/// e.g. `1A` or `21B`.
pub fn is_valid_style_code(code: &str) -> bool {
    static STYLE_CODE: OnceLock<Option<Regex>> = OnceLock::new();
    STYLE_CODE
        .get_or_init(|| Regex::new(r"^[0-9]{1,2}[A-Z]$").ok())
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(code))
}

/// Error detail echoing the caller's arguments.
pub fn provided_params(args: &Map<String, Value>) -> Value {
    json!({ "provided_params": args })
}
