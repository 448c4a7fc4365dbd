//! Query string decoding
//!
//! `application/x-www-form-urlencoded` style: pairs split on `&`, keys and
//! values percent-decoded, `+` read as a space.

use percent_encoding::percent_decode_str;
use std::collections::HashMap;

/// Decoded query parameters
pub type QueryParams = HashMap<String, String>;

/// Parse a raw query string into decoded parameters
///
/// When a key repeats, the first occurrence wins. A key without `=` maps to
/// an empty string.
pub fn parse_query(query: Option<&str>) -> QueryParams {
    let mut params = QueryParams::new();
    let Some(query) = query else {
        return params;
    };

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(key);
        if key.is_empty() {
            continue;
        }
        params.entry(key).or_insert_with(|| decode_component(value));
    }
    params
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
