//! Display-side normalization of catalog text.
//!
//! The catalog service occasionally returns an image entry that is itself a
//! stringified array, sometimes with single quotes (`['http://x/a.png']`).
//! [`resolve_image_url`] is the only place that heuristic lives.

use catalog_logging::catalog_debug;
use serde_json::Value;

use crate::Product;

/// Shown in table rows when a product has no image.
pub const PLACEHOLDER_THUMBNAIL: &str = "https://placehold.co/50x50?text=No+Image";

/// Shown in tooltips when a product has no description.
pub const PLACEHOLDER_DESCRIPTION: &str = "No description available";

/// Longest description preview, in characters, before it is cut with `...`.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 200;

const MALFORMED_PREFIXES: [&str; 2] = ["[\"", "['"];

/// Coerce an image field into a usable URL.
///
/// Fallback chain: parse as a JSON array after swapping single quotes for
/// double quotes, then strip every bracket and quote character, and finally
/// pass the input through untouched when it does not look like an array.
/// Never fails.
pub fn resolve_image_url(raw: &str) -> String {
    if !MALFORMED_PREFIXES.iter().any(|prefix| raw.starts_with(prefix)) {
        return raw.to_string();
    }

    let requoted = raw.replace('\'', "\"");
    let parsed = match serde_json::from_str::<Value>(&requoted) {
        Ok(Value::Array(items)) => items.into_iter().next().map(value_to_url),
        Ok(other) => Some(value_to_url(other)),
        Err(err) => {
            catalog_debug!("image field is not a JSON array ({err}); stripping: {raw}");
            None
        }
    };

    parsed.unwrap_or_else(|| strip_array_syntax(raw))
}

fn value_to_url(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn strip_array_syntax(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '[' | ']' | '"' | '\''))
        .collect()
}

/// Neutralize markup-significant characters so catalog text renders verbatim.
pub fn escape_for_display(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// First image of a product, resolved, or the thumbnail placeholder.
pub fn primary_image(product: &Product) -> String {
    product
        .images
        .first()
        .map(|raw| resolve_image_url(raw))
        .unwrap_or_else(|| PLACEHOLDER_THUMBNAIL.to_string())
}

/// Description cut to [`DESCRIPTION_PREVIEW_CHARS`] characters for tooltips.
pub fn description_preview(description: &str) -> String {
    let description = if description.is_empty() {
        PLACEHOLDER_DESCRIPTION
    } else {
        description
    };
    match description.char_indices().nth(DESCRIPTION_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &description[..cut]),
        None => description.to_string(),
    }
}
