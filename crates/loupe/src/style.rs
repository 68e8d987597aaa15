//! Style normalization.
//!
//! Styles arrive as raw declaration text or as property maps; both flatten to
//! a single semicolon-terminated string in built output.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::{Captures, Regex};

/// Insertion-ordered CSS property map.
///
/// Re-inserting an existing key overwrites the value but keeps the original
/// position, which is what declaration merging relies on.
pub type CssMap = IndexMap<String, String>;

/// Build a [`CssMap`] from literal pairs.
pub fn css<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> CssMap {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// An inline style value as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Raw declaration text, e.g. `"color: red"`.
    Text(String),
    /// Structured property map; keys may be camelCase.
    Map(CssMap),
}

impl StyleValue {
    /// Raw declaration text.
    pub fn text(text: impl Into<String>) -> Self {
        StyleValue::Text(text.into())
    }

    /// Property map from literal pairs.
    pub fn map<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        StyleValue::Map(css(pairs))
    }
}

static CAMEL_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[a-z][A-Z]").expect("invalid camel boundary regex"));

/// Convert a camelCase property name to kebab-case.
///
/// Only the first lowercase-uppercase boundary is rewritten, so multi-hump
/// names like `WebkitFontSmoothing` keep their later humps. Kept as-is from
/// the behavior this replaces; already-hyphenated names pass through.
pub fn kebab_case(key: &str) -> String {
    CAMEL_BOUNDARY_RE
        .replace(key, |caps: &Captures<'_>| {
            let m = &caps[0];
            format!("{}-{}", &m[..1], m[1..].to_lowercase())
        })
        .into_owned()
}

/// Flatten a style value into a single semicolon-terminated string.
///
/// `None` renders as the empty string so normalized fragments concatenate
/// cleanly. Already-terminated text is not double-terminated.
pub fn normalize_style(style: Option<&StyleValue>) -> String {
    match style {
        None => String::new(),
        Some(StyleValue::Text(text)) => {
            if text.ends_with(';') {
                text.clone()
            } else {
                format!("{text};")
            }
        }
        Some(StyleValue::Map(map)) => {
            let decls: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}: {}", kebab_case(key), value))
                .collect();
            format!("{};", decls.join(";"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kebab_converts_single_boundary() {
        assert_eq!(kebab_case("fontFamily"), "font-family");
        assert_eq!(kebab_case("marginTop"), "margin-top");
        assert_eq!(kebab_case("color"), "color");
        assert_eq!(kebab_case("unicode-bidi"), "unicode-bidi");
    }

    #[test]
    fn kebab_converts_only_first_boundary() {
        // Later humps survive untouched; preserved quirk, not a bug to fix.
        assert_eq!(kebab_case("WebkitFontSmoothing"), "Webkit-fontSmoothing");
        assert_eq!(kebab_case("borderTopLeftRadius"), "border-topLeftRadius");
    }

    #[test]
    fn terminates_text_styles() {
        assert_eq!(
            normalize_style(Some(&StyleValue::text("color: red"))),
            "color: red;"
        );
        assert_eq!(normalize_style(Some(&StyleValue::text(""))), ";");
        assert_eq!(normalize_style(None), "");
    }

    #[test]
    fn does_not_double_terminate() {
        let once = normalize_style(Some(&StyleValue::text("color: red")));
        let twice = normalize_style(Some(&StyleValue::Text(once.clone())));
        assert_eq!(once, twice);
    }

    #[test]
    fn renders_maps_in_insertion_order() {
        let style = StyleValue::map([("fontStyle", "italic"), ("color", "red")]);
        assert_eq!(
            normalize_style(Some(&style)),
            "font-style: italic;color: red;"
        );
    }

    #[test]
    fn map_normalization_is_stable_as_text() {
        let style = StyleValue::map([("marginTop", "0.5em"), ("display", "block")]);
        let once = normalize_style(Some(&style));
        let twice = normalize_style(Some(&StyleValue::Text(once.clone())));
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_map_renders_lone_terminator() {
        assert_eq!(normalize_style(Some(&StyleValue::Map(CssMap::new()))), ";");
    }

    #[test]
    fn reinserting_a_key_keeps_position_and_overwrites() {
        let mut map = css([("color", "red"), ("opacity", "0.6")]);
        map.insert("color".to_string(), "blue".to_string());
        assert_eq!(
            normalize_style(Some(&StyleValue::Map(map))),
            "color: blue;opacity: 0.6;"
        );
    }
}
