//! Light and dark theme presets.
//!
//! A preset maps semantic roles to CSS declarations. The builder merges roles
//! listed in an element's `variant` into its style, picking the preset that
//! matches the environment's color scheme.

use std::sync::LazyLock;

use indexmap::IndexMap;

use crate::style::{css, CssMap};

/// Ambient color-scheme preference of the host UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

/// A named set of role styles.
#[derive(Debug, Clone)]
pub struct ThemePreset {
    roles: IndexMap<&'static str, CssMap>,
}

impl ThemePreset {
    /// Style for a role, if the preset defines it.
    pub fn role(&self, name: &str) -> Option<&CssMap> {
        self.roles.get(name)
    }

    /// All role names, in declaration order.
    pub fn role_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.roles.keys().copied()
    }
}

/// The preset matching a color scheme.
pub fn preset(scheme: ColorScheme) -> &'static ThemePreset {
    match scheme {
        ColorScheme::Light => &LIGHT,
        ColorScheme::Dark => &DARK,
    }
}

/// Monospace italic, shared by the `code` role and the `code` element alias.
pub(crate) fn code_block() -> CssMap {
    css([("fontStyle", "italic"), ("fontFamily", "monospace")])
}

fn dimmed() -> CssMap {
    css([("opacity", "0.6")])
}

static DARK: LazyLock<ThemePreset> = LazyLock::new(|| ThemePreset {
    roles: IndexMap::from_iter([
        (
            "property-preview-name",
            css([("color", "rgb(169, 169, 169)")]),
        ),
        ("function-prefix", css([("color", "rgb(85, 106, 242)")])),
        ("property-name", css([("color", "rgb(227, 110, 236)")])),
        ("null", css([("color", "rgb(127, 127, 127)")])),
        ("bigint", css([("color", "rgb(158, 255, 158)")])),
        ("number", css([("color", "hsl(252, 100%, 75%)")])),
        (
            "string",
            css([
                ("color", "rgb(233, 63, 59)"),
                ("whiteSpace", "pre"),
                ("unicode-bidi", "-webkit-isolate"),
            ]),
        ),
        ("quote", css([("color", "rgb(213, 213, 213)")])),
        ("node", css([("color", "rgb(189, 198, 207)")])),
        ("fade", dimmed()),
        ("code", code_block()),
    ]),
});

static LIGHT: LazyLock<ThemePreset> = LazyLock::new(|| ThemePreset {
    roles: IndexMap::from_iter([
        ("property-preview-name", css([("color", "#565656")])),
        ("function-prefix", css([("color", "rgb(13, 34, 170)")])),
        ("property-name", css([("color", "rgb(136, 19, 145)")])),
        ("null", css([("color", "rgb(128, 128, 128)")])),
        ("bigint", css([("color", "rgb(0, 93, 0)")])),
        ("number", css([("color", "rgb(28, 0, 207)")])),
        (
            "string",
            css([
                ("color", "rgb(196, 26, 22)"),
                ("whiteSpace", "pre"),
                ("unicode-bidi", "-webkit-isolate"),
            ]),
        ),
        ("quote", css([("color", "#222")])),
        ("node", css([("color", "rgb(48, 57, 66)")])),
        ("fade", dimmed()),
        ("code", code_block()),
    ]),
});
