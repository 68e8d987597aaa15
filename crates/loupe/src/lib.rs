//! JsonML markup trees for devtools-style custom object formatters.
//!
//! This crate builds the `[tag, attrs, ...children]` structures a host
//! inspection UI renders in place of its default object display: style
//! normalization, light/dark theme variants, child flattening and boxing,
//! and clickable elements rewired through a formatter bridge.

pub mod builder;
pub mod click;
pub mod formatter;
pub mod inspect;
pub mod json;
pub mod markup;
pub mod state;
pub mod style;
pub mod theme;

pub use builder::{Builder, Environment, ImageError, SharedRegistry};
pub use click::{ClickBox, ClickFormatter, OnClick};
pub use formatter::{Formatter, FormatterRegistry, HostFormatters, SharedFormatter};
pub use inspect::Inspector;
pub use markup::{Attrs, Child, Dimension, Node, NodeAttrs, NodeChild, ObjectValue, Tag, FRAGMENT};
pub use state::StateStore;
pub use style::{css, kebab_case, normalize_style, CssMap, StyleValue};
pub use theme::{preset, ColorScheme, ThemePreset};
