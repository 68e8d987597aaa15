//! The node builder.
//!
//! Turns `(tag, attrs, children)` into a normalized markup node: aliases
//! resolve to base tags, theme variants and inline styles flatten to one
//! declaration string, children classify into renderable content or boxed
//! opaque values, and clickable elements rewire through the click bridge.

use std::cell::RefCell;
use std::rc::Rc;

use url::Url;

use crate::click::{ClickBox, ClickFormatter, OnClick};
use crate::formatter::FormatterRegistry;
use crate::markup::{Attrs, Child, Dimension, Node, NodeAttrs, NodeChild, ObjectValue, Tag};
use crate::style::{css, normalize_style, CssMap, StyleValue};
use crate::theme::{self, ColorScheme};

/// Ambient host signals, made explicit.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Preferred color scheme, used to pick the variant preset.
    pub color_scheme: ColorScheme,
    /// Current document location that image sources resolve against.
    pub base_url: Option<Url>,
}

/// Shared handle to the host's formatter registry.
pub type SharedRegistry = Rc<RefCell<dyn FormatterRegistry>>;

/// Errors resolving an image source.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("missing image source")]
    MissingSource,

    #[error("invalid image source: {0}")]
    InvalidSource(#[from] url::ParseError),
}

/// Builds markup nodes.
///
/// Holds the environment, the click bridge instance, and the registry handle
/// the bridge installs into the first time a clickable element is built.
pub struct Builder {
    env: Environment,
    registry: SharedRegistry,
    bridge: Rc<ClickFormatter>,
}

impl Builder {
    pub fn new(env: Environment, registry: SharedRegistry) -> Self {
        Builder {
            env,
            registry,
            bridge: Rc::new(ClickFormatter::new()),
        }
    }

    /// The bridge formatter this builder wires clickable elements through.
    pub fn bridge(&self) -> Rc<ClickFormatter> {
        self.bridge.clone()
    }

    /// Build a markup node.
    pub fn build(&self, tag: Tag, attrs: Option<Attrs>, children: Vec<Child>) -> Node {
        let mut attrs = attrs.unwrap_or_default();
        let mut children = children;

        // Alias tags rewrite to a base tag plus a preset style, or delegate
        // to a handler outright.
        match alias_rule(tag) {
            Some(AliasRule::Handler(handler)) => return handler(self, attrs, children),
            Some(AliasRule::Preset { base, style }) => {
                let preset = normalize_style(Some(&StyleValue::Map(style)));
                let inline = normalize_style(attrs.style.as_ref());
                attrs.style = Some(StyleValue::Text(format!("{preset}{inline}")));
                return self.build(base, Some(attrs), children);
            }
            None => {}
        }

        // The host will not render children on an object element.
        if tag == Tag::Object {
            children.clear();
        }

        // A clickable element becomes an inert wrapper around a boxed value
        // the click bridge knows how to present.
        if let Some(on_click) = attrs.on_click.take() {
            return self.build_clickable(tag, attrs, children, on_click);
        }

        if !attrs.variant.is_empty() {
            let variants = std::mem::take(&mut attrs.variant);
            attrs.style = Some(self.resolve_variants(&variants, attrs.style.take()));
        }

        let style = attrs.style.as_ref().map(|s| normalize_style(Some(s)));

        let mut out = Vec::new();
        for child in children {
            classify_child(child, &mut out);
        }
        // Hosts render childless non-object elements inconsistently.
        if out.is_empty() && tag != Tag::Object {
            out.push(NodeChild::Text(String::new()));
        }

        Node {
            tag,
            attrs: Some(NodeAttrs {
                style,
                object: attrs.object,
                config: attrs.config,
            }),
            children: out,
        }
    }

    fn build_clickable(
        &self,
        tag: Tag,
        attrs: Attrs,
        children: Vec<Child>,
        on_click: OnClick,
    ) -> Node {
        self.registry.borrow_mut().install(self.bridge.clone());
        let inner = self.build(tag, Some(attrs), children);
        let boxed = ClickBox::new(inner, on_click);
        Node {
            tag,
            attrs: None,
            children: vec![NodeChild::Node(Node::object(ObjectValue::ClickBox(boxed)))],
        }
    }

    /// Merge variant roles left-to-right, inline style last.
    fn resolve_variants(&self, variants: &[String], inline: Option<StyleValue>) -> StyleValue {
        let preset = theme::preset(self.env.color_scheme);
        let mut merged = CssMap::new();
        for name in variants {
            // Unknown names are a silent no-op.
            if let Some(role) = preset.role(name) {
                for (key, value) in role {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        match inline {
            Some(StyleValue::Map(map)) => {
                for (key, value) in map {
                    merged.insert(key, value);
                }
                StyleValue::Map(merged)
            }
            Some(StyleValue::Text(text)) => {
                // Caller text goes after the rendered presets; CSS order
                // makes the caller's declarations win.
                let rendered = normalize_style(Some(&StyleValue::Map(merged)));
                let inline = normalize_style(Some(&StyleValue::Text(text)));
                StyleValue::Text(format!("{rendered}{inline}"))
            }
            None => StyleValue::Map(merged),
        }
    }
}

enum AliasRule {
    /// Rewrite to a base tag and prepend a preset style.
    Preset { base: Tag, style: CssMap },
    /// Delegate entirely to a handler.
    Handler(fn(&Builder, Attrs, Vec<Child>) -> Node),
}

fn alias_rule(tag: Tag) -> Option<AliasRule> {
    match tag {
        Tag::Code => Some(AliasRule::Preset {
            base: Tag::Span,
            style: theme::code_block(),
        }),
        Tag::Br => Some(AliasRule::Preset {
            base: Tag::Div,
            style: css([("display", "block"), ("marginTop", "0.5em")]),
        }),
        Tag::Img => Some(AliasRule::Handler(build_image)),
        _ => None,
    }
}

/// Classify one candidate child into the output list.
fn classify_child(child: Child, out: &mut Vec<NodeChild>) {
    match child {
        Child::Nil => {}
        Child::Node(node) => out.push(NodeChild::Node(node)),
        Child::Text(text) => out.push(NodeChild::Text(text)),
        Child::Number(n) => out.push(NodeChild::Number(n)),
        Child::List(items) => {
            // A mapped-list child: splice it one level when every element is
            // directly renderable. Inner nils survive as explicit nulls.
            if items.iter().all(Child::is_renderable) {
                out.extend(items.into_iter().filter_map(as_renderable));
            } else {
                out.push(NodeChild::Node(Node::object(ObjectValue::Mixed(items))));
            }
        }
        Child::Opaque(value) => {
            out.push(NodeChild::Node(Node::object(ObjectValue::Data(value))));
        }
    }
}

fn as_renderable(child: Child) -> Option<NodeChild> {
    match child {
        Child::Node(node) => Some(NodeChild::Node(node)),
        Child::Text(text) => Some(NodeChild::Text(text)),
        Child::Number(n) => Some(NodeChild::Number(n)),
        Child::Nil => Some(NodeChild::Null),
        Child::List(_) | Child::Opaque(_) => None,
    }
}

/// Image elements render as a span whose style carries `content: url(...)`.
fn build_image(builder: &Builder, mut attrs: Attrs, _children: Vec<Child>) -> Node {
    let src = attrs.src.take();
    match resolve_source(builder.env.base_url.as_ref(), src.as_deref()) {
        Ok(url) => {
            let mut computed = CssMap::new();
            computed.insert("content".to_string(), format!("url(\"{url}\")"));
            computed.insert("width".to_string(), dimension_css(attrs.width.take()));
            computed.insert("height".to_string(), dimension_css(attrs.height.take()));

            attrs.style = Some(match attrs.style.take() {
                Some(StyleValue::Map(map)) => {
                    // Caller keys override the computed declarations.
                    for (key, value) in map {
                        computed.insert(key, value);
                    }
                    StyleValue::Map(computed)
                }
                Some(StyleValue::Text(text)) => {
                    let rendered = normalize_style(Some(&StyleValue::Map(computed)));
                    let inline = normalize_style(Some(&StyleValue::Text(text)));
                    StyleValue::Text(format!("{rendered}{inline}"))
                }
                None => StyleValue::Map(computed),
            });
            builder.build(Tag::Span, Some(attrs), Vec::new())
        }
        Err(err) => {
            tracing::error!(
                src = src.as_deref().unwrap_or(""),
                "failed to resolve image source: {err}"
            );
            builder.build(Tag::Span, None, vec![Child::Text(err.to_string())])
        }
    }
}

fn resolve_source(base: Option<&Url>, src: Option<&str>) -> Result<Url, ImageError> {
    let src = src.ok_or(ImageError::MissingSource)?;
    let url = match base {
        Some(base) => base.join(src)?,
        None => Url::parse(src)?,
    };
    Ok(url)
}

fn dimension_css(dim: Option<Dimension>) -> String {
    dim.map(|d| d.to_css())
        .unwrap_or_else(|| "initial".to_string())
}
