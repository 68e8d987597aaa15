//! Markup node and attribute types.
//!
//! A built [`Node`] is the JsonML shape `[tag, attrs, ...children]` the host
//! renders. Candidate children arrive as the closed [`Child`] sum and are
//! classified by variant, so there is no runtime type probing anywhere in the
//! pipeline.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::click::{ClickBox, OnClick};
use crate::style::StyleValue;

/// Element vocabulary understood by the host.
///
/// `Code` and `Br` are alias tags: they resolve to a base tag plus a preset
/// style during the build and never appear in built output. `Img` resolves
/// through its own handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Div,
    Span,
    Ol,
    Li,
    Table,
    Tr,
    Td,
    Object,
    Img,
    Code,
    Br,
}

impl Tag {
    /// The tag name as it appears in JsonML output.
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::Ol => "ol",
            Tag::Li => "li",
            Tag::Table => "table",
            Tag::Tr => "tr",
            Tag::Td => "td",
            Tag::Object => "object",
            Tag::Img => "img",
            Tag::Code => "code",
            Tag::Br => "br",
        }
    }
}

/// Fragment tag: grouping children without visual structure of its own.
pub const FRAGMENT: Tag = Tag::Span;

/// Width or height of an image element.
#[derive(Debug, Clone, PartialEq)]
pub enum Dimension {
    /// Numeric size, rendered as `"<n>px"`.
    Px(f64),
    /// Raw CSS length or keyword, passed through unchanged.
    Text(String),
}

impl Dimension {
    /// Render as a CSS declaration value.
    pub fn to_css(&self) -> String {
        match self {
            Dimension::Px(n) => format!("{n}px"),
            Dimension::Text(s) => s.clone(),
        }
    }
}

/// A value boxed behind the object-reference tag.
///
/// The variant tag is the discriminator the click bridge keys on; there is no
/// hidden marker property.
#[derive(Clone)]
pub enum ObjectValue {
    /// Arbitrary caller data, shown by the host's default inspector.
    Data(Value),
    /// A non-uniform child list boxed whole for default inspection.
    Mixed(Vec<Child>),
    /// Click bridge state; claimed by [`crate::ClickFormatter`].
    ClickBox(Rc<ClickBox>),
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ObjectValue::Data(a), ObjectValue::Data(b)) => a == b,
            (ObjectValue::Mixed(a), ObjectValue::Mixed(b)) => a == b,
            (ObjectValue::ClickBox(a), ObjectValue::ClickBox(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectValue::Data(value) => f.debug_tuple("Data").field(value).finish(),
            ObjectValue::Mixed(children) => f.debug_tuple("Mixed").field(children).finish(),
            ObjectValue::ClickBox(boxed) => f.debug_tuple("ClickBox").field(boxed).finish(),
        }
    }
}

/// Attribute bag accepted by [`crate::Builder::build`].
///
/// All fields are optional; which ones are meaningful depends on the tag:
/// `object` and `config` belong to [`Tag::Object`], `src`/`width`/`height` to
/// [`Tag::Img`], everything else to plain elements.
#[derive(Clone, Default)]
pub struct Attrs {
    /// Inline CSS, as raw declaration text or a property map.
    pub style: Option<StyleValue>,
    /// Theme roles merged under `style`, resolved light or dark.
    pub variant: Vec<String>,
    /// Click callback; the built element is rewired through the click bridge.
    pub on_click: Option<OnClick>,
    /// Value handed to the host's inspector ([`Tag::Object`] only).
    pub object: Option<ObjectValue>,
    /// Side-channel data passed to whichever formatter claims `object`.
    pub config: Option<Value>,
    /// Image source, resolved against the environment's base URL.
    pub src: Option<String>,
    /// Image width.
    pub width: Option<Dimension>,
    /// Image height.
    pub height: Option<Dimension>,
}

impl fmt::Debug for Attrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attrs")
            .field("style", &self.style)
            .field("variant", &self.variant)
            .field("on_click", &self.on_click.as_ref().map(|_| "<callback>"))
            .field("object", &self.object)
            .field("config", &self.config)
            .field("src", &self.src)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Normalized attributes carried by a built [`Node`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeAttrs {
    /// Flattened, semicolon-terminated style string.
    pub style: Option<String>,
    /// Boxed value for object-reference nodes.
    pub object: Option<ObjectValue>,
    /// Side-channel formatter data for object-reference nodes.
    pub config: Option<Value>,
}

impl NodeAttrs {
    /// True when no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.style.is_none() && self.object.is_none() && self.config.is_none()
    }
}

/// A built markup node.
///
/// Immutable once built. Being a distinct type is what keeps a nested node
/// from ever being re-classified as an opaque child.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Resolved element tag, never an alias.
    pub tag: Tag,
    /// Normalized attributes; `None` only on the inert click wrapper.
    pub attrs: Option<NodeAttrs>,
    /// Child content in input order.
    pub children: Vec<NodeChild>,
}

impl Node {
    /// Object-reference node boxing `value`, with no children.
    pub fn object(value: ObjectValue) -> Self {
        Node {
            tag: Tag::Object,
            attrs: Some(NodeAttrs {
                object: Some(value),
                ..Default::default()
            }),
            children: Vec::new(),
        }
    }

    /// The boxed value, when this is an object-reference node.
    pub fn boxed_value(&self) -> Option<&ObjectValue> {
        self.attrs.as_ref().and_then(|attrs| attrs.object.as_ref())
    }
}

/// Children a built node can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeChild {
    /// A nested node.
    Node(Node),
    /// Text content.
    Text(String),
    /// Numeric content.
    Number(f64),
    /// Survivor of a flattened list; serializes as JSON `null`.
    Null,
}

/// A candidate child of [`crate::Builder::build`].
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    /// An already-built node; appended as-is.
    Node(Node),
    /// Text content.
    Text(String),
    /// Numeric content.
    Number(f64),
    /// Dropped at the top level, kept as `null` inside flattened lists.
    Nil,
    /// A list child; spliced when uniform, boxed whole otherwise.
    List(Vec<Child>),
    /// Anything else; boxed for the host's default inspector.
    Opaque(Value),
}

impl Child {
    /// True for children a node can carry directly.
    ///
    /// `Nil` counts: it survives list flattening as an explicit `null`.
    pub fn is_renderable(&self) -> bool {
        matches!(
            self,
            Child::Node(_) | Child::Text(_) | Child::Number(_) | Child::Nil
        )
    }

    /// True when this child is an already-built node.
    pub fn is_node(&self) -> bool {
        matches!(self, Child::Node(_))
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<f64> for Child {
    fn from(n: f64) -> Self {
        Child::Number(n)
    }
}

impl From<i32> for Child {
    fn from(n: i32) -> Self {
        Child::Number(n.into())
    }
}

impl From<Value> for Child {
    fn from(value: Value) -> Self {
        Child::Opaque(value)
    }
}

impl From<Vec<Child>> for Child {
    fn from(children: Vec<Child>) -> Self {
        Child::List(children)
    }
}
