//! Click-handler bridge.
//!
//! JsonML has no event wiring, so a clickable element is rewired into an
//! inert wrapper around a boxed value this formatter claims: the collapsed
//! view shows the element's normal appearance, and expanding it fires the
//! callback.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::formatter::Formatter;
use crate::markup::{Node, NodeChild, ObjectValue, Tag};

/// Callback attached to a clickable element.
pub type OnClick = Rc<dyn Fn()>;

/// State boxed behind a clickable element: the element's visual node and the
/// callback to fire on expand. The `Rc` identity doubles as the
/// self-reference shown after the callback runs.
pub struct ClickBox {
    /// The element as it would have been built without `on_click`.
    pub node: Node,
    on_click: OnClick,
}

impl ClickBox {
    pub fn new(node: Node, on_click: OnClick) -> Rc<Self> {
        Rc::new(ClickBox { node, on_click })
    }
}

impl fmt::Debug for ClickBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickBox")
            .field("node", &self.node)
            .field("on_click", &"<callback>")
            .finish()
    }
}

/// Formatter claiming [`ObjectValue::ClickBox`] values.
#[derive(Debug, Default)]
pub struct ClickFormatter;

impl ClickFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for ClickFormatter {
    fn header(&self, object: &ObjectValue, _config: Option<&Value>) -> Option<Node> {
        match object {
            ObjectValue::ClickBox(boxed) => Some(boxed.node.clone()),
            _ => None,
        }
    }

    fn has_body(&self, object: &ObjectValue, _config: Option<&Value>) -> bool {
        matches!(object, ObjectValue::ClickBox(_))
    }

    fn body(&self, object: &ObjectValue, _config: Option<&Value>) -> Option<Node> {
        let ObjectValue::ClickBox(boxed) = object else {
            return None;
        };
        // The host re-requests the body on every re-open, so this fires once
        // per expand, not once per element.
        (boxed.on_click)();
        Some(Node {
            tag: Tag::Div,
            attrs: Some(Default::default()),
            children: vec![NodeChild::Node(Node::object(ObjectValue::ClickBox(
                boxed.clone(),
            )))],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn clickable(counter: &Rc<Cell<u32>>) -> Rc<ClickBox> {
        let counter = counter.clone();
        let node = Node {
            tag: Tag::Span,
            attrs: Some(Default::default()),
            children: vec![NodeChild::Text("click me".to_string())],
        };
        ClickBox::new(node, Rc::new(move || counter.set(counter.get() + 1)))
    }

    #[test]
    fn header_shows_the_wrapped_node() {
        let counter = Rc::new(Cell::new(0));
        let boxed = clickable(&counter);
        let formatter = ClickFormatter::new();

        let header = formatter
            .header(&ObjectValue::ClickBox(boxed.clone()), None)
            .unwrap();

        assert_eq!(header, boxed.node);
        assert_eq!(counter.get(), 0, "header must not fire the callback");
    }

    #[test]
    fn body_fires_the_callback_and_boxes_a_self_reference() {
        let counter = Rc::new(Cell::new(0));
        let boxed = clickable(&counter);
        let formatter = ClickFormatter::new();
        let object = ObjectValue::ClickBox(boxed.clone());

        let body = formatter.body(&object, None).unwrap();

        assert_eq!(counter.get(), 1);
        assert_eq!(body.tag, Tag::Div);
        assert_eq!(body.children.len(), 1);
        let NodeChild::Node(child) = &body.children[0] else {
            panic!("expected a nested object node");
        };
        assert_eq!(child.boxed_value(), Some(&object));
    }

    #[test]
    fn body_reinvokes_callback_on_each_expand() {
        // Documented quirk: re-collapsing and re-expanding fires again.
        let counter = Rc::new(Cell::new(0));
        let boxed = clickable(&counter);
        let formatter = ClickFormatter::new();
        let object = ObjectValue::ClickBox(boxed);

        formatter.body(&object, None);
        formatter.body(&object, None);
        formatter.body(&object, None);

        assert_eq!(counter.get(), 3);
    }

    #[test]
    fn defers_on_other_values() {
        let formatter = ClickFormatter::new();
        let data = ObjectValue::Data(serde_json::json!({"a": 1}));

        assert!(formatter.header(&data, None).is_none());
        assert!(!formatter.has_body(&data, None));
        assert!(formatter.body(&data, None).is_none());
    }
}
