//! Simulated host dispatch over installed formatters.
//!
//! Mirrors how a devtools-style host consumes the formatter list: the first
//! formatter whose `header` claims a value formats it; expanding consults
//! `has_body` and then requests `body` — again on every re-open.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::formatter::{HostFormatters, SharedFormatter};
use crate::markup::{Node, ObjectValue};

/// Drives installed formatters the way a host inspection UI would.
pub struct Inspector {
    registry: Rc<RefCell<HostFormatters>>,
}

impl Inspector {
    pub fn new(registry: Rc<RefCell<HostFormatters>>) -> Self {
        Inspector { registry }
    }

    /// Collapsed rendering: the first claiming formatter's header.
    ///
    /// `None` means no formatter claims the value and the host falls back to
    /// its default object rendering.
    pub fn header(&self, object: &ObjectValue, config: Option<&Value>) -> Option<Node> {
        self.installed()
            .iter()
            .find_map(|f| f.header(object, config))
    }

    /// Whether the claiming formatter offers an expanded rendering.
    pub fn has_body(&self, object: &ObjectValue, config: Option<&Value>) -> bool {
        self.claiming(object, config)
            .map(|f| f.has_body(object, config))
            .unwrap_or(false)
    }

    /// Expanded rendering. The host calls this again on every re-open.
    pub fn expand(&self, object: &ObjectValue, config: Option<&Value>) -> Option<Node> {
        let formatter = self.claiming(object, config)?;
        if !formatter.has_body(object, config) {
            return None;
        }
        formatter.body(object, config)
    }

    fn claiming(&self, object: &ObjectValue, config: Option<&Value>) -> Option<SharedFormatter> {
        self.installed()
            .into_iter()
            .find(|f| f.header(object, config).is_some())
    }

    // Snapshot the list so formatters can install while we iterate.
    fn installed(&self) -> Vec<SharedFormatter> {
        self.registry.borrow().formatters().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{Builder, Environment};
    use crate::formatter::{Formatter, FormatterRegistry};
    use crate::markup::{Attrs, NodeChild, Tag};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::cell::Cell;

    fn host() -> (Builder, Inspector, Rc<RefCell<HostFormatters>>) {
        let registry = Rc::new(RefCell::new(HostFormatters::new()));
        let builder = Builder::new(Environment::default(), registry.clone());
        let inspector = Inspector::new(registry.clone());
        (builder, inspector, registry)
    }

    fn boxed_click(node: &Node) -> ObjectValue {
        let NodeChild::Node(child) = &node.children[0] else {
            panic!("expected an object-reference child");
        };
        child.boxed_value().cloned().unwrap()
    }

    #[test]
    fn unclaimed_values_defer_to_default_rendering() {
        let (_, inspector, _) = host();
        let data = ObjectValue::Data(json!({"a": 1}));

        assert!(inspector.header(&data, None).is_none());
        assert!(!inspector.has_body(&data, None));
        assert!(inspector.expand(&data, None).is_none());
    }

    #[test]
    fn clickable_round_trip_through_the_host() {
        let (builder, inspector, _) = host();
        let clicks = Rc::new(Cell::new(0u32));
        let counter = clicks.clone();

        let node = builder.build(
            Tag::Span,
            Some(Attrs {
                on_click: Some(Rc::new(move || counter.set(counter.get() + 1))),
                ..Default::default()
            }),
            vec!["run".into()],
        );
        let object = boxed_click(&node);

        // Collapsed: the element's normal appearance, callback untouched.
        let header = inspector.header(&object, None).unwrap();
        assert_eq!(
            header,
            builder.build(Tag::Span, None, vec!["run".into()])
        );
        assert_eq!(clicks.get(), 0);
        assert!(inspector.has_body(&object, None));

        // Expand fires the callback; the body boxes a self-reference.
        let body = inspector.expand(&object, None).unwrap();
        assert_eq!(clicks.get(), 1);
        let NodeChild::Node(reference) = &body.children[0] else {
            panic!("expected a nested object node");
        };
        assert_eq!(reference.boxed_value(), Some(&object));

        // Re-expanding fires again; documented quirk.
        inspector.expand(&object, None);
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn first_claiming_formatter_wins() {
        struct DataFormatter;

        impl Formatter for DataFormatter {
            fn header(&self, object: &ObjectValue, _config: Option<&Value>) -> Option<Node> {
                match object {
                    ObjectValue::Data(_) => Some(Node {
                        tag: Tag::Span,
                        attrs: Some(Default::default()),
                        children: vec![NodeChild::Text("data".to_string())],
                    }),
                    _ => None,
                }
            }

            fn has_body(&self, _object: &ObjectValue, _config: Option<&Value>) -> bool {
                false
            }

            fn body(&self, _object: &ObjectValue, _config: Option<&Value>) -> Option<Node> {
                None
            }
        }

        let (builder, inspector, registry) = host();
        registry.borrow_mut().install(Rc::new(DataFormatter));
        registry.borrow_mut().install(builder.bridge());

        let data = ObjectValue::Data(json!([1, 2]));
        let header = inspector.header(&data, None).unwrap();
        assert_eq!(header.children, vec![NodeChild::Text("data".to_string())]);
        assert!(!inspector.has_body(&data, None));
    }
}
