//! JsonML serialization.
//!
//! Built nodes serialize to the wire shape the host protocol consumes:
//! `[tag, attrs, ...children]` with attributes as an object carrying only the
//! keys that are set, and the click wrapper's absent attributes as `null`.
//! Trees holding live click callbacks have no wire form and refuse to
//! serialize.

use serde::ser::{Error, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::markup::{Child, Node, NodeAttrs, NodeChild, ObjectValue};

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2 + self.children.len()))?;
        seq.serialize_element(self.tag.name())?;
        seq.serialize_element(&self.attrs)?;
        for child in &self.children {
            seq.serialize_element(child)?;
        }
        seq.end()
    }
}

impl Node {
    /// The node as a JsonML [`serde_json::Value`].
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl Serialize for NodeAttrs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = [
            self.style.is_some(),
            self.object.is_some(),
            self.config.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count();

        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(style) = &self.style {
            map.serialize_entry("style", style)?;
        }
        if let Some(object) = &self.object {
            map.serialize_entry("object", object)?;
        }
        if let Some(config) = &self.config {
            map.serialize_entry("config", config)?;
        }
        map.end()
    }
}

impl Serialize for NodeChild {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NodeChild::Node(node) => node.serialize(serializer),
            NodeChild::Text(text) => serializer.serialize_str(text),
            NodeChild::Number(n) => serializer.serialize_f64(*n),
            NodeChild::Null => serializer.serialize_unit(),
        }
    }
}

impl Serialize for ObjectValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ObjectValue::Data(value) => value.serialize(serializer),
            ObjectValue::Mixed(children) => {
                let mut seq = serializer.serialize_seq(Some(children.len()))?;
                for child in children {
                    seq.serialize_element(child)?;
                }
                seq.end()
            }
            ObjectValue::ClickBox(_) => Err(S::Error::custom(
                "click-boxed objects have no JsonML form",
            )),
        }
    }
}

impl Serialize for Child {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Child::Node(node) => node.serialize(serializer),
            Child::Text(text) => serializer.serialize_str(text),
            Child::Number(n) => serializer.serialize_f64(*n),
            Child::Nil => serializer.serialize_unit(),
            Child::List(children) => {
                let mut seq = serializer.serialize_seq(Some(children.len()))?;
                for child in children {
                    seq.serialize_element(child)?;
                }
                seq.end()
            }
            Child::Opaque(value) => value.serialize(serializer),
        }
    }
}
