//! The custom object formatter capability and the host registry model.

use std::rc::Rc;

use serde_json::Value;

use crate::markup::{Node, ObjectValue};

/// Shared handle to an installed formatter.
pub type SharedFormatter = Rc<dyn Formatter>;

/// The three-operation capability a devtools-style host drives.
///
/// `header` returning `None` defers the value to default formatting. A value
/// whose `has_body` is true can be expanded, at which point the host asks for
/// `body` — again on every re-open.
pub trait Formatter {
    /// Single-line summary of the value, or `None` to defer.
    fn header(&self, object: &ObjectValue, config: Option<&Value>) -> Option<Node>;

    /// Whether the value can be expanded to show more detail.
    fn has_body(&self, object: &ObjectValue, config: Option<&Value>) -> bool;

    /// Expanded rendering of the value.
    fn body(&self, object: &ObjectValue, config: Option<&Value>) -> Option<Node>;
}

/// Where formatters get installed.
///
/// An explicit collaborator: the host adapter owns the list and hands the
/// builder a shared handle, rather than anyone reading ambient global state.
pub trait FormatterRegistry {
    /// Add a formatter. Installing the same instance again is a no-op.
    fn install(&mut self, formatter: SharedFormatter);
}

/// In-memory formatter list with pointer-identity dedup.
#[derive(Default)]
pub struct HostFormatters {
    formatters: Vec<SharedFormatter>,
}

impl HostFormatters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installed formatters, in installation order.
    pub fn formatters(&self) -> &[SharedFormatter] {
        &self.formatters
    }

    /// Whether this exact instance is installed.
    pub fn contains(&self, formatter: &SharedFormatter) -> bool {
        self.formatters.iter().any(|f| Rc::ptr_eq(f, formatter))
    }

    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }
}

impl FormatterRegistry for HostFormatters {
    fn install(&mut self, formatter: SharedFormatter) {
        if self.contains(&formatter) {
            return;
        }
        tracing::debug!(installed = self.formatters.len(), "installing formatter");
        self.formatters.push(formatter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::click::ClickFormatter;

    #[test]
    fn installing_twice_is_a_noop() {
        let mut registry = HostFormatters::new();
        let formatter: SharedFormatter = Rc::new(ClickFormatter::new());

        registry.install(formatter.clone());
        registry.install(formatter.clone());

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&formatter));
    }

    #[test]
    fn distinct_instances_both_install() {
        let mut registry = HostFormatters::new();
        let first: SharedFormatter = Rc::new(ClickFormatter::new());
        let second: SharedFormatter = Rc::new(ClickFormatter::new());

        registry.install(first);
        registry.install(second);

        assert_eq!(registry.len(), 2);
    }
}
