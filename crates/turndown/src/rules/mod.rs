//! Rule system for node to Markdown conversion.

mod rule;

pub use rule::{Filter, PredicateFn, ReplacementFn, Rule};

use indexmap::IndexMap;

use crate::node::NodeRef;
use crate::service::TurndownOptions;

/// Collection of rules for conversion
#[derive(Default)]
pub struct Rules {
    /// Rules in registration order; the first match wins
    rules: IndexMap<String, Rule>,
    /// Keep rules (preserve as HTML)
    keep_rules: Vec<Filter>,
    /// Remove rules (remove entirely)
    remove_rules: Vec<Filter>,
}

impl Rules {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule. Re-adding a key replaces the rule but keeps its position.
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.rules.insert(key.to_string(), rule);
    }

    /// Add a keep filter
    pub fn keep(&mut self, filter: Filter) {
        self.keep_rules.push(filter);
    }

    /// Add a remove filter
    pub fn remove(&mut self, filter: Filter) {
        self.remove_rules.push(filter);
    }

    /// Number of registered rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Registered rule keys, in precedence order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Find the appropriate rule for a node, with its key
    pub fn for_node<'a>(
        &'a self,
        node: &NodeRef,
        options: &TurndownOptions,
    ) -> Option<(&'a str, &'a Rule)> {
        let tag = node.tag_name();

        self.rules
            .iter()
            .find(|(_, rule)| rule.filter().matches(&tag, node, options))
            .map(|(key, rule)| (key.as_str(), rule))
    }

    /// Check if a node should be kept as HTML
    pub fn should_keep(&self, node: &NodeRef, options: &TurndownOptions) -> bool {
        let tag = node.tag_name();

        // Don't keep if a rule matches
        if self.matches_any_rule(&tag, node, options) {
            return false;
        }

        self.keep_rules
            .iter()
            .any(|filter| filter.matches(&tag, node, options))
    }

    /// Check if a node should be removed
    pub fn should_remove(&self, node: &NodeRef, options: &TurndownOptions) -> bool {
        let tag = node.tag_name();

        if self.matches_any_rule(&tag, node, options) {
            return false;
        }

        // Keep wins over remove
        if self
            .keep_rules
            .iter()
            .any(|filter| filter.matches(&tag, node, options))
        {
            return false;
        }

        self.remove_rules
            .iter()
            .any(|filter| filter.matches(&tag, node, options))
    }

    /// Get the keep replacement for a node
    pub fn keep_replacement(&self, node: &NodeRef) -> String {
        let html = node.outer_html();
        if crate::utilities::is_block(&node.tag_name()) {
            format!("\n\n{}\n\n", html)
        } else {
            html
        }
    }

    fn matches_any_rule(&self, tag: &str, node: &NodeRef, options: &TurndownOptions) -> bool {
        self.rules
            .values()
            .any(|rule| rule.filter().matches(tag, node, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    #[test]
    fn test_first_registered_rule_wins() {
        let mut rules = Rules::new();
        rules.add("fenced", Rule::for_tag("pre", |_, _, _| "fenced".to_string()));
        rules.add("any-pre", Rule::for_tag("pre", |_, _, _| "other".to_string()));

        let node = Node::element("pre");
        let node_ref = NodeRef::new(&node);
        let options = TurndownOptions::default();

        let (key, rule) = rules.for_node(&node_ref, &options).unwrap();
        assert_eq!(key, "fenced");
        assert_eq!(rule.replace(&node_ref, "", &options), "fenced");
    }

    #[test]
    fn test_readding_key_keeps_position() {
        let mut rules = Rules::new();
        rules.add("a", Rule::for_tag("a", |_, c, _| c.to_string()));
        rules.add("b", Rule::for_tag("b", |_, c, _| c.to_string()));
        rules.add("a", Rule::for_tag("i", |_, c, _| c.to_string()));

        assert_eq!(rules.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn test_rule_beats_keep_and_remove() {
        let mut rules = Rules::new();
        rules.add("table", Rule::for_tag("table", |_, c, _| c.to_string()));
        rules.keep(Filter::tag("table"));
        rules.remove(Filter::tag("table"));

        let node = Node::element("table");
        let node_ref = NodeRef::new(&node);
        let options = TurndownOptions::default();

        assert!(!rules.should_keep(&node_ref, &options));
        assert!(!rules.should_remove(&node_ref, &options));
    }

    #[test]
    fn test_keep_beats_remove() {
        let mut rules = Rules::new();
        rules.keep(Filter::tag("iframe"));
        rules.remove(Filter::tags(&["iframe", "script"]));

        let options = TurndownOptions::default();
        let iframe = Node::element("iframe");
        let script = Node::element("script");

        assert!(rules.should_keep(&NodeRef::new(&iframe), &options));
        assert!(!rules.should_remove(&NodeRef::new(&iframe), &options));
        assert!(rules.should_remove(&NodeRef::new(&script), &options));
    }
}
