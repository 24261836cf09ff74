//! Selectors and replacements: what a rule set hands to the fold.
//!
//! A [`Filter`] selects nodes either by tag or by a test over the node in its
//! tree context. A [`Rule`] pairs a filter with the function that turns the
//! node's already-converted content into its Markdown.

use crate::node::NodeRef;
use crate::service::TurndownOptions;

/// Replacement: `(node, converted children, options) -> markdown`
pub type ReplacementFn = Box<dyn Fn(&NodeRef, &str, &TurndownOptions) -> String + Send + Sync>;

/// Selector test: `(lowercase tag, node, options) -> selected`
pub type PredicateFn = Box<dyn Fn(&str, &NodeRef, &TurndownOptions) -> bool + Send + Sync>;

/// Which nodes a rule, keep entry or remove entry applies to
pub enum Filter {
    /// Any of these lowercase tag names
    Tags(Vec<String>),
    /// A test over the tag and the node in context
    Predicate(PredicateFn),
}

impl Filter {
    pub fn tag(name: &str) -> Self {
        Self::tags(&[name])
    }

    pub fn tags(names: &[&str]) -> Self {
        Filter::Tags(names.iter().map(|s| s.to_lowercase()).collect())
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str, &NodeRef, &TurndownOptions) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    /// Select by classifying the tag alone, e.g. "is this any table element"
    pub fn tag_class<F>(classify: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::predicate(move |tag, _, _| classify(tag))
    }

    /// Check if this filter selects a node. `tag` is expected in lowercase.
    pub fn matches(&self, tag: &str, node: &NodeRef, options: &TurndownOptions) -> bool {
        match self {
            Filter::Tags(tags) => tags.iter().any(|t| t == tag),
            Filter::Predicate(f) => f(tag, node, options),
        }
    }
}

impl From<&str> for Filter {
    fn from(tag: &str) -> Self {
        Filter::tag(tag)
    }
}

impl From<&[&str]> for Filter {
    fn from(tags: &[&str]) -> Self {
        Filter::tags(tags)
    }
}

impl std::fmt::Debug for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::Tags(tags) => f.debug_tuple("Tags").field(tags).finish(),
            Filter::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// A selector plus the replacement applied to every node it selects
pub struct Rule {
    filter: Filter,
    replacement: ReplacementFn,
}

impl Rule {
    pub fn new<F>(filter: impl Into<Filter>, replacement: F) -> Self
    where
        F: Fn(&NodeRef, &str, &TurndownOptions) -> String + Send + Sync + 'static,
    {
        Self {
            filter: filter.into(),
            replacement: Box::new(replacement),
        }
    }

    pub fn for_tag<F>(tag: &str, replacement: F) -> Self
    where
        F: Fn(&NodeRef, &str, &TurndownOptions) -> String + Send + Sync + 'static,
    {
        Self::new(Filter::tag(tag), replacement)
    }

    pub fn for_tags<F>(tags: &[&str], replacement: F) -> Self
    where
        F: Fn(&NodeRef, &str, &TurndownOptions) -> String + Send + Sync + 'static,
    {
        Self::new(Filter::tags(tags), replacement)
    }

    /// A rule selected by looking at the node in context. Options only reach
    /// the replacement.
    pub fn when<P, F>(selects: P, replacement: F) -> Self
    where
        P: Fn(&str, &NodeRef) -> bool + Send + Sync + 'static,
        F: Fn(&NodeRef, &str, &TurndownOptions) -> String + Send + Sync + 'static,
    {
        Self::new(
            Filter::predicate(move |tag, node, _| selects(tag, node)),
            replacement,
        )
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Apply this rule's replacement
    pub fn replace(&self, node: &NodeRef, content: &str, options: &TurndownOptions) -> String {
        (self.replacement)(node, content, options)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("filter", &self.filter).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    #[test]
    fn test_tag_filters_are_lowercased() {
        let options = TurndownOptions::default();
        let node = Node::element("TD");
        let node_ref = NodeRef::new(&node);

        assert!(Filter::tag("TD").matches("td", &node_ref, &options));
        assert!(Filter::tags(&["th", "TD"]).matches("td", &node_ref, &options));
        assert!(!Filter::tag("th").matches("td", &node_ref, &options));
    }

    #[test]
    fn test_filter_from_tags() {
        let options = TurndownOptions::default();
        let node = Node::element("s");
        let node_ref = NodeRef::new(&node);

        let single: Filter = "S".into();
        let many: Filter = (&["del", "s"][..]).into();
        assert!(single.matches("s", &node_ref, &options));
        assert!(many.matches("s", &node_ref, &options));
        assert_eq!(format!("{:?}", many), "Tags([\"del\", \"s\"])");
    }

    #[test]
    fn test_tag_class_filter() {
        let options = TurndownOptions::default();
        let node = Node::element("tbody");
        let node_ref = NodeRef::new(&node);

        let sections = Filter::tag_class(|tag| matches!(tag, "thead" | "tbody" | "tfoot"));
        assert!(sections.matches("tbody", &node_ref, &options));
        assert!(!sections.matches("tr", &node_ref, &options));
    }

    #[test]
    fn test_when_rule_sees_node_context() {
        let options = TurndownOptions::default();
        let li = Node::element("li");
        let input = Node::element_with_attrs("input", vec![("type", "checkbox")]);
        let in_item = NodeRef::with_parent(&input, &li, 0);
        let alone = NodeRef::new(&input);

        let rule = Rule::when(
            |tag, node| tag == "input" && node.parent_tag().as_deref() == Some("li"),
            |_, _, _| "[ ] ".to_string(),
        );

        assert!(rule.filter().matches("input", &in_item, &options));
        assert!(!rule.filter().matches("input", &alone, &options));
        assert_eq!(rule.replace(&in_item, "", &options), "[ ] ");
    }

    #[test]
    fn test_replace_receives_content_and_options() {
        let options = TurndownOptions::default();
        let node = Node::element("del");
        let rule = Rule::new("del", |_, content, options| {
            format!("{0}{1}{0}", options.strike_delimiter, content)
        });

        assert_eq!(rule.replace(&NodeRef::new(&node), "gone", &options), "~~gone~~");
    }
}
