//! TurndownService - the main entry point for Node to Markdown conversion.

use crate::node::{Node, NodeRef, NodeType};
use crate::rules::{Filter, Rule, Rules};
use crate::utilities::{collapse_blank_lines, collapse_whitespace, escape_markdown, is_block};
use crate::{Result, TurndownError};

/// Options for TurndownService
#[derive(Debug, Clone)]
pub struct TurndownOptions {
    /// Fence string for fenced code blocks
    pub fence: String,

    /// Delimiter wrapped around struck-through text
    pub strike_delimiter: String,

    /// Replacement for a line break element
    pub br: String,
}

impl Default for TurndownOptions {
    fn default() -> Self {
        Self {
            fence: "```".to_string(),
            strike_delimiter: "~~".to_string(),
            br: "\n".to_string(),
        }
    }
}

impl TurndownOptions {
    /// Reject options that would produce malformed Markdown
    pub fn validate(&self) -> Result<()> {
        let fence_char = self.fence.chars().next();
        let is_fence = matches!(fence_char, Some('`') | Some('~'))
            && self.fence.chars().count() >= 3
            && self.fence.chars().all(|c| Some(c) == fence_char);
        if !is_fence {
            return Err(TurndownError::InvalidInput(format!(
                "fence must be at least three backticks or tildes, got {:?}",
                self.fence
            )));
        }

        if self.strike_delimiter.is_empty() {
            return Err(TurndownError::InvalidInput(
                "strike_delimiter must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// The main service for converting DOM nodes to Markdown
#[derive(Default)]
pub struct TurndownService {
    options: TurndownOptions,
    rules: Rules,
}

impl TurndownService {
    /// Create a new TurndownService with default options and no rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a TurndownService with custom options
    pub fn with_options(options: TurndownOptions) -> Self {
        Self {
            options,
            rules: Rules::new(),
        }
    }

    /// Convert a DOM Node tree to Markdown
    pub fn turndown(&self, node: &Node) -> Result<String> {
        self.options.validate()?;

        let output = self.process(NodeRef::new(node));
        let result = post_process(&output);

        tracing::debug!(root = %node.node_name, len = result.len(), "converted node tree");
        Ok(result)
    }

    /// Parse an HTML string and convert it to Markdown
    #[cfg(feature = "html")]
    pub fn turndown_html(&self, html: &str) -> Result<String> {
        let node = crate::html::parse_html(html);
        self.turndown(&node)
    }

    /// Add a rule. Rules are consulted in the order they were first added.
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Keep elements matching the filter as HTML
    pub fn keep(&mut self, filter: Filter) -> &mut Self {
        self.rules.keep(filter);
        self
    }

    /// Remove elements matching the filter
    pub fn remove(&mut self, filter: Filter) -> &mut Self {
        self.rules.remove(filter);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Escape markdown special characters in a string
    pub fn escape(&self, text: &str) -> String {
        escape_markdown(text)
    }

    /// Get the installed rules
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Get the current options
    pub fn options(&self) -> &TurndownOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut TurndownOptions {
        &mut self.options
    }

    fn process(&self, node: NodeRef) -> String {
        match node.node.node_type {
            NodeType::Text => {
                convert_text(node.node.node_value.as_deref().unwrap_or(""), true, true)
            }
            NodeType::Comment => String::new(),
            NodeType::Element => self.process_element(node),
            NodeType::Document | NodeType::DocumentFragment => self.process_children(node),
        }
    }

    /// Convert all children of a node, in order
    fn process_children(&self, parent: NodeRef) -> String {
        let parent_is_block = parent.is_element() && is_block(&parent.tag_name());
        let children: Vec<&Node> = parent.children().collect();

        let mut result = String::new();
        let mut element_index = 0;

        for (i, &child) in children.iter().enumerate() {
            match child.node_type {
                NodeType::Text => {
                    let prev = i.checked_sub(1).map(|j| children[j]);
                    let next = children.get(i + 1).copied();
                    result.push_str(&convert_text(
                        child.node_value.as_deref().unwrap_or(""),
                        is_block_boundary(prev, parent_is_block),
                        is_block_boundary(next, parent_is_block),
                    ));
                }
                NodeType::Comment => {}
                _ => {
                    let child_ref = NodeRef::with_parent(child, parent.node, element_index);
                    if child.is_element() {
                        element_index += 1;
                    }
                    result.push_str(&self.process(child_ref));
                }
            }
        }

        result
    }

    /// Process a single element: children first, then its own rule
    fn process_element(&self, node: NodeRef) -> String {
        if self.rules.should_remove(&node, &self.options) {
            tracing::trace!(tag = %node.node.node_name, "removing node");
            return String::new();
        }

        if self.rules.should_keep(&node, &self.options) {
            tracing::trace!(tag = %node.node.node_name, "keeping node as HTML");
            return self.rules.keep_replacement(&node);
        }

        let content = self.process_children(node);

        if let Some((key, rule)) = self.rules.for_node(&node, &self.options) {
            tracing::trace!(tag = %node.node.node_name, rule = key, "applying rule");
            return rule.replace(&node, &content, &self.options);
        }

        if is_block(&node.tag_name()) {
            format!("\n\n{}\n\n", content)
        } else {
            content
        }
    }
}

/// Whether a text node's neighbour (or the edge of its parent) ends a line
fn is_block_boundary(sibling: Option<&Node>, parent_is_block: bool) -> bool {
    match sibling {
        Some(node) => node.is_element() && is_block(&node.tag_name()),
        None => parent_is_block,
    }
}

/// Collapse whitespace, trim it at block boundaries, then escape
fn convert_text(text: &str, trim_start: bool, trim_end: bool) -> String {
    let collapsed = collapse_whitespace(text);
    let mut text = collapsed.as_str();
    if trim_start {
        text = text.trim_start();
    }
    if trim_end {
        text = text.trim_end();
    }
    escape_markdown(text)
}

/// Strip outer newlines and collapse blank-line runs
fn post_process(output: &str) -> String {
    collapse_blank_lines(output.trim_matches('\n'))
}
