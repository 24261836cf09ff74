//! Fenced and syntax-highlighted code blocks.
//!
//! Highlighted blocks are the markup GitHub renders for highlighted code:
//! `<div class="highlight highlight-<lang>"><pre>...</pre></div>`.

use once_cell::sync::Lazy;
use regex::Regex;
use turndown::{Node, NodeRef, Rule, TurndownService};

static HIGHLIGHT_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"highlight highlight-(\S+)").expect("valid regex"));

/// Language named by a `highlight highlight-<lang>` class
fn highlight_language(class_name: &str) -> Option<&str> {
    HIGHLIGHT_CLASS
        .captures(class_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn is_highlight_div(node: &Node) -> bool {
    node.tag_name() == "div" && highlight_language(node.class_name()).is_some()
}

/// Language named by a `language-<lang>` class on a `code` element
fn code_language(code: &Node) -> &str {
    code.class_name()
        .split_whitespace()
        .find_map(|class| class.strip_prefix("language-"))
        .unwrap_or("")
}

fn fence_block(fence: &str, language: &str, code: &str) -> String {
    format!("\n\n{}{}\n{}\n{}\n\n", fence, language, code, fence)
}

fn code_child<'a>(node: &NodeRef<'a>) -> Option<&'a Node> {
    node.first_child().filter(|child| child.tag_name() == "code")
}

/// `<pre><code>` blocks
pub fn fenced_code_block_rule() -> Rule {
    Rule::when(
        |tag, node| tag == "pre" && code_child(node).is_some(),
        |node, _, options| {
            let Some(code) = code_child(node) else {
                return String::new();
            };
            fence_block(&options.fence, code_language(code), &code.text_content())
        },
    )
}

/// A `pre` inside a highlight wrapper
pub fn highlighted_code_block_rule() -> Rule {
    Rule::when(
        |tag, node| tag == "pre" && node.parent().is_some_and(is_highlight_div),
        |node, _, options| {
            let language = node
                .parent()
                .and_then(|parent| highlight_language(parent.class_name()))
                .unwrap_or("");
            fence_block(&options.fence, language, &node.text_content())
        },
    )
}

/// The highlight wrapper itself
pub fn highlight_wrapper_rule() -> Rule {
    Rule::when(
        |_, node| is_highlight_div(node.node),
        |_, content, _| format!("\n\n{}\n\n", content),
    )
}

/// Plugin: fenced code blocks, including GitHub's highlighted blocks
pub fn code_blocks(service: &mut TurndownService) {
    service
        .add_rule("fencedCodeBlock", fenced_code_block_rule())
        .add_rule("highlightedCodeBlock", highlighted_code_block_rule())
        .add_rule("highlightWrapper", highlight_wrapper_rule());
}
