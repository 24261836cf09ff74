//! # turndown
//!
//! Fold DOM node trees into Markdown.
//!
//! This is a Rust implementation inspired by [turndown](https://github.com/mixmark-io/turndown):
//! a tree is converted bottom-up, and every element matched by a [`Rule`] is
//! replaced by whatever its replacement function returns for the element's
//! already-converted content.
//!
//! ## Design
//!
//! The service ships no Markdown dialect of its own. Unmatched block elements
//! are separated by blank lines, unmatched inline elements pass their content
//! through, and everything else comes from rules installed via
//! [`TurndownService::add_rule`] or whole plugins via
//! [`TurndownService::use_plugin`].
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use turndown::{Node, Rule, TurndownService};
//!
//! let mut service = TurndownService::new();
//! service.add_rule("strong", Rule::for_tags(&["strong", "b"], |_, content, _| {
//!     format!("**{}**", content)
//! }));
//!
//! let mut p = Node::element("p");
//! p.add_child(Node::element("b").with_child(Node::text("Hello")));
//!
//! let markdown = service.turndown(&p).unwrap();
//! assert_eq!(markdown, "**Hello**");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use turndown::TurndownService;
//!
//! let service = TurndownService::new();
//! let markdown = service.turndown_html("<p>Hello World</p>").unwrap();
//! assert_eq!(markdown, "Hello World");
//! ```

#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod rules;
mod service;
mod utilities;

#[cfg(feature = "html")]
pub use html::parse_html;
pub use node::{Node, NodeRef, NodeType};
pub use rules::{Filter, PredicateFn, ReplacementFn, Rule, Rules};
pub use service::{TurndownOptions, TurndownService};
pub use utilities::*;

/// Error type for turndown operations
#[derive(Debug, thiserror::Error)]
pub enum TurndownError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, TurndownError>;
