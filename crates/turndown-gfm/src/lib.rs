//! # turndown-gfm
//!
//! GitHub Flavored Markdown rules for [`turndown`].
//!
//! Each rule set is a plugin, a plain `fn(&mut TurndownService)` that can be
//! passed to [`TurndownService::use_plugin`]. [`gfm`] installs all of them in
//! the order they should take precedence.
//!
//! ## Tables
//!
//! Tables become GFM pipe tables. When the source has a `thead`, the separator
//! line honours each header cell's `align` attribute; without one, a separator
//! line of unaligned columns shaped like the first row is put in front:
//!
//! ```rust
//! use turndown::{Node, TurndownService};
//!
//! let mut service = TurndownService::new();
//! service.use_plugin(turndown_gfm::gfm);
//!
//! let row = Node::element("tr")
//!     .with_child(Node::element("td").with_child(Node::text("X")))
//!     .with_child(Node::element("td").with_child(Node::text("Y")));
//! let table = Node::element("table").with_child(Node::element("tbody").with_child(row));
//!
//! let markdown = service.turndown(&table).unwrap();
//! assert_eq!(markdown, "| --- | --- |\n| X | Y |");
//! ```
//!
//! Column widths are not padded, nested tables are not supported, and only the
//! first row of a `thead` shapes the separator line.

mod code_block;
mod line_break;
mod strikethrough;
mod tables;
mod task_list;

pub use code_block::{
    code_blocks, fenced_code_block_rule, highlight_wrapper_rule, highlighted_code_block_rule,
};
pub use line_break::{line_break_rule, line_breaks};
pub use strikethrough::{strikethrough, strikethrough_rule};
pub use tables::{
    first_row_shape, format_body_section, format_cell, format_header_section, format_row,
    format_table, formatter_for, frame_cell, has_header, table_rule, tables, Alignment, Formatter,
    TableNodeKind, DEFAULT_BORDER,
};
pub use task_list::{task_list_item_rule, task_list_items};

use turndown::TurndownService;

/// Plugin: every GFM rule
pub fn gfm(service: &mut TurndownService) {
    service
        .use_plugin(line_breaks)
        .use_plugin(strikethrough)
        .use_plugin(task_list_items)
        .use_plugin(tables)
        .use_plugin(code_blocks);
}
