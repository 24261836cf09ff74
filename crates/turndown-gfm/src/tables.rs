//! GFM pipe tables.
//!
//! Tables are converted bottom-up like everything else. Cells frame their
//! content with pipes, rows start themselves on a new line, and a `thead`
//! appends its own separator line computed from its first row. The table then
//! either wraps what it received or, when it has no `thead`, prepends a
//! separator line shaped like its first row.

use turndown::{Filter, Node, NodeRef, Rule, TurndownService};

/// Border token for a column without an alignment hint
pub const DEFAULT_BORDER: &str = "---";

/// Role of a node within a table, derived from its tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableNodeKind {
    Table,
    HeaderSection,
    BodySection,
    FooterSection,
    Row,
    Cell,
    Other,
}

impl TableNodeKind {
    /// Classify a lowercase tag name
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "table" => TableNodeKind::Table,
            "thead" => TableNodeKind::HeaderSection,
            "tbody" => TableNodeKind::BodySection,
            "tfoot" => TableNodeKind::FooterSection,
            "tr" => TableNodeKind::Row,
            "th" | "td" => TableNodeKind::Cell,
            _ => TableNodeKind::Other,
        }
    }

    /// Classify a node; non-elements are always `Other`
    pub fn of(node: &Node) -> Self {
        if node.is_element() {
            Self::from_tag(&node.tag_name())
        } else {
            TableNodeKind::Other
        }
    }

    pub fn is_section(self) -> bool {
        matches!(
            self,
            TableNodeKind::HeaderSection | TableNodeKind::BodySection | TableNodeKind::FooterSection
        )
    }
}

/// Column alignment taken from a header cell's `align` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Unaligned,
    Left,
    Right,
    Center,
}

impl Alignment {
    /// Parse an alignment hint. Unknown or missing hints are `Unaligned`.
    pub fn from_hint(hint: Option<&str>) -> Self {
        let Some(hint) = hint else {
            return Alignment::Unaligned;
        };

        match hint.trim().to_ascii_lowercase().as_str() {
            "left" => Alignment::Left,
            "right" => Alignment::Right,
            "center" => Alignment::Center,
            _ => Alignment::Unaligned,
        }
    }

    /// Alignment of a cell node
    pub fn of(cell: &Node) -> Self {
        Self::from_hint(cell.attr("align"))
    }

    /// Separator-row token for this alignment
    pub fn border(self) -> &'static str {
        match self {
            Alignment::Unaligned => DEFAULT_BORDER,
            Alignment::Left => ":--",
            Alignment::Right => "--:",
            Alignment::Center => ":-:",
        }
    }
}

/// Replacement function for one kind of table node
pub type Formatter = fn(&str, &NodeRef) -> String;

/// The formatter responsible for a node kind, if any
pub fn formatter_for(kind: TableNodeKind) -> Option<Formatter> {
    match kind {
        TableNodeKind::Table => Some(format_table),
        TableNodeKind::HeaderSection => Some(format_header_section),
        TableNodeKind::BodySection | TableNodeKind::FooterSection => Some(format_body_section),
        TableNodeKind::Row => Some(format_row),
        TableNodeKind::Cell => Some(format_cell),
        TableNodeKind::Other => None,
    }
}

/// Frame cell content for the given column. Only the first column gets the
/// leading pipe; every cell supplies its own trailing one.
pub fn frame_cell(content: &str, column: usize) -> String {
    let prefix = if column == 0 { "| " } else { " " };
    format!("{}{} |", prefix, content)
}

/// `th`/`td`: frame content by the cell's position in its row
pub fn format_cell(content: &str, cell: &NodeRef) -> String {
    frame_cell(content, cell.index())
}

/// `tr`: cells already carry their pipes, so they are only put on a new line
pub fn format_row(content: &str, _row: &NodeRef) -> String {
    format!("\n{}", content)
}

/// `thead`: rendered rows plus a separator line built from the first row
pub fn format_header_section(content: &str, section: &NodeRef) -> String {
    let separator = section
        .element_children()
        .next()
        .map(separator_line)
        .unwrap_or_default();

    format!("{}\n{}", content, separator)
}

/// `tbody`/`tfoot`: rendered rows, unchanged
pub fn format_body_section(content: &str, _section: &NodeRef) -> String {
    content.to_string()
}

/// `table`: wrap the rendered sections, synthesizing a separator line when
/// there is no `thead` to provide one
pub fn format_table(content: &str, table: &NodeRef) -> String {
    if has_header(table.node) {
        return format!("\n\n{}\n\n", content);
    }

    let header = match first_row_shape(table.node) {
        Some(columns) => {
            tracing::trace!(columns, "table without thead, synthesizing separator line");
            placeholder_line(columns)
        }
        None => String::new(),
    };

    format!("\n\n{}{}\n\n", header, content)
}

/// Whether any direct child of the table is a `thead`
pub fn has_header(table: &Node) -> bool {
    table
        .element_children()
        .any(|child| TableNodeKind::of(child) == TableNodeKind::HeaderSection)
}

/// Column count of the table's first row.
///
/// The first row is the first row of the first section, or the first child
/// itself when rows sit directly under the table. `None` when the table has
/// neither.
pub fn first_row_shape(table: &Node) -> Option<usize> {
    let first = table.element_children().find(|child| {
        let kind = TableNodeKind::of(child);
        kind.is_section() || kind == TableNodeKind::Row
    })?;

    let row = if TableNodeKind::of(first) == TableNodeKind::Row {
        first
    } else {
        first.element_children().next()?
    };

    Some(row.element_children().count())
}

fn separator_line(row: &Node) -> String {
    row.element_children()
        .enumerate()
        .map(|(column, cell)| frame_cell(Alignment::of(cell).border(), column))
        .collect()
}

fn placeholder_line(columns: usize) -> String {
    (0..columns)
        .map(|column| frame_cell(DEFAULT_BORDER, column))
        .collect()
}

/// One rule covering every table node kind, dispatching through
/// [`formatter_for`]
pub fn table_rule() -> Rule {
    Rule::new(
        Filter::tag_class(|tag| formatter_for(TableNodeKind::from_tag(tag)).is_some()),
        |node, content, _| match formatter_for(TableNodeKind::of(node.node)) {
            Some(format) => format(content, node),
            None => content.to_string(),
        },
    )
}

/// Plugin: convert tables to GFM pipe tables
pub fn tables(service: &mut TurndownService) {
    service.add_rule("table", table_rule());
}
