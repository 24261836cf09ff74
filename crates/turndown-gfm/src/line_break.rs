//! Line breaks.

use turndown::{Rule, TurndownService};

pub fn line_break_rule() -> Rule {
    Rule::for_tag("br", |_, _, options| options.br.clone())
}

/// Plugin: convert `br` to a plain newline
pub fn line_breaks(service: &mut TurndownService) {
    service.add_rule("lineBreak", line_break_rule());
}

#[cfg(test)]
mod tests {
    use super::*;
    use turndown::{Node, TurndownOptions};

    fn two_lines() -> Node {
        Node::element("p")
            .with_child(Node::text("one"))
            .with_child(Node::element("br"))
            .with_child(Node::text("two"))
    }

    #[test]
    fn test_line_break() {
        let mut service = TurndownService::new();
        service.use_plugin(line_breaks);
        assert_eq!(service.turndown(&two_lines()).unwrap(), "one\ntwo");
    }

    #[test]
    fn test_hard_line_break_option() {
        let options = TurndownOptions {
            br: "  \n".to_string(),
            ..Default::default()
        };
        let mut service = TurndownService::with_options(options);
        service.use_plugin(line_breaks);
        assert_eq!(service.turndown(&two_lines()).unwrap(), "one  \ntwo");
    }
}
