//! Strikethrough (`~~text~~`).

use turndown::{Rule, TurndownService};

pub fn strikethrough_rule() -> Rule {
    Rule::for_tags(&["del", "s", "strike"], |_, content, options| {
        let delimiter = &options.strike_delimiter;
        format!("{}{}{}", delimiter, content, delimiter)
    })
}

/// Plugin: convert `del`, `s` and `strike` to strikethrough
pub fn strikethrough(service: &mut TurndownService) {
    service.add_rule("strikethrough", strikethrough_rule());
}

#[cfg(test)]
mod tests {
    use super::*;
    use turndown::{Node, TurndownOptions};

    fn struck(tag: &str) -> Node {
        Node::element(tag).with_child(Node::text("gone"))
    }

    #[test]
    fn test_strikethrough_tags() {
        let mut service = TurndownService::new();
        service.use_plugin(strikethrough);

        for tag in ["del", "s", "strike", "DEL"] {
            assert_eq!(service.turndown(&struck(tag)).unwrap(), "~~gone~~");
        }
    }

    #[test]
    fn test_custom_delimiter() {
        let options = TurndownOptions {
            strike_delimiter: "~".to_string(),
            ..Default::default()
        };
        let mut service = TurndownService::with_options(options);
        service.use_plugin(strikethrough);

        assert_eq!(service.turndown(&struck("s")).unwrap(), "~gone~");
    }
}
