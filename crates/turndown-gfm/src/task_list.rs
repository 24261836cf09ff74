//! Task list items (`[ ]` / `[x]`).

use turndown::{NodeRef, Rule, TurndownService};

fn is_task_checkbox(tag: &str, node: &NodeRef) -> bool {
    tag == "input"
        && node
            .attr("type")
            .is_some_and(|t| t.eq_ignore_ascii_case("checkbox"))
        && node.parent_tag().as_deref() == Some("li")
}

pub fn task_list_item_rule() -> Rule {
    Rule::when(is_task_checkbox, |node, _, _| {
        let marker = if node.has_attr("checked") { "[x]" } else { "[ ]" };
        format!("{} ", marker)
    })
}

/// Plugin: convert checkboxes inside list items to task list markers
pub fn task_list_items(service: &mut TurndownService) {
    service.add_rule("taskListItems", task_list_item_rule());
}

#[cfg(test)]
mod tests {
    use super::*;
    use turndown::Node;

    fn item(checkbox: Node, text: &str) -> Node {
        Node::element("li")
            .with_child(checkbox)
            .with_child(Node::text(text))
    }

    fn service() -> TurndownService {
        let mut service = TurndownService::new();
        service.use_plugin(task_list_items);
        service
    }

    #[test]
    fn test_checked_item() {
        let input = Node::element_with_attrs("input", vec![("type", "checkbox"), ("checked", "")]);
        assert_eq!(service().turndown(&item(input, "Done")).unwrap(), "[x] Done");
    }

    #[test]
    fn test_unchecked_item() {
        let input = Node::element_with_attrs("input", vec![("type", "CheckBox")]);
        assert_eq!(service().turndown(&item(input, "Todo")).unwrap(), "[ ] Todo");
    }

    #[test]
    fn test_checkbox_outside_list_item_is_ignored() {
        let p = Node::element("p")
            .with_child(Node::element_with_attrs("input", vec![("type", "checkbox")]))
            .with_child(Node::text("Agree"));
        assert_eq!(service().turndown(&p).unwrap(), "Agree");
    }

    #[test]
    fn test_text_input_is_ignored() {
        let input = Node::element_with_attrs("input", vec![("type", "text")]);
        assert_eq!(service().turndown(&item(input, "Name")).unwrap(), "Name");
    }
}
