// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::nodes::{ContainerNode, ContainerNodeKind, DocNode};
use crate::dom::to_tree::ToTree;

/// Checks that a normalized node sequence is something the editor accepts.
pub trait DocumentInvariants {
    /// Panics if an invariant does not hold. Always runs, whatever the
    /// `assert-invariants` feature says.
    fn explicitly_assert_invariants(&self);

    /// Runs [`DocumentInvariants::explicitly_assert_invariants`] only when
    /// the `assert-invariants` feature is enabled.
    fn assert_invariants(&self) {
        #[cfg(feature = "assert-invariants")]
        self.explicitly_assert_invariants();
    }
}

impl DocumentInvariants for [DocNode] {
    fn explicitly_assert_invariants(&self) {
        for node in self {
            match node {
                DocNode::Container(c) => {
                    assert!(
                        c.kind() != &ContainerNodeKind::Table,
                        "Table found outside of a card:{}",
                        self.to_tree()
                    );
                    assert!(
                        !is_droppable_paragraph(c),
                        "Empty paragraph left at the top level:{}",
                        self.to_tree()
                    );
                    assert_nested_invariants(c);
                }
                DocNode::Text(_) => {
                    panic!("Text leaf at the top level:{}", self.to_tree())
                }
            }
        }
    }
}

/// A top-level paragraph with no visible text whose first child is a plain
/// text leaf (or missing altogether).
pub(crate) fn is_droppable_paragraph(node: &ContainerNode) -> bool {
    node.kind() == &ContainerNodeKind::Paragraph
        && node.text_content().trim().is_empty()
        && match node.first_child() {
            None => true,
            Some(DocNode::Text(leaf)) => leaf.is_plain(),
            Some(DocNode::Container(_)) => false,
        }
}

fn assert_nested_invariants(node: &ContainerNode) {
    assert!(
        !(node.kind().holds_inline() && node.children().is_empty()),
        "{} has no children",
        node.kind().type_name()
    );
    for child in node.children() {
        if let DocNode::Container(c) = child {
            assert!(
                c.kind() != &ContainerNodeKind::Table
                    || node.kind() == &ContainerNodeKind::Card,
                "Table found outside of a card, inside a {}",
                node.kind().type_name()
            );
            assert_nested_invariants(c);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::TextLeaf;

    #[test]
    fn paragraph_with_plain_empty_leaf_is_droppable() {
        let p = ContainerNode::new_paragraph(vec![DocNode::new_text("  ")]);
        assert!(is_droppable_paragraph(&p));
    }

    #[test]
    fn paragraph_with_empty_link_is_not_droppable() {
        let p = ContainerNode::new_paragraph(vec![TextLeaf::empty()
            .with_url(Some("https://x".into()))
            .into()]);
        assert!(!is_droppable_paragraph(&p));
    }

    #[test]
    fn paragraph_starting_with_an_image_is_not_droppable() {
        let p = ContainerNode::new_paragraph(vec![ContainerNode::new_image(
            "a.png".into(),
            None,
            None,
            None,
        )
        .into()]);
        assert!(!is_droppable_paragraph(&p));
    }

    #[test]
    #[should_panic(expected = "Table found outside of a card")]
    fn bare_table_fails_the_invariants() {
        let nodes = vec![DocNode::Container(ContainerNode::new_table(vec![]))];
        nodes.explicitly_assert_invariants();
    }

    #[test]
    #[should_panic(expected = "Table found outside of a card, inside a list-item")]
    fn bare_table_in_a_list_item_fails_the_invariants() {
        let nodes = vec![DocNode::Container(ContainerNode::new_list(
            false,
            None,
            vec![DocNode::new_list_item(vec![ContainerNode::new_table(
                vec![],
            )
            .into()])],
        ))];
        nodes.explicitly_assert_invariants();
    }

    #[test]
    fn card_wrapped_table_passes_the_invariants() {
        let nodes = vec![DocNode::Container(ContainerNode::new_card(
            ContainerNode::new_table(vec![]).into(),
        ))];
        nodes.explicitly_assert_invariants();
    }
}
