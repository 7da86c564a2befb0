// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::invariants::is_droppable_paragraph;
use crate::dom::nodes::{ContainerNode, ContainerNodeKind, DocNode};
use crate::dom::DocumentInvariants;

static MARKDOWN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// Tidy the top level of a converted document for the editor.
///
/// Each node, in order: empty plain paragraphs are dropped, tables are
/// wrapped in a card (also when nested in lists or quotes), paragraphs with a single child lose their
/// attributes, and a markdown link written out at the start of a heading
/// becomes a real link.
pub fn normalize(nodes: Vec<DocNode>) -> Vec<DocNode> {
    let before = nodes.len();
    let normalized: Vec<DocNode> =
        nodes.into_iter().filter_map(normalize_node).collect();
    log::trace!(
        "Normalized {before} top-level node(s) into {}",
        normalized.len()
    );
    normalized.assert_invariants();
    normalized
}

fn normalize_node(node: DocNode) -> Option<DocNode> {
    let DocNode::Container(container) = node else {
        return Some(node);
    };
    if is_droppable_paragraph(&container) {
        return None;
    }
    let node = if container.kind() == &ContainerNodeKind::Table {
        ContainerNode::new_card(container.into()).into()
    } else if container.kind() == &ContainerNodeKind::Paragraph
        && container.children().len() == 1
    {
        ContainerNode::new_paragraph(container.take_children()).into()
    } else if matches!(container.kind(), ContainerNodeKind::Heading { .. }) {
        let mut heading = container;
        recover_heading_link(&mut heading);
        heading.into()
    } else {
        let mut container = container;
        wrap_nested_tables(&mut container);
        container.into()
    };
    Some(node)
}

fn wrap_nested_tables(container: &mut ContainerNode) {
    for child in container.children_mut() {
        if child.kind() == Some(&ContainerNodeKind::Table) {
            let table = std::mem::replace(child, DocNode::new_text(""));
            *child = ContainerNode::new_card(table).into();
        } else if let Some(c) = child
            .as_container_mut()
            .filter(|c| c.kind() != &ContainerNodeKind::Card)
        {
            wrap_nested_tables(c);
        }
    }
}

/// Turn `[label](url)` in the first text of a heading into a link on that
/// text. Only the first such link is recovered.
fn recover_heading_link(heading: &mut ContainerNode) {
    let Some(leaf) = heading
        .children_mut()
        .first_mut()
        .and_then(DocNode::as_text_mut)
    else {
        return;
    };
    let Some(caps) = MARKDOWN_LINK.captures(leaf.text()) else {
        return;
    };
    let url = caps[2].to_owned();
    let original = leaf.text().to_owned();
    let text = MARKDOWN_LINK.replacen(&original, 1, "${1}").into_owned();
    leaf.set_text(text);
    leaf.set_recovered_link(url, original);
}
