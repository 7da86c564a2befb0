// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::nodes::{ContainerNode, ContainerNodeKind, DocNode, TextLeaf};
use crate::InlineFormat;
use strum::IntoEnumIterator;

/// Human readable dump of a node tree, one node per line:
///
/// ```text
///
/// ├>paragraph
/// │ └>"foo" bold
/// └>card
///   └>table
/// ```
pub trait ToTree {
    fn to_tree(&self) -> String;
}

impl ToTree for [DocNode] {
    fn to_tree(&self) -> String {
        let mut out = String::from("\n");
        write_children(self, "", &mut out);
        out
    }
}

impl ToTree for DocNode {
    fn to_tree(&self) -> String {
        std::slice::from_ref(self).to_tree()
    }
}

fn write_children(children: &[DocNode], prefix: &str, out: &mut String) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        out.push_str(prefix);
        out.push_str(if is_last { "└>" } else { "├>" });
        match child {
            DocNode::Container(c) => {
                out.push_str(&container_label(c));
                out.push('\n');
                let prefix =
                    format!("{prefix}{}", if is_last { "  " } else { "│ " });
                write_children(c.children(), &prefix, out);
            }
            DocNode::Text(t) => {
                out.push_str(&text_label(t));
                out.push('\n');
            }
        }
    }
}

fn container_label(node: &ContainerNode) -> String {
    let name = node.kind().type_name();
    match node.kind() {
        ContainerNodeKind::Heading { level } => format!("{name} {level}"),
        ContainerNodeKind::List { ordered, start } => {
            let mut label = String::from(name);
            if *ordered {
                label.push_str(" ordered");
            }
            if let Some(start) = start {
                label.push_str(&format!(" start={start}"));
            }
            label
        }
        ContainerNodeKind::TableCell { header: true } => {
            format!("{name} header")
        }
        ContainerNodeKind::Image { src, .. } => format!("{name} {src}"),
        ContainerNodeKind::CodeBlock {
            language: Some(language),
        } => format!("{name} {language}"),
        _ => name.to_owned(),
    }
}

fn text_label(leaf: &TextLeaf) -> String {
    let mut label = format!("{:?}", leaf.text());
    for format in InlineFormat::iter() {
        if leaf.marks().contains(format) {
            label.push(' ');
            label.push_str(format.as_ref());
        }
    }
    if let Some(url) = leaf.url() {
        label.push_str(", ");
        label.push_str(url);
    }
    label
}

#[cfg(test)]
mod test {
    use indoc::indoc;

    use super::*;
    use crate::Marks;

    #[test]
    fn nested_nodes_are_drawn_with_branches() {
        let nodes = vec![
            DocNode::new_paragraph(vec![
                DocNode::new_text("a"),
                TextLeaf::new("b")
                    .with_marks(Marks::default().with(InlineFormat::Bold))
                    .into(),
            ]),
            ContainerNode::new_card(
                ContainerNode::new_table(vec![ContainerNode::new_table_row(
                    vec![ContainerNode::new_table_cell(
                        true,
                        vec![DocNode::new_text("c")],
                    )
                    .into()],
                )
                .into()])
                .into(),
            )
            .into(),
        ];
        assert_eq!(
            nodes.to_tree(),
            indoc! {
            r#"

            ├>paragraph
            │ ├>"a"
            │ └>"b" bold
            └>card
              └>table
                └>table-row
                  └>table-cell header
                    └>"c"
            "#}
        );
    }

    #[test]
    fn links_show_their_url() {
        let node: DocNode = TextLeaf::new("site")
            .with_url(Some("https://site.com".into()))
            .into();
        assert_eq!(node.to_tree(), "\n└>\"site\", https://site.com\n");
    }
}
