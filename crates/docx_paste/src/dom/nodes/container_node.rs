// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use strum_macros::IntoStaticStr;

use super::{DocNode, TextLeaf};

/// The kind of a container node. The static string of each kind is the
/// `type` the receiving editor uses for it.
#[derive(Clone, Debug, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ContainerNodeKind {
    Paragraph,
    Heading {
        level: u8,
    },
    List {
        ordered: bool,
        start: Option<u32>,
    },
    ListItem,
    Table,
    TableRow,
    TableCell {
        header: bool,
    },
    Image {
        src: String,
        alt: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
    },
    #[strum(serialize = "code")]
    CodeBlock {
        language: Option<String>,
    },
    #[strum(serialize = "blockquote")]
    Quote,
    Card,
}

impl ContainerNodeKind {
    pub fn type_name(&self) -> &'static str {
        self.into()
    }

    /// Kinds whose children are text leaves (and inline images) only.
    pub fn holds_inline(&self) -> bool {
        matches!(
            self,
            Self::Paragraph
                | Self::Heading { .. }
                | Self::TableCell { .. }
                | Self::CodeBlock { .. }
                | Self::Image { .. }
        )
    }

    /// Images sit inside paragraphs next to text, every other kind is a
    /// block.
    pub fn is_block(&self) -> bool {
        !matches!(self, Self::Image { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerNode {
    kind: ContainerNodeKind,
    attrs: Vec<(String, String)>,
    children: Vec<DocNode>,
}

impl ContainerNode {
    pub fn new(kind: ContainerNodeKind, children: Vec<DocNode>) -> Self {
        let mut node = Self {
            kind,
            attrs: Vec::new(),
            children,
        };
        node.ensure_not_empty();
        node
    }

    pub fn new_paragraph(children: Vec<DocNode>) -> Self {
        Self::new(ContainerNodeKind::Paragraph, children)
    }

    pub fn new_heading(level: u8, children: Vec<DocNode>) -> Self {
        Self::new(
            ContainerNodeKind::Heading {
                level: level.clamp(1, 6),
            },
            children,
        )
    }

    pub fn new_list(
        ordered: bool,
        start: Option<u32>,
        children: Vec<DocNode>,
    ) -> Self {
        Self::new(ContainerNodeKind::List { ordered, start }, children)
    }

    pub fn new_list_item(children: Vec<DocNode>) -> Self {
        Self::new(ContainerNodeKind::ListItem, children)
    }

    pub fn new_table(children: Vec<DocNode>) -> Self {
        Self::new(ContainerNodeKind::Table, children)
    }

    pub fn new_table_row(children: Vec<DocNode>) -> Self {
        Self::new(ContainerNodeKind::TableRow, children)
    }

    pub fn new_table_cell(header: bool, children: Vec<DocNode>) -> Self {
        Self::new(ContainerNodeKind::TableCell { header }, children)
    }

    pub fn new_image(
        src: String,
        alt: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Self {
        Self::new(
            ContainerNodeKind::Image {
                src,
                alt,
                width,
                height,
            },
            Vec::new(),
        )
    }

    pub fn new_code_block(language: Option<String>, text: String) -> Self {
        Self::new(
            ContainerNodeKind::CodeBlock { language },
            vec![DocNode::Text(TextLeaf::new(text))],
        )
    }

    pub fn new_quote(children: Vec<DocNode>) -> Self {
        Self::new(ContainerNodeKind::Quote, children)
    }

    /// Wrap a block in a card container.
    pub fn new_card(child: DocNode) -> Self {
        Self::new(ContainerNodeKind::Card, vec![child])
    }

    #[must_use]
    pub fn with_attrs(mut self, attrs: Vec<(String, String)>) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn kind(&self) -> &ContainerNodeKind {
        &self.kind
    }

    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _v)| n == name)
            .map(|(_n, v)| v.as_str())
    }

    pub(crate) fn remove_attr(&mut self, name: &str) -> Option<String> {
        let index = self.attrs.iter().position(|(n, _v)| n == name)?;
        Some(self.attrs.remove(index).1)
    }

    pub fn children(&self) -> &[DocNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<DocNode> {
        &mut self.children
    }

    pub fn take_children(self) -> Vec<DocNode> {
        self.children
    }

    pub fn first_child(&self) -> Option<&DocNode> {
        self.children.first()
    }

    pub fn last_child_mut(&mut self) -> Option<&mut DocNode> {
        self.children.last_mut()
    }

    pub fn append_child(&mut self, child: DocNode) {
        self.children.push(child);
    }

    pub fn is_list(&self) -> bool {
        matches!(self.kind, ContainerNodeKind::List { .. })
    }

    pub fn is_list_item(&self) -> bool {
        self.kind == ContainerNodeKind::ListItem
    }

    /// Concatenation of the text of every leaf below this node.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    pub(crate) fn collect_text(&self, into: &mut String) {
        for child in &self.children {
            match child {
                DocNode::Container(c) => c.collect_text(into),
                DocNode::Text(t) => into.push_str(t.text()),
            }
        }
    }

    // The editor cannot place a cursor in a childless element, so give it
    // something to hold on to.
    fn ensure_not_empty(&mut self) {
        if !self.children.is_empty() {
            return;
        }
        if self.kind.holds_inline() {
            self.children.push(DocNode::Text(TextLeaf::empty()));
        } else if matches!(
            self.kind,
            ContainerNodeKind::ListItem | ContainerNodeKind::Quote
        ) {
            self.children
                .push(DocNode::Container(Self::new_paragraph(Vec::new())));
        }
    }
}
