// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::{ContainerNode, ContainerNodeKind, TextLeaf};

/// A node of the document handed to the editor. Parents own their children;
/// there are no back references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocNode {
    Container(ContainerNode),
    Text(TextLeaf),
}

impl DocNode {
    pub fn new_text(text: impl Into<String>) -> Self {
        Self::Text(TextLeaf::new(text))
    }

    pub fn new_paragraph(children: Vec<DocNode>) -> Self {
        Self::Container(ContainerNode::new_paragraph(children))
    }

    pub fn new_list_item(children: Vec<DocNode>) -> Self {
        Self::Container(ContainerNode::new_list_item(children))
    }

    pub fn kind(&self) -> Option<&ContainerNodeKind> {
        match self {
            Self::Container(c) => Some(c.kind()),
            Self::Text(_) => None,
        }
    }

    pub fn is_block(&self) -> bool {
        self.kind().is_some_and(ContainerNodeKind::is_block)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    pub fn is_list(&self) -> bool {
        self.as_container().is_some_and(ContainerNode::is_list)
    }

    pub fn is_list_item(&self) -> bool {
        self.as_container().is_some_and(ContainerNode::is_list_item)
    }

    pub fn is_table_row(&self) -> bool {
        self.kind() == Some(&ContainerNodeKind::TableRow)
    }

    pub fn is_table_cell(&self) -> bool {
        matches!(self.kind(), Some(ContainerNodeKind::TableCell { .. }))
    }

    /// A text leaf holding nothing but whitespace and no link.
    pub fn is_whitespace_text(&self) -> bool {
        match self {
            Self::Text(t) => t.is_blank() && !t.is_link(),
            Self::Container(_) => false,
        }
    }

    pub fn as_container(&self) -> Option<&ContainerNode> {
        match self {
            Self::Container(c) => Some(c),
            Self::Text(_) => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut ContainerNode> {
        match self {
            Self::Container(c) => Some(c),
            Self::Text(_) => None,
        }
    }

    pub fn into_container(self) -> Option<ContainerNode> {
        match self {
            Self::Container(c) => Some(c),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextLeaf> {
        match self {
            Self::Text(t) => Some(t),
            Self::Container(_) => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextLeaf> {
        match self {
            Self::Text(t) => Some(t),
            Self::Container(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        match self {
            Self::Container(c) => c.text_content(),
            Self::Text(t) => t.text().to_owned(),
        }
    }
}

impl From<ContainerNode> for DocNode {
    fn from(node: ContainerNode) -> Self {
        Self::Container(node)
    }
}

impl From<TextLeaf> for DocNode {
    fn from(leaf: TextLeaf) -> Self {
        Self::Text(leaf)
    }
}
