// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use html5ever::tree_builder::ElementFlags;
use html5ever::{Attribute, QualName};

use super::{paqual_name, PaDomHandle, PaDomNode, PaNodeContainer, PaNodeText};

/// The tree html5ever builds for us. All nodes live in one list and refer
/// to each other by handle; `parents` mirrors `nodes` so that the tree
/// builder can move nodes around (foster parenting, adoption agency).
///
/// Nodes detached during parsing stay in the list as garbage; walking from
/// the document handle never reaches them.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PaDom {
    nodes: Vec<PaDomNode>,
    parents: Vec<Option<PaDomHandle>>,
    document_handle: PaDomHandle,
}

impl PaDom {
    pub(crate) fn new() -> Self {
        let mut ret = Self {
            nodes: Vec::new(),
            parents: Vec::new(),
            document_handle: PaDomHandle(0),
        };
        ret.document_handle =
            ret.add_node(PaDomNode::Document(PaNodeContainer {
                name: paqual_name(""),
                attrs: Vec::new(),
                children: Vec::new(),
            }));
        ret
    }

    pub(crate) fn add_node(&mut self, node: PaDomNode) -> PaDomHandle {
        self.nodes.push(node);
        self.parents.push(None);
        PaDomHandle(self.nodes.len() - 1)
    }

    pub(crate) fn create_element(
        &mut self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> PaDomHandle {
        self.add_node(PaDomNode::Container(PaNodeContainer {
            name,
            attrs: attrs
                .into_iter()
                .map(|attr| {
                    (
                        attr.name.local.as_ref().to_owned(),
                        attr.value.as_ref().to_owned(),
                    )
                })
                .collect(),
            children: Vec::new(),
        }))
    }

    pub(crate) fn document_handle(&self) -> &PaDomHandle {
        &self.document_handle
    }

    pub(crate) fn get_document(&self) -> &PaDomNode {
        self.get_node(&self.document_handle)
    }

    pub(crate) fn get_node(&self, handle: &PaDomHandle) -> &PaDomNode {
        &self.nodes[handle.0]
    }

    pub(crate) fn get_mut_node(&mut self, handle: &PaDomHandle) -> &mut PaDomNode {
        &mut self.nodes[handle.0]
    }

    pub(crate) fn parent(&self, handle: &PaDomHandle) -> Option<&PaDomHandle> {
        self.parents[handle.0].as_ref()
    }

    pub(crate) fn children(&self, handle: &PaDomHandle) -> &[PaDomHandle] {
        match self.get_node(handle) {
            PaDomNode::Container(n) | PaDomNode::Document(n) => &n.children,
            PaDomNode::Text(_) | PaDomNode::Comment(_) => &[],
        }
    }

    fn children_mut(
        &mut self,
        handle: &PaDomHandle,
    ) -> Option<&mut Vec<PaDomHandle>> {
        match self.get_mut_node(handle) {
            PaDomNode::Container(n) | PaDomNode::Document(n) => {
                Some(&mut n.children)
            }
            PaDomNode::Text(_) | PaDomNode::Comment(_) => None,
        }
    }

    /// Move `child` to the end of `parent`'s children. Text and comment
    /// nodes cannot have children, so appending to them is ignored.
    pub(crate) fn append_child(
        &mut self,
        parent: &PaDomHandle,
        child: PaDomHandle,
    ) {
        if self.children_mut(parent).is_none() {
            return;
        }
        self.detach(&child);
        if let Some(children) = self.children_mut(parent) {
            children.push(child.clone());
        }
        self.parents[child.0] = Some(parent.clone());
    }

    /// Move `child` to just before `sibling`. Ignored when `sibling` has no
    /// parent.
    pub(crate) fn insert_before(
        &mut self,
        sibling: &PaDomHandle,
        child: PaDomHandle,
    ) {
        self.detach(&child);
        let Some(parent) = self.parent(sibling).cloned() else {
            return;
        };
        if let Some(children) = self.children_mut(&parent) {
            let index = children
                .iter()
                .position(|c| c == sibling)
                .unwrap_or(children.len());
            children.insert(index, child.clone());
        }
        self.parents[child.0] = Some(parent);
    }

    pub(crate) fn detach(&mut self, child: &PaDomHandle) {
        if let Some(parent) = self.parents[child.0].take() {
            if let Some(children) = self.children_mut(&parent) {
                children.retain(|c| c != child);
            }
        }
    }

    pub(crate) fn reparent_children(
        &mut self,
        node: &PaDomHandle,
        new_parent: &PaDomHandle,
    ) {
        let children = match self.children_mut(node) {
            Some(children) => std::mem::take(children),
            None => return,
        };
        for child in children {
            self.parents[child.0] = None;
            self.append_child(new_parent, child);
        }
    }

    /// Append text to `parent`, merging it into the last child if that is
    /// already a text node.
    pub(crate) fn append_text(&mut self, parent: &PaDomHandle, text: &str) {
        let last_child = self.children(parent).last().cloned();
        if let Some(last_child) = last_child {
            if let PaDomNode::Text(t) = self.get_mut_node(&last_child) {
                t.content += text;
                return;
            }
        }
        let handle = self.add_node(PaDomNode::Text(PaNodeText {
            content: text.to_owned(),
        }));
        self.append_child(parent, handle);
    }

    /// Insert text before `sibling`, merging it into the previous sibling if
    /// that is already a text node.
    pub(crate) fn insert_text_before(
        &mut self,
        sibling: &PaDomHandle,
        text: &str,
    ) {
        let previous = self.parent(sibling).and_then(|parent| {
            let children = self.children(parent);
            let index = children.iter().position(|c| c == sibling)?;
            index.checked_sub(1).map(|i| children[i].clone())
        });
        if let Some(previous) = previous {
            if let PaDomNode::Text(t) = self.get_mut_node(&previous) {
                t.content += text;
                return;
            }
        }
        let handle = self.add_node(PaDomNode::Text(PaNodeText {
            content: text.to_owned(),
        }));
        self.insert_before(sibling, handle);
    }

    /// Every node below `container`, in document order.
    ///
    /// The walk keeps its own stack, so pasted markup nested thousands of
    /// elements deep is fine.
    pub(crate) fn descendants<'a>(
        &'a self,
        container: &'a PaNodeContainer,
    ) -> impl Iterator<Item = &'a PaDomNode> + 'a {
        let mut stack = vec![container.children.iter()];
        std::iter::from_fn(move || loop {
            let handle = match stack.last_mut()?.next() {
                Some(handle) => handle,
                None => {
                    stack.pop();
                    continue;
                }
            };
            let node = self.get_node(handle);
            if let PaDomNode::Container(c) | PaDomNode::Document(c) = node {
                stack.push(c.children.iter());
            }
            return Some(node);
        })
    }
}

impl Default for PaDom {
    fn default() -> Self {
        Self::new()
    }
}
