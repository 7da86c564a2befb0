// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

pub mod container_node;
pub mod doc_node;
pub mod text_leaf;

pub use container_node::{ContainerNode, ContainerNodeKind};
pub use doc_node::DocNode;
pub use text_leaf::{InlineFormat, Marks, TextLeaf};
