// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

pub mod html_source;
pub mod invariants;
pub mod nodes;
pub(crate) mod parser;
pub mod to_tree;

pub use html_source::HtmlSource;
pub use invariants::DocumentInvariants;
pub use nodes::{
    ContainerNode, ContainerNodeKind, DocNode, InlineFormat, Marks, TextLeaf,
};
pub use to_tree::ToTree;
