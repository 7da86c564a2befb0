// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use html5ever::QualName;
use once_cell::sync::Lazy;

use super::{paqual_name, PaNodeContainer, PaNodeText};

static NO_NAME: Lazy<QualName> = Lazy::new(|| paqual_name(""));

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum PaDomNode {
    Container(PaNodeContainer),
    Document(PaNodeContainer),
    Text(PaNodeText),
    /// Comments and processing instructions. Kept so handles stay valid,
    /// never converted.
    Comment(PaNodeText),
}

impl PaDomNode {
    pub(crate) fn name(&self) -> &QualName {
        match self {
            PaDomNode::Container(n) | PaDomNode::Document(n) => &n.name,
            PaDomNode::Text(_) | PaDomNode::Comment(_) => &NO_NAME,
        }
    }
}
