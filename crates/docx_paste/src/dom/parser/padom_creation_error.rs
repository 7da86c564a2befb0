// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::PaDom;

/// html5ever complained while building the tree. It always recovers, so the
/// tree it built is carried along with the complaints.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("html5ever reported {} parse error(s)", .parse_errors.len())]
pub(crate) struct PaDomCreationError {
    pub(crate) dom: PaDom,
    pub(crate) parse_errors: Vec<String>,
}

impl PaDomCreationError {
    pub(crate) fn new() -> Self {
        Self {
            dom: PaDom::new(),
            parse_errors: Vec::new(),
        }
    }
}

impl Default for PaDomCreationError {
    fn default() -> Self {
        Self::new()
    }
}
