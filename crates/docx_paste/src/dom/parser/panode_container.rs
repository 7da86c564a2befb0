// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use html5ever::QualName;

use super::PaDomHandle;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PaNodeContainer {
    pub(crate) name: QualName,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) children: Vec<PaDomHandle>,
}

impl PaNodeContainer {
    pub(crate) fn tag(&self) -> &str {
        self.name.local.as_ref()
    }

    pub(crate) fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _v)| n == name)
            .map(|(_n, v)| v.as_str())
    }

    pub(crate) fn has_class_starting_with(&self, prefix: &str) -> bool {
        self.get_attr("class")
            .map(|v| v.split_whitespace().any(|c| c.starts_with(prefix)))
            .unwrap_or(false)
    }

    /// The value of one declaration of the inline `style` attribute.
    pub(crate) fn style_value(&self, name: &str) -> Option<&str> {
        self.get_attr("style")?
            .split(';')
            .filter_map(|declaration| declaration.split_once(':'))
            .find(|(n, _v)| n.trim().eq_ignore_ascii_case(name))
            .map(|(_n, v)| v.trim())
    }

    /// Whether one of the words of a `style` declaration is `value`,
    /// ignoring case.
    pub(crate) fn contains_style(&self, name: &str, value: &str) -> bool {
        self.style_value(name).is_some_and(|v| {
            v.split_whitespace()
                .any(|word| word.eq_ignore_ascii_case(value))
        })
    }
}
