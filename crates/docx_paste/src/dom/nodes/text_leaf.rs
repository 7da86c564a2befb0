// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use strum_macros::{AsRefStr, EnumIter};

/// An inline format that can be applied to a text leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum InlineFormat {
    Bold,
    Italic,
    Underline,
    StrikeThrough,
    Code,
}

/// The set of formatting marks carried by a text leaf. Nested formatting
/// elements in the source HTML (`<em><strong>`) are flattened into this.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Marks {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub code: bool,
}

impl Marks {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn contains(&self, format: InlineFormat) -> bool {
        match format {
            InlineFormat::Bold => self.bold,
            InlineFormat::Italic => self.italic,
            InlineFormat::Underline => self.underline,
            InlineFormat::StrikeThrough => self.strikethrough,
            InlineFormat::Code => self.code,
        }
    }

    #[must_use]
    pub fn with(mut self, format: InlineFormat) -> Self {
        match format {
            InlineFormat::Bold => self.bold = true,
            InlineFormat::Italic => self.italic = true,
            InlineFormat::Underline => self.underline = true,
            InlineFormat::StrikeThrough => self.strikethrough = true,
            InlineFormat::Code => self.code = true,
        }
        self
    }
}

/// A leaf of the document tree: a run of text with its marks.
///
/// Links are not separate containers: a leaf with a `url` *is* the link,
/// which is how the receiving editor models them. `original_text` is only
/// set when a link was recovered from literal markdown syntax.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextLeaf {
    text: String,
    marks: Marks,
    url: Option<String>,
    original_text: Option<String>,
}

impl TextLeaf {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_marks(mut self, marks: Marks) -> Self {
        self.marks = marks;
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn marks(&self) -> Marks {
        self.marks
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn original_text(&self) -> Option<&str> {
        self.original_text.as_deref()
    }

    pub fn is_link(&self) -> bool {
        self.url.is_some()
    }

    /// No marks and no link: nothing but the text itself.
    pub fn is_plain(&self) -> bool {
        self.marks.is_empty() && !self.is_link()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub(crate) fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub(crate) fn set_recovered_link(
        &mut self,
        url: impl Into<String>,
        original_text: impl Into<String>,
    ) {
        self.url = Some(url.into());
        self.original_text = Some(original_text.into());
    }
}
