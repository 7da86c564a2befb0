// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use once_cell::sync::Lazy;
use regex::Regex;

static GOOGLE_DOC_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"id="docs-internal-guid"#).unwrap());
static MS_WORD_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)urn:schemas-microsoft-com:office|class=["']?Mso|mso-"#)
        .unwrap()
});
static META_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<meta[^>]*>").unwrap());
static GOOGLE_DOC_WRAPPER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<b[^>]*id="docs-internal-guid[^"]*"[^>]*>(.*)</b>"#)
        .unwrap()
});

/// Where a pasted HTML payload came from. Each source has its own quirks
/// which the converter works around.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HtmlSource {
    /// Microsoft Word, desktop or online.
    MsWord,
    GoogleDoc,
    /// Browsers and everything else.
    #[default]
    UnknownExternal,
}

impl HtmlSource {
    /// Guess the source from the markers each editor leaves behind.
    pub fn detect(html: &str) -> Self {
        if GOOGLE_DOC_MARKER.is_match(html) {
            Self::GoogleDoc
        } else if MS_WORD_MARKER.is_match(html) {
            Self::MsWord
        } else {
            Self::UnknownExternal
        }
    }

    /// Strip markup that confuses html5ever or wraps the real content.
    pub fn clean_html(&self, html: &str) -> String {
        let cleaned = META_TAG.replace_all(html, "");
        if *self == Self::GoogleDoc {
            // Google Docs wraps the whole payload in a non-bold <b>
            GOOGLE_DOC_WRAPPER.replace(&cleaned, "$1").into_owned()
        } else {
            cleaned.into_owned()
        }
    }
}
