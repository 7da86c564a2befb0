// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::borrow::Cow;

use super::rtf_images::{extract_embedded_images, EmbeddedImage};
use super::tag_extractor::extract_image_locators;

/// What the Nth `<img>` of a pasted document should show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedImageSource {
    /// Picture data carried in the RTF flavour of the clipboard.
    Embedded(EmbeddedImage),
    /// The tag's own `src`, used when the RTF has no picture for it.
    Locator(String),
}

impl ResolvedImageSource {
    pub fn url(&self) -> Cow<'_, str> {
        match self {
            Self::Embedded(image) => Cow::Owned(image.to_data_url()),
            Self::Locator(locator) => Cow::Borrowed(locator),
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded(_))
    }
}

/// Pair up the pictures embedded in `rtf` with the `<img>` tags of `html`
/// by position.
///
/// Entry N is the Nth RTF picture when there is one, otherwise the Nth
/// tag's `src`. Returns `None` when neither side has any image.
pub fn resolve_images(
    rtf: &str,
    html: &str,
) -> Option<Vec<ResolvedImageSource>> {
    pair_images(extract_embedded_images(rtf), extract_image_locators(html))
}

pub(crate) fn pair_images(
    embedded: Vec<EmbeddedImage>,
    locators: Vec<String>,
) -> Option<Vec<ResolvedImageSource>> {
    if locators.is_empty() && embedded.is_empty() {
        return None;
    }
    if !embedded.is_empty() && locators.len() != embedded.len() {
        log::debug!(
            "{} <img> tag(s) but {} RTF picture(s)",
            locators.len(),
            embedded.len()
        );
    }

    let count = locators.len().max(embedded.len());
    let mut locators = locators.into_iter();
    let mut embedded = embedded.into_iter();
    let resolved = (0..count)
        .filter_map(|_| {
            match (embedded.next(), locators.next()) {
                (Some(image), _) => Some(ResolvedImageSource::Embedded(image)),
                (None, Some(locator)) => {
                    Some(ResolvedImageSource::Locator(locator))
                }
                (None, None) => None,
            }
        })
        .collect();
    Some(resolved)
}
