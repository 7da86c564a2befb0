// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::nodes::DocNode;
use crate::dom::parser::{HtmlDeserializer, PaDomCreator};
use crate::dom::HtmlSource;
use crate::images::{extract_embedded_images, image_locators, pair_images};
use crate::normalize::normalize;

/// Convert a pasted clipboard payload into editor nodes.
///
/// `html` drives the conversion; `rtf` only supplies the pictures the HTML
/// refers to by local file paths. The producer of the HTML is guessed from
/// its markup.
pub fn docx_deserialize(rtf: &str, html: &str) -> Vec<DocNode> {
    docx_deserialize_from_source(rtf, html, HtmlSource::detect(html))
}

/// Like [docx_deserialize], for callers that know where `html` came from.
pub fn docx_deserialize_from_source(
    rtf: &str,
    html: &str,
    source: HtmlSource,
) -> Vec<DocNode> {
    if html.is_empty() {
        return Vec::new();
    }

    let html = source.clean_html(html);
    let padom = match PaDomCreator::parse(&html) {
        Ok(padom) => padom,
        Err(err) => {
            log::debug!("{err}: {:?}", err.parse_errors);
            err.dom
        }
    };
    // Locators come from the same tree the converter walks, so the Nth
    // entry always belongs to the Nth <img> it meets.
    let images =
        pair_images(extract_embedded_images(rtf), image_locators(&padom));

    let nodes =
        HtmlDeserializer::new(images.as_deref(), source).deserialize(&padom);
    normalize(nodes)
}
