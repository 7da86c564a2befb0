// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::parser::{PaDom, PaDomCreator, PaDomNode};

/// The `src` of every `<img>` element in `html`, in document order.
///
/// `html` is parsed the way the converter parses it, so the list holds
/// exactly the images the converter will meet. Elements without a usable
/// `src` are left out altogether. Entities in the attribute value are
/// decoded.
pub fn extract_image_locators(html: &str) -> Vec<String> {
    let padom = PaDomCreator::parse(html).unwrap_or_else(|err| err.dom);
    image_locators(&padom)
}

pub(crate) fn image_locators(padom: &PaDom) -> Vec<String> {
    let PaDomNode::Document(doc) = padom.get_document() else {
        return Vec::new();
    };
    padom
        .descendants(doc)
        .filter_map(|node| match node {
            PaDomNode::Container(c) if c.tag() == "img" => c.get_attr("src"),
            _ => None,
        })
        .filter(|src| !src.trim().is_empty())
        .map(str::to_owned)
        .collect()
}
