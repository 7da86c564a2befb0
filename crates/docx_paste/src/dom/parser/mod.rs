// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! HTML to [DocNode](crate::DocNode) conversion.
//!
//! html5ever builds a [PaDom] through [PaDomCreator], then
//! [HtmlDeserializer] walks it.

mod deserialize;
mod html_tag;
mod padom;
mod padom_creation_error;
mod padom_creator;
mod padom_handle;
mod padom_node;
mod panode_container;
mod panode_text;
mod word_lists;

pub(crate) use deserialize::HtmlDeserializer;
pub(crate) use padom::PaDom;
pub(crate) use padom_creation_error::PaDomCreationError;
pub(crate) use padom_creator::PaDomCreator;
pub(crate) use padom_handle::PaDomHandle;
pub(crate) use padom_node::PaDomNode;
pub(crate) use panode_container::PaNodeContainer;
pub(crate) use panode_text::PaNodeText;

use html5ever::{LocalName, Namespace, QualName};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

pub(crate) fn paqual_name(local_name: &str) -> QualName {
    QualName::new(
        None,
        Namespace::from(HTML_NAMESPACE),
        LocalName::from(local_name),
    )
}
