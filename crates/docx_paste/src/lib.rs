// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Turns what a word processor puts on the clipboard (an RTF flavour and an
//! HTML flavour of the same content) into nodes a block editor can insert.
//!
//! ```
//! use docx_paste::{docx_deserialize, ToTree};
//!
//! let nodes = docx_deserialize("", "<p>Hello <b>world</b></p>");
//! assert_eq!(nodes.len(), 1);
//! println!("{}", nodes.to_tree());
//! ```

mod docx_deserializer;
pub mod dom;
pub mod images;
mod normalize;
#[cfg(feature = "serde")]
mod serialize;

pub use crate::docx_deserializer::docx_deserialize;
pub use crate::docx_deserializer::docx_deserialize_from_source;
pub use crate::dom::html_source::HtmlSource;
pub use crate::dom::invariants::DocumentInvariants;
pub use crate::dom::nodes::ContainerNode;
pub use crate::dom::nodes::ContainerNodeKind;
pub use crate::dom::nodes::DocNode;
pub use crate::dom::nodes::InlineFormat;
pub use crate::dom::nodes::Marks;
pub use crate::dom::nodes::TextLeaf;
pub use crate::dom::to_tree::ToTree;
pub use crate::images::extract_embedded_images;
pub use crate::images::extract_image_locators;
pub use crate::images::resolve_images;
pub use crate::images::EmbeddedImage;
pub use crate::images::ImageFormat;
pub use crate::images::ResolvedImageSource;
pub use crate::normalize::normalize;
