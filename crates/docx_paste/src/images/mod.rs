// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

pub mod pairing;
pub mod rtf_images;
mod rtf_lexer;
pub mod tag_extractor;

pub(crate) use pairing::pair_images;
pub use pairing::{resolve_images, ResolvedImageSource};
pub use rtf_images::{extract_embedded_images, EmbeddedImage, ImageFormat};
pub(crate) use tag_extractor::image_locators;
pub use tag_extractor::extract_image_locators;
