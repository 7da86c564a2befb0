// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use strum_macros::{AsRefStr, EnumString};

use super::rtf_lexer::{RtfLexer, RtfToken};

/// Picture formats that can be shown in the editor as they are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, AsRefStr)]
pub enum ImageFormat {
    #[strum(serialize = "pngblip")]
    Png,
    #[strum(serialize = "jpegblip")]
    Jpeg,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// Picture type control words we recognise but cannot display.
const UNSUPPORTED_FORMATS: [&str; 6] = [
    "emfblip",
    "wmetafile",
    "macpict",
    "pmmetafile",
    "dibitmap",
    "wbitmap",
];

/// A picture decoded from the hex data of an RTF `\pict` group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbeddedImage {
    format: ImageFormat,
    bytes: Vec<u8>,
    offset: usize,
}

impl EmbeddedImage {
    pub fn new(format: ImageFormat, bytes: Vec<u8>, offset: usize) -> Self {
        Self {
            format,
            bytes,
            offset,
        }
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Byte position of the `\pict` control word in the RTF text.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type(),
            STANDARD.encode(&self.bytes)
        )
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub(crate) enum PictError {
    #[error("unsupported picture format \\{0}")]
    UnsupportedFormat(String),
    #[error("picture has no format control word")]
    MissingFormat,
    #[error("picture data is a \\bin payload")]
    BinaryPayload,
    #[error("picture has no data")]
    Empty,
    #[error("picture data is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("picture group is not terminated")]
    Unterminated,
}

/// Collects what a single `\pict` group says about itself.
struct PictBuilder {
    offset: usize,
    depth: usize,
    format: Option<Result<ImageFormat, String>>,
    binary: bool,
    hex: String,
    /// Depth of the open `{\*\blipuid ...}` group, if any.
    blipuid_depth: Option<usize>,
    /// Text of the `\blipuid` group: the uid, sometimes followed by the
    /// picture data itself.
    blipuid_text: String,
}

impl PictBuilder {
    fn new(offset: usize, depth: usize) -> Self {
        Self {
            offset,
            depth,
            format: None,
            binary: false,
            hex: String::new(),
            blipuid_depth: None,
            blipuid_text: String::new(),
        }
    }

    /// Feed a token found `depth` groups deep, inside this picture.
    fn feed(&mut self, token: RtfToken, depth: usize) {
        if depth == self.depth {
            self.feed_own(token);
            return;
        }
        match token {
            RtfToken::ControlWord { name: "blipuid", .. }
                if self.blipuid_depth.is_none() =>
            {
                self.blipuid_depth = Some(depth);
            }
            RtfToken::Text(text) if self.blipuid_depth == Some(depth) => {
                self.blipuid_text.push_str(text);
            }
            _ => {}
        }
    }

    fn end_group(&mut self, depth: usize) {
        if self.blipuid_depth == Some(depth) {
            self.blipuid_depth = None;
        }
    }

    fn feed_own(&mut self, token: RtfToken) {
        match token {
            RtfToken::ControlWord { name, .. } => {
                if let Ok(format) = ImageFormat::from_str(name) {
                    self.format = Some(Ok(format));
                } else if UNSUPPORTED_FORMATS.contains(&name) {
                    // A supported format named alongside wins
                    if !matches!(self.format, Some(Ok(_))) {
                        self.format = Some(Err(name.to_owned()));
                    }
                } else if name == "bin" {
                    self.binary = true;
                }
            }
            RtfToken::Text(text) => self
                .hex
                .extend(text.chars().filter(|c| !c.is_ascii_whitespace())),
            RtfToken::Binary(_) => self.binary = true,
            RtfToken::GroupStart
            | RtfToken::GroupEnd
            | RtfToken::ControlSymbol(_)
            | RtfToken::HexEscape(_) => {}
        }
    }

    fn finish(self) -> Result<EmbeddedImage, PictError> {
        let format = match self.format {
            None => return Err(PictError::MissingFormat),
            Some(Err(name)) => return Err(PictError::UnsupportedFormat(name)),
            Some(Ok(format)) => format,
        };
        if self.binary {
            return Err(PictError::BinaryPayload);
        }
        let hex = if self.hex.is_empty() {
            // Some writers put the data in the \blipuid group, after the uid
            self.blipuid_text
                .split_whitespace()
                .skip(1)
                .collect::<String>()
        } else {
            self.hex
        };
        if hex.is_empty() {
            return Err(PictError::Empty);
        }
        let bytes = hex::decode(&hex)?;
        Ok(EmbeddedImage::new(format, bytes, self.offset))
    }
}

/// Find the PNG and JPEG pictures embedded in an RTF document, in the
/// order they appear.
///
/// Pictures that cannot be decoded are skipped, as are the `\nonshppict`
/// copies Word writes next to every `\shppict` picture for older readers.
pub fn extract_embedded_images(rtf: &str) -> Vec<EmbeddedImage> {
    let mut images = Vec::new();
    let mut depth = 0usize;
    let mut pict: Option<PictBuilder> = None;
    let mut fallback_depth: Option<usize> = None;

    for (offset, token) in RtfLexer::new(rtf) {
        match token {
            RtfToken::GroupStart => depth += 1,
            RtfToken::GroupEnd => {
                if let Some(builder) = pict.as_mut() {
                    builder.end_group(depth);
                }
                if pict.as_ref().is_some_and(|p| p.depth == depth) {
                    if let Some(builder) = pict.take() {
                        let offset = builder.offset;
                        match builder.finish() {
                            Ok(image) => images.push(image),
                            Err(e) => log::debug!(
                                "Skipping picture at byte {offset}: {e}"
                            ),
                        }
                    }
                }
                if fallback_depth == Some(depth) {
                    fallback_depth = None;
                }
                depth = depth.saturating_sub(1);
            }
            RtfToken::ControlWord { name: "nonshppict", .. }
                if fallback_depth.is_none() =>
            {
                fallback_depth = Some(depth);
            }
            RtfToken::ControlWord { name: "pict", .. }
                if pict.is_none() && fallback_depth.is_none() =>
            {
                pict = Some(PictBuilder::new(offset, depth));
            }
            token => {
                if let Some(builder) = pict.as_mut() {
                    builder.feed(token, depth);
                }
            }
        }
    }

    if let Some(builder) = pict {
        log::debug!(
            "Skipping picture at byte {}: {}",
            builder.offset,
            PictError::Unterminated
        );
    }

    log::trace!("Found {} embedded picture(s)", images.len());
    images
}
