// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::str::FromStr;

use strum_macros::EnumString;

use crate::InlineFormat;

/// Every tag the converter treats specially. Anything else is unwrapped:
/// its children are converted in its place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum HtmlTag {
    P,
    Div,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Ul,
    Ol,
    Li,
    Table,
    Thead,
    Tbody,
    Tfoot,
    Tr,
    Td,
    Th,
    Pre,
    Blockquote,
    B,
    Strong,
    I,
    Em,
    U,
    Ins,
    S,
    Del,
    Strike,
    Code,
    Kbd,
    Samp,
    Span,
    A,
    Img,
    Br,
    // Dropped along with their content
    Head,
    Style,
    Script,
    Title,
    Meta,
    Link,
    Xml,
    Template,
    Noscript,
    Button,
    Input,
    Select,
    Textarea,
    Iframe,
    Object,
    Svg,
    Math,
    Caption,
    Colgroup,
    Col,
}

impl HtmlTag {
    /// `None` for tags we do not know, which are unwrapped.
    pub(crate) fn from_local_name(name: &str) -> Option<Self> {
        Self::from_str(&name.to_ascii_lowercase()).ok()
    }

    pub(crate) fn is_dropped(&self) -> bool {
        matches!(
            self,
            Self::Head
                | Self::Style
                | Self::Script
                | Self::Title
                | Self::Meta
                | Self::Link
                | Self::Xml
                | Self::Template
                | Self::Noscript
                | Self::Button
                | Self::Input
                | Self::Select
                | Self::Textarea
                | Self::Iframe
                | Self::Object
                | Self::Svg
                | Self::Math
                | Self::Caption
                | Self::Colgroup
                | Self::Col
        )
    }

    pub(crate) fn heading_level(&self) -> Option<u8> {
        match self {
            Self::H1 => Some(1),
            Self::H2 => Some(2),
            Self::H3 => Some(3),
            Self::H4 => Some(4),
            Self::H5 => Some(5),
            Self::H6 => Some(6),
            _ => None,
        }
    }

    pub(crate) fn inline_format(&self) -> Option<InlineFormat> {
        match self {
            Self::B | Self::Strong => Some(InlineFormat::Bold),
            Self::I | Self::Em => Some(InlineFormat::Italic),
            Self::U | Self::Ins => Some(InlineFormat::Underline),
            Self::S | Self::Del | Self::Strike => {
                Some(InlineFormat::StrikeThrough)
            }
            Self::Code | Self::Kbd | Self::Samp => Some(InlineFormat::Code),
            _ => None,
        }
    }
}
