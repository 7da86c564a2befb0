// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The JSON shape the editor loads nodes from: containers are
//! `{"type": ..., "children": [...]}`, text leaves are `{"text": ...}` plus
//! one `true` flag per mark.

use serde::ser::{Serialize, SerializeMap, Serializer};
use strum::IntoEnumIterator;

use crate::dom::nodes::{
    ContainerNode, ContainerNodeKind, DocNode, InlineFormat, TextLeaf,
};

impl Serialize for DocNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DocNode::Container(c) => c.serialize(serializer),
            DocNode::Text(t) => t.serialize(serializer),
        }
    }
}

impl Serialize for TextLeaf {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("text", self.text())?;
        for format in InlineFormat::iter() {
            if self.marks().contains(format) {
                map.serialize_entry(format.as_ref(), &true)?;
            }
        }
        if let Some(url) = self.url() {
            map.serialize_entry("url", url)?;
        }
        if let Some(original_text) = self.original_text() {
            map.serialize_entry("originalText", original_text)?;
        }
        map.end()
    }
}

impl Serialize for ContainerNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.kind().type_name())?;
        match self.kind() {
            ContainerNodeKind::Heading { level } => {
                map.serialize_entry("level", level)?;
            }
            ContainerNodeKind::List { ordered, start } => {
                map.serialize_entry("ordered", ordered)?;
                if let Some(start) = start {
                    map.serialize_entry("start", start)?;
                }
            }
            ContainerNodeKind::TableCell { header: true } => {
                map.serialize_entry("header", &true)?;
            }
            ContainerNodeKind::Image {
                src,
                alt,
                width,
                height,
            } => {
                map.serialize_entry("url", src)?;
                if let Some(alt) = alt {
                    map.serialize_entry("alt", alt)?;
                }
                if let Some(width) = width {
                    map.serialize_entry("width", width)?;
                }
                if let Some(height) = height {
                    map.serialize_entry("height", height)?;
                }
            }
            ContainerNodeKind::CodeBlock {
                language: Some(language),
            } => {
                map.serialize_entry("language", language)?;
            }
            _ => {}
        }
        if !self.attrs().is_empty() {
            map.serialize_entry("attributes", &Attributes(self.attrs()))?;
        }
        map.serialize_entry("children", self.children())?;
        map.end()
    }
}

struct Attributes<'a>(&'a [(String, String)]);

impl Serialize for Attributes<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
