// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use wasm_bindgen::prelude::*;

/// Where the pasted HTML came from, when the caller knows.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub enum HtmlSource {
    MsWord,
    GoogleDoc,
    UnknownExternal,
}

impl From<HtmlSource> for docx_paste::HtmlSource {
    fn from(source: HtmlSource) -> Self {
        match source {
            HtmlSource::MsWord => Self::MsWord,
            HtmlSource::GoogleDoc => Self::GoogleDoc,
            HtmlSource::UnknownExternal => Self::UnknownExternal,
        }
    }
}

/// Convert the RTF and HTML flavours of a paste into an array of editor
/// nodes.
#[wasm_bindgen(js_name = docxDeserialize)]
pub fn docx_deserialize(rtf: &str, html: &str) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    to_js(&docx_paste::docx_deserialize(rtf, html))
}

#[wasm_bindgen(js_name = docxDeserializeFromSource)]
pub fn docx_deserialize_from_source(
    rtf: &str,
    html: &str,
    source: HtmlSource,
) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    to_js(&docx_paste::docx_deserialize_from_source(
        rtf,
        html,
        source.into(),
    ))
}

fn to_js(nodes: &[docx_paste::DocNode]) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(nodes)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}
