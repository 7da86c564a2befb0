// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Word does not paste lists as `<ol>`/`<ul>`. Each item is a paragraph
//! with an `mso-list` style naming its nesting level, and the bullet or
//! number is literal text inside a `<span style="mso-list:Ignore">`.
//! The converter tags such paragraphs while walking and the functions here
//! regroup them into list nodes afterwards.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{PaDom, PaDomNode, PaNodeContainer};
use crate::dom::nodes::{ContainerNode, DocNode};

pub(crate) const LEVEL_ATTR: &str = "data-word-list-level";
pub(crate) const ORDERED_ATTR: &str = "data-word-list-ordered";

/// Word lists nest at most nine levels deep.
const MAX_LEVEL: usize = 9;

static LEVEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"level(\d+)").unwrap());
static ORDERED_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(?(\d+|[a-zA-Z]|[ivxlcdmIVXLCDM]+)[.)]$").unwrap()
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct WordListInfo {
    pub(crate) level: usize,
    pub(crate) ordered: bool,
}

impl WordListInfo {
    pub(crate) fn to_attrs(self) -> Vec<(String, String)> {
        vec![
            (LEVEL_ATTR.to_owned(), self.level.to_string()),
            (ORDERED_ATTR.to_owned(), self.ordered.to_string()),
        ]
    }
}

/// The bullet or number Word writes in front of a list paragraph.
pub(crate) fn is_list_marker(span: &PaNodeContainer) -> bool {
    span.contains_style("mso-list", "ignore")
}

/// `None` unless `p` is one of Word's list paragraphs.
pub(crate) fn list_paragraph_info(
    padom: &PaDom,
    p: &PaNodeContainer,
) -> Option<WordListInfo> {
    let level = p
        .style_value("mso-list")
        .and_then(|v| LEVEL.captures(v))
        .and_then(|c| c[1].parse::<usize>().ok());
    let level = match level {
        Some(level) => level.clamp(1, MAX_LEVEL),
        None if p.has_class_starting_with("MsoListParagraph") => 1,
        None => return None,
    };
    let ordered = find_marker(padom, p)
        .map(|marker| {
            let marker = marker.trim_matches(|c: char| c.is_whitespace());
            ORDERED_MARKER.is_match(marker)
        })
        .unwrap_or(false);
    Some(WordListInfo { level, ordered })
}

fn find_marker(padom: &PaDom, container: &PaNodeContainer) -> Option<String> {
    padom.descendants(container).find_map(|node| match node {
        PaDomNode::Container(c) if c.tag() == "span" && is_list_marker(c) => {
            Some(text_of(padom, c))
        }
        _ => None,
    })
}

fn text_of(padom: &PaDom, container: &PaNodeContainer) -> String {
    padom
        .descendants(container)
        .filter_map(|node| match node {
            PaDomNode::Text(t) => Some(t.content.as_str()),
            _ => None,
        })
        .collect()
}

/// Turn runs of tagged list paragraphs into (nested) lists. Everything else
/// passes through untouched.
pub(crate) fn group_list_paragraphs(nodes: Vec<DocNode>) -> Vec<DocNode> {
    let mut output = Vec::new();
    let mut stack: Vec<(usize, ContainerNode)> = Vec::new();

    for node in nodes {
        match take_list_info(node) {
            Ok((info, paragraph)) => {
                add_item(&mut stack, &mut output, info, paragraph);
            }
            Err(node) => {
                close_all(&mut stack, &mut output);
                output.push(node);
            }
        }
    }
    close_all(&mut stack, &mut output);
    output
}

fn take_list_info(
    node: DocNode,
) -> Result<(WordListInfo, ContainerNode), DocNode> {
    let mut c = match node {
        DocNode::Container(c) => c,
        DocNode::Text(_) => return Err(node),
    };
    let level = c.get_attr(LEVEL_ATTR).and_then(|l| l.parse::<usize>().ok());
    let Some(level) = level else {
        return Err(DocNode::Container(c));
    };
    let ordered = c.get_attr(ORDERED_ATTR) == Some("true");
    c.remove_attr(LEVEL_ATTR);
    c.remove_attr(ORDERED_ATTR);
    Ok((WordListInfo { level, ordered }, c))
}

fn add_item(
    stack: &mut Vec<(usize, ContainerNode)>,
    output: &mut Vec<DocNode>,
    info: WordListInfo,
    paragraph: ContainerNode,
) {
    while stack.last().is_some_and(|(level, _)| *level > info.level) {
        close_top(stack, output);
    }
    let item = DocNode::new_list_item(vec![paragraph.into()]);
    let same_level =
        stack.last().is_some_and(|(level, _)| *level == info.level);
    if same_level {
        if let Some((_, list)) = stack.last_mut() {
            list.append_child(item);
        }
    } else {
        stack.push((
            info.level,
            ContainerNode::new_list(info.ordered, None, vec![item]),
        ));
    }
}

fn close_top(
    stack: &mut Vec<(usize, ContainerNode)>,
    output: &mut Vec<DocNode>,
) {
    let Some((_, list)) = stack.pop() else {
        return;
    };
    let parent_item = stack
        .last_mut()
        .and_then(|(_, parent)| parent.last_child_mut())
        .and_then(DocNode::as_container_mut);
    match parent_item {
        Some(item) => item.append_child(list.into()),
        None => output.push(list.into()),
    }
}

fn close_all(
    stack: &mut Vec<(usize, ContainerNode)>,
    output: &mut Vec<DocNode>,
) {
    while !stack.is_empty() {
        close_top(stack, output);
    }
}
