// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use once_cell::sync::Lazy;
use regex::Regex;

use super::html_tag::HtmlTag;
use super::word_lists;
use super::{PaDom, PaDomNode, PaNodeContainer};
use crate::dom::html_source::HtmlSource;
use crate::dom::nodes::{
    ContainerNode, DocNode, InlineFormat, Marks, TextLeaf,
};
use crate::images::ResolvedImageSource;

static SURROUNDING_INDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*\n\s*)+|(\s*\n\s*)+$").unwrap());
static INTERNAL_INDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\n\s*").unwrap());
static LANGUAGE_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:language|lang)-(.+)$").unwrap());

/// Attributes copied from the HTML element onto the node built for it.
const KEPT_ATTRS: [&str; 3] = ["dir", "colspan", "rowspan"];

const BOLD_WEIGHTS: [&str; 6] = ["bold", "bolder", "600", "700", "800", "900"];

/// Elements nested deeper than this are flattened into plain text.
const MAX_DEPTH: usize = 100;

/// Hands out the resolved image sources to `<img>` tags in walk order.
pub(crate) struct ImageCursor<'a> {
    remaining: std::slice::Iter<'a, ResolvedImageSource>,
}

impl<'a> ImageCursor<'a> {
    pub(crate) fn new(images: Option<&'a [ResolvedImageSource]>) -> Self {
        Self {
            remaining: images.unwrap_or_default().iter(),
        }
    }

    /// The source to use for an `<img>` whose own source is `own_src`.
    ///
    /// Tags without a source do not take an entry, matching the way the
    /// locators were extracted. Once the entries run out the tag keeps its
    /// own source.
    pub(crate) fn next_src(
        &mut self,
        own_src: Option<&str>,
    ) -> Option<String> {
        let own_src = own_src.filter(|src| !src.trim().is_empty())?;
        Some(match self.remaining.next() {
            Some(resolved) => resolved.url().into_owned(),
            None => own_src.to_owned(),
        })
    }

    pub(crate) fn remaining(&self) -> usize {
        self.remaining.len()
    }
}

#[derive(Clone, Debug, Default)]
struct WalkContext {
    marks: Marks,
    url: Option<String>,
    in_list: bool,
}

impl WalkContext {
    fn with_marks(&self, marks: Marks) -> Self {
        Self {
            marks,
            ..self.clone()
        }
    }

    fn with_url(&self, url: Option<String>) -> Self {
        Self { url, ..self.clone() }
    }

    fn in_block(&self) -> Self {
        Self {
            in_list: false,
            ..self.clone()
        }
    }

    fn in_list(&self) -> Self {
        Self {
            in_list: true,
            ..self.clone()
        }
    }
}

/// Walks a [PaDom] depth first and builds the [DocNode]s the editor
/// understands.
///
/// Marks and links are carried down the walk in a [WalkContext] and land on
/// the text leaves; block elements become containers. Unknown elements are
/// unwrapped, so whatever html5ever produced, some sensible node sequence
/// comes out.
pub(crate) struct HtmlDeserializer<'a> {
    images: ImageCursor<'a>,
    html_source: HtmlSource,
    depth: usize,
}

impl<'a> HtmlDeserializer<'a> {
    pub(crate) fn new(
        images: Option<&'a [ResolvedImageSource]>,
        html_source: HtmlSource,
    ) -> Self {
        Self {
            images: ImageCursor::new(images),
            html_source,
            depth: 0,
        }
    }

    pub(crate) fn deserialize(mut self, padom: &PaDom) -> Vec<DocNode> {
        let mut nodes = Vec::new();
        if let PaDomNode::Document(doc) = padom.get_document() {
            let ctx = WalkContext::default();
            self.convert_children(padom, doc, &ctx, &mut nodes);
        }
        let nodes = self.group_blocks(nodes);
        if self.images.remaining() > 0 {
            log::debug!(
                "Discarding {} resolved image(s) left over after the walk",
                self.images.remaining()
            );
        }
        nodes
    }

    fn convert_children(
        &mut self,
        padom: &PaDom,
        panode: &PaNodeContainer,
        ctx: &WalkContext,
        out: &mut Vec<DocNode>,
    ) {
        for child_handle in &panode.children {
            match padom.get_node(child_handle) {
                PaDomNode::Container(child) => {
                    self.convert_container(padom, child, ctx, out)
                }
                PaDomNode::Document(_) => {
                    log::debug!("Ignoring a document found inside a document")
                }
                PaDomNode::Text(text) => convert_text(&text.content, ctx, out),
                PaDomNode::Comment(_) => {}
            }
        }
    }

    fn convert_container(
        &mut self,
        padom: &PaDom,
        child: &PaNodeContainer,
        ctx: &WalkContext,
        out: &mut Vec<DocNode>,
    ) {
        if self.depth >= MAX_DEPTH {
            log::debug!(
                "Flattening <{}> nested more than {MAX_DEPTH} elements deep",
                child.tag()
            );
            let mut text = String::new();
            self.collect_text(padom, child, &mut text);
            convert_text(&text, ctx, out);
            return;
        }
        self.depth += 1;
        self.convert_element(padom, child, ctx, out);
        self.depth -= 1;
    }

    fn convert_element(
        &mut self,
        padom: &PaDom,
        child: &PaNodeContainer,
        ctx: &WalkContext,
        out: &mut Vec<DocNode>,
    ) {
        let Some(tag) = HtmlTag::from_local_name(child.tag()) else {
            // o:p, font, section and friends: keep the content only
            self.convert_children(padom, child, ctx, out);
            return;
        };

        if tag.is_dropped() {
            log::trace!("Dropping <{}>", child.tag());
            self.skip_images(padom, child);
            return;
        }
        if let Some(level) = tag.heading_level() {
            let children = self.convert_inline(padom, child, &ctx.in_block());
            out.push(
                ContainerNode::new_heading(level, children)
                    .with_attrs(kept_attrs(child))
                    .into(),
            );
            return;
        }
        if let Some(format) = tag.inline_format() {
            let mut marks = ctx.marks;
            if !(format == InlineFormat::Bold && is_normal_weight(child)) {
                marks = marks.with(format);
            }
            let marks = marks_from_style(child, marks);
            self.convert_children(padom, child, &ctx.with_marks(marks), out);
            return;
        }

        match tag {
            HtmlTag::P => {
                let paragraph = self.new_paragraph(padom, child, ctx);
                out.push(paragraph);
            }
            HtmlTag::Div => self.convert_div(padom, child, ctx, out),
            HtmlTag::Ul => self.convert_list(padom, child, ctx, false, out),
            HtmlTag::Ol => self.convert_list(padom, child, ctx, true, out),
            HtmlTag::Li => {
                let node = if ctx.in_list {
                    self.new_list_item(padom, child, ctx)
                } else {
                    // A list item without a list is just a paragraph
                    let children =
                        self.convert_inline(padom, child, &ctx.in_block());
                    ContainerNode::new_paragraph(children)
                        .with_attrs(kept_attrs(child))
                        .into()
                };
                out.push(node);
            }
            HtmlTag::Table => self.convert_table(padom, child, ctx, out),
            HtmlTag::Tr => {
                let row = self.new_table_row(padom, child, ctx);
                out.push(row);
            }
            HtmlTag::Td | HtmlTag::Th => {
                let children =
                    self.convert_inline(padom, child, &ctx.in_block());
                out.push(
                    ContainerNode::new_table_cell(tag == HtmlTag::Th, children)
                        .with_attrs(kept_attrs(child))
                        .into(),
                );
            }
            HtmlTag::Pre => {
                let code_block = self.new_code_block(padom, child);
                out.push(code_block);
            }
            HtmlTag::Blockquote => {
                let mut nodes = Vec::new();
                let ctx = ctx.in_block();
                self.convert_children(padom, child, &ctx, &mut nodes);
                out.push(
                    ContainerNode::new_quote(self.group_blocks(nodes))
                        .with_attrs(kept_attrs(child))
                        .into(),
                );
            }
            HtmlTag::Span => {
                if self.html_source == HtmlSource::MsWord
                    && word_lists::is_list_marker(child)
                {
                    self.skip_images(padom, child);
                    return;
                }
                let ctx = ctx.with_marks(marks_from_style(child, ctx.marks));
                self.convert_children(padom, child, &ctx, out);
            }
            HtmlTag::A => {
                let url = child
                    .get_attr("href")
                    .map(str::trim)
                    .filter(|href| !href.is_empty())
                    .map(str::to_owned)
                    .or_else(|| ctx.url.clone());
                self.convert_children(padom, child, &ctx.with_url(url), out);
            }
            HtmlTag::Img => {
                if let Some(image) = self.new_image(child) {
                    out.push(image);
                }
            }
            HtmlTag::Br => out.push(DocNode::new_text("\n")),
            _ => self.convert_children(padom, child, ctx, out),
        }
    }

    fn convert_inline(
        &mut self,
        padom: &PaDom,
        panode: &PaNodeContainer,
        ctx: &WalkContext,
    ) -> Vec<DocNode> {
        let mut nodes = Vec::new();
        self.convert_children(padom, panode, ctx, &mut nodes);
        inline_only(nodes)
    }

    fn new_paragraph(
        &mut self,
        padom: &PaDom,
        child: &PaNodeContainer,
        ctx: &WalkContext,
    ) -> DocNode {
        let mut attrs = kept_attrs(child);
        if self.html_source == HtmlSource::MsWord {
            if let Some(info) = word_lists::list_paragraph_info(padom, child) {
                attrs.extend(info.to_attrs());
            }
        }
        let children = self.convert_inline(padom, child, &ctx.in_block());
        ContainerNode::new_paragraph(children)
            .with_attrs(attrs)
            .into()
    }

    fn convert_div(
        &mut self,
        padom: &PaDom,
        child: &PaNodeContainer,
        ctx: &WalkContext,
        out: &mut Vec<DocNode>,
    ) {
        let mut nodes = Vec::new();
        self.convert_children(padom, child, ctx, &mut nodes);
        if nodes.iter().all(DocNode::is_whitespace_text) {
            return;
        }
        if nodes.iter().any(DocNode::is_block) {
            out.extend(nodes);
        } else {
            out.push(
                ContainerNode::new_paragraph(inline_only(nodes))
                    .with_attrs(kept_attrs(child))
                    .into(),
            );
        }
    }

    fn convert_list(
        &mut self,
        padom: &PaDom,
        child: &PaNodeContainer,
        ctx: &WalkContext,
        ordered: bool,
        out: &mut Vec<DocNode>,
    ) {
        let mut nodes = Vec::new();
        self.convert_children(padom, child, &ctx.in_list(), &mut nodes);
        let items = list_items(nodes);
        if items.is_empty() {
            log::trace!("Dropping an empty list");
            return;
        }
        let start = if ordered {
            child
                .get_attr("start")
                .and_then(|start| start.trim().parse::<u32>().ok())
        } else {
            None
        };
        out.push(
            ContainerNode::new_list(ordered, start, items)
                .with_attrs(kept_attrs(child))
                .into(),
        );
    }

    fn new_list_item(
        &mut self,
        padom: &PaDom,
        child: &PaNodeContainer,
        ctx: &WalkContext,
    ) -> DocNode {
        let mut nodes = Vec::new();
        self.convert_children(padom, child, &ctx.in_block(), &mut nodes);
        ContainerNode::new_list_item(self.group_blocks(nodes))
            .with_attrs(kept_attrs(child))
            .into()
    }

    fn convert_table(
        &mut self,
        padom: &PaDom,
        child: &PaNodeContainer,
        ctx: &WalkContext,
        out: &mut Vec<DocNode>,
    ) {
        let mut nodes = Vec::new();
        self.convert_children(padom, child, &ctx.in_block(), &mut nodes);
        let rows = table_rows(nodes);
        if rows.is_empty() {
            log::trace!("Dropping a table without rows");
            return;
        }
        out.push(
            ContainerNode::new_table(rows)
                .with_attrs(kept_attrs(child))
                .into(),
        );
    }

    fn new_table_row(
        &mut self,
        padom: &PaDom,
        child: &PaNodeContainer,
        ctx: &WalkContext,
    ) -> DocNode {
        let mut nodes = Vec::new();
        self.convert_children(padom, child, &ctx.in_block(), &mut nodes);
        let cells = nodes
            .into_iter()
            .filter_map(|node| {
                if node.is_table_cell() {
                    Some(node)
                } else if node.is_whitespace_text() {
                    None
                } else {
                    Some(wrap_in_cell(vec![node]))
                }
            })
            .collect();
        ContainerNode::new_table_row(cells)
            .with_attrs(kept_attrs(child))
            .into()
    }

    fn new_code_block(
        &mut self,
        padom: &PaDom,
        pre: &PaNodeContainer,
    ) -> DocNode {
        let mut text = String::new();
        self.collect_text(padom, pre, &mut text);
        ContainerNode::new_code_block(code_language(padom, pre), text)
            .with_attrs(kept_attrs(pre))
            .into()
    }

    /// The text below `container` as it is, with `<br>` as a newline.
    /// Images met on the way still take their entry.
    fn collect_text(
        &mut self,
        padom: &PaDom,
        container: &PaNodeContainer,
        into: &mut String,
    ) {
        let mut stack = vec![container.children.iter()];
        while let Some(children) = stack.last_mut() {
            let Some(handle) = children.next() else {
                stack.pop();
                continue;
            };
            match padom.get_node(handle) {
                PaDomNode::Text(t) => into.push_str(&t.content),
                PaDomNode::Container(c) => match c.tag() {
                    "br" => into.push('\n'),
                    "img" => self.skip_image(c),
                    name if HtmlTag::from_local_name(name)
                        .is_some_and(|tag| tag.is_dropped()) =>
                    {
                        self.skip_images(padom, c)
                    }
                    _ => stack.push(c.children.iter()),
                },
                PaDomNode::Document(_) | PaDomNode::Comment(_) => {}
            }
        }
    }

    fn new_image(&mut self, img: &PaNodeContainer) -> Option<DocNode> {
        let Some(src) = self.images.next_src(img.get_attr("src")) else {
            log::debug!("Dropping an <img> without a source");
            return None;
        };
        let alt = img
            .get_attr("alt")
            .filter(|alt| !alt.is_empty())
            .map(str::to_owned);
        Some(
            ContainerNode::new_image(
                src,
                alt,
                dimension(img, "width"),
                dimension(img, "height"),
            )
            .into(),
        )
    }

    /// Keep the image cursor aligned when content holding images is dropped.
    fn skip_images(&mut self, padom: &PaDom, container: &PaNodeContainer) {
        for node in padom.descendants(container) {
            if let PaDomNode::Container(c) = node {
                if c.tag() == "img" {
                    self.skip_image(c);
                }
            }
        }
    }

    fn skip_image(&mut self, img: &PaNodeContainer) {
        if self.images.next_src(img.get_attr("src")).is_some() {
            log::debug!("Skipping an image inside dropped content");
        }
    }

    fn group_blocks(&self, nodes: Vec<DocNode>) -> Vec<DocNode> {
        let blocks = blocks_only(nodes);
        if self.html_source == HtmlSource::MsWord {
            word_lists::group_list_paragraphs(blocks)
        } else {
            blocks
        }
    }
}

fn convert_text(text: &str, ctx: &WalkContext, out: &mut Vec<DocNode>) {
    // Trim any surrounding indentation
    let contents = SURROUNDING_INDENT.replace_all(text, "");
    // Replace any internal indentation with a single space
    let contents = INTERNAL_INDENT.replace_all(&contents, " ");
    if contents.is_empty() {
        return;
    }
    out.push(
        TextLeaf::new(contents.into_owned())
            .with_marks(ctx.marks)
            .with_url(ctx.url.clone())
            .into(),
    );
}

fn kept_attrs(panode: &PaNodeContainer) -> Vec<(String, String)> {
    panode
        .attrs
        .iter()
        .filter(|(name, _)| KEPT_ATTRS.contains(&name.as_str()))
        .cloned()
        .collect()
}

fn is_normal_weight(panode: &PaNodeContainer) -> bool {
    panode.contains_style("font-weight", "normal")
        || panode.contains_style("font-weight", "400")
}

/// Add the marks an inline `style` attribute asks for.
fn marks_from_style(panode: &PaNodeContainer, marks: Marks) -> Marks {
    let mut marks = marks;
    if BOLD_WEIGHTS
        .iter()
        .any(|weight| panode.contains_style("font-weight", weight))
    {
        marks = marks.with(InlineFormat::Bold);
    }
    if panode.contains_style("font-style", "italic")
        || panode.contains_style("font-style", "oblique")
    {
        marks = marks.with(InlineFormat::Italic);
    }
    for name in ["text-decoration", "text-decoration-line"] {
        if panode.contains_style(name, "underline") {
            marks = marks.with(InlineFormat::Underline);
        }
        if panode.contains_style(name, "line-through") {
            marks = marks.with(InlineFormat::StrikeThrough);
        }
    }
    marks
}

fn code_language(padom: &PaDom, pre: &PaNodeContainer) -> Option<String> {
    let from_class = |panode: &PaNodeContainer| {
        panode.get_attr("class").and_then(|classes| {
            classes.split_whitespace().find_map(|class| {
                LANGUAGE_CLASS.captures(class).map(|c| c[1].to_owned())
            })
        })
    };
    from_class(pre).or_else(|| {
        pre.children.iter().find_map(|handle| match padom.get_node(handle) {
            PaDomNode::Container(c) if c.tag() == "code" => from_class(c),
            _ => None,
        })
    })
}

fn dimension(img: &PaNodeContainer, name: &str) -> Option<u32> {
    img.get_attr(name)
        .map(|v| v.trim().trim_end_matches("px"))
        .and_then(|v| v.parse().ok())
}

/// Group runs of inline nodes into paragraphs so that only blocks are left.
///
/// For example: [b, codeblock, b, i, p].
///
/// It will first group any inline nodes: [[b], codeblock, [b, i], p].
/// And wrap each group in a paragraph: [p, codeblock, p, p].
///
/// Groups holding nothing but whitespace are dropped.
fn blocks_only(nodes: Vec<DocNode>) -> Vec<DocNode> {
    let mut output = Vec::new();
    let mut cur_group = Vec::new();

    for node in nodes {
        if node.is_block() {
            flush_inline_group(&mut cur_group, &mut output);
            output.push(node);
        } else {
            cur_group.push(node);
        }
    }
    flush_inline_group(&mut cur_group, &mut output);
    output
}

fn flush_inline_group(group: &mut Vec<DocNode>, output: &mut Vec<DocNode>) {
    if group.iter().all(DocNode::is_whitespace_text) {
        group.clear();
        return;
    }
    output.push(DocNode::new_paragraph(inline_only(std::mem::take(group))));
}

/// The inverse of [blocks_only]: blocks found among inline nodes are
/// replaced by their inline content, separated by line breaks. Adjacent
/// text leaves with the same formatting are merged.
fn inline_only(nodes: Vec<DocNode>) -> Vec<DocNode> {
    let mut output = Vec::new();
    for node in nodes {
        push_inline(node, &mut output);
    }
    output
}

fn push_inline(node: DocNode, output: &mut Vec<DocNode>) {
    match node {
        DocNode::Container(c) if c.kind().is_block() => {
            if !output.is_empty() && !ends_with_line_break(output) {
                output.push(DocNode::new_text("\n"));
            }
            for child in c.take_children() {
                push_inline(child, output);
            }
        }
        DocNode::Text(leaf) if leaf.text().is_empty() && leaf.is_plain() => {}
        DocNode::Text(leaf) => match output.last_mut() {
            Some(DocNode::Text(last))
                if last.marks() == leaf.marks()
                    && last.url() == leaf.url()
                    && last.original_text().is_none() =>
            {
                let merged = format!("{}{}", last.text(), leaf.text());
                last.set_text(merged);
            }
            _ => output.push(DocNode::Text(leaf)),
        },
        DocNode::Container(c) => output.push(DocNode::Container(c)),
    }
}

fn ends_with_line_break(nodes: &[DocNode]) -> bool {
    matches!(nodes.last(), Some(DocNode::Text(t)) if t.text().ends_with('\n'))
}

fn list_items(nodes: Vec<DocNode>) -> Vec<DocNode> {
    let mut items: Vec<DocNode> = Vec::new();
    let mut stray: Vec<DocNode> = Vec::new();

    for node in nodes {
        if node.is_list_item() {
            flush_stray_into_item(&mut stray, &mut items);
            items.push(node);
        } else if node.is_list() {
            // Google Docs nests lists directly inside lists, the nested list
            // belongs to the previous item.
            flush_stray_into_item(&mut stray, &mut items);
            match items.last_mut().and_then(DocNode::as_container_mut) {
                Some(item) => item.append_child(node),
                None => items.push(DocNode::new_list_item(vec![node])),
            }
        } else {
            stray.push(node);
        }
    }
    flush_stray_into_item(&mut stray, &mut items);
    items
}

fn flush_stray_into_item(stray: &mut Vec<DocNode>, items: &mut Vec<DocNode>) {
    if stray.iter().all(DocNode::is_whitespace_text) {
        stray.clear();
        return;
    }
    items.push(DocNode::new_list_item(blocks_only(std::mem::take(stray))));
}

fn table_rows(nodes: Vec<DocNode>) -> Vec<DocNode> {
    let mut rows = Vec::new();
    let mut stray_cells = Vec::new();

    for node in nodes {
        if node.is_table_row() {
            flush_cells_into_row(&mut stray_cells, &mut rows);
            rows.push(node);
        } else if node.is_table_cell() {
            stray_cells.push(node);
        } else if !node.is_whitespace_text() {
            stray_cells.push(wrap_in_cell(vec![node]));
        }
    }
    flush_cells_into_row(&mut stray_cells, &mut rows);
    rows
}

fn flush_cells_into_row(cells: &mut Vec<DocNode>, rows: &mut Vec<DocNode>) {
    if !cells.is_empty() {
        rows.push(
            ContainerNode::new_table_row(std::mem::take(cells)).into(),
        );
    }
}

fn wrap_in_cell(nodes: Vec<DocNode>) -> DocNode {
    ContainerNode::new_table_cell(false, inline_only(nodes)).into()
}

#[cfg(test)]
mod test {
    use indoc::indoc;
    use speculoos::{assert_that, AssertionFailure, Spec};

    use super::*;
    use crate::dom::parser::PaDomCreator;
    use crate::dom::to_tree::ToTree;

    fn parse_with(
        html: &str,
        source: HtmlSource,
        images: Option<&[ResolvedImageSource]>,
    ) -> Vec<DocNode> {
        let padom = PaDomCreator::parse(html).unwrap_or_else(|err| err.dom);
        HtmlDeserializer::new(images, source).deserialize(&padom)
    }

    trait DeserializesTo {
        fn deserializes_to(&self, expected: &str);
    }

    impl<'s, T> DeserializesTo for Spec<'s, T>
    where
        T: AsRef<str>,
    {
        fn deserializes_to(&self, expected: &str) {
            let subject = self.subject.as_ref();
            let actual =
                parse_with(subject, HtmlSource::UnknownExternal, None).to_tree();
            if actual != expected {
                AssertionFailure::from_spec(self)
                    .with_expected(String::from(expected))
                    .with_actual(actual)
                    .fail();
            }
        }
    }

    fn tree_from(html: &str, source: HtmlSource) -> String {
        parse_with(html, source, None).to_tree()
    }

    fn locators(srcs: &[&str]) -> Vec<ResolvedImageSource> {
        srcs.iter()
            .map(|src| ResolvedImageSource::Locator((*src).to_owned()))
            .collect()
    }

    #[test]
    fn empty_html_gives_no_nodes() {
        assert!(parse_with("", HtmlSource::UnknownExternal, None).is_empty());
    }

    #[test]
    fn plain_text_is_wrapped_in_a_paragraph() {
        assert_that!("some text").deserializes_to(indoc! {
            r#"

            └>paragraph
              └>"some text"
            "#});
    }

    #[test]
    fn nested_formatting_is_flattened_into_marks() {
        assert_that!("<p>X<b>Y<em>ZZ</em>0</b>1</p>").deserializes_to(indoc! {
            r#"

            └>paragraph
              ├>"X"
              ├>"Y" bold
              ├>"ZZ" bold italic
              ├>"0" bold
              └>"1"
            "#});
    }

    #[test]
    fn every_formatting_tag_maps_to_a_mark() {
        assert_that!("<p><u>a</u><s>b</s><del>c</del><code>d</code><ins>e</ins></p>")
            .deserializes_to(indoc! {
            r#"

            └>paragraph
              ├>"a" underline
              ├>"bc" strikethrough
              ├>"d" code
              └>"e" underline
            "#});
    }

    #[test]
    fn span_styles_become_marks() {
        let html = r#"<p><span style="font-weight:700">a</span><span style="font-style: italic">b</span><span style="text-decoration: underline line-through">c</span></p>"#;
        assert_that!(html).deserializes_to(indoc! {
            r#"

            └>paragraph
              ├>"a" bold
              ├>"b" italic
              └>"c" underline strikethrough
            "#});
    }

    #[test]
    fn bold_tag_with_normal_weight_is_not_bold() {
        let html = r#"<b style="font-weight:normal;"><p>plain</p></b>"#;
        assert_that!(html).deserializes_to(indoc! {
            r#"

            └>paragraph
              └>"plain"
            "#});
    }

    #[test]
    fn links_set_the_url_of_every_leaf_inside() {
        assert_that!(r#"<p><a href="https://matrix.org">a <b>b</b></a></p>"#)
            .deserializes_to(indoc! {
            r#"

            └>paragraph
              ├>"a ", https://matrix.org
              └>"b" bold, https://matrix.org
            "#});
    }

    #[test]
    fn headings_keep_their_level() {
        assert_that!("<h1>One</h1><h4>Four</h4>").deserializes_to(indoc! {
            r#"

            ├>heading 1
            │ └>"One"
            └>heading 4
              └>"Four"
            "#});
    }

    #[test]
    fn br_becomes_a_line_break_leaf() {
        assert_that!("<p>a<br>b</p>").deserializes_to(indoc! {
            r#"

            └>paragraph
              └>"a\nb"
            "#});
    }

    #[test]
    fn indentation_between_blocks_is_discarded() {
        let html = "<p>a</p>\n    <p>\n      b\n      c\n    </p>\n";
        assert_that!(html).deserializes_to(indoc! {
            r#"

            ├>paragraph
            │ └>"a"
            └>paragraph
              └>"b c"
            "#});
    }

    #[test]
    fn inline_runs_between_blocks_are_grouped_into_paragraphs() {
        assert_that!("a<b>b</b><p>c</p>d").deserializes_to(indoc! {
            r#"

            ├>paragraph
            │ ├>"a"
            │ └>"b" bold
            ├>paragraph
            │ └>"c"
            └>paragraph
              └>"d"
            "#});
    }

    #[test]
    fn divs_become_paragraphs_or_are_unwrapped() {
        assert_that!("<div>inline</div><div><p>x</p><p>y</p></div><div> </div>")
            .deserializes_to(indoc! {
            r#"

            ├>paragraph
            │ └>"inline"
            ├>paragraph
            │ └>"x"
            └>paragraph
              └>"y"
            "#});
    }

    #[test]
    fn unknown_tags_are_unwrapped() {
        assert_that!("<section><p>a<font>b</font><o:p></o:p></p></section>")
            .deserializes_to(indoc! {
            r#"

            └>paragraph
              └>"ab"
            "#});
    }

    #[test]
    fn metadata_tags_are_dropped_with_their_content() {
        assert_that!("<style>p {}</style><p>a<script>x()</script></p><title>t</title>")
            .deserializes_to(indoc! {
            r#"

            └>paragraph
              └>"a"
            "#});
    }

    #[test]
    fn lists_and_nested_lists() {
        assert_that!(r#"<ol start="3"><li>a<ul><li>b</li></ul></li><li><p>c</p></li></ol>"#)
            .deserializes_to(indoc! {
            r#"

            └>list ordered start=3
              ├>list-item
              │ ├>paragraph
              │ │ └>"a"
              │ └>list
              │   └>list-item
              │     └>paragraph
              │       └>"b"
              └>list-item
                └>paragraph
                  └>"c"
            "#});
    }

    #[test]
    fn start_is_ignored_on_unordered_lists() {
        assert_that!(r#"<ul start="3"><li>a</li></ul>"#)
            .deserializes_to(indoc! {
            r#"

            └>list
              └>list-item
                └>paragraph
                  └>"a"
            "#});
    }

    #[test]
    fn a_list_nested_directly_in_a_list_joins_the_previous_item() {
        assert_that!("<ol><li>a</li><ul><li>b</li></ul></ol>")
            .deserializes_to(indoc! {
            r#"

            └>list ordered
              └>list-item
                ├>paragraph
                │ └>"a"
                └>list
                  └>list-item
                    └>paragraph
                      └>"b"
            "#});
    }

    #[test]
    fn stray_content_in_a_list_is_wrapped_in_an_item() {
        assert_that!("<ul><li>a</li><b>b</b></ul>").deserializes_to(indoc! {
            r#"

            └>list
              ├>list-item
              │ └>paragraph
              │   └>"a"
              └>list-item
                └>paragraph
                  └>"b" bold
            "#});
    }

    #[test]
    fn list_items_without_a_list_become_paragraphs() {
        assert_that!("<li>a</li>").deserializes_to(indoc! {
            r#"

            └>paragraph
              └>"a"
            "#});
    }

    #[test]
    fn tables_keep_rows_and_header_cells() {
        let html = "<table><thead><tr><th>H</th></tr></thead>\
                    <tbody><tr><td><p>a</p><p>b</p></td></tr></tbody></table>";
        assert_that!(html).deserializes_to(indoc! {
            r#"

            └>table
              ├>table-row
              │ └>table-cell header
              │   └>"H"
              └>table-row
                └>table-cell
                  └>"a\nb"
            "#});
    }

    #[test]
    fn empty_cells_hold_an_empty_leaf() {
        assert_that!("<table><tr><td></td></tr></table>")
            .deserializes_to(indoc! {
            r#"

            └>table
              └>table-row
                └>table-cell
                  └>""
            "#});
    }

    #[test]
    fn pre_keeps_its_text_verbatim() {
        let html = "<pre class=\"language-rust\"><code>fn main() {\n    <b>x</b>\n}</code></pre>";
        assert_that!(html).deserializes_to(indoc! {
            r#"

            └>code rust
              └>"fn main() {\n    x\n}"
            "#});
    }

    #[test]
    fn code_language_can_come_from_the_inner_code_tag() {
        assert_that!(r#"<pre><code class="lang-js">a<br>b</code></pre>"#)
            .deserializes_to(indoc! {
            r#"

            └>code js
              └>"a\nb"
            "#});
    }

    #[test]
    fn blockquotes_hold_blocks() {
        assert_that!("<blockquote>a<p>b</p></blockquote>")
            .deserializes_to(indoc! {
            r#"

            └>blockquote
              ├>paragraph
              │ └>"a"
              └>paragraph
                └>"b"
            "#});
    }

    #[test]
    fn images_use_their_own_source_without_resolution_data() {
        let nodes = parse_with(
            r#"<p><img src="a.png" alt="A" width="10" height="20px"></p>"#,
            HtmlSource::UnknownExternal,
            None,
        );
        let paragraph = nodes[0].as_container().unwrap();
        assert_eq!(
            paragraph.children()[0].kind(),
            Some(&crate::ContainerNodeKind::Image {
                src: "a.png".into(),
                alt: Some("A".into()),
                width: Some(10),
                height: Some(20),
            })
        );
    }

    #[test]
    fn images_consume_resolved_sources_in_order() {
        let images = locators(&["one", "two"]);
        let nodes = parse_with(
            r#"<p><img src="a"></p><ul><li><img src="b"></li></ul><p><img src="c"></p>"#,
            HtmlSource::UnknownExternal,
            Some(&images),
        );
        assert_eq!(
            nodes.to_tree(),
            indoc! {
            r#"

            ├>paragraph
            │ └>image one
            │   └>""
            ├>list
            │ └>list-item
            │   └>paragraph
            │     └>image two
            │       └>""
            └>paragraph
              └>image c
                └>""
            "#}
        );
    }

    #[test]
    fn images_without_a_source_are_dropped_and_take_no_entry() {
        let images = locators(&["one"]);
        let nodes = parse_with(
            r#"<p>x<img alt="nothing"><img src="a"></p>"#,
            HtmlSource::UnknownExternal,
            Some(&images),
        );
        assert_eq!(
            nodes.to_tree(),
            indoc! {
            r#"

            └>paragraph
              ├>"x"
              └>image one
                └>""
            "#}
        );
    }

    #[test]
    fn image_cursor_falls_back_when_entries_run_out() {
        let images = locators(&["one"]);
        let mut cursor = ImageCursor::new(Some(&images));
        assert_eq!(cursor.next_src(Some("a")), Some("one".to_owned()));
        assert_eq!(cursor.next_src(Some("b")), Some("b".to_owned()));
        assert_eq!(cursor.next_src(None), None);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn google_docs_lists_are_converted() {
        let html = r#"<b style="font-weight:normal;" id="docs-internal-guid-1"><ol><li dir="ltr" style="font-weight:700;"><p dir="ltr"><span style="font-weight:700;">Bold</span></p></li><ul><li dir="ltr"><p dir="ltr"><span style="font-weight:400;">N</span><span style="font-weight:400;">ested</span></p></li></ul></ol></b>"#;
        assert_eq!(
            tree_from(html, HtmlSource::GoogleDoc),
            indoc! {
            r#"

            └>list ordered
              └>list-item
                ├>paragraph
                │ └>"Bold" bold
                └>list
                  └>list-item
                    └>paragraph
                      └>"Nested"
            "#}
        );
    }

    #[test]
    fn word_list_paragraphs_are_grouped_into_lists() {
        let html = r#"<p class=MsoListParagraphCxSpFirst style='mso-list:l0 level1 lfo1'><![if !supportLists]><span style='mso-list:Ignore'>1.<span>&nbsp;&nbsp; </span></span><![endif]>One<o:p></o:p></p>
<p class=MsoListParagraphCxSpMiddle style='mso-list:l0 level2 lfo1'><span style='mso-list:Ignore'>o<span>&nbsp; </span></span>Inner</p>
<p class=MsoListParagraphCxSpLast style='mso-list:l0 level1 lfo1'><span style='mso-list:Ignore'>2.<span>&nbsp; </span></span>Two</p>
<p class=MsoNormal>After</p>"#;
        assert_eq!(
            tree_from(html, HtmlSource::MsWord),
            indoc! {
            r#"

            ├>list ordered
            │ ├>list-item
            │ │ ├>paragraph
            │ │ │ └>"One"
            │ │ └>list
            │ │   └>list-item
            │ │     └>paragraph
            │ │       └>"Inner"
            │ └>list-item
            │   └>paragraph
            │     └>"Two"
            └>paragraph
              └>"After"
            "#}
        );
    }

    #[test]
    fn word_markers_are_only_special_for_word() {
        let html = r#"<p><span style='mso-list:Ignore'>1.</span>One</p>"#;
        assert_eq!(
            tree_from(html, HtmlSource::UnknownExternal),
            indoc! {
            r#"

            └>paragraph
              └>"1.One"
            "#}
        );
    }

    #[test]
    fn content_past_the_depth_limit_is_flattened_with_the_outer_marks() {
        let depth = MAX_DEPTH * 2;
        let html = format!(
            "<p><b>{}x<i>y</i>{}</b></p>",
            "<span>".repeat(depth),
            "</span>".repeat(depth)
        );
        assert_that!(html).deserializes_to(indoc! {
            r#"

            └>paragraph
              └>"xy" bold
            "#});
    }

    #[test]
    fn dropped_content_inside_code_is_left_out() {
        assert_that!("<pre>a<style>p {}</style>b</pre>").deserializes_to(indoc! {
            r#"

            └>code
              └>"ab"
            "#});
    }

    #[test]
    fn stray_text_in_a_table_ends_up_before_it() {
        assert_that!("<table>x<tr><td>a</td></tr></table>")
            .deserializes_to(indoc! {
            r#"

            ├>paragraph
            │ └>"x"
            └>table
              └>table-row
                └>table-cell
                  └>"a"
            "#});
    }
}
