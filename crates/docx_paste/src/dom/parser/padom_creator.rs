// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::{
    paqual_name, PaDom, PaDomCreationError, PaDomHandle, PaDomNode,
    PaNodeText,
};
use html5ever::interface::NextParserState;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{parse_fragment, Attribute, QualName};
use std::cell::{Ref, RefCell};

pub(crate) type DomCreationResult = Result<PaDom, PaDomCreationError>;

pub(crate) struct PaDomCreator {
    state: RefCell<PaDomCreationError>,
}

impl PaDomCreator {
    pub fn parse(html: &str) -> DomCreationResult {
        parse_fragment(
            PaDomCreator::default(),
            Default::default(),
            paqual_name(""),
            vec![],
        )
        .from_utf8()
        .one(html.as_bytes())
    }
}

impl Default for PaDomCreator {
    fn default() -> Self {
        Self {
            state: RefCell::new(PaDomCreationError::new()),
        }
    }
}

impl TreeSink for PaDomCreator {
    type Handle = PaDomHandle;
    type Output = DomCreationResult;
    type ElemName<'a> = Ref<'a, QualName>;

    fn finish(self) -> Self::Output {
        let state = self.state.into_inner();
        if state.parse_errors.is_empty() {
            Ok(state.dom)
        } else {
            Err(state)
        }
    }

    fn parse_error(&self, msg: std::borrow::Cow<'static, str>) {
        self.state.borrow_mut().parse_errors.push(String::from(msg));
    }

    fn get_document(&self) -> Self::Handle {
        self.state.borrow().dom.document_handle().clone()
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        Ref::map(self.state.borrow(), |map| map.dom.get_node(target).name())
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        flags: ElementFlags,
    ) -> Self::Handle {
        self.state
            .borrow_mut()
            .dom
            .create_element(name, attrs, flags)
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        self.state
            .borrow_mut()
            .dom
            .add_node(PaDomNode::Comment(PaNodeText {
                content: text.as_ref().to_owned(),
            }))
    }

    fn create_pi(&self, _target: StrTendril, data: StrTendril) -> Self::Handle {
        self.create_comment(data)
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let dom = &mut self.state.borrow_mut().dom;
        match child {
            NodeOrText::AppendNode(child) => dom.append_child(parent, child),
            NodeOrText::AppendText(tendril) => {
                if let PaDomNode::Text(t) = dom.get_mut_node(parent) {
                    t.content += tendril.as_ref();
                } else {
                    dom.append_text(parent, tendril.as_ref());
                }
            }
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let has_parent = self.state.borrow().dom.parent(element).is_some();
        if has_parent {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        // Doctypes carry nothing we convert
    }

    fn mark_script_already_started(&self, _node: &Self::Handle) {}

    fn pop(&self, _node: &Self::Handle) {}

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        // Template contents live directly under the template element, which
        // the converter drops along with everything inside it.
        target.clone()
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x == y
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(
        &self,
        sibling: &Self::Handle,
        new_node: NodeOrText<Self::Handle>,
    ) {
        let dom = &mut self.state.borrow_mut().dom;
        match new_node {
            NodeOrText::AppendNode(node) => dom.insert_before(sibling, node),
            NodeOrText::AppendText(tendril) => {
                dom.insert_text_before(sibling, tendril.as_ref())
            }
        }
    }

    fn add_attrs_if_missing(
        &self,
        target: &Self::Handle,
        attrs: Vec<Attribute>,
    ) {
        let dom = &mut self.state.borrow_mut().dom;
        if let PaDomNode::Container(node) = dom.get_mut_node(target) {
            let to_add: Vec<(String, String)> = attrs
                .iter()
                .filter_map(|attr| {
                    let attr_name = attr.name.local.as_ref();
                    if node.attrs.iter().any(|(name, _)| name == attr_name) {
                        None
                    } else {
                        Some((
                            attr_name.to_owned(),
                            attr.value.as_ref().to_owned(),
                        ))
                    }
                })
                .collect();
            node.attrs.extend(to_add);
        }
    }

    fn associate_with_form(
        &self,
        _target: &Self::Handle,
        _form: &Self::Handle,
        _nodes: (&Self::Handle, Option<&Self::Handle>),
    ) {
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.state.borrow_mut().dom.detach(target);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        self.state
            .borrow_mut()
            .dom
            .reparent_children(node, new_parent);
    }

    fn is_mathml_annotation_xml_integration_point(
        &self,
        _handle: &Self::Handle,
    ) -> bool {
        false
    }

    fn set_current_line(&self, _line_number: u64) {}

    fn complete_script(&self, _node: &Self::Handle) -> NextParserState {
        NextParserState::Continue
    }

    fn allow_declarative_shadow_roots(
        &self,
        _intended_parent: &Self::Handle,
    ) -> bool {
        false
    }

    fn attach_declarative_shadow(
        &self,
        _location: &Self::Handle,
        _template: &Self::Handle,
        _attrs: Vec<Attribute>,
    ) -> Result<(), String> {
        Err(String::from("Declarative shadow roots are not supported"))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Compact dump of everything reachable from the document, so that
    /// nodes detached during parsing do not show up.
    fn d(dom: &PaDom) -> String {
        fn write(dom: &PaDom, handle: &PaDomHandle, out: &mut String) {
            match dom.get_node(handle) {
                PaDomNode::Document(_) => {}
                PaDomNode::Container(c) => {
                    out.push_str(c.tag());
                    for (name, value) in &c.attrs {
                        out.push_str(&format!("[{name}={value}]"));
                    }
                }
                PaDomNode::Text(t) => {
                    out.push_str(&format!("{:?}", t.content));
                    return;
                }
                PaDomNode::Comment(t) => {
                    out.push_str(&format!("<!--{}-->", t.content));
                    return;
                }
            }
            out.push('(');
            for (i, child) in dom.children(handle).iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write(dom, child, out);
            }
            out.push(')');
        }
        let mut out = String::new();
        write(dom, dom.document_handle(), &mut out);
        out
    }

    fn parse(input: &str) -> PaDom {
        PaDomCreator::parse(input).unwrap()
    }

    fn parse_recovering(input: &str) -> PaDom {
        match PaDomCreator::parse(input) {
            Ok(dom) => dom,
            Err(err) => {
                assert!(!err.parse_errors.is_empty());
                err.dom
            }
        }
    }

    #[test]
    fn parsing_an_empty_string_creates_an_empty_dom() {
        assert_eq!(d(&parse("")), "(html())");
    }

    #[test]
    fn parsing_a_text_snippet_creates_one_node() {
        assert_eq!(d(&parse("foo")), r#"(html("foo"))"#);
    }

    #[test]
    fn parsing_nested_structures_produces_them() {
        assert_eq!(
            d(&parse("A<i>B<b>C</b>D</i>E")),
            r#"(html("A", i("B", b("C"), "D"), "E"))"#
        );
    }

    #[test]
    fn parsing_tags_with_attributes_preserves_them() {
        assert_eq!(
            d(&parse("<span class='foo'>txt</span>")),
            r#"(html(span[class=foo]("txt")))"#
        );
    }

    #[test]
    fn parsing_text_node_with_escaped_html_entities() {
        assert_eq!(
            d(&parse("aaa&lt;strong&gt;bbb&lt;/strong&gt;ccc")),
            r#"(html("aaa<strong>bbb</strong>ccc"))"#
        );
    }

    #[test]
    fn comments_are_kept_as_comment_nodes() {
        assert_eq!(
            d(&parse("a<!-- note -->b")),
            r#"(html("a", <!-- note -->, "b"))"#
        );
    }

    #[test]
    fn stray_text_in_a_table_is_moved_in_front_of_it() {
        assert_eq!(
            d(&parse_recovering("<table>x<tr><td>a</td></tr></table>")),
            r#"(html("x", table(tbody(tr(td("a"))))))"#
        );
    }

    #[test]
    fn misnested_formatting_is_repaired() {
        assert_eq!(
            d(&parse_recovering("<b>1<p>2</b>3</p>")),
            r#"(html(b("1"), p(b("2"), "3")))"#
        );
    }

    #[test]
    fn parse_errors_are_reported_with_the_recovered_dom() {
        let err = PaDomCreator::parse("<p>a</x></p>").unwrap_err();
        assert!(!err.parse_errors.is_empty());
        assert_eq!(d(&err.dom), r#"(html(p("a")))"#);
    }
}
