use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use html5ever::tendril::TendrilSink;
use html5ever::{Attribute, ParseOpts, QualName, local_name, ns, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

use super::types::RenderError;

/// Prefix that puts the tree builder in the "in body" insertion mode before
/// any converter output is seen, so leading comments, `<script>`, `<style>`
/// and `<meta>` stay in the fragment instead of moving to `<head>`.
const BODY_CONTEXT: &str = "<!DOCTYPE html><html><head></head><body>";

/// Mutable HTML fragment produced from converter output.
///
/// The fragment's top-level nodes are the children of the body context
/// element. Attributes keep their source order. Nodes are reference counted
/// and never leave the render call that parsed them.
pub struct HtmlFragment {
    body: Handle,
}

impl HtmlFragment {
    pub fn parse(html: &str) -> Result<Self, RenderError> {
        let mut source = String::with_capacity(BODY_CONTEXT.len() + html.len());
        source.push_str(BODY_CONTEXT);
        source.push_str(html);

        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(source);
        let body = find_body(&dom.document)
            .ok_or_else(|| RenderError::document("parsed fragment has no body element"))?;

        Ok(Self { body })
    }

    /// Top-level nodes in document order.
    pub fn children(&self) -> Vec<Handle> {
        self.body.children.borrow().clone()
    }

    /// Every node below the fragment root, depth first in document order.
    pub fn descendants(&self) -> Vec<Handle> {
        let mut out = Vec::new();
        collect_descendants(&self.body, &mut out);
        out
    }

    /// Serialize the top-level nodes back to markup, without re-indenting.
    pub fn to_html(&self) -> Result<String, RenderError> {
        let mut output = Vec::new();
        let handle = SerializableHandle::from(self.body.clone());
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..Default::default()
        };

        serialize(&mut output, &handle, opts)
            .map_err(|err| RenderError::document(format!("serialization failed: {err}")))?;

        String::from_utf8(output)
            .map_err(|err| RenderError::document(format!("serialized HTML is not UTF-8: {err}")))
    }
}

fn find_body(handle: &Handle) -> Option<Handle> {
    if tag_name(handle) == Some("body") {
        return Some(handle.clone());
    }
    handle.children.borrow().iter().find_map(find_body)
}

fn collect_descendants(handle: &Handle, out: &mut Vec<Handle>) {
    for child in handle.children.borrow().iter() {
        out.push(child.clone());
        collect_descendants(child, out);
    }
}

/// Local tag name for element nodes.
pub(crate) fn tag_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

/// Concatenated text of every descendant text node.
pub(crate) fn text_content(node: &Handle) -> String {
    fn walk(node: &Handle, text: &mut String) {
        match &node.data {
            NodeData::Text { contents } => text.push_str(&contents.borrow()),
            _ => {
                for child in node.children.borrow().iter() {
                    walk(child, text);
                }
            }
        }
    }

    let mut text = String::new();
    walk(node, &mut text);
    text
}

pub(crate) fn attribute(node: &Handle, name: &str) -> Option<String> {
    let NodeData::Element { attrs, .. } = &node.data else {
        return None;
    };
    attrs
        .borrow()
        .iter()
        .find(|attr| attr.name.ns == ns!() && &*attr.name.local == name)
        .map(|attr| attr.value.to_string())
}

/// Replace the element's `id` in place, or append one after the existing attributes.
pub(crate) fn set_id(node: &Handle, value: &str) {
    let NodeData::Element { attrs, .. } = &node.data else {
        return;
    };
    let mut attrs = attrs.borrow_mut();
    match attrs
        .iter_mut()
        .find(|attr| attr.name.ns == ns!() && attr.name.local == local_name!("id"))
    {
        Some(existing) => existing.value = value.into(),
        None => attrs.push(Attribute {
            name: QualName::new(None, ns!(), local_name!("id")),
            value: value.into(),
        }),
    }
}
