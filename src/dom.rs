//! DOM tree primitives over markup5ever_rcdom handles
//!
//! The conversion pipeline needs a small document-model surface: query by
//! tag name, attribute get/set, element creation, child appending, node
//! replacement, and subtree serialization. rcdom exposes the raw tree
//! (reference-counted nodes with `RefCell` children and attributes); this
//! module wraps the handful of operations the transformers rely on so the
//! borrow mechanics stay in one place.
//!
//! Node replacement is an O(children-of-parent) structural swap: the old
//! node is located in its parent's child list by pointer identity and the
//! replacement takes its slot, keeping document order intact.

use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::{namespace_url, ns, Attribute, LocalName, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ConversionError;

/// Get the local tag name of an element node
pub fn tag_name(node: &Handle) -> Option<&str> {
    match node.data {
        NodeData::Element { ref name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// Get an attribute value from an element node
///
/// Attribute names are matched against the lowercase local names html5ever
/// produces during parsing.
pub fn get_attribute(node: &Handle, name: &str) -> Option<String> {
    match node.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| attr.name.local.as_ref() == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// Check whether an element node carries an attribute
pub fn has_attribute(node: &Handle, name: &str) -> bool {
    match node.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .any(|attr| attr.name.local.as_ref() == name),
        _ => false,
    }
}

/// Set an attribute on an element node, overwriting any existing value
pub fn set_attribute(node: &Handle, name: &str, value: &str) {
    if let NodeData::Element { ref attrs, .. } = node.data {
        let mut attrs = attrs.borrow_mut();
        if let Some(attr) = attrs
            .iter_mut()
            .find(|attr| attr.name.local.as_ref() == name)
        {
            attr.value = value.into();
        } else {
            attrs.push(Attribute {
                name: QualName::new(None, ns!(), LocalName::from(name)),
                value: value.into(),
            });
        }
    }
}

/// Remove an attribute from an element node, if present
pub fn remove_attribute(node: &Handle, name: &str) {
    if let NodeData::Element { ref attrs, .. } = node.data {
        attrs
            .borrow_mut()
            .retain(|attr| attr.name.local.as_ref() != name);
    }
}

/// Create a detached element node with the given tag name
pub fn create_element(tag: &str) -> Handle {
    Node::new(NodeData::Element {
        name: QualName::new(None, ns!(html), LocalName::from(tag)),
        attrs: RefCell::new(Vec::new()),
        template_contents: RefCell::new(None),
        mathml_annotation_xml_integration_point: false,
    })
}

/// Create a detached text node
pub fn create_text(text: &str) -> Handle {
    Node::new(NodeData::Text {
        contents: RefCell::new(text.into()),
    })
}

/// Append a child node to a parent element
pub fn append_child(parent: &Handle, child: &Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child.clone());
}

/// Replace a node with another node in its parent's child list
///
/// The old node is located by pointer identity and the new node takes its
/// position, so surrounding siblings and document order are untouched. A
/// node without a parent (detached, or the document root) is left alone.
pub fn replace_node(old: &Handle, new: &Handle) {
    let parent = match old.parent.take().and_then(|weak| weak.upgrade()) {
        Some(parent) => parent,
        None => return,
    };
    let mut children = parent.children.borrow_mut();
    if let Some(index) = children.iter().position(|child| Rc::ptr_eq(child, old)) {
        new.parent.set(Some(Rc::downgrade(&parent)));
        children[index] = new.clone();
    }
}

/// Collect all descendant elements with the given tag name, in document
/// order (depth-first, left-to-right)
pub fn collect_by_tag(root: &Handle, tag: &str) -> Vec<Handle> {
    let mut found = Vec::new();
    collect_by_tag_into(root, tag, &mut found);
    found
}

fn collect_by_tag_into(node: &Handle, tag: &str, found: &mut Vec<Handle>) {
    if tag_name(node) == Some(tag) {
        found.push(node.clone());
    }
    for child in node.children.borrow().iter() {
        collect_by_tag_into(child, tag, found);
    }
}

/// Find the `<body>` element of a parsed document
///
/// html5ever always synthesizes html/head/body wrappers, even for
/// fragments, so a parsed document is expected to contain one.
pub fn find_body(dom: &RcDom) -> Option<Handle> {
    find_first(&dom.document, "body")
}

fn find_first(node: &Handle, tag: &str) -> Option<Handle> {
    if tag_name(node) == Some(tag) {
        return Some(node.clone());
    }
    for child in node.children.borrow().iter() {
        if let Some(found) = find_first(child, tag) {
            return Some(found);
        }
    }
    None
}

/// Serialize the children of a node to an HTML string
///
/// This is the `innerHTML` equivalent: the node itself is not included in
/// the output, only its children.
pub fn inner_html(node: &Handle) -> Result<String, ConversionError> {
    let mut buf = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };
    serialize(&mut buf, &SerializableHandle::from(node.clone()), opts)
        .map_err(|e| ConversionError::SerializeError(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| ConversionError::SerializeError(e.to_string()))
}
