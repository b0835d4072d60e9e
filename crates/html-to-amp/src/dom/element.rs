//! Element handle over `markup5ever_rcdom` nodes.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use html5ever::serialize::TraversalScope;
use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, Namespace, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData};

use crate::dom::{HTML_NAMESPACE, serialize_handle};
use crate::error::Result;

/// A single element of a parsed [`Document`](crate::Document).
///
/// `Element` is a cheap, clonable handle: clones refer to the same node, and
/// equality is node identity. Mutations are visible through every handle.
#[derive(Clone)]
pub struct Element {
    handle: Handle,
}

impl Element {
    /// Create a new, detached HTML element.
    pub fn new(tag: &str) -> Self {
        let handle = Node::new(NodeData::Element {
            name: QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(tag.to_ascii_lowercase())),
            attrs: RefCell::new(Vec::new()),
            template_contents: RefCell::new(None),
            mathml_annotation_xml_integration_point: false,
        });
        Self { handle }
    }

    /// Wrap a raw node, returning `None` unless it is an element.
    pub(crate) fn from_handle(handle: Handle) -> Option<Self> {
        matches!(handle.data, NodeData::Element { .. }).then_some(Self { handle })
    }

    pub(crate) const fn handle(&self) -> &Handle {
        &self.handle
    }

    fn parts(&self) -> (&QualName, &RefCell<Vec<Attribute>>) {
        let NodeData::Element { name, attrs, .. } = &self.handle.data else {
            unreachable!("Element always wraps an element node");
        };
        (name, attrs)
    }

    /// Lowercase tag name.
    pub fn tag_name(&self) -> String {
        (*self.parts().0.local).to_ascii_lowercase()
    }

    /// Element children, in document order. Text and comments are skipped.
    pub fn children(&self) -> Vec<Self> {
        self.handle
            .children
            .borrow()
            .iter()
            .filter_map(|child| Self::from_handle(Rc::clone(child)))
            .collect()
    }

    /// Whether this element has at least one element child.
    pub fn has_children(&self) -> bool {
        self.handle
            .children
            .borrow()
            .iter()
            .any(|child| matches!(child.data, NodeData::Element { .. }))
    }

    /// Every element below this one, in document order.
    pub fn descendants(&self) -> Vec<Self> {
        let mut found = collect_elements(&self.handle);
        found.remove(0);
        found
    }

    /// Parent element, if any. The document node is not an element.
    pub fn parent(&self) -> Option<Self> {
        parent_of(&self.handle).and_then(Self::from_handle)
    }

    /// Whether this element has been removed from its parent.
    pub fn is_detached(&self) -> bool {
        parent_of(&self.handle).is_none()
    }

    /// Whether the ancestor chain of this element reaches a document node.
    ///
    /// False for detached elements and for everything below them.
    pub fn is_connected(&self) -> bool {
        let mut current = Rc::clone(&self.handle);
        while let Some(parent) = parent_of(&current) {
            if matches!(parent.data, NodeData::Document) {
                return true;
            }
            current = parent;
        }
        false
    }

    /// Whether `other` is this element or one of its descendants.
    pub fn contains(&self, other: &Self) -> bool {
        let mut current = Some(Rc::clone(&other.handle));
        while let Some(node) = current {
            if Rc::ptr_eq(&node, &self.handle) {
                return true;
            }
            current = parent_of(&node);
        }
        false
    }

    /// Value of an attribute.
    pub fn attr(&self, name: &str) -> Option<String> {
        self.parts()
            .1
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == name)
            .map(|attr| attr.value.to_string())
    }

    /// Whether the attribute is present, regardless of its value.
    pub fn has_attr(&self, name: &str) -> bool {
        self.parts().1.borrow().iter().any(|attr| &*attr.name.local == name)
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attr(&self, name: &str, value: &str) {
        let mut attrs = self.parts().1.borrow_mut();
        if let Some(attr) = attrs.iter_mut().find(|attr| &*attr.name.local == name) {
            attr.value = StrTendril::from(value);
        } else {
            attrs.push(Attribute {
                name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
                value: StrTendril::from(value),
            });
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&self, name: &str) -> Option<String> {
        let mut attrs = self.parts().1.borrow_mut();
        let index = attrs.iter().position(|attr| &*attr.name.local == name)?;
        Some(attrs.remove(index).value.to_string())
    }

    /// All attributes as `(name, value)` pairs, in source order.
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.parts()
            .1
            .borrow()
            .iter()
            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
            .collect()
    }

    /// Whether the whitespace-separated `class` list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        let mut stack = vec![Rc::clone(&self.handle)];
        while let Some(node) = stack.pop() {
            if let NodeData::Text { contents } = &node.data {
                text.push_str(&contents.borrow());
            }
            stack.extend(node.children.borrow().iter().rev().cloned());
        }
        text
    }

    /// Append `child` as the last child, moving it from its current position.
    ///
    /// No-op when `child` is this element or one of its ancestors.
    pub fn append_child(&self, child: &Self) {
        if child.contains(self) {
            return;
        }
        detach(&child.handle);
        attach(&self.handle, Rc::clone(&child.handle));
    }

    /// Append a text node as the last child.
    pub fn append_text(&self, text: &str) {
        let node = Node::new(NodeData::Text {
            contents: RefCell::new(StrTendril::from(text)),
        });
        attach(&self.handle, node);
    }

    /// Insert `sibling` directly before this element.
    ///
    /// No-op when this element is detached or `sibling` is one of its ancestors.
    pub fn insert_before(&self, sibling: &Self) {
        self.insert_sibling(sibling, 0);
    }

    /// Insert `sibling` directly after this element.
    pub fn insert_after(&self, sibling: &Self) {
        self.insert_sibling(sibling, 1);
    }

    fn insert_sibling(&self, sibling: &Self, offset: usize) {
        if sibling.contains(self) {
            return;
        }
        let Some(parent) = parent_of(&self.handle) else {
            return;
        };
        detach(&sibling.handle);
        let mut children = parent.children.borrow_mut();
        if let Some(index) = position_in(&children, &self.handle) {
            children.insert(index + offset, Rc::clone(&sibling.handle));
            sibling.handle.parent.set(Some(Rc::downgrade(&parent)));
        }
    }

    /// Put `replacement` where this element is. This element becomes detached.
    ///
    /// No-op when this element has no parent or `replacement` is one of its
    /// ancestors.
    pub fn replace_with(&self, replacement: &Self) {
        if replacement.contains(self) {
            return;
        }
        let Some(parent) = parent_of(&self.handle) else {
            return;
        };
        detach(&replacement.handle);
        let mut children = parent.children.borrow_mut();
        if let Some(index) = position_in(&children, &self.handle) {
            children[index] = Rc::clone(&replacement.handle);
            replacement.handle.parent.set(Some(Rc::downgrade(&parent)));
            self.handle.parent.set(None);
        }
    }

    /// Remove this element and its subtree from the parent. No-op when detached.
    pub fn remove(&self) {
        detach(&self.handle);
    }

    /// Replace this element with a new `tag` element that takes over its
    /// attributes and children. Returns the new element.
    ///
    /// The new element is detached when this one was.
    pub fn rename(&self, tag: &str) -> Self {
        let renamed = Self::new(tag);
        let attrs = self.parts().1.borrow().clone();
        *renamed.parts().1.borrow_mut() = attrs;

        let children: Vec<Handle> = self.handle.children.borrow_mut().drain(..).collect();
        for child in children {
            attach(&renamed.handle, child);
        }

        self.replace_with(&renamed);
        renamed
    }

    /// Markup of this element, including its own tags.
    pub fn outer_html(&self) -> Result<String> {
        serialize_handle(&self.handle, TraversalScope::IncludeNode)
    }

    /// Markup of this element's content.
    pub fn inner_html(&self) -> Result<String> {
        serialize_handle(&self.handle, TraversalScope::ChildrenOnly(None))
    }

    /// Markup of the start tag alone, attributes included.
    pub(crate) fn start_tag(&self) -> Result<String> {
        let shallow = Self::new(&self.tag_name());
        *shallow.parts().1.borrow_mut() = self.parts().1.borrow().clone();
        let html = shallow.outer_html()?;
        if let Some(open) = html.strip_suffix(format!("</{}>", shallow.tag_name()).as_str()) {
            return Ok(open.to_string());
        }
        Ok(html)
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.handle, &other.handle)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag_name())
            .field("attributes", &self.attributes())
            .finish()
    }
}

/// Every element at or below `root`, in document order.
pub(crate) fn collect_elements(root: &Handle) -> Vec<Element> {
    let mut found = Vec::new();
    let mut stack = vec![Rc::clone(root)];
    while let Some(node) = stack.pop() {
        stack.extend(node.children.borrow().iter().rev().cloned());
        if let Some(element) = Element::from_handle(node) {
            found.push(element);
        }
    }
    found
}

/// Move the content of every `template` at or below `root` into the template's
/// own children, so walking, filtering and serializing treat it like any
/// other subtree.
pub(crate) fn adopt_template_contents(root: &Handle) {
    let mut templates = Vec::new();
    let mut stack = vec![Rc::clone(root)];
    while let Some(node) = stack.pop() {
        stack.extend(node.children.borrow().iter().cloned());
        if let NodeData::Element { template_contents, .. } = &node.data {
            if let Some(contents) = template_contents.borrow().as_ref() {
                stack.push(Rc::clone(contents));
                templates.push((Rc::clone(&node), Rc::clone(contents)));
            }
        }
    }

    for (template, contents) in templates {
        let adopted: Vec<Handle> = contents.children.borrow_mut().drain(..).collect();
        for child in adopted {
            attach(&template, child);
        }
    }
}

fn parent_of(handle: &Handle) -> Option<Handle> {
    let weak = handle.parent.take()?;
    let parent = weak.upgrade();
    handle.parent.set(Some(weak));
    parent
}

fn position_in(children: &[Handle], handle: &Handle) -> Option<usize> {
    children.iter().position(|child| Rc::ptr_eq(child, handle))
}

fn detach(handle: &Handle) {
    if let Some(parent) = parent_of(handle) {
        let mut children = parent.children.borrow_mut();
        if let Some(index) = position_in(&children, handle) {
            children.remove(index);
        }
    }
    handle.parent.set(None);
}

fn attach(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}
