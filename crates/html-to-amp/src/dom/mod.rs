//! Parsed document tree.
//!
//! [`Document`] and [`Element`] wrap the `markup5ever_rcdom` tree produced by
//! html5ever so that converters, the walker and the filter never touch parser
//! specific node types.

mod element;

pub use element::Element;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, RcDom, SerializableHandle};

use crate::error::{ConversionError, Result};

pub(crate) use element::{adopt_template_contents, collect_elements};

pub(crate) const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// A parsed HTML document.
pub struct Document {
    dom: RcDom,
}

impl Document {
    /// Parse markup into a document.
    ///
    /// Malformed markup never fails: the parser recovers and its warnings are
    /// discarded. `template` content becomes ordinary children of the template.
    pub fn parse(html: &str) -> Self {
        Self::from(parse_document(RcDom::default(), ParseOpts::default()).one(html))
    }

    pub(crate) fn node(&self) -> &Handle {
        &self.dom.document
    }

    /// The first `html` element in document order.
    pub fn root(&self) -> Option<Element> {
        self.elements().into_iter().find(|element| element.tag_name() == "html")
    }

    /// Every element in document order.
    pub fn elements(&self) -> Vec<Element> {
        collect_elements(&self.dom.document)
    }

    /// Every element with the given tag name, in document order.
    pub fn elements_by_tag_name(&self, tag: &str) -> Vec<Element> {
        let tag = tag.to_ascii_lowercase();
        self.elements()
            .into_iter()
            .filter(|element| element.tag_name() == tag)
            .collect()
    }

    /// Markup of the whole document, doctype included.
    pub fn to_html(&self) -> Result<String> {
        serialize_handle(&self.dom.document, TraversalScope::ChildrenOnly(None))
    }
}

impl From<RcDom> for Document {
    fn from(dom: RcDom) -> Self {
        adopt_template_contents(&dom.document);
        Self { dom }
    }
}

/// Serialize a node with html5ever's HTML serializer.
pub(crate) fn serialize_handle(handle: &Handle, traversal_scope: TraversalScope) -> Result<String> {
    let mut buf = Vec::new();
    let opts = SerializeOpts {
        traversal_scope,
        ..Default::default()
    };
    serialize(&mut buf, &SerializableHandle::from(handle.clone()), opts)?;
    String::from_utf8(buf)
        .map_err(|err| ConversionError::Serialization(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))
}
