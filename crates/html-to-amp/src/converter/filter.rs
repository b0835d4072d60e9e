//! Removal of elements that are never valid in AMP output.

use std::collections::HashSet;

use crate::dom::{Document, Element};

/// Tags removed from every converted document.
pub const PROHIBITED_TAGS: [&str; 14] = [
    "base", "frame", "frameset", "object", "param", "applet", "embed", "form", "input", "textarea", "script", "select",
    "option", "meta",
];

const UNSAFE_HREF: &str = "javascript:";

/// Whether `element` is an anchor whose `href` contains `javascript:`.
pub fn is_unsafe_link(element: &Element) -> bool {
    element.tag_name() == "a" && element.attr("href").is_some_and(|href| href.contains(UNSAFE_HREF))
}

/// Counts of what a filter pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterReport {
    /// Elements removed for their tag name.
    pub removed_elements: usize,
    /// Anchors removed for a `javascript:` href.
    pub removed_links: usize,
}

/// Deletes prohibited elements, whole subtree included, from a document.
///
/// A `meta` element survives only when it carries a non-empty `http-equiv`.
#[derive(Debug, Clone)]
pub struct ProhibitedElementFilter {
    tags: HashSet<String>,
}

impl Default for ProhibitedElementFilter {
    fn default() -> Self {
        Self {
            tags: PROHIBITED_TAGS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ProhibitedElementFilter {
    /// Filter with the built-in tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend the prohibited set. The built-in tags always stay.
    #[must_use]
    pub fn with_additional_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags
            .extend(tags.into_iter().map(|tag| tag.as_ref().trim().to_ascii_lowercase()));
        self
    }

    /// Whether `element` is removed for its tag name.
    pub fn is_prohibited(&self, element: &Element) -> bool {
        let tag = element.tag_name();
        if !self.tags.contains(&tag) {
            return false;
        }
        !(tag == "meta" && element.attr("http-equiv").is_some_and(|value| !value.is_empty()))
    }

    /// Remove every prohibited element and unsafe link in `document`.
    ///
    /// Runs over the whole document, so elements inserted by converters are
    /// caught too. Matches are collected before anything is removed; elements
    /// that went away with a removed ancestor are not counted.
    pub fn apply(&self, document: &Document) -> FilterReport {
        let mut report = FilterReport::default();
        for element in document.elements() {
            if !element.is_connected() {
                continue;
            }
            if self.is_prohibited(&element) {
                tracing::trace!(tag = %element.tag_name(), "removing prohibited element");
                element.remove();
                report.removed_elements += 1;
            } else if is_unsafe_link(&element) {
                tracing::trace!("removing javascript: link");
                element.remove();
                report.removed_links += 1;
            }
        }
        report
    }
}
