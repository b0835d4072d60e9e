//! Rendering the converted tree back into a bare fragment.

use html5ever::serialize::TraversalScope;
use markup5ever_rcdom::Handle;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::{Document, Element, serialize_handle};
use crate::error::{ConversionError, Result};
use crate::options::OutputMode;

static DOCTYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<!DOCTYPE [^>]+>").expect("valid doctype pattern"));

/// Wrapper markup left behind by parsing a fragment as a full document.
const WRAPPER_MARKUP: [&str; 9] = [
    "<html>",
    "</html>",
    "<body>",
    "</body>",
    "<head>",
    "</head>",
    "<?xml encoding=\"UTF-8\">",
    "<!--?xml encoding=\"UTF-8\"-->",
    "&#xD;",
];

const EDGE_NOISE: [char; 4] = ['\n', '\r', '\0', '\x0B'];

/// Strip doctype, `html`/`head`/`body` tags, the encoding pragma and
/// carriage-return entities, then trim newline noise from both ends.
///
/// Repeats until nothing changes, so `sanitize(sanitize(s)) == sanitize(s)`
/// holds for any input.
pub fn sanitize(html: &str) -> String {
    let mut current = sanitize_once(html);
    loop {
        let next = sanitize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn sanitize_once(html: &str) -> String {
    let mut html = DOCTYPE.replace_all(html, "").into_owned();
    for markup in WRAPPER_MARKUP {
        if html.contains(markup) {
            html = html.replace(markup, "");
        }
    }
    html.trim_matches(EDGE_NOISE.as_slice()).to_string()
}

/// Render `document` as a fragment according to `mode`.
pub(crate) fn render(document: &Document, mode: OutputMode) -> Result<String> {
    let html = match mode {
        OutputMode::Sanitized => render_sanitized(document)?,
        OutputMode::Structural => {
            let root = document
                .root()
                .ok_or_else(|| ConversionError::InvalidInput("no root html element to serialize".to_string()))?;
            render_content(&root)?
        }
    };
    Ok(html.trim_matches(EDGE_NOISE.as_slice()).to_string())
}

/// Serialize the document, passing only the markup around the root's content
/// through [`sanitize`]: doctype, comments outside the root and the root's
/// start tag. The content itself is never rewritten.
fn render_sanitized(document: &Document) -> Result<String> {
    let mut html = String::new();
    let nodes: Vec<Handle> = document.node().children.borrow().iter().cloned().collect();
    for node in nodes {
        match Element::from_handle(node.clone()) {
            Some(root) if root.tag_name() == "html" => {
                html.push_str(&sanitize(&root.start_tag()?));
                html.push_str(&render_content(&root)?);
            }
            _ => html.push_str(&sanitize(&serialize_handle(&node, TraversalScope::IncludeNode)?)),
        }
    }
    Ok(html)
}

/// Serialize the content of `root`, with `head` and `body` replaced by their
/// own content.
fn render_content(root: &Element) -> Result<String> {
    let mut html = String::new();
    let children: Vec<Handle> = root.handle().children.borrow().iter().cloned().collect();
    for child in children {
        let unwrap = Element::from_handle(child.clone())
            .is_some_and(|element| matches!(element.tag_name().as_str(), "head" | "body"));
        let scope = if unwrap {
            TraversalScope::ChildrenOnly(None)
        } else {
            TraversalScope::IncludeNode
        };
        html.push_str(&serialize_handle(&child, scope)?);
    }
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_wrapper_and_doctype() {
        let html = "<!DOCTYPE html>\n<html><head></head><body><p>hi</p></body></html>\n";
        assert_eq!(sanitize(html), "<p>hi</p>");
    }

    #[test]
    fn strips_lowercase_doctype_with_identifiers() {
        let html = r#"<!doctype html PUBLIC "-//W3C//DTD HTML 4.01//EN"><p>x</p>"#;
        assert_eq!(sanitize(html), "<p>x</p>");
    }

    #[test]
    fn strips_encoding_pragma_and_carriage_returns() {
        assert_eq!(sanitize("<?xml encoding=\"UTF-8\"><p>a&#xD;b</p>"), "<p>ab</p>");
        assert_eq!(sanitize("<!--?xml encoding=\"UTF-8\"--><p>a</p>"), "<p>a</p>");
    }

    #[test]
    fn trims_only_newline_noise() {
        assert_eq!(sanitize("\r\n\0\x0B <p>a</p> \n"), " <p>a</p> ");
    }

    #[test]
    fn keeps_html_tag_with_attributes() {
        assert_eq!(sanitize(r#"<html lang="en"><body>x</body></html>"#), r#"<html lang="en">x"#);
    }

    #[test]
    fn is_idempotent_when_removal_exposes_markup() {
        let nested = "<ht<html>ml><p>x</p></ht</html>ml>";
        let once = sanitize(nested);
        assert_eq!(once, "<p>x</p>");
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn structural_render_unwraps_head_and_body() {
        let document = Document::parse(r#"<!DOCTYPE html><html lang="en"><head><title>t</title></head><body><p>x</p></body></html>"#);
        assert_eq!(render(&document, OutputMode::Structural).unwrap(), "<title>t</title><p>x</p>");
        assert_eq!(
            render(&document, OutputMode::Sanitized).unwrap(),
            r#"<html lang="en"><title>t</title><p>x</p>"#
        );
    }

    #[test]
    fn wrapper_lookalikes_in_content_are_kept() {
        let html = r#"<style>/* <body> &#xD; */ p{}</style><p title="<body>see <head> tag</body>" data-x="<!DOCTYPE x>">x</p>"#;
        let document = Document::parse(html);
        for mode in [OutputMode::Sanitized, OutputMode::Structural] {
            assert_eq!(render(&document, mode).unwrap(), html, "{mode:?}");
        }
    }

    #[test]
    fn sanitized_render_drops_document_level_pragma() {
        let document = Document::parse("<?xml encoding=\"UTF-8\"><p>x</p>");
        assert_eq!(render(&document, OutputMode::Sanitized).unwrap(), "<p>x</p>");
    }

    #[test]
    fn modes_agree_on_plain_fragments() {
        for html in ["<p>hi</p>", "<meta http-equiv=\"refresh\" content=\"5\"><div><span>a</span></div>", "text only"] {
            let document = Document::parse(html);
            assert_eq!(
                render(&document, OutputMode::Sanitized).unwrap(),
                render(&document, OutputMode::Structural).unwrap(),
                "{html}"
            );
        }
    }
}
