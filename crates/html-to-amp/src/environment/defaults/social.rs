//! Twitter and Instagram embed blockquotes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::Element;
use crate::environment::Converter;
use crate::error::Result;

static TWEET_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:twitter|x)\.com/[^/]+/status(?:es)?/(\d+)").expect("valid tweet URL pattern"));

static INSTAGRAM_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"instagram\.com/(?:[^/]+/)?(?:p|reel|tv)/([A-Za-z0-9_-]+)").expect("valid Instagram URL pattern")
});

const TWEET_SIZE: (&str, &str) = ("375", "472");
const INSTAGRAM_SIZE: (&str, &str) = ("400", "400");

/// Rewrites `blockquote.twitter-tweet` into `amp-twitter`.
///
/// The tweet id comes from the last status link inside the quote. The quote
/// itself is kept inside the component as its `placeholder`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwitterConverter;

impl Converter for TwitterConverter {
    fn convert(&self, element: &Element, _tag: &str) -> Result<()> {
        if !element.has_class("twitter-tweet") {
            return Ok(());
        }
        let Some(tweet_id) = last_link_match(element, &TWEET_URL) else {
            return Ok(());
        };

        let embed = sized_component("amp-twitter", TWEET_SIZE);
        embed.set_attr("data-tweetid", &tweet_id);
        element.replace_with(&embed);
        element.set_attr("placeholder", "");
        embed.append_child(element);
        Ok(())
    }
}

/// Rewrites `blockquote.instagram-media` into `amp-instagram`.
///
/// The shortcode comes from `data-instgrm-permalink` or, failing that, the
/// last post link inside the quote.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstagramConverter;

impl Converter for InstagramConverter {
    fn convert(&self, element: &Element, _tag: &str) -> Result<()> {
        if !element.has_class("instagram-media") {
            return Ok(());
        }
        let permalink = element
            .attr("data-instgrm-permalink")
            .and_then(|url| capture(&INSTAGRAM_URL, &url));
        let Some(shortcode) = permalink.or_else(|| last_link_match(element, &INSTAGRAM_URL)) else {
            return Ok(());
        };

        let embed = sized_component("amp-instagram", INSTAGRAM_SIZE);
        embed.set_attr("data-shortcode", &shortcode);
        if element.has_attr("data-instgrm-captioned") {
            embed.set_attr("data-captioned", "");
        }
        element.replace_with(&embed);
        Ok(())
    }
}

fn sized_component(tag: &str, (width, height): (&str, &str)) -> Element {
    let component = Element::new(tag);
    component.set_attr("width", width);
    component.set_attr("height", height);
    component.set_attr("layout", "responsive");
    component
}

fn capture(pattern: &Regex, haystack: &str) -> Option<String> {
    pattern
        .captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn last_link_match(element: &Element, pattern: &Regex) -> Option<String> {
    element
        .descendants()
        .iter()
        .rev()
        .filter(|descendant| descendant.tag_name() == "a")
        .filter_map(|anchor| anchor.attr("href"))
        .find_map(|href| capture(pattern, &href))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;

    const TWEET: &str = r#"<blockquote class="twitter-tweet"><p>Hello</p>&mdash; Someone (@someone) <a href="https://twitter.com/someone/status/1234567890">June 1, 2020</a></blockquote>"#;

    #[test]
    fn tweet_becomes_amp_twitter_with_placeholder() {
        let document = Document::parse(TWEET);
        let quote = document.elements_by_tag_name("blockquote").remove(0);
        TwitterConverter.convert(&quote, "blockquote").unwrap();

        let embed = document.elements_by_tag_name("amp-twitter").remove(0);
        assert_eq!(embed.attr("data-tweetid").as_deref(), Some("1234567890"));
        assert_eq!(embed.attr("layout").as_deref(), Some("responsive"));
        assert_eq!(quote.parent(), Some(embed));
        assert_eq!(quote.attr("placeholder").as_deref(), Some(""));
    }

    #[test]
    fn x_dot_com_links_are_recognised() {
        let document = Document::parse(
            r#"<blockquote class="twitter-tweet"><a href="https://x.com/someone/status/42?ref=x">link</a></blockquote>"#,
        );
        let quote = document.elements_by_tag_name("blockquote").remove(0);
        TwitterConverter.convert(&quote, "blockquote").unwrap();
        let embed = document.elements_by_tag_name("amp-twitter").remove(0);
        assert_eq!(embed.attr("data-tweetid").as_deref(), Some("42"));
    }

    #[test]
    fn plain_blockquote_is_untouched() {
        let document = Document::parse("<blockquote><p>quote</p></blockquote>");
        let quote = document.elements_by_tag_name("blockquote").remove(0);
        TwitterConverter.convert(&quote, "blockquote").unwrap();
        InstagramConverter.convert(&quote, "blockquote").unwrap();
        assert!(!quote.is_detached());
        assert!(quote.attributes().is_empty());
    }

    #[test]
    fn tweet_without_status_link_is_untouched() {
        let document = Document::parse(r#"<blockquote class="twitter-tweet"><a href="/elsewhere">x</a></blockquote>"#);
        let quote = document.elements_by_tag_name("blockquote").remove(0);
        TwitterConverter.convert(&quote, "blockquote").unwrap();
        assert!(document.elements_by_tag_name("amp-twitter").is_empty());
    }

    #[test]
    fn instagram_uses_permalink_attribute() {
        let document = Document::parse(
            r#"<blockquote class="instagram-media" data-instgrm-permalink="https://www.instagram.com/p/B8abc_-1x/?utm_source=ig_embed" data-instgrm-captioned><a href="https://www.instagram.com/p/other/">post</a></blockquote>"#,
        );
        let quote = document.elements_by_tag_name("blockquote").remove(0);
        InstagramConverter.convert(&quote, "blockquote").unwrap();

        let embed = document.elements_by_tag_name("amp-instagram").remove(0);
        assert_eq!(embed.attr("data-shortcode").as_deref(), Some("B8abc_-1x"));
        assert!(embed.has_attr("data-captioned"));
        assert!(quote.is_detached());
    }

    #[test]
    fn instagram_falls_back_to_links() {
        let document = Document::parse(
            r#"<blockquote class="instagram-media"><a href="https://www.instagram.com/reel/Cxyz123/">post</a></blockquote>"#,
        );
        let quote = document.elements_by_tag_name("blockquote").remove(0);
        InstagramConverter.convert(&quote, "blockquote").unwrap();
        let embed = document.elements_by_tag_name("amp-instagram").remove(0);
        assert_eq!(embed.attr("data-shortcode").as_deref(), Some("Cxyz123"));
        assert!(!embed.has_attr("data-captioned"));
    }
}
