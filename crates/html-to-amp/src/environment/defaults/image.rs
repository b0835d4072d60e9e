//! `img` → `amp-img`.

use crate::dom::Element;
use crate::environment::Converter;
use crate::error::Result;

use super::apply_layout;

/// Rewrites `img` into `amp-img`, keeping every attribute.
///
/// An image without a `src` has nothing to load and is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageConverter;

impl Converter for ImageConverter {
    fn convert(&self, element: &Element, _tag: &str) -> Result<()> {
        if element.attr("src").is_none_or(|src| src.trim().is_empty()) {
            element.remove();
            return Ok(());
        }

        let amp = element.rename("amp-img");
        apply_layout(&amp);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;

    #[test]
    fn converts_sized_image_to_responsive_amp_img() {
        let document = Document::parse(r#"<p><img src="cat.jpg" alt="Cat" width="600" height="400"></p>"#);
        let img = document.elements_by_tag_name("img").remove(0);
        ImageConverter.convert(&img, "img").unwrap();

        let p = document.elements_by_tag_name("p").remove(0);
        assert_eq!(
            p.inner_html().unwrap(),
            r#"<amp-img src="cat.jpg" alt="Cat" width="600" height="400" layout="responsive"></amp-img>"#
        );
    }

    #[test]
    fn unsized_image_fills_container() {
        let document = Document::parse(r#"<img src="cat.jpg">"#);
        let img = document.elements_by_tag_name("img").remove(0);
        ImageConverter.convert(&img, "img").unwrap();

        let amp = document.elements_by_tag_name("amp-img").remove(0);
        assert_eq!(amp.attr("layout").as_deref(), Some("fill"));
    }

    #[test]
    fn image_without_src_is_removed() {
        let document = Document::parse(r#"<p><img alt="nothing"><img src=" "></p>"#);
        for img in document.elements_by_tag_name("img") {
            ImageConverter.convert(&img, "img").unwrap();
        }
        assert!(document.elements_by_tag_name("img").is_empty());
        assert!(document.elements_by_tag_name("amp-img").is_empty());
    }
}
