//! `iframe` → `amp-youtube` / `amp-iframe`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::Element;
use crate::environment::Converter;
use crate::error::Result;

use super::{apply_layout, copy_dimensions};

static YOUTUBE_EMBED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:youtube(?:-nocookie)?\.com/(?:embed/|v/|watch\?v=)|youtu\.be/)([A-Za-z0-9_-]{11})")
        .expect("valid YouTube embed pattern")
});

const DEFAULT_SANDBOX: &str = "allow-scripts allow-same-origin";
const YOUTUBE_SIZE: (u32, u32) = (480, 270);

/// Rewrites `iframe` embeds.
///
/// YouTube players become `amp-youtube` keyed by video id. Anything else
/// becomes `amp-iframe` with a default `sandbox` unless one is given. An
/// iframe without a `src` is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct IframeConverter;

impl Converter for IframeConverter {
    fn convert(&self, element: &Element, _tag: &str) -> Result<()> {
        let Some(src) = element.attr("src").filter(|src| !src.trim().is_empty()) else {
            element.remove();
            return Ok(());
        };

        if let Some(video_id) = YOUTUBE_EMBED.captures(&src).and_then(|caps| caps.get(1)) {
            let youtube = Element::new("amp-youtube");
            youtube.set_attr("data-videoid", video_id.as_str());
            copy_dimensions(element, &youtube, YOUTUBE_SIZE);
            youtube.set_attr("layout", "responsive");
            element.replace_with(&youtube);
            return Ok(());
        }

        let amp = element.rename("amp-iframe");
        if !amp.has_attr("sandbox") {
            amp.set_attr("sandbox", DEFAULT_SANDBOX);
        }
        apply_layout(&amp);
        Ok(())
    }
}
