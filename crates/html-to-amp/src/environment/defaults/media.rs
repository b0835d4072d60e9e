//! `video` → `amp-video`, `audio` → `amp-audio`.

use crate::dom::Element;
use crate::environment::Converter;
use crate::error::Result;

use super::apply_layout;

/// Renames a media element to its AMP component.
///
/// `source` and `track` children come along unchanged.
#[derive(Debug, Clone, Copy)]
pub struct MediaConverter {
    target: &'static str,
    sized: bool,
}

impl MediaConverter {
    /// `video` → `amp-video`, with a layout.
    pub const fn video() -> Self {
        Self {
            target: "amp-video",
            sized: true,
        }
    }

    /// `audio` → `amp-audio`.
    pub const fn audio() -> Self {
        Self {
            target: "amp-audio",
            sized: false,
        }
    }
}

impl Converter for MediaConverter {
    fn convert(&self, element: &Element, _tag: &str) -> Result<()> {
        let amp = element.rename(self.target);
        if self.sized {
            apply_layout(&amp);
        }
        Ok(())
    }
}
