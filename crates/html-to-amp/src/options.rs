//! Configuration options for HTML to AMP conversion.

use serde::{Deserialize, Serialize};

/// How the converted tree is turned back into a fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Serialize the whole document and strip the wrapper markup around the
    /// root's content textually.
    #[default]
    Sanitized,
    /// Serialize only the content of the `html` root, unwrapping `head` and `body`.
    Structural,
}

/// Main conversion options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Output rendering strategy.
    pub output_mode: OutputMode,

    /// Extra tag names removed together with the built-in prohibited set.
    ///
    /// The built-in set cannot be shrunk.
    pub additional_prohibited_tags: Vec<String>,
}

impl ConversionOptions {
    /// Set the output rendering strategy.
    #[must_use]
    pub fn with_output_mode(mut self, output_mode: OutputMode) -> Self {
        self.output_mode = output_mode;
        self
    }

    /// Add a tag name to the prohibited set.
    #[must_use]
    pub fn with_prohibited_tag(mut self, tag: impl Into<String>) -> Self {
        self.additional_prohibited_tags.push(tag.into());
        self
    }
}
