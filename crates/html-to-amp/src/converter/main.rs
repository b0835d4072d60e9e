//! Main conversion pipeline for HTML to AMP.

use crate::converter::filter::ProhibitedElementFilter;
use crate::converter::serialization::render;
use crate::converter::walker::walk;
use crate::dom::Document;
use crate::environment::Environment;
use crate::error::{ConversionError, Result};
use crate::options::ConversionOptions;

/// Converts HTML into AMP HTML fragments.
///
/// Holds an immutable converter [`Environment`] and options. A single
/// converter can be shared by concurrent [`convert`](Self::convert) calls.
#[derive(Debug, Clone)]
pub struct AmpConverter {
    environment: Environment,
    options: ConversionOptions,
    filter: ProhibitedElementFilter,
}

impl Default for AmpConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl AmpConverter {
    /// Converter using [`Environment::default_environment`].
    pub fn new() -> Self {
        Self::with_environment(Environment::default_environment())
    }

    /// Converter using a caller-supplied environment.
    pub fn with_environment(environment: Environment) -> Self {
        Self {
            environment,
            options: ConversionOptions::default(),
            filter: ProhibitedElementFilter::new(),
        }
    }

    /// Replace the conversion options.
    #[must_use]
    pub fn with_options(mut self, options: ConversionOptions) -> Self {
        self.filter = ProhibitedElementFilter::new().with_additional_tags(&options.additional_prohibited_tags);
        self.options = options;
        self
    }

    /// The converter registry in use.
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// The options in use.
    pub const fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Convert an HTML fragment or document into an AMP fragment.
    ///
    /// Blank input returns an empty string without parsing.
    ///
    /// # Errors
    ///
    /// [`ConversionError::InvalidInput`] when parsing yields no `html` root,
    /// or the first error raised by a converter.
    pub fn convert(&self, html: &str) -> Result<String> {
        if is_blank(html) {
            tracing::debug!("blank input, skipping conversion");
            return Ok(String::new());
        }

        self.convert_document(&Document::parse(html))
    }

    /// Convert an already parsed document in place and render it.
    ///
    /// # Errors
    ///
    /// Same as [`convert`](Self::convert).
    pub fn convert_document(&self, document: &Document) -> Result<String> {
        let root = document
            .root()
            .ok_or_else(|| ConversionError::InvalidInput("Invalid HTML was provided".to_string()))?;

        let dispatched = walk(&root, &self.environment)?;
        let report = self.filter.apply(document);
        let html = render(document, self.options.output_mode)?;

        tracing::debug!(
            dispatched,
            removed_elements = report.removed_elements,
            removed_links = report.removed_links,
            output_len = html.len(),
            "converted document to AMP"
        );
        Ok(html)
    }
}

/// Converts HTML to AMP with the default converters and the given options.
///
/// # Errors
///
/// See [`AmpConverter::convert`].
pub fn convert_html(html: &str, options: &ConversionOptions) -> Result<String> {
    AmpConverter::new().with_options(options.clone()).convert(html)
}

fn is_blank(html: &str) -> bool {
    html.chars().all(|c| c.is_ascii_whitespace() || matches!(c, '\0' | '\x0B'))
}
