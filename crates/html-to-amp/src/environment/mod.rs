//! Tag-keyed converter registry.
//!
//! An [`Environment`] maps tag names to an ordered list of [`Converter`]s. The
//! walker calls [`Environment::dispatch`] once per visited element and every
//! converter registered for that tag runs, in registration order, against the
//! same element. There is no short-circuit: later converters see whatever the
//! earlier ones left in the tree.

mod defaults;

pub use defaults::{ImageConverter, IframeConverter, InstagramConverter, MediaConverter, TwitterConverter};

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::dom::Element;
use crate::error::Result;

/// Rewrites a single element into its AMP form.
///
/// Converters may mutate, replace, wrap or remove the element and its
/// subtree. Returning an error aborts the whole conversion.
pub trait Converter: Send + Sync {
    /// Convert `element`, which was dispatched under `tag`.
    fn convert(&self, element: &Element, tag: &str) -> Result<()>;
}

impl<F> Converter for F
where
    F: Fn(&Element, &str) -> Result<()> + Send + Sync,
{
    fn convert(&self, element: &Element, tag: &str) -> Result<()> {
        self(element, tag)
    }
}

/// Registry of converters keyed by lowercase tag name.
#[derive(Clone, Default)]
pub struct Environment {
    converters: HashMap<String, Vec<Arc<dyn Converter>>>,
}

impl Environment {
    /// An environment with no converters.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in converter set: images, iframes, audio/video and
    /// Twitter/Instagram embeds.
    pub fn default_environment() -> Self {
        let mut environment = Self::new();
        environment
            .add_converter("img", ImageConverter)
            .add_converter("iframe", IframeConverter)
            .add_converter("video", MediaConverter::video())
            .add_converter("audio", MediaConverter::audio())
            .add_converter("blockquote", TwitterConverter)
            .add_converter("blockquote", InstagramConverter);
        environment
    }

    /// Append a converter for `tag`.
    pub fn add_converter<C>(&mut self, tag: &str, converter: C) -> &mut Self
    where
        C: Converter + 'static,
    {
        self.add_shared_converter(tag, Arc::new(converter))
    }

    /// Append an already shared converter for `tag`.
    pub fn add_shared_converter(&mut self, tag: &str, converter: Arc<dyn Converter>) -> &mut Self {
        self.converters
            .entry(tag.to_ascii_lowercase())
            .or_default()
            .push(converter);
        self
    }

    /// Converters registered for `tag`, in registration order.
    pub fn converters_for(&self, tag: &str) -> &[Arc<dyn Converter>] {
        self.converters
            .get(normalize_tag(tag).as_ref())
            .map_or(&[][..], Vec::as_slice)
    }

    /// Whether any converter is registered for `tag`.
    pub fn has_converters(&self, tag: &str) -> bool {
        !self.converters_for(tag).is_empty()
    }

    /// Tags with at least one converter, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.converters.keys().map(String::as_str)
    }

    /// Run every converter registered for `tag` against `element`.
    ///
    /// Unregistered tags are a no-op. The first converter error is returned
    /// unchanged and the remaining converters are skipped.
    pub fn dispatch(&self, tag: &str, element: &Element) -> Result<()> {
        let converters = self.converters_for(tag);
        if converters.is_empty() {
            return Ok(());
        }

        tracing::trace!(tag, converters = converters.len(), "dispatching element");
        for converter in converters {
            converter.convert(element, tag)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<(&str, usize)> = self
            .converters
            .iter()
            .map(|(tag, converters)| (tag.as_str(), converters.len()))
            .collect();
        tags.sort_unstable();
        f.debug_struct("Environment").field("converters", &tags).finish()
    }
}

fn normalize_tag(tag: &str) -> Cow<'_, str> {
    if tag.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(tag.to_ascii_lowercase())
    } else {
        Cow::Borrowed(tag)
    }
}
