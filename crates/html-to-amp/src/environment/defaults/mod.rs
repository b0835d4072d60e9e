//! Built-in converters used by [`Environment::default_environment`](super::Environment::default_environment).

mod iframe;
mod image;
mod media;
mod social;

pub use iframe::IframeConverter;
pub use image::ImageConverter;
pub use media::MediaConverter;
pub use social::{InstagramConverter, TwitterConverter};

use crate::dom::Element;

/// Pick an AMP layout for a sized component.
///
/// An explicit `layout` wins. Numeric `width` and `height` make the component
/// responsive, anything else fills its container.
pub(crate) fn apply_layout(element: &Element) {
    if element.has_attr("layout") {
        return;
    }
    let layout = if has_dimensions(element) { "responsive" } else { "fill" };
    element.set_attr("layout", layout);
}

fn has_dimensions(element: &Element) -> bool {
    ["width", "height"].iter().all(|name| {
        element
            .attr(name)
            .and_then(|value| value.trim().parse::<u32>().ok())
            .is_some()
    })
}

/// Copy `width` and `height` from `from`, falling back to the given size.
pub(crate) fn copy_dimensions(from: &Element, to: &Element, fallback: (u32, u32)) {
    if has_dimensions(from) {
        for name in ["width", "height"] {
            if let Some(value) = from.attr(name) {
                to.set_attr(name, value.trim());
            }
        }
    } else {
        to.set_attr("width", &fallback.0.to_string());
        to.set_attr("height", &fallback.1.to_string());
    }
}
