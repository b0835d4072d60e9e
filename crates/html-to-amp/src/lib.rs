//! Convert arbitrary HTML into AMP HTML fragments.
//!
//! The input is parsed with html5ever, every element is handed to the
//! converters registered for its tag (children before parents), elements that
//! are never valid in AMP are deleted, and the tree is rendered back without
//! the `html`/`head`/`body` wrapper the parser adds.
//!
//! ```
//! use html_to_amp::{ConversionOptions, convert_html};
//!
//! let amp = convert_html(r#"<script>alert(1)</script><p><img src="a.png" width="4" height="3"></p>"#, &ConversionOptions::default()).unwrap();
//! assert_eq!(amp, r#"<p><amp-img src="a.png" width="4" height="3" layout="responsive"></amp-img></p>"#);
//! ```
//!
//! Custom rewrites are registered on an [`Environment`]:
//!
//! ```
//! use html_to_amp::{AmpConverter, Element, Environment, Result};
//!
//! let mut environment = Environment::default_environment();
//! environment.add_converter("font", |element: &Element, _tag: &str| -> Result<()> {
//!     element.rename("span");
//!     Ok(())
//! });
//!
//! let converter = AmpConverter::with_environment(environment);
//! assert_eq!(converter.convert("<font>hi</font>").unwrap(), "<span>hi</span>");
//! ```

pub mod converter;
pub mod dom;
pub mod environment;
pub mod error;
pub mod options;

pub use converter::{AmpConverter, FilterReport, ProhibitedElementFilter, convert_html, sanitize};
pub use dom::{Document, Element};
pub use environment::{Converter, Environment};
pub use error::{ConversionError, Result};
pub use options::{ConversionOptions, OutputMode};
