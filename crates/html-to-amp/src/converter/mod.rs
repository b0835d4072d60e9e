//! HTML to AMP conversion pipeline.
//!
//! Parse → post-order walk with converter dispatch → prohibited-element
//! filter → serialize and sanitize.

pub mod filter;
mod main;
pub mod serialization;
mod walker;

pub use filter::{FilterReport, PROHIBITED_TAGS, ProhibitedElementFilter, is_unsafe_link};
pub use main::{AmpConverter, convert_html};
pub use serialization::sanitize;
