//! Error types for HTML to AMP conversion.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed error raised by a tag converter.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors that can occur while converting HTML to AMP.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The parsed tree has no root `html` element.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A registered converter failed. The whole conversion is aborted.
    #[error("converter for <{tag}> failed: {source}")]
    Converter {
        /// Tag the failing converter was dispatched for.
        tag: String,
        /// Error reported by the converter.
        #[source]
        source: BoxError,
    },

    /// Writing the converted tree back to markup failed.
    #[error("serialization failed: {0}")]
    Serialization(#[from] std::io::Error),
}

impl ConversionError {
    /// Build a [`ConversionError::Converter`] for the given tag.
    pub fn converter(tag: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Converter {
            tag: tag.into(),
            source: source.into(),
        }
    }
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConversionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_display() {
        let err = ConversionError::InvalidInput("no root html element".into());
        assert_eq!(err.to_string(), "invalid input: no root html element");
    }

    #[test]
    fn converter_error_keeps_source() {
        let err = ConversionError::converter("img", "missing src");
        assert_eq!(err.to_string(), "converter for <img> failed: missing src");
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("missing src"));
    }

    #[test]
    fn io_error_converts_to_serialization() {
        let err: ConversionError = std::io::Error::other("sink closed").into();
        assert!(matches!(err, ConversionError::Serialization(_)));
        assert_eq!(err.to_string(), "serialization failed: sink closed");
    }
}
