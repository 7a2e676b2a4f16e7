//! Error types with diagnostics using miette
//!
//! Only configuration problems are errors. Missing resources (an image that
//! has not finished decoding, a failed load) degrade to a plain fill and are
//! logged instead.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::NumericError;

/// Errors raised while turning user-facing options into a [`TokenConfig`].
///
/// Each variant carries the offending value so the caller can point at it.
///
/// [`TokenConfig`]: crate::config::TokenConfig
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum TokenError {
    #[error("did not understand shape key '{value}'")]
    #[diagnostic(
        code(tokenmint::config::unknown_shape),
        help("expected one of: square, circle")
    )]
    UnknownShape { value: String },

    #[error("did not recognize size '{value}'")]
    #[diagnostic(
        code(tokenmint::config::unknown_size),
        help("expected one of: extra_small, small, medium, print, huge, custom")
    )]
    UnknownSize { value: String },

    #[error("did not recognize background '{value}'")]
    #[diagnostic(
        code(tokenmint::config::unknown_background),
        help("expected one of: image, custom, white, red, green, blue")
    )]
    UnknownBackground { value: String },

    #[error("did not recognize stretch style '{value}'")]
    #[diagnostic(
        code(tokenmint::config::unknown_stretch),
        help("expected one of: fit, fill, or empty for image-aspect sizing")
    )]
    UnknownStretchStyle { value: String },

    #[error("invalid custom {axis}: {source}")]
    #[diagnostic(
        code(tokenmint::config::invalid_dimension),
        help("custom sizes are clamped to 1..=384 but must be finite numbers")
    )]
    InvalidDimension {
        axis: &'static str,
        #[source]
        source: NumericError,
    },
}

impl TokenError {
    /// The user-supplied value that was rejected, if it was a string option
    pub fn offending_value(&self) -> Option<&str> {
        match self {
            TokenError::UnknownShape { value }
            | TokenError::UnknownSize { value }
            | TokenError::UnknownBackground { value }
            | TokenError::UnknownStretchStyle { value } => Some(value),
            TokenError::InvalidDimension { .. } => None,
        }
    }
}
