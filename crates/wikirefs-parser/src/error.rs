//! Pipeline construction errors
//!
//! Rendering never fails: unresolvable references and failed embeds degrade
//! to visible markers in the HTML. Only building a pipeline can error.

use thiserror::Error;
use wikirefs_config::ConfigError;

/// Errors raised while assembling a [`crate::WikiRefs`] pipeline
#[derive(Debug, Error)]
pub enum WikiRefsError {
    /// The supplied configuration failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No [`crate::ReferenceResolver`] was provided
    #[error("A reference resolver is required to render wiki references")]
    MissingResolver,
}

/// Specialized Result type for pipeline construction
pub type WikiRefsResult<T> = Result<T, WikiRefsError>;
