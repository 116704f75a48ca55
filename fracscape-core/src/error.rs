//! Error taxonomy shared by the whole pipeline.

use crate::params::ParamField;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum VizError {
    /// A raw control value could not be coerced into its field's type.
    #[error("Invalid {field} value {value:?}")]
    InvalidInput { field: ParamField, value: String },

    /// The generator could not produce a point set.
    #[error("Generation failed: {0}")]
    GenerationFailure(String),

    /// Drawing onto the surface failed.
    #[error("Render failed: {0}")]
    RenderFailure(String),
}

impl VizError {
    pub fn invalid_input(field: ParamField, value: impl ToString) -> Self {
        VizError::InvalidInput {
            field,
            value: value.to_string(),
        }
    }
}
