//! Error types for the generator capability seam
//!
//! Errors never cross the [`crate::Synthesizer::create`] boundary: every
//! failure inside a construction degrades the affected subtree to its
//! default value. [`GeneratorError`] exists so generator implementations
//! can report *why* they failed, which the engine logs before degrading.

/// Error produced by a value generator
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Generation failed for an implementation-specific reason
    #[error("generation failed: {0}")]
    Failed(String),

    /// The requested value could not be produced within the generator's
    /// configured bounds
    #[error("value out of range: {0}")]
    OutOfRange(String),

    /// The generator cannot produce the requested output shape
    /// (e.g. a sequence from a single-value source)
    #[error("unsupported output: {0}")]
    Unsupported(&'static str),
}

impl GeneratorError {
    /// Create a generic failure error
    #[inline]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_display() {
        let err = GeneratorError::failed("rng exhausted");
        assert!(err.to_string().contains("generation failed"));
        assert!(err.to_string().contains("rng exhausted"));
    }

    #[test]
    fn out_of_range_display() {
        let err = GeneratorError::OutOfRange("scale 99".to_string());
        assert!(err.to_string().contains("out of range"));
    }
}
