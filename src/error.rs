use crate::vectorizer::matrix::MatrixKind;

/// Errors raised while fitting, transforming or weighting documents.
///
/// Out-of-vocabulary tokens are never an error; they are dropped during
/// transform and only reported through `tracing`.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum VectorizerError {
    /// Fitting was invoked with zero documents.
    /// No vocabulary is produced.
    #[error("cannot fit on an empty corpus")]
    EmptyCorpus,

    /// Weighting requested for a document with zero original tokens.
    /// TF is undefined for such a document.
    #[error("document {doc_index} has no tokens, term frequency is undefined")]
    DegenerateDocument { doc_index: usize },

    /// An index outside `[0, dim)` was referenced.
    /// This means a vector and a vocabulary that do not belong together were paired.
    #[error("index {index} out of range for dimension {dim}")]
    IndexOutOfRange { index: usize, dim: usize },

    /// A vector or matrix was built over a vocabulary of another size.
    /// Like `IndexOutOfRange`, this means a vocabulary/vectorizer pairing defect.
    #[error("dimension mismatch: vocabulary has {expected} entries, input has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The original length given for a document is smaller than the
    /// vocabulary-matched tokens counted in its row.
    #[error("document {doc_index} has length {doc_len} but {counted} tokens were counted")]
    InconsistentDocumentLength {
        doc_index: usize,
        doc_len: u64,
        counted: u64,
    },

    /// Rejected configuration value.
    #[error("invalid configuration `{param}` = {value}: {constraint}")]
    InvalidConfig {
        param: &'static str,
        value: String,
        constraint: &'static str,
    },

    /// Two inputs that must line up row for row have different lengths.
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A matrix produced in one mode was handed to an operation expecting another.
    #[error("expected a {expected:?} matrix, got {actual:?}")]
    ModeMismatch {
        expected: MatrixKind,
        actual: MatrixKind,
    },
}

pub type Result<T> = std::result::Result<T, VectorizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = VectorizerError::DegenerateDocument { doc_index: 4 };
        assert!(err.to_string().contains("document 4"));

        let err = VectorizerError::IndexOutOfRange { index: 12, dim: 10 };
        assert_eq!(err.to_string(), "index 12 out of range for dimension 10");

        let err = VectorizerError::DimensionMismatch { expected: 5, actual: 2 };
        assert_eq!(
            err.to_string(),
            "dimension mismatch: vocabulary has 5 entries, input has 2"
        );
    }
}
