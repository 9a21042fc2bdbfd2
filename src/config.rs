use serde::{Deserialize, Serialize};

use crate::error::{Result, VectorizerError};

/// Output semantics of the sparse vectorizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum VectorMode {
    /// raw occurrence counts
    #[default]
    Count,
    /// 1 for every present token regardless of how often it occurs
    Binary,
}

/// Logarithm base used for IDF.
/// Base choice scales every weight by the same constant, so rankings are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum LogBase {
    #[default]
    Natural,
    Base2,
    Base10,
    Custom(f64),
}

impl LogBase {
    /// `ln` of the base, used as the divisor to change base
    #[inline]
    pub fn ln_base(&self) -> f64 {
        match self {
            LogBase::Natural => 1.0,
            LogBase::Base2 => std::f64::consts::LN_2,
            LogBase::Base10 => std::f64::consts::LN_10,
            LogBase::Custom(base) => base.ln(),
        }
    }

    /// log of `x` in this base
    #[inline]
    pub fn log(&self, x: f64) -> f64 {
        match self {
            LogBase::Natural => x.ln(),
            LogBase::Base2 => x.log2(),
            LogBase::Base10 => x.log10(),
            LogBase::Custom(_) => x.ln() / self.ln_base(),
        }
    }

    fn validate(&self) -> Result<()> {
        if let LogBase::Custom(base) = *self {
            if !base.is_finite() || base <= 0.0 || base == 1.0 {
                return Err(VectorizerError::InvalidConfig {
                    param: "log_base",
                    value: base.to_string(),
                    constraint: "must be a finite positive number other than 1",
                });
            }
        }
        Ok(())
    }
}

/// Configuration of a vectorizer.
///
/// These three keys are the whole configuration surface:
/// - `mode`: COUNT or BINARY output of `transform`
/// - `min_document_frequency`: tokens seen in fewer documents are left out of the vocabulary
/// - `log_base`: base of the IDF logarithm
///
/// # Examples
/// ```
/// use sparse_text_vectorizer::{VectorizerConfig, VectorMode, LogBase};
/// let config = VectorizerConfig::new()
///     .with_mode(VectorMode::Binary)
///     .with_min_document_frequency(2)
///     .with_log_base(LogBase::Base10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    pub mode: VectorMode,
    pub min_document_frequency: u64,
    pub log_base: LogBase,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            mode: VectorMode::Count,
            min_document_frequency: 1,
            log_base: LogBase::Natural,
        }
    }
}

impl VectorizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: VectorMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_min_document_frequency(mut self, min_df: u64) -> Self {
        self.min_document_frequency = min_df;
        self
    }

    pub fn with_log_base(mut self, log_base: LogBase) -> Self {
        self.log_base = log_base;
        self
    }

    /// Check every value against its constraint
    pub fn validate(&self) -> Result<()> {
        if self.min_document_frequency == 0 {
            return Err(VectorizerError::InvalidConfig {
                param: "min_document_frequency",
                value: self.min_document_frequency.to_string(),
                constraint: "must be >= 1",
            });
        }
        self.log_base.validate()
    }
}
