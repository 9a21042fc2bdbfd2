use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::LogBase;
use crate::error::{Result, VectorizerError};
use crate::utils::math::vector::ZeroSpVec;
use crate::vectorizer::matrix::{CorpusMatrix, MatrixKind};
use crate::vectorizer::vocabulary::Vocabulary;

/// TF-IDF calculation strategy.
///
/// `TextVectorizer<E>` is generic over this trait so that variants of the
/// formulas can be plugged in without touching the vectorizer.
pub trait TFIDFEngine: Send + Sync {
    /// Term frequency of one (document, index) pair
    /// # Arguments
    /// * `count` - occurrences of the token in the document
    /// * `doc_len` - tokens in the original document, never 0
    fn tf(count: u32, doc_len: u64) -> f64;

    /// Inverse document frequency of one index
    /// # Arguments
    /// * `df` - documents containing the token, `1..=doc_num`
    /// * `doc_num` - documents in the fitted corpus
    /// * `log_base` - base of the logarithm
    fn idf(df: u64, doc_num: u64, log_base: LogBase) -> f64;

    /// IDF of every vocabulary index
    fn idf_vec(vocab: &Vocabulary, log_base: LogBase) -> IDFVector {
        let doc_num = vocab.doc_num();
        IDFVector {
            idf_vec: vocab
                .df_table()
                .iter()
                .map(|&df| Self::idf(df, doc_num, log_base))
                .collect(),
            doc_num,
        }
    }
}

/// Textbook TF-IDF without smoothing
/// - TF  = count / doc_len
/// - IDF = log(N / df)
///
/// A token present in every document gets IDF 0 and disappears from the
/// weighted vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultTFIDFEngine;

impl TFIDFEngine for DefaultTFIDFEngine {
    #[inline]
    fn tf(count: u32, doc_len: u64) -> f64 {
        count as f64 / doc_len as f64
    }

    #[inline]
    fn idf(df: u64, doc_num: u64, log_base: LogBase) -> f64 {
        log_base.log(doc_num as f64 / df as f64)
    }
}

/// Smoothed IDF, as if one extra document contained every token
/// - TF  = count / doc_len
/// - IDF = log((1 + N) / (1 + df)) + 1
///
/// IDF is always positive, so no nonzero count is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SmoothIdfEngine;

impl TFIDFEngine for SmoothIdfEngine {
    #[inline]
    fn tf(count: u32, doc_len: u64) -> f64 {
        count as f64 / doc_len as f64
    }

    #[inline]
    fn idf(df: u64, doc_num: u64, log_base: LogBase) -> f64 {
        log_base.log((1.0 + doc_num as f64) / (1.0 + df as f64)) + 1.0
    }
}

/// IDF per vocabulary index, dense because every index has one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IDFVector {
    pub idf_vec: Vec<f64>,
    /// document count the values were computed from
    pub doc_num: u64,
}

impl IDFVector {
    #[inline]
    pub fn len(&self) -> usize {
        self.idf_vec.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idf_vec.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.idf_vec.get(index).copied()
    }
}

/// Weight one COUNT row.
/// `doc_len` is the token count of the original document, pruned and
/// out-of-vocabulary tokens included.
///
/// # Errors
/// - `DegenerateDocument` when `doc_len` is 0
/// - `DimensionMismatch` when the row was built over another vocabulary size
/// - `InconsistentDocumentLength` when `doc_len` is below the row's count sum
/// - `IndexOutOfRange` when the row references an index without IDF
pub fn weight_row<E>(
    counts: &ZeroSpVec<u32>,
    doc_len: u64,
    idf: &IDFVector,
    doc_index: usize,
) -> Result<ZeroSpVec<f64>>
where
    E: TFIDFEngine,
{
    if doc_len == 0 {
        return Err(VectorizerError::DegenerateDocument { doc_index });
    }
    if counts.len() != idf.len() {
        return Err(VectorizerError::DimensionMismatch {
            expected: idf.len(),
            actual: counts.len(),
        });
    }
    let counted: u64 = counts.iter().map(|(_, count)| u64::from(count)).sum();
    if counted > doc_len {
        return Err(VectorizerError::InconsistentDocumentLength {
            doc_index,
            doc_len,
            counted,
        });
    }
    let mut out = ZeroSpVec::with_capacity(counts.len(), counts.nnz());
    for (index, count) in counts.iter() {
        let idf_val = idf.get(index).ok_or(VectorizerError::IndexOutOfRange {
            index,
            dim: idf.len(),
        })?;
        // zero products are skipped by raw_push
        out.raw_push(index, E::tf(count, doc_len) * idf_val);
    }
    Ok(out)
}

fn check_inputs(matrix: &CorpusMatrix<u32>, doc_lengths: &[u64], idf: &IDFVector) -> Result<()> {
    if matrix.kind() != MatrixKind::Count {
        return Err(VectorizerError::ModeMismatch {
            expected: MatrixKind::Count,
            actual: matrix.kind(),
        });
    }
    if matrix.dim() != idf.len() {
        return Err(VectorizerError::DimensionMismatch {
            expected: idf.len(),
            actual: matrix.dim(),
        });
    }
    if doc_lengths.len() != matrix.len() {
        return Err(VectorizerError::LengthMismatch {
            expected: matrix.len(),
            actual: doc_lengths.len(),
        });
    }
    Ok(())
}

/// Weight every row independently, keeping one result per document.
/// The outer error covers inputs that do not line up at all.
pub fn weight_each<E>(
    matrix: &CorpusMatrix<u32>,
    doc_lengths: &[u64],
    idf: &IDFVector,
) -> Result<Vec<Result<ZeroSpVec<f64>>>>
where
    E: TFIDFEngine,
{
    check_inputs(matrix, doc_lengths, idf)?;
    Ok(matrix
        .rows()
        .par_iter()
        .zip(doc_lengths.par_iter())
        .enumerate()
        .map(|(doc_index, (row, &doc_len))| weight_row::<E>(row, doc_len, idf, doc_index))
        .collect())
}

/// Weight a whole COUNT matrix.
/// Either every row is returned, or the error of the lowest failing document.
#[instrument(level = "debug", skip_all, fields(rows = matrix.len(), dim = matrix.dim()))]
pub fn weight<E>(
    matrix: &CorpusMatrix<u32>,
    doc_lengths: &[u64],
    idf: &IDFVector,
) -> Result<CorpusMatrix<f64>>
where
    E: TFIDFEngine,
{
    let rows = weight_each::<E>(matrix, doc_lengths, idf)?
        .into_iter()
        .collect::<Result<Vec<_>>>()?;
    let weighted = CorpusMatrix::from_rows(rows, matrix.dim(), MatrixKind::Weighted);
    debug!(nnz_in = matrix.nnz(), nnz_out = weighted.nnz(), "weighted corpus matrix");
    Ok(weighted)
}
