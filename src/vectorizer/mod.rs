pub mod corpus;
pub mod matrix;
pub mod serde;
pub mod term;
pub mod tfidf;
pub mod vocabulary;

use std::marker::PhantomData;

use num::Num;
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::config::{VectorMode, VectorizerConfig};
use crate::error::{Result, VectorizerError};
use crate::tokenizer::Tokenizer;
use crate::utils::math::vector::ZeroSpVec;
use crate::vectorizer::{
    matrix::{CorpusMatrix, MatrixKind},
    term::TermFrequency,
    tfidf::{DefaultTFIDFEngine, IDFVector, TFIDFEngine},
    vocabulary::Vocabulary,
};

/// Fitted vectorizer.
///
/// One immutable value holding the configuration, the frozen vocabulary with
/// its document-frequency table, and the IDF values derived from them.
/// Every transform and weight call borrows it read-only, so a single model
/// can be shared across threads.
///
/// `E` selects the TF-IDF formulas, `DefaultTFIDFEngine` by default.
#[derive(Debug, Clone, PartialEq)]
pub struct TextVectorizer<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    config: VectorizerConfig,
    vocabulary: Vocabulary,
    idf_cache: IDFVector,
    _marker: PhantomData<E>,
}

impl<E> TextVectorizer<E>
where
    E: TFIDFEngine,
{
    /// Fit on tokenized documents.
    ///
    /// # Errors
    /// - `InvalidConfig` if `config` does not validate
    /// - `EmptyCorpus` if `documents` is empty
    #[instrument(level = "debug", skip_all, fields(documents = documents.len()))]
    pub fn fit<D, T>(documents: &[D], config: VectorizerConfig) -> Result<Self>
    where
        D: AsRef<[T]> + Sync,
        T: AsRef<str> + Sync,
    {
        config.validate()?;
        let vocabulary = Vocabulary::fit(documents, config.min_document_frequency)?;
        Ok(Self::from_vocabulary(vocabulary, config))
    }

    /// Tokenize raw texts with `tokenizer`, then fit
    pub fn fit_texts<S, K>(texts: &[S], tokenizer: &K, config: VectorizerConfig) -> Result<Self>
    where
        S: AsRef<str> + Sync,
        K: Tokenizer,
    {
        let documents = tokenize_all(texts, tokenizer);
        Self::fit(&documents, config)
    }

    /// Fit, then transform the same documents
    pub fn fit_transform<D, T>(
        documents: &[D],
        config: VectorizerConfig,
    ) -> Result<(Self, CorpusMatrix<u32>)>
    where
        D: AsRef<[T]> + Sync,
        T: AsRef<str> + Sync,
    {
        let vectorizer = Self::fit(documents, config)?;
        let matrix = vectorizer.transform_many(documents);
        Ok((vectorizer, matrix))
    }

    /// Wrap an already frozen vocabulary
    pub fn from_vocabulary(vocabulary: Vocabulary, config: VectorizerConfig) -> Self {
        let idf_cache = E::idf_vec(&vocabulary, config.log_base);
        Self {
            config,
            vocabulary,
            idf_cache,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    #[inline]
    pub fn idf(&self) -> &IDFVector {
        &self.idf_cache
    }

    /// index -> token mapping
    #[inline]
    pub fn feature_names(&self) -> Vec<&str> {
        self.vocabulary.feature_names()
    }
}

/// Sparse vectorizer
impl<E> TextVectorizer<E>
where
    E: TFIDFEngine,
{
    /// Sparse vector of one document in the configured mode.
    /// Out-of-vocabulary tokens are dropped.
    #[inline]
    pub fn transform<T>(&self, document: &[T]) -> ZeroSpVec<u32>
    where
        T: AsRef<str>,
    {
        self.transform_with_mode(document, self.config.mode)
    }

    pub fn transform_with_mode<T>(&self, document: &[T], mode: VectorMode) -> ZeroSpVec<u32>
    where
        T: AsRef<str>,
    {
        let freq = TermFrequency::from(document);
        self.vocabulary.vectorize(&freq, mode)
    }

    /// Transform every document in parallel, rows keep input order
    pub fn transform_many<D, T>(&self, documents: &[D]) -> CorpusMatrix<u32>
    where
        D: AsRef<[T]> + Sync,
        T: AsRef<str> + Sync,
    {
        self.transform_many_with_mode(documents, self.config.mode)
    }

    #[instrument(level = "debug", skip_all, fields(documents = documents.len(), ?mode))]
    pub fn transform_many_with_mode<D, T>(&self, documents: &[D], mode: VectorMode) -> CorpusMatrix<u32>
    where
        D: AsRef<[T]> + Sync,
        T: AsRef<str> + Sync,
    {
        let rows: Vec<ZeroSpVec<u32>> = documents
            .par_iter()
            .map(|doc| self.transform_with_mode(doc.as_ref(), mode))
            .collect();
        CorpusMatrix::from_rows(rows, self.vocabulary.len(), MatrixKind::from(mode))
    }

    /// Tokens with a nonzero entry in `vector`, in index order
    ///
    /// # Errors
    /// `IndexOutOfRange` when `vector` does not come from this vocabulary
    pub fn inverse_transform<N>(&self, vector: &ZeroSpVec<N>) -> Result<Vec<&str>>
    where
        N: Num + Copy,
    {
        vector
            .indices()
            .map(|index| {
                self.vocabulary
                    .token(index)
                    .ok_or(VectorizerError::IndexOutOfRange {
                        index,
                        dim: self.vocabulary.len(),
                    })
            })
            .collect()
    }
}

/// Weighting engine
impl<E> TextVectorizer<E>
where
    E: TFIDFEngine,
{
    /// TF-IDF of a COUNT matrix.
    /// `doc_lengths[i]` is the token count of original document `i`.
    ///
    /// # Errors
    /// - `DegenerateDocument` for the lowest-indexed document of length 0
    /// - `ModeMismatch` if `matrix` is not a COUNT matrix
    /// - `DimensionMismatch` if `matrix` was built over another vocabulary
    /// - `LengthMismatch` if `doc_lengths` and `matrix` differ in rows
    /// - `InconsistentDocumentLength` if a length is below its row's count sum
    pub fn weight(&self, matrix: &CorpusMatrix<u32>, doc_lengths: &[u64]) -> Result<CorpusMatrix<f64>> {
        tfidf::weight::<E>(matrix, doc_lengths, &self.idf_cache)
    }

    /// Like `weight`, but one result per document so callers can skip
    /// degenerate rows instead of aborting.
    pub fn weight_each(
        &self,
        matrix: &CorpusMatrix<u32>,
        doc_lengths: &[u64],
    ) -> Result<Vec<Result<ZeroSpVec<f64>>>> {
        tfidf::weight_each::<E>(matrix, doc_lengths, &self.idf_cache)
    }

    /// TF-IDF vector of one tokenized document.
    ///
    /// # Errors
    /// `DegenerateDocument` when `document` is empty. Its `doc_index` is
    /// always 0 here, there being no batch to point into.
    pub fn weight_document<T>(&self, document: &[T]) -> Result<ZeroSpVec<f64>>
    where
        T: AsRef<str>,
    {
        let freq = TermFrequency::from(document);
        let counts = self.vocabulary.vectorize(&freq, VectorMode::Count);
        tfidf::weight_row::<E>(&counts, freq.term_sum(), &self.idf_cache, 0)
    }

    /// COUNT-transform `documents`, then weight them.
    /// Counts are used regardless of the configured mode.
    pub fn tfidf<D, T>(&self, documents: &[D]) -> Result<CorpusMatrix<f64>>
    where
        D: AsRef<[T]> + Sync,
        T: AsRef<str> + Sync,
    {
        let counts = self.transform_many_with_mode(documents, VectorMode::Count);
        let doc_lengths: Vec<u64> = documents.iter().map(|d| d.as_ref().len() as u64).collect();
        let weighted = self.weight(&counts, &doc_lengths)?;
        debug!(documents = documents.len(), nnz = weighted.nnz(), "computed tf-idf");
        Ok(weighted)
    }

    /// Tokenize raw texts with `tokenizer`, then `tfidf`
    pub fn tfidf_texts<S, K>(&self, texts: &[S], tokenizer: &K) -> Result<CorpusMatrix<f64>>
    where
        S: AsRef<str> + Sync,
        K: Tokenizer,
    {
        let documents = tokenize_all(texts, tokenizer);
        self.tfidf(&documents)
    }
}

fn tokenize_all<S, K>(texts: &[S], tokenizer: &K) -> Vec<Vec<String>>
where
    S: AsRef<str> + Sync,
    K: Tokenizer,
{
    texts
        .par_iter()
        .map(|text| tokenizer.tokenize(text.as_ref()))
        .collect()
}
