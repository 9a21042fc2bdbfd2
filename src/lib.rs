//! This crate turns tokenized documents into vocabulary-indexed sparse vectors:
//! raw counts, binary presence, or TF-IDF weights.

pub mod config;
pub mod error;
pub mod tokenizer;
pub mod utils;
pub mod vectorizer;

/// Fitted Text Vectorizer
/// The top-level struct of this crate.
/// It is an immutable value object produced by one fitting pass and holds:
/// - The configuration it was fitted with
/// - The frozen vocabulary (token <-> index, code point order)
/// - The document-frequency table and document count
/// - An IDF vector cache
///
/// `TextVectorizer<E>` is generic over the TF-IDF engine `E`
/// (`DefaultTFIDFEngine` unless chosen otherwise).
///
/// Transform and weight calls only read the model, so one instance can be
/// shared between threads.
///
/// # Serialization
/// Supported. Only the configuration and the vocabulary are written;
/// the IDF cache is rebuilt on load.
pub use vectorizer::TextVectorizer;

/// Serializable form of `TextVectorizer` without the IDF cache.
/// Convert with `into_text_vectorizer::<E>()`, which lets the engine be
/// chosen at load time.
pub use vectorizer::serde::TextVectorizerData;

/// Frozen vocabulary with its document-frequency table.
/// Built once by `Vocabulary::fit` and never mutated afterwards.
pub use vectorizer::vocabulary::Vocabulary;

/// Thread-safe document-frequency accumulator used while fitting.
/// `freeze` turns it into a `Vocabulary`.
pub use vectorizer::corpus::Corpus;

/// Per-document token counts and original document length.
pub use vectorizer::term::TermFrequency;

/// Ordered per-document sparse rows sharing one vocabulary.
pub use vectorizer::matrix::{CorpusMatrix, MatrixKind};

/// TF-IDF calculation engines
/// - `DefaultTFIDFEngine`: TF = count / doc_len, IDF = log(N / df)
/// - `SmoothIdfEngine`: same TF, IDF = log((1 + N) / (1 + df)) + 1
///
/// Implement `TFIDFEngine` to plug in another formula.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, IDFVector, SmoothIdfEngine, TFIDFEngine};

/// Sparse vector with sorted indices and no stored zeros.
pub use utils::math::vector::ZeroSpVec;

pub use config::{LogBase, VectorMode, VectorizerConfig};
pub use error::{Result, VectorizerError};
pub use tokenizer::{SimpleTokenizer, Tokenizer};
