use ahash::RandomState;
use indexmap::IndexSet;
use serde::de::Error as DeError;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, trace, warn};

use crate::config::VectorMode;
use crate::error::{Result, VectorizerError};
use crate::utils::math::vector::ZeroSpVec;
use crate::vectorizer::{corpus::Corpus, term::TermFrequency};

/// Frozen vocabulary: a bijection between the distinct tokens seen while
/// fitting and the dense index range `[0, V)`, plus the document-frequency
/// table keyed by the same indices.
///
/// Index 0 is the smallest token in code point order, index 1 the next, and
/// so on, so the same corpus always yields the same vocabulary.
/// Nothing mutates a `Vocabulary` once built.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// index <-> token
    tokens: IndexSet<Box<str>, RandomState>,
    /// document frequency per index
    doc_freq: Vec<u64>,
    /// number of documents of the fitted corpus
    doc_num: u64,
}

impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.doc_num == other.doc_num
            && self.doc_freq == other.doc_freq
            && self.tokens.iter().eq(other.tokens.iter())
    }
}

impl Vocabulary {
    /// Build the vocabulary and document-frequency table in one pass over
    /// `documents`. Tokens with document frequency below `min_df` are
    /// excluded, shrinking `V`.
    ///
    /// # Errors
    /// `EmptyCorpus` when `documents` is empty. Empty documents are fine.
    pub fn fit<D, T>(documents: &[D], min_df: u64) -> Result<Self>
    where
        D: AsRef<[T]> + Sync,
        T: AsRef<str> + Sync,
    {
        if documents.is_empty() {
            return Err(VectorizerError::EmptyCorpus);
        }
        let corpus = Corpus::from_documents(documents);
        let raw_size = corpus.vocab_size();
        let vocab = corpus.freeze(min_df);
        debug!(
            documents = documents.len(),
            raw_vocab_size = raw_size,
            vocab_size = vocab.len(),
            min_df,
            "fitted vocabulary"
        );
        if vocab.is_empty() {
            warn!(documents = documents.len(), min_df, "fitted vocabulary is empty");
        }
        Ok(vocab)
    }

    /// `terms` must already be in strictly ascending code point order
    pub(crate) fn from_sorted_terms(doc_num: u64, terms: Vec<(Box<str>, u64)>) -> Self {
        let mut tokens = IndexSet::with_capacity_and_hasher(terms.len(), RandomState::new());
        let mut doc_freq = Vec::with_capacity(terms.len());
        for (token, df) in terms {
            tokens.insert(token);
            doc_freq.push(df);
        }
        Self {
            tokens,
            doc_freq,
            doc_num,
        }
    }

    /// Vocabulary size `V`
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of documents `N` in the fitted corpus
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Index of `token`, `None` if it is out of vocabulary
    #[inline]
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.tokens.get_index_of(token)
    }

    /// Token at `index`
    #[inline]
    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get_index(index).map(|t| &**t)
    }

    /// Document frequency at `index`
    #[inline]
    pub fn df(&self, index: usize) -> Option<u64> {
        self.doc_freq.get(index).copied()
    }

    /// Document-frequency table, position `i` belongs to index `i`
    #[inline]
    pub fn df_table(&self) -> &[u64] {
        &self.doc_freq
    }

    /// `(index, token, df)` in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, u64)> {
        self.tokens
            .iter()
            .zip(self.doc_freq.iter())
            .enumerate()
            .map(|(i, (t, &df))| (i, &**t, df))
    }

    /// index -> token mapping as a list
    pub fn feature_names(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| &**t).collect()
    }

    /// Sparse vector of `freq` against this vocabulary.
    /// Out-of-vocabulary terms are dropped. In `Binary` mode every present
    /// index holds 1.
    pub fn vectorize(&self, freq: &TermFrequency, mode: VectorMode) -> ZeroSpVec<u32> {
        let mut entries: Vec<(usize, u32)> = Vec::with_capacity(freq.term_num());
        let mut oov: u64 = 0;
        for (term, count) in freq.iter() {
            match self.index_of(term) {
                Some(index) => entries.push((index, count)),
                None => oov += count as u64,
            }
        }
        if oov > 0 {
            trace!(oov_tokens = oov, total_tokens = freq.term_sum(), "dropped out-of-vocabulary tokens");
        }
        entries.sort_unstable_by_key(|(index, _)| *index);

        let mut vec = ZeroSpVec::with_capacity(self.len(), entries.len());
        for (index, count) in entries {
            let value = match mode {
                VectorMode::Count => count,
                VectorMode::Binary => 1,
            };
            vec.raw_push(index, value);
        }
        vec
    }
}

impl Serialize for Vocabulary {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Vocabulary", 3)?;
        state.serialize_field("tokens", &self.feature_names())?;
        state.serialize_field("doc_freq", &self.doc_freq)?;
        state.serialize_field("doc_num", &self.doc_num)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Vocabulary {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct VocabularyData {
            tokens: Vec<Box<str>>,
            doc_freq: Vec<u64>,
            doc_num: u64,
        }

        let data = VocabularyData::deserialize(deserializer)?;
        if data.tokens.len() != data.doc_freq.len() {
            return Err(D::Error::custom(format!(
                "tokens and doc_freq length mismatch: {} != {}",
                data.tokens.len(),
                data.doc_freq.len()
            )));
        }
        if data.tokens.windows(2).any(|w| w[0] >= w[1]) {
            return Err(D::Error::custom("tokens must be unique and in code point order"));
        }
        if let Some(df) = data.doc_freq.iter().find(|&&df| df == 0 || df > data.doc_num) {
            return Err(D::Error::custom(format!(
                "document frequency {df} outside 1..={}",
                data.doc_num
            )));
        }
        Ok(Vocabulary::from_sorted_terms(
            data.doc_num,
            data.tokens.into_iter().zip(data.doc_freq).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<Vec<&'static str>> {
        vec![
            vec!["the", "cat", "and", "the", "cat", "hate", "each", "other"],
            vec!["the", "dog", "is", "the", "bird"],
            vec!["no", "the", "bird", "and", "cat", "hate", "other", "dog"],
        ]
    }

    #[test]
    fn fit_orders_tokens_lexicographically() {
        let vocab = Vocabulary::fit(&docs(), 1).unwrap();
        assert_eq!(
            vocab.feature_names(),
            vec!["and", "bird", "cat", "dog", "each", "hate", "is", "no", "other", "the"]
        );
        assert_eq!(vocab.index_of("the"), Some(9));
        assert_eq!(vocab.token(0), Some("and"));
        assert_eq!(vocab.index_of("fish"), None);
        assert_eq!(vocab.df(vocab.index_of("the").unwrap()), Some(3));
        assert_eq!(vocab.df(vocab.index_of("each").unwrap()), Some(1));
    }

    #[test]
    fn fit_rejects_empty_corpus() {
        let empty: Vec<Vec<&str>> = Vec::new();
        assert_eq!(Vocabulary::fit(&empty, 1), Err(VectorizerError::EmptyCorpus));
    }

    #[test]
    fn fit_on_single_empty_document_gives_empty_vocabulary() {
        let docs: Vec<Vec<&str>> = vec![vec![]];
        let vocab = Vocabulary::fit(&docs, 1).unwrap();
        assert!(vocab.is_empty());
        assert_eq!(vocab.doc_num(), 1);
    }

    #[test]
    fn vectorize_counts_and_binary() {
        let vocab = Vocabulary::fit(&docs(), 1).unwrap();
        let freq = TermFrequency::from(&docs()[0][..]);

        let count = vocab.vectorize(&freq, VectorMode::Count);
        assert_eq!(
            count.iter().collect::<Vec<_>>(),
            vec![(0, 1), (2, 2), (4, 1), (5, 1), (8, 1), (9, 2)]
        );

        let binary = vocab.vectorize(&freq, VectorMode::Binary);
        assert!(binary.iter().all(|(_, v)| v == 1));
        assert_eq!(binary.indices().collect::<Vec<_>>(), count.indices().collect::<Vec<_>>());
    }

    #[test]
    fn serde_roundtrip_and_validation() {
        let vocab = Vocabulary::fit(&docs(), 1).unwrap();
        let s = serde_json::to_string(&vocab).unwrap();
        let de: Vocabulary = serde_json::from_str(&s).unwrap();
        assert_eq!(de, vocab);
        assert_eq!(de.index_of("dog"), Some(3));

        let unsorted = r#"{"tokens":["b","a"],"doc_freq":[1,1],"doc_num":1}"#;
        assert!(serde_json::from_str::<Vocabulary>(unsorted).is_err());
        let bad_df = r#"{"tokens":["a"],"doc_freq":[2],"doc_num":1}"#;
        assert!(serde_json::from_str::<Vocabulary>(bad_df).is_err());
    }
}
