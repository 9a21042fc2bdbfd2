use std::sync::atomic::{AtomicU64, Ordering};

use ahash::RandomState;
use dashmap::DashMap;
use rayon::prelude::*;

use crate::vectorizer::{term::TermFrequency, vocabulary::Vocabulary};

/// Keeps the document count and per-term document frequency while fitting.
///
/// Documents can be added from several threads at once.
/// Once every document is in, `freeze` turns the counts into an immutable
/// `Vocabulary`; the corpus itself is consumed.
#[derive(Debug, Default)]
pub struct Corpus {
    /// number of documents added
    doc_num: AtomicU64,
    /// number of documents each term appeared in
    term_counts: DashMap<Box<str>, u64, RandomState>,
}

impl Corpus {
    /// Create a new instance
    pub fn new() -> Self {
        Self {
            doc_num: AtomicU64::new(0),
            term_counts: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// Count every document of `documents` in parallel
    pub fn from_documents<D, T>(documents: &[D]) -> Self
    where
        D: AsRef<[T]> + Sync,
        T: AsRef<str> + Sync,
    {
        let corpus = Corpus::new();
        documents.par_iter().for_each(|doc| {
            let freq = TermFrequency::from(doc.as_ref());
            corpus.add_set(&freq.term_set_ref_str());
        });
        corpus
    }

    /// Add one document given as its set of distinct terms.
    /// Each term must appear once in `terms`.
    pub fn add_set<T>(&self, terms: &[T])
    where
        T: AsRef<str>,
    {
        self.doc_num.fetch_add(1, Ordering::Relaxed);
        for term in terms {
            let term = term.as_ref();
            if let Some(mut count) = self.term_counts.get_mut(term) {
                *count += 1;
                continue;
            }
            self.term_counts
                .entry(term.into())
                .and_modify(|count| *count += 1)
                .or_insert(1);
        }
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num.load(Ordering::Acquire)
    }

    /// Number of documents containing `term`
    #[inline]
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).map_or(0, |count| *count)
    }

    /// Number of distinct terms seen so far
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    /// Consume the counts and build the frozen vocabulary.
    /// Terms with document frequency below `min_df` are left out entirely.
    /// Indices follow code point order of the terms.
    pub fn freeze(self, min_df: u64) -> Vocabulary {
        let doc_num = self.get_doc_num();
        let mut terms: Vec<(Box<str>, u64)> = self
            .term_counts
            .into_iter()
            .filter(|(_, df)| *df >= min_df)
            .collect();
        terms.par_sort_unstable_by(|a, b| a.0.cmp(&b.0));
        Vocabulary::from_sorted_terms(doc_num, terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_document_once_per_term() {
        let docs = vec![vec!["a", "a", "b"], vec!["b", "c"], vec![]];
        let corpus = Corpus::from_documents(&docs);
        assert_eq!(corpus.get_doc_num(), 3);
        assert_eq!(corpus.get_term_count("a"), 1);
        assert_eq!(corpus.get_term_count("b"), 2);
        assert_eq!(corpus.get_term_count("c"), 1);
        assert_eq!(corpus.get_term_count("z"), 0);
        assert_eq!(corpus.vocab_size(), 3);
    }

    #[test]
    fn freeze_sorts_and_prunes() {
        let docs = vec![vec!["pear", "apple"], vec!["apple", "fig"], vec!["apple", "pear"]];
        let vocab = Corpus::from_documents(&docs).freeze(2);
        assert_eq!(vocab.feature_names(), vec!["apple", "pear"]);
        assert_eq!(vocab.df_table(), &[3, 2]);
        assert_eq!(vocab.doc_num(), 3);
    }
}
