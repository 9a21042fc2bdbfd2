use std::collections::HashMap;

use ahash::RandomState;
use serde::{Deserialize, Serialize};

/// TermFrequency struct
/// Counts how often each term occurs in one tokenized document,
/// and how many tokens the document had in total.
///
/// The total is the original document length, before any vocabulary
/// filtering, and is the TF denominator.
///
/// # Examples
/// ```
/// use sparse_text_vectorizer::TermFrequency;
/// let mut term_freq = TermFrequency::new();
/// term_freq.add_term("term1");
/// term_freq.add_term("term2");
/// term_freq.add_term("term1");
///
/// assert_eq!(term_freq.term_count("term1"), 2);
/// assert_eq!(term_freq.term_sum(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TermFrequency {
    term_count: HashMap<String, u32, RandomState>,
    total_term_count: u64,
}

/// Implementation for adding terms
impl TermFrequency {
    /// Create a new TermFrequency
    pub fn new() -> Self {
        TermFrequency {
            term_count: HashMap::with_hasher(RandomState::new()),
            total_term_count: 0,
        }
    }

    /// Add a term
    ///
    /// # Arguments
    /// * `term` - term to add
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        if let Some(count) = self.term_count.get_mut(term) {
            *count += 1;
        } else {
            self.term_count.insert(term.to_string(), 1);
        }
        self.total_term_count += 1;
        self
    }

    /// Add multiple terms
    ///
    /// # Arguments
    /// * `terms` - Slice of terms to add
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }
}

impl<T> From<&[T]> for TermFrequency
where
    T: AsRef<str>,
{
    fn from(terms: &[T]) -> Self {
        let mut tf = TermFrequency::new();
        tf.add_terms(terms);
        tf
    }
}

/// Implementation for retrieving information from TermFrequency
impl TermFrequency {
    /// Iterate over all terms and their counts
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.term_count.iter().map(|(term, &count)| (term.as_str(), count))
    }

    /// Occurrence count of a term, 0 if absent
    #[inline]
    pub fn term_count(&self, term: &str) -> u32 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Total number of tokens added
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// Number of distinct terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    /// Distinct terms as borrowed strings
    #[inline]
    pub fn term_set_ref_str(&self) -> Vec<&str> {
        self.term_count.keys().map(|s| s.as_str()).collect()
    }
}
