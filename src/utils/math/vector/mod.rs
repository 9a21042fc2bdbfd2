pub mod math;
pub mod serde;

use std::fmt::Debug;

use num::Num;

use crate::error::{Result, VectorizerError};

/// ZeroSpVec is a sparse vector that treats zero elements as absent.
/// It holds `inds` and `vals`:
/// `inds` keeps the index of each stored element,
/// `vals` keeps its value.
///
/// Guarantees
/// - `inds` is strictly ascending
/// - every index is `< len`
/// - no stored value equals zero
#[derive(Clone, PartialEq)]
pub struct ZeroSpVec<N>
where
    N: Num + Copy,
{
    inds: Vec<u32>,
    vals: Vec<N>,
    len: usize,
}

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    /// Empty vector of dimension `len`
    #[inline]
    pub fn new(len: usize) -> Self {
        ZeroSpVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len,
        }
    }

    #[inline]
    pub fn with_capacity(len: usize, cap: usize) -> Self {
        ZeroSpVec {
            inds: Vec::with_capacity(cap),
            vals: Vec::with_capacity(cap),
            len,
        }
    }

    /// Build from unordered `(index, value)` pairs.
    /// Duplicate indices are summed, zero results are dropped.
    ///
    /// # Errors
    /// `IndexOutOfRange` if any index is `>= len`
    pub fn from_entries<I>(len: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, N)>,
    {
        let mut pairs: Vec<(usize, N)> = entries.into_iter().collect();
        if let Some(&(index, _)) = pairs.iter().find(|(index, _)| *index >= len) {
            return Err(VectorizerError::IndexOutOfRange { index, dim: len });
        }
        pairs.sort_unstable_by_key(|(index, _)| *index);

        let mut vec = ZeroSpVec::with_capacity(len, pairs.len());
        let mut iter = pairs.into_iter().peekable();
        while let Some((index, mut value)) = iter.next() {
            while let Some(&(next_index, next_value)) = iter.peek() {
                if next_index != index {
                    break;
                }
                value = value + next_value;
                iter.next();
            }
            vec.raw_push(index, value);
        }
        Ok(vec)
    }

    /// Append an element behind every stored one.
    /// Zero values are skipped.
    /// Callers must push in strictly ascending index order, below `len`.
    #[inline]
    pub(crate) fn raw_push(&mut self, index: usize, value: N) {
        debug_assert!(index < self.len, "index {index} out of range {}", self.len);
        debug_assert!(
            self.inds.last().map_or(true, |&last| (last as usize) < index),
            "indices must be pushed in ascending order"
        );
        if value != N::zero() {
            self.inds.push(index as u32);
            self.vals.push(value);
        }
    }

    /// Declared dimension
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of stored (nonzero) elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// true when every element is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.inds.is_empty()
    }

    /// Value at `index`.
    /// Returns `None` outside the dimension, zero for absent elements.
    #[inline]
    pub fn get(&self, index: usize) -> Option<N> {
        if index >= self.len {
            return None;
        }
        match self.inds.binary_search(&(index as u32)) {
            Ok(pos) => Some(self.vals[pos]),
            Err(_) => Some(N::zero()),
        }
    }

    /// true when `index` holds a nonzero value
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index < self.len && self.inds.binary_search(&(index as u32)).is_ok()
    }

    /// Iterate stored `(index, value)` pairs in ascending index order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.inds
            .iter()
            .zip(self.vals.iter())
            .map(|(&i, &v)| (i as usize, v))
    }

    #[inline]
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.inds.iter().map(|&i| i as usize)
    }

    /// Map every stored value, dropping results that are zero
    pub fn map_values<M, F>(&self, mut f: F) -> ZeroSpVec<M>
    where
        M: Num + Copy,
        F: FnMut(usize, N) -> M,
    {
        let mut out = ZeroSpVec::with_capacity(self.len, self.nnz());
        for (index, value) in self.iter() {
            out.raw_push(index, f(index, value));
        }
        out
    }

    /// Dense copy with explicit zeros
    pub fn to_dense(&self) -> Vec<N> {
        let mut dense = vec![N::zero(); self.len];
        for (index, value) in self.iter() {
            dense[index] = value;
        }
        dense
    }
}

impl<N> Debug for ZeroSpVec<N>
where
    N: Num + Copy + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZeroSpVec")
            .field("len", &self.len)
            .field("entries", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}
