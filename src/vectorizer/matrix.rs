use num::Num;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::VectorMode;
use crate::utils::math::vector::ZeroSpVec;

/// What the values of a `CorpusMatrix` mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatrixKind {
    Count,
    Binary,
    /// TF-IDF weights
    Weighted,
}

impl From<VectorMode> for MatrixKind {
    fn from(mode: VectorMode) -> Self {
        match mode {
            VectorMode::Count => MatrixKind::Count,
            VectorMode::Binary => MatrixKind::Binary,
        }
    }
}

/// Ordered rows of sparse vectors over one vocabulary.
/// Row `i` belongs to input document `i`; every row has dimension `dim`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusMatrix<N>
where
    N: Num + Copy,
{
    rows: Vec<ZeroSpVec<N>>,
    dim: usize,
    kind: MatrixKind,
}

impl<N> CorpusMatrix<N>
where
    N: Num + Copy,
{
    /// Rows must all have dimension `dim`
    pub(crate) fn from_rows(rows: Vec<ZeroSpVec<N>>, dim: usize, kind: MatrixKind) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == dim));
        Self { rows, dim, kind }
    }

    /// Number of rows (documents)
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Shared dimension `V`
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn kind(&self) -> MatrixKind {
        self.kind
    }

    #[inline]
    pub fn rows(&self) -> &[ZeroSpVec<N>] {
        &self.rows
    }

    #[inline]
    pub fn row(&self, index: usize) -> Option<&ZeroSpVec<N>> {
        self.rows.get(index)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, ZeroSpVec<N>> {
        self.rows.iter()
    }

    /// Total stored elements over all rows
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(|r| r.nnz()).sum()
    }

    /// Dense `len x dim` copy
    pub fn to_dense(&self) -> Vec<Vec<N>> {
        self.rows.iter().map(|r| r.to_dense()).collect()
    }
}

impl<'a, N> IntoIterator for &'a CorpusMatrix<N>
where
    N: Num + Copy,
{
    type Item = &'a ZeroSpVec<N>;
    type IntoIter = std::slice::Iter<'a, ZeroSpVec<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl<'de, N> Deserialize<'de> for CorpusMatrix<N>
where
    N: Num + Deserialize<'de> + Copy,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(bound = "N: Num + Copy + Deserialize<'de>")]
        struct CorpusMatrixData<N>
        where
            N: Num + Copy,
        {
            rows: Vec<ZeroSpVec<N>>,
            dim: usize,
            kind: MatrixKind,
        }

        let data = CorpusMatrixData::<N>::deserialize(deserializer)?;
        if let Some((i, row)) = data.rows.iter().enumerate().find(|(_, r)| r.len() != data.dim) {
            return Err(D::Error::custom(format!(
                "row {i} has dimension {}, matrix dimension is {}",
                row.len(),
                data.dim
            )));
        }
        Ok(CorpusMatrix {
            rows: data.rows,
            dim: data.dim,
            kind: data.kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CorpusMatrix<u32> {
        let rows = vec![
            ZeroSpVec::from_entries(4, vec![(0, 2), (3, 1)]).unwrap(),
            ZeroSpVec::new(4),
            ZeroSpVec::from_entries(4, vec![(1, 5)]).unwrap(),
        ];
        CorpusMatrix::from_rows(rows, 4, MatrixKind::Count)
    }

    #[test]
    fn keeps_row_order_and_dimension() {
        let m = sample();
        assert_eq!(m.len(), 3);
        assert_eq!(m.dim(), 4);
        assert_eq!(m.nnz(), 3);
        assert!(m.row(1).unwrap().is_zero());
        assert_eq!(m.to_dense(), vec![vec![2, 0, 0, 1], vec![0, 0, 0, 0], vec![0, 5, 0, 0]]);
    }

    #[test]
    fn serde_rejects_row_with_foreign_dimension() {
        let m = sample();
        let s = serde_json::to_string(&m).unwrap();
        let de: CorpusMatrix<u32> = serde_json::from_str(&s).unwrap();
        assert_eq!(de, m);

        let bad = s.replacen("\"dim\":4", "\"dim\":5", 1);
        assert!(serde_json::from_str::<CorpusMatrix<u32>>(&bad).is_err());
    }
}
