use super::SparseStore;
use crate::error::CoreResult;
use crate::scalar::Scalar;
use sprs::{CsMat, TriMat};

impl<N: Scalar> SparseStore<N> {
    /// Copies the stored entries of a `sprs` matrix in either compression.
    pub fn from_sprs(matrix: &CsMat<N>) -> CoreResult<Self> {
        let (rows, cols) = matrix.shape();
        SparseStore::from_triplets(
            rows,
            cols,
            matrix.iter().map(|(&value, (row, col))| (row, col, value)),
        )
    }

    /// Converts to a CSR matrix holding the same nonzeros.
    pub fn to_sprs(&self) -> CsMat<N> {
        let mut triplets = TriMat::with_capacity((self.rows, self.cols), self.nnz());
        for (row, col, value) in self.nonzeros() {
            triplets.add_triplet(row, col, value);
        }
        triplets.to_csr()
    }
}
