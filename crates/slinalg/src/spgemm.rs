//! Sparse matrix-matrix multiply, `C = A * B` with all three in CSR.
//!
//! # Algorithm
//!
//! Gustavson's row-by-row method:
//!
//! ```text
//! for each row i of A:
//!     for each (k, a_ik) in row i of A:
//!         for each (j, b_kj) in row k of B:
//!             acc[j] += a_ik * b_kj
//!     emit the touched columns of acc in ascending order as row i of C
//!     reset only the touched slots of acc
//! ```
//!
//! The accumulator spans the full output width but is reset in O(touched)
//! per row, so the total cost is
//! `O(sum_i sum_{k in row i of A} nnz(row k of B) + nnz(C) * log(row width))`,
//! the log factor coming from the per-row sort that puts `C` in canonical
//! form.
//!
//! Sums that cancel to exactly zero are kept as explicit stored zeros.

use tracing::debug;

use crate::csr::CsrMatrix;
use crate::error::SparseError;
use crate::scalar::Scalar;

/// Slot value for a column not yet touched in the current row.
const UNTOUCHED: usize = usize::MAX;

/// Dense-indexed sparse accumulator for one output row.
///
/// `slot[j]` is either [`UNTOUCHED`] or the position of column `j` in
/// `entries`, i.e. the order in which the column was first hit. Owned by a
/// single [`spgemm`] call and reused across its rows.
struct RowAccumulator<A> {
    slot: Vec<usize>,
    entries: Vec<(usize, A)>,
}

impl<A: Copy + std::ops::AddAssign> RowAccumulator<A> {
    fn new(width: usize) -> Self {
        Self {
            slot: vec![UNTOUCHED; width],
            entries: Vec::new(),
        }
    }

    #[inline]
    fn add(&mut self, col: usize, value: A) {
        match self.slot[col] {
            UNTOUCHED => {
                self.slot[col] = self.entries.len();
                self.entries.push((col, value));
            }
            pos => self.entries[pos].1 += value,
        }
    }

    /// Append the row in ascending column order and reset the touched slots.
    fn flush_into<T>(&mut self, col_indices: &mut Vec<usize>, values: &mut Vec<T>)
    where
        T: Scalar<Acc = A>,
    {
        for &(col, _) in &self.entries {
            self.slot[col] = UNTOUCHED;
        }
        self.entries.sort_unstable_by_key(|&(col, _)| col);
        for (col, sum) in self.entries.drain(..) {
            col_indices.push(col);
            values.push(T::narrow(sum));
        }
    }
}

/// Multiply two CSR matrices: `C = A * B`.
///
/// `C` is `A.nrows() x B.ncols()` and canonical (every row's column indices
/// strictly increasing) even if the rows of `B` are not. Products are summed
/// in `T::Acc` and narrowed once per output entry.
///
/// # Errors
///
/// Returns [`SparseError::DimensionMismatch`] if `A.ncols() != B.nrows()`.
///
/// # Panics
///
/// Panics if a column index of `A` is not a row of `B`, or a column index of
/// `B` is out of range; run `validate()` on untrusted inputs first.
///
/// # Example
///
/// ```
/// use slinalg::csr::CsrMatrix;
/// use slinalg::spgemm::spgemm;
///
/// // [[1, 2, 0], [0, 3, 4]] * [[5, 0], [0, 6], [7, 8]]
/// let a = CsrMatrix::new(2, 3, vec![0, 2, 4], vec![0, 1, 1, 2], vec![1.0, 2.0, 3.0, 4.0])
///     .unwrap();
/// let b = CsrMatrix::new(3, 2, vec![0, 1, 2, 4], vec![0, 1, 0, 1], vec![5.0, 6.0, 7.0, 8.0])
///     .unwrap();
///
/// let c = spgemm(&a, &b).unwrap();
/// assert_eq!(c.row(0).collect::<Vec<_>>(), vec![(0, 5.0), (1, 12.0)]);
/// assert_eq!(c.row(1).collect::<Vec<_>>(), vec![(0, 28.0), (1, 50.0)]);
/// ```
pub fn spgemm<T: Scalar>(a: &CsrMatrix<T>, b: &CsrMatrix<T>) -> Result<CsrMatrix<T>, SparseError> {
    if a.ncols() != b.nrows() {
        return Err(SparseError::DimensionMismatch(format!(
            "spgemm: A is {}x{} but B is {}x{}",
            a.nrows(),
            a.ncols(),
            b.nrows(),
            b.ncols(),
        )));
    }

    let m = a.nrows();
    let n = b.ncols();

    let mut row_ptr = Vec::with_capacity(m + 1);
    let mut col_indices = Vec::new();
    let mut values = Vec::new();
    row_ptr.push(0);

    let mut acc = RowAccumulator::<T::Acc>::new(n);

    for i in 0..m {
        for (k, a_ik) in a.row(i) {
            let a_ik = a_ik.widen();
            for (j, b_kj) in b.row(k) {
                acc.add(j, a_ik * b_kj.widen());
            }
        }
        acc.flush_into::<T>(&mut col_indices, &mut values);
        row_ptr.push(col_indices.len());
    }

    debug!(
        rows = m,
        cols = n,
        inner = a.ncols(),
        nnz_a = a.nnz(),
        nnz_b = b.nnz(),
        nnz_c = values.len(),
        "spgemm complete"
    );

    Ok(CsrMatrix::from_parts_unchecked(m, n, row_ptr, col_indices, values))
}
