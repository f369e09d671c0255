//! Core tensor data structure and operations.
//!
//! # Core Tensor Utilities
//!
//! [`Tensor<T, R>`] is a dense, row-major array with a rank `R` fixed at
//! compile time and extents chosen at runtime. It supports:
//! - Construction from a shape, a flat buffer, or a nested literal ([`tensor!`](crate::tensor))
//! - Checked element access by index tuple
//! - Broadcasting elementwise arithmetic (see [`broadcast`]) and scalar arithmetic
//! - Transpose of the trailing two axes and batched matrix product
//! - Row reduction and shrinking reshape
//!
//! ## Design Highlights
//! - `data.len() == product(shape)` holds after every public operation
//! - Every fallible operation returns [`TensorError`]; nothing is silently clamped
//! - Tensors are plain values: `clone` copies, operations allocate fresh results
//!
//! ## Example
//!
//! ```rust
//! use tensorflux::tensors::Tensor;
//!
//! let a = Tensor::from_vec([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! let b = a.transpose().unwrap();
//! assert_eq!(b.shape(), &[3, 2]);
//! assert_eq!(a.matmul(&b).unwrap().shape(), &[2, 2]);
//! ```

pub mod broadcast;
mod fmt;

use crate::error::TensorError;
use crate::float::TensorFloat;
use crate::ops::cpu::MatmulDims;
use crate::ops::dispatch;
use core::ops::{Index, IndexMut};

/// An N-dimensional tensor with fixed rank `R`.
///
/// - `shape` holds `R` extents, e.g. `[2, 3]` for a 2×3 matrix.
/// - `data` holds `product(shape)` elements in row-major order (last axis fastest).
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T, const R: usize> {
    shape: [usize; R],
    data: Vec<T>,
}

/// Number of elements implied by `shape`, or `ShapeOverflow`.
pub(crate) fn checked_size(shape: &[usize]) -> Result<usize, TensorError> {
    shape
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| TensorError::ShapeOverflow {
            shape: shape.to_vec(),
        })
}

fn shape_array<const R: usize>(dims: &[usize]) -> Result<[usize; R], TensorError> {
    dims.try_into().map_err(|_| TensorError::RankMismatch {
        expected: R,
        got: dims.len(),
    })
}

impl<T, const R: usize> Tensor<T, R> {
    /// Wraps a flat row-major buffer.
    ///
    /// # Errors
    /// `ShapeOverflow` if the extents overflow, `DataLength` if `data` does
    /// not hold exactly `product(shape)` elements.
    pub fn from_vec(shape: [usize; R], data: Vec<T>) -> Result<Self, TensorError> {
        let expected = checked_size(&shape)?;
        if expected != data.len() {
            return Err(TensorError::DataLength {
                shape: shape.to_vec(),
                expected,
                got: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Like [`from_vec`](Self::from_vec) with a dynamically sized shape.
    ///
    /// # Errors
    /// `RankMismatch` if `dims.len() != R`, otherwise as `from_vec`.
    pub fn from_shape_vec(dims: &[usize], data: Vec<T>) -> Result<Self, TensorError> {
        Self::from_vec(shape_array(dims)?, data)
    }

    /// Tensor filled with `value`.
    ///
    /// # Errors
    /// `ShapeOverflow` if the extents overflow.
    pub fn full(shape: [usize; R], value: T) -> Result<Self, TensorError>
    where
        T: Clone,
    {
        let len = checked_size(&shape)?;
        Ok(Self {
            shape,
            data: vec![value; len],
        })
    }

    /// The extents, one per axis.
    #[must_use]
    pub const fn shape(&self) -> &[usize; R] {
        &self.shape
    }

    /// The fixed number of axes.
    #[must_use]
    pub const fn rank(&self) -> usize {
        R
    }

    /// Total element count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if any extent is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat row-major view.
    #[must_use]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Flat mutable row-major view.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the tensor, returning its buffer.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterator over elements in row-major order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Mutable iterator over elements in row-major order.
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Row-major offset of an index tuple.
    ///
    /// # Errors
    /// `IndexOutOfRange` if any component is outside its extent.
    pub fn offset(&self, index: [usize; R]) -> Result<usize, TensorError> {
        let mut linear = 0;
        let mut stride = 1;
        for axis in (0..R).rev() {
            if index[axis] >= self.shape[axis] {
                return Err(TensorError::IndexOutOfRange {
                    index: index.to_vec(),
                    shape: self.shape.to_vec(),
                });
            }
            linear += index[axis] * stride;
            stride *= self.shape[axis];
        }
        Ok(linear)
    }

    /// Element at `index`.
    ///
    /// # Errors
    /// `IndexOutOfRange` if any component is outside its extent.
    pub fn get(&self, index: [usize; R]) -> Result<&T, TensorError> {
        let i = self.offset(index)?;
        Ok(&self.data[i])
    }

    /// Mutable element at `index`.
    ///
    /// # Errors
    /// `IndexOutOfRange` if any component is outside its extent.
    pub fn get_mut(&mut self, index: [usize; R]) -> Result<&mut T, TensorError> {
        let i = self.offset(index)?;
        Ok(&mut self.data[i])
    }

    /// Overwrites the element at `index`.
    ///
    /// # Errors
    /// `IndexOutOfRange` if any component is outside its extent.
    pub fn set(&mut self, index: [usize; R], value: T) -> Result<(), TensorError> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Overwrites every element with `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }

    /// Copies `values` into the tensor in row-major order.
    ///
    /// # Errors
    /// `DataLength` if `values` is not exactly as long as the tensor.
    pub fn assign(&mut self, values: &[T]) -> Result<(), TensorError>
    where
        T: Clone,
    {
        if values.len() != self.data.len() {
            return Err(TensorError::DataLength {
                shape: self.shape.to_vec(),
                expected: self.data.len(),
                got: values.len(),
            });
        }
        self.data.clone_from_slice(values);
        Ok(())
    }

    /// Applies `f` to every element, producing a new tensor of the same shape.
    #[must_use]
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Tensor<U, R> {
        Tensor {
            shape: self.shape,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Combines two tensors of identical shape elementwise.
    ///
    /// # Errors
    /// `ShapeMismatch` if the shapes differ; no broadcasting is attempted.
    pub fn zip_map<U, V>(
        &self,
        other: &Tensor<U, R>,
        mut f: impl FnMut(&T, &U) -> V,
    ) -> Result<Tensor<V, R>, TensorError> {
        if self.shape != other.shape {
            return Err(TensorError::ShapeMismatch {
                left: self.shape.to_vec(),
                right: other.shape.to_vec(),
            });
        }
        Ok(Tensor {
            shape: self.shape,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| f(a, b))
                .collect(),
        })
    }

    /// Changes the shape in place, keeping the first `product(dims)` elements.
    ///
    /// Growing is rejected; no re-layout happens beyond truncation.
    ///
    /// # Errors
    /// `RankMismatch` if `dims.len() != R`, `ShapeOverflow` on overflow,
    /// `ReshapeTooLarge` if the new shape needs more elements than are stored.
    pub fn reshape(&mut self, dims: &[usize]) -> Result<(), TensorError> {
        let shape: [usize; R] = shape_array(dims)?;
        let required = checked_size(&shape)?;
        if required > self.data.len() {
            return Err(TensorError::ReshapeTooLarge {
                shape: shape.to_vec(),
                required,
                available: self.data.len(),
            });
        }
        self.shape = shape;
        self.data.truncate(required);
        Ok(())
    }
}

impl<T: TensorFloat, const R: usize> Tensor<T, R> {
    /// Zero-initialized tensor.
    ///
    /// # Errors
    /// `ShapeOverflow` if the product of extents overflows `usize`.
    pub fn zeros(shape: [usize; R]) -> Result<Self, TensorError> {
        Self::full(shape, T::ZERO)
    }

    /// Zero-initialized tensor from a dynamically sized shape.
    ///
    /// # Errors
    /// `RankMismatch` if `dims.len() != R`, `ShapeOverflow` on overflow.
    pub fn from_dims(dims: &[usize]) -> Result<Self, TensorError> {
        Self::zeros(shape_array(dims)?)
    }

    /// Swaps the two trailing axes. For rank > 2 every leading batch is
    /// transposed independently.
    ///
    /// # Errors
    /// `DimensionMismatch` for rank 0 or 1.
    pub fn transpose(&self) -> Result<Self, TensorError> {
        let Some(lead) = R.checked_sub(2) else {
            return Err(TensorError::DimensionMismatch {
                op: "transpose",
                left: self.shape.to_vec(),
                right: Vec::new(),
            });
        };
        let rows = self.shape[lead];
        let cols = self.shape[lead + 1];
        let mut shape = self.shape;
        shape.swap(lead, lead + 1);

        let mut data = vec![T::ZERO; self.data.len()];
        let plane = rows * cols;
        if plane > 0 {
            for (src, dst) in self.data.chunks(plane).zip(data.chunks_mut(plane)) {
                for i in 0..rows {
                    for j in 0..cols {
                        dst[j * rows + i] = src[i * cols + j];
                    }
                }
            }
        }
        Ok(Self { shape, data })
    }

    /// Batched matrix product `self × other`; see [`matrix_product`].
    ///
    /// # Errors
    /// `DimensionMismatch` on incompatible extents.
    pub fn matmul(&self, other: &Self) -> Result<Self, TensorError> {
        matrix_product(self, other)
    }

    /// Sums over axis 0 of a 2-D tensor, producing a `1 × cols` tensor.
    ///
    /// # Errors
    /// `DimensionMismatch` unless the tensor is 2-D.
    pub fn sum_rows(&self) -> Result<Self, TensorError> {
        if R != 2 {
            return Err(TensorError::DimensionMismatch {
                op: "sum_rows",
                left: self.shape.to_vec(),
                right: Vec::new(),
            });
        }
        let cols = self.shape.as_slice()[1];
        let mut sums = vec![T::ZERO; cols];
        if cols > 0 {
            for row in self.data.chunks(cols) {
                for (acc, &x) in sums.iter_mut().zip(row) {
                    *acc += x;
                }
            }
        }
        let mut shape = self.shape;
        shape.as_mut_slice()[0] = 1;
        Ok(Self { shape, data: sums })
    }
}

/// Batched matrix product.
///
/// Requires `a.shape[R-1] == b.shape[R-2]`; for `R > 2` every leading batch
/// extent must also agree. The result has `a`'s shape with the last extent
/// replaced by `b`'s. The kernel is chosen by the global
/// [`Backend`](crate::backend::Backend); both kernels give identical results.
///
/// # Errors
/// `DimensionMismatch` if the inner or batch extents disagree, or `R < 2`.
///
/// # Example
/// ```rust
/// use tensorflux::tensors::{Tensor, matrix_product};
///
/// let a = Tensor::from_vec([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// let b = Tensor::from_vec([3, 2], vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]).unwrap();
/// let c = matrix_product(&a, &b).unwrap();
/// assert_eq!(c.data(), &[58.0, 64.0, 139.0, 154.0]);
/// ```
pub fn matrix_product<T: TensorFloat, const R: usize>(
    a: &Tensor<T, R>,
    b: &Tensor<T, R>,
) -> Result<Tensor<T, R>, TensorError> {
    let mismatch = || TensorError::DimensionMismatch {
        op: "matmul",
        left: a.shape.to_vec(),
        right: b.shape.to_vec(),
    };
    let Some(lead) = R.checked_sub(2) else {
        return Err(mismatch());
    };
    if a.shape[lead + 1] != b.shape[lead] || a.shape[..lead] != b.shape[..lead] {
        return Err(mismatch());
    }

    let dims = MatmulDims {
        batch: a.shape[..lead].iter().product(),
        m: a.shape[lead],
        k: a.shape[lead + 1],
        n: b.shape[lead + 1],
    };
    let mut shape = a.shape;
    shape[lead + 1] = dims.n;
    let mut out = vec![T::ZERO; checked_size(&shape)?];
    dispatch::matmul(&a.data, &b.data, &mut out, dims);

    Ok(Tensor { shape, data: out })
}

/// Matrix-only helpers used by the layers and the training loop.
impl<T: TensorFloat> Tensor<T, 2> {
    /// Number of rows (samples).
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.shape[0]
    }

    /// Number of columns (features).
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.shape[1]
    }

    /// Row `i` as a slice.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `i >= rows`.
    pub fn row(&self, i: usize) -> Result<&[T], TensorError> {
        if i >= self.rows() {
            return Err(TensorError::IndexOutOfRange {
                index: vec![i],
                shape: self.shape.to_vec(),
            });
        }
        let cols = self.cols();
        Ok(&self.data[i * cols..(i + 1) * cols])
    }

    /// Copies rows `start..end` into a new tensor.
    ///
    /// # Errors
    /// `IndexOutOfRange` if the range exceeds the row count or is reversed.
    pub fn slice_rows(&self, start: usize, end: usize) -> Result<Self, TensorError> {
        if start > end || end > self.rows() {
            return Err(TensorError::IndexOutOfRange {
                index: vec![start, end],
                shape: self.shape.to_vec(),
            });
        }
        let cols = self.cols();
        Ok(Self {
            shape: [end - start, cols],
            data: self.data[start * cols..end * cols].to_vec(),
        })
    }

    /// Gathers the listed rows, in order, into a new tensor.
    ///
    /// # Errors
    /// `IndexOutOfRange` if any row index is out of range.
    pub fn select_rows(&self, indices: &[usize]) -> Result<Self, TensorError> {
        let cols = self.cols();
        let mut data = Vec::with_capacity(indices.len() * cols);
        for &i in indices {
            if i >= self.rows() {
                return Err(TensorError::IndexOutOfRange {
                    index: vec![i],
                    shape: self.shape.to_vec(),
                });
            }
            data.extend_from_slice(&self.data[i * cols..(i + 1) * cols]);
        }
        Ok(Self {
            shape: [indices.len(), cols],
            data,
        })
    }
}

impl<T, const R: usize> Index<usize> for Tensor<T, R> {
    type Output = T;

    /// Flat row-major access.
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T, const R: usize> IndexMut<usize> for Tensor<T, R> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

impl<'a, T, const R: usize> IntoIterator for &'a Tensor<T, R> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Defines a tensor from nested literal arrays.
///
/// The rank comes from the annotated target type; nesting depth must match it.
///
/// # Panics
/// Panics on ragged literals or when the nesting depth differs from the rank.
///
/// # Example
/// ```
/// use tensorflux::{tensor, tensors::Tensor};
/// let t: Tensor<f64, 2> = tensor!([[1.0, 2.0], [3.0, -4.0]]);
/// assert_eq!(t.shape(), &[2, 2]);
/// ```
#[macro_export]
macro_rules! tensor {
    (@parts [ $( [ $($inner:tt)* ] ),+ $(,)? ]) => {{
        let children = ::std::vec![ $( $crate::tensor!(@parts [ $($inner)* ]) ),+ ];
        let first_shape: ::std::vec::Vec<usize> = children[0].0.clone();
        assert!(
            children.iter().all(|c| c.0 == first_shape),
            "ragged tensor literal (rows have mismatched shapes)"
        );
        let mut shape = ::std::vec![children.len()];
        shape.extend_from_slice(&first_shape);
        let mut data = ::std::vec::Vec::new();
        for c in children {
            data.extend(c.1);
        }
        (shape, data)
    }};

    (@parts [ $( $x:expr ),+ $(,)? ]) => {{
        let data = ::std::vec![ $( $x ),+ ];
        (::std::vec![data.len()], data)
    }};

    ([ $($body:tt)* ]) => {{
        let (shape, data) = $crate::tensor!(@parts [ $($body)* ]);
        match $crate::tensors::Tensor::from_shape_vec(&shape, data) {
            Ok(t) => t,
            Err(e) => panic!("invalid tensor literal: {e}"),
        }
    }};
}
