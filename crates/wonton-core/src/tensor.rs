//! The `Tensor` value type.
//!
//! A [`Tensor`] owns one [`Cube`] and the raw shape it was built or reshaped
//! with. Every operation that changes geometry replaces both together, and
//! validates before touching either, so a failed call leaves the tensor as it
//! was.
//!
//! # Shapes
//!
//! [`Tensor::shapes`] always reports `[channels, rows, cols]`, while
//! [`Tensor::raw_shapes`] reports the 1 to 3 dimension shape the caller used:
//!
//! ```
//! use wonton_core::Tensor;
//!
//! let t = Tensor::new_3d(1, 3, 4).unwrap();
//! assert_eq!(t.shapes().unwrap(), [1, 3, 4]);
//! assert_eq!(t.raw_shapes().unwrap(), &[3, 4]);
//! ```
//!
//! # Element order
//!
//! The cube stores each channel column-major. `fill_values`/`values` with
//! `row_major = true` speak logical row-major order (cols fastest, then
//! rows, then channels); with `row_major = false` they copy cube memory as is.
//!
//! ```
//! use wonton_core::Tensor;
//!
//! let mut t = Tensor::new_2d(2, 3).unwrap();
//! t.fill_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], true).unwrap();
//! assert_eq!(t.at(0, 0, 1).unwrap(), 2.0);
//! assert_eq!(t.values(false).unwrap(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
//! assert_eq!(t.values(true).unwrap(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
//! ```

use crate::cube::{render_matrix, Cube};
use crate::error::{TensorError, TensorResult};
use crate::layout::Layout;
use crate::shape::{
    cube_dims, expand_shape, explicit_shape, normalize_shape, shape_size, validate_shape, Shape,
    MAX_RANK,
};
use scirs2_core::ndarray_ext::{ArrayView2, ArrayViewMut2};
use std::fmt;

/// Dense `f32` tensor with up to three dimensions (channels, rows, cols)
///
/// `Tensor::default()` is the empty tensor: no buffer, no raw shape. Every
/// operation other than [`is_empty`](Tensor::is_empty) rejects it with
/// [`TensorError::EmptyTensor`].
///
/// Cloning deep-copies the buffer. Taking a tensor with [`std::mem::take`]
/// leaves an empty one behind.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct Tensor {
    raw_shape: Shape,
    data: Cube,
}

impl Tensor {
    /// Create a 1D tensor of `length` zeros
    pub fn new_1d(length: usize) -> TensorResult<Self> {
        Self::allocate([1, 1, length])
    }

    /// Create a 2D tensor of zeros
    ///
    /// A single row collapses the raw shape to `[cols]`.
    pub fn new_2d(rows: usize, cols: usize) -> TensorResult<Self> {
        Self::allocate([1, rows, cols])
    }

    /// Create a 3D tensor of zeros
    ///
    /// # Examples
    ///
    /// ```
    /// use wonton_core::Tensor;
    ///
    /// assert_eq!(Tensor::new_3d(3, 4, 5).unwrap().raw_shapes().unwrap(), &[3, 4, 5]);
    /// assert_eq!(Tensor::new_3d(1, 3, 4).unwrap().raw_shapes().unwrap(), &[3, 4]);
    /// assert_eq!(Tensor::new_3d(1, 1, 10).unwrap().raw_shapes().unwrap(), &[10]);
    /// ```
    pub fn new_3d(channels: usize, rows: usize, cols: usize) -> TensorResult<Self> {
        Self::allocate([channels, rows, cols])
    }

    /// Create a tensor of zeros from a 1 to 3 dimension shape
    ///
    /// Shorter shapes fill the least-significant slots, so `[3, 4]` means
    /// 3 rows and 4 cols in one channel.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidShape`] if `shape` is empty, longer than 3,
    /// contains a zero or describes more elements than can be addressed.
    pub fn from_shape(shape: &[usize]) -> TensorResult<Self> {
        validate_shape(shape)?;
        Self::allocate(expand_shape(shape))
    }

    fn allocate(expanded: [usize; MAX_RANK]) -> TensorResult<Self> {
        validate_shape(&expanded)?;
        if shape_size(&expanded).is_none() {
            return Err(TensorError::invalid_shape(
                &expanded,
                "element count overflows",
            ));
        }
        let (rows, cols, slices) = cube_dims(expanded);
        Ok(Self {
            raw_shape: normalize_shape(expanded),
            data: Cube::zeros(rows, cols, slices),
        })
    }

    /// Whether no buffer is allocated
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn ensure_allocated(&self, op: &'static str) -> TensorResult<()> {
        if self.data.is_empty() {
            Err(TensorError::empty(op))
        } else {
            Ok(())
        }
    }

    /// Rows per channel
    pub fn rows(&self) -> TensorResult<usize> {
        self.ensure_allocated("rows")?;
        Ok(self.data.n_rows())
    }

    /// Columns per channel
    pub fn cols(&self) -> TensorResult<usize> {
        self.ensure_allocated("cols")?;
        Ok(self.data.n_cols())
    }

    /// Number of channels
    pub fn channels(&self) -> TensorResult<usize> {
        self.ensure_allocated("channels")?;
        Ok(self.data.n_slices())
    }

    /// Total number of elements
    pub fn size(&self) -> TensorResult<usize> {
        self.ensure_allocated("size")?;
        Ok(self.data.len())
    }

    /// Full `[channels, rows, cols]` shape, regardless of the raw shape
    pub fn shapes(&self) -> TensorResult<[usize; MAX_RANK]> {
        self.ensure_allocated("shapes")?;
        Ok(self.cube_shape())
    }

    /// Raw shape as constructed or last reshaped
    pub fn raw_shapes(&self) -> TensorResult<&[usize]> {
        if self.raw_shape.is_empty() {
            return Err(TensorError::empty("raw_shapes"));
        }
        Ok(&self.raw_shape)
    }

    /// The underlying cube
    pub fn data(&self) -> &Cube {
        &self.data
    }

    /// Replace the cube with one of identical geometry
    ///
    /// The raw shape is left untouched.
    pub fn set_data(&mut self, data: Cube) -> TensorResult<()> {
        self.ensure_allocated("set_data")?;
        let current = self.shapes()?;
        let incoming = [data.n_slices(), data.n_rows(), data.n_cols()];
        if current != incoming {
            return Err(TensorError::invalid_shape(
                &incoming,
                format!("cube geometry must match the tensor's {current:?}"),
            ));
        }
        self.data = data;
        Ok(())
    }

    /// Element at a flat offset in cube memory order
    pub fn index(&self, offset: usize) -> TensorResult<f32> {
        self.ensure_allocated("index")?;
        self.data
            .get_linear(offset)
            .ok_or_else(|| TensorError::out_of_range(&[offset], &[self.data.len()]))
    }

    /// Mutable element at a flat offset in cube memory order
    pub fn index_mut(&mut self, offset: usize) -> TensorResult<&mut f32> {
        self.ensure_allocated("index_mut")?;
        let size = self.data.len();
        self.data
            .get_linear_mut(offset)
            .ok_or_else(|| TensorError::out_of_range(&[offset], &[size]))
    }

    fn check_coords(&self, channel: usize, row: usize, col: usize) -> TensorResult<()> {
        let bounds = self.shapes()?;
        if channel >= bounds[0] || row >= bounds[1] || col >= bounds[2] {
            return Err(TensorError::out_of_range(&[channel, row, col], &bounds));
        }
        Ok(())
    }

    /// Element at `(channel, row, col)`
    ///
    /// All three bounds are exclusive.
    pub fn at(&self, channel: usize, row: usize, col: usize) -> TensorResult<f32> {
        self.check_coords(channel, row, col)?;
        self.data
            .get(row, col, channel)
            .ok_or_else(|| TensorError::out_of_range(&[channel, row, col], &self.cube_shape()))
    }

    /// Mutable element at `(channel, row, col)`
    pub fn at_mut(&mut self, channel: usize, row: usize, col: usize) -> TensorResult<&mut f32> {
        self.check_coords(channel, row, col)?;
        let bounds = self.cube_shape();
        self.data
            .get_mut(row, col, channel)
            .ok_or_else(|| TensorError::out_of_range(&[channel, row, col], &bounds))
    }

    /// `(rows, cols)` view of one channel
    pub fn slice(&self, channel: usize) -> TensorResult<ArrayView2<'_, f32>> {
        let channels = self.channels()?;
        self.data
            .slice(channel)
            .ok_or_else(|| TensorError::out_of_range(&[channel], &[channels]))
    }

    /// Mutable `(rows, cols)` view of one channel
    pub fn slice_mut(&mut self, channel: usize) -> TensorResult<ArrayViewMut2<'_, f32>> {
        let channels = self.channels()?;
        self.data
            .slice_mut(channel)
            .ok_or_else(|| TensorError::out_of_range(&[channel], &[channels]))
    }

    fn cube_shape(&self) -> [usize; MAX_RANK] {
        [self.data.n_slices(), self.data.n_rows(), self.data.n_cols()]
    }

    /// Set every element to `value`
    pub fn fill(&mut self, value: f32) -> TensorResult<()> {
        self.ensure_allocated("fill")?;
        self.data.fill(value);
        Ok(())
    }

    /// Set every element to 1
    pub fn ones(&mut self) -> TensorResult<()> {
        self.fill(1.0)
    }

    /// Set every element to 0
    pub fn zeros(&mut self) -> TensorResult<()> {
        self.fill(0.0)
    }

    /// Fill with standard-normal samples
    pub fn rand(&mut self) -> TensorResult<()> {
        self.ensure_allocated("rand")?;
        self.data.randn();
        Ok(())
    }

    /// Overwrite every element from a flat sequence of exactly `size()` values
    ///
    /// With `row_major`, `values` is read in logical row-major order and each
    /// channel's block is transposed into its column-major slice. Without it,
    /// `values` is copied straight into cube memory order.
    ///
    /// # Errors
    ///
    /// [`TensorError::EmptyTensor`] on an empty tensor,
    /// [`TensorError::SizeMismatch`] if `values.len() != size()`.
    pub fn fill_values(&mut self, values: &[f32], row_major: bool) -> TensorResult<()> {
        self.ensure_allocated("fill_values")?;
        let size = self.data.len();
        if values.len() != size {
            return Err(TensorError::size_mismatch(size, values.len()));
        }
        if row_major {
            write_row_major(&mut self.data, values);
        } else {
            for (dst, &src) in self.data.iter_mut().zip(values) {
                *dst = src;
            }
        }
        Ok(())
    }

    /// All elements as a flat vector
    ///
    /// `values(row_major)` is the exact inverse of
    /// `fill_values(_, row_major)` for the same flag.
    pub fn values(&self, row_major: bool) -> TensorResult<Vec<f32>> {
        self.ensure_allocated("values")?;
        if !row_major {
            return Ok(self.data.iter().copied().collect());
        }
        let layout = self.data.layout();
        let mut out = vec![0.0f32; layout.size()];
        for (offset, &value) in self.data.iter().enumerate() {
            out[layout.logical_from_physical(offset)] = value;
        }
        Ok(out)
    }

    /// Change the shape while keeping the element count
    ///
    /// With `row_major`, the logical row-major sequence of values is kept and
    /// laid out again under the new shape. Without it, cube memory is only
    /// reinterpreted, so values read in row-major order may come out permuted.
    ///
    /// The raw shape becomes exactly `shape`; leading ones are not collapsed.
    ///
    /// # Errors
    ///
    /// [`TensorError::EmptyTensor`], [`TensorError::InvalidShape`] for a rank
    /// outside 1..=3, [`TensorError::SizeMismatch`] if the element count
    /// differs. The tensor is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use wonton_core::Tensor;
    ///
    /// let mut t = Tensor::new_3d(2, 3, 4).unwrap();
    /// t.reshape(&[4, 3, 2], true).unwrap();
    /// assert_eq!(t.shapes().unwrap(), [4, 3, 2]);
    /// assert!(t.reshape(&[5, 5], true).is_err());
    /// ```
    pub fn reshape(&mut self, shape: &[usize], row_major: bool) -> TensorResult<()> {
        self.ensure_allocated("reshape")?;
        validate_shape(shape)?;
        let size = self.data.len();
        // an overflowing count can never match, so saturate it
        let requested = shape_size(shape).unwrap_or(usize::MAX);
        if requested != size {
            return Err(TensorError::size_mismatch(size, requested));
        }

        let (rows, cols, slices) = cube_dims(expand_shape(shape));
        let mut reshaped = self.data.reshaped(rows, cols, slices)?;
        if row_major {
            let snapshot = self.values(true)?;
            write_row_major(&mut reshaped, &snapshot);
        }

        tracing::debug!(
            from = ?self.raw_shape.as_slice(),
            to = ?shape,
            row_major = row_major,
            "reshape"
        );
        self.data = reshaped;
        self.set_explicit_shape(shape);
        Ok(())
    }

    /// Reshape to a single dimension of `size()` elements
    pub fn flatten(&mut self, row_major: bool) -> TensorResult<()> {
        let size = self.size()?;
        self.reshape(&[size], row_major)
    }

    /// Surround every channel with a border of `value`
    ///
    /// `pads` is `[top, bottom, left, right]`. Channels are padded
    /// independently and the raw shape becomes the full
    /// `[channels, rows, cols]` form.
    ///
    /// # Errors
    ///
    /// [`TensorError::EmptyTensor`], or [`TensorError::InvalidArgument`] if
    /// `pads` does not hold exactly 4 values or the padded size overflows.
    /// The tensor is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use wonton_core::Tensor;
    ///
    /// let mut t = Tensor::new_3d(3, 4, 5).unwrap();
    /// t.fill(1.0).unwrap();
    /// t.padding(&[1, 2, 3, 4], 0.0).unwrap();
    /// assert_eq!((t.rows().unwrap(), t.cols().unwrap()), (7, 12));
    /// assert_eq!(t.at(0, 1, 3).unwrap(), 1.0);
    /// assert_eq!(t.at(0, 0, 0).unwrap(), 0.0);
    /// ```
    pub fn padding(&mut self, pads: &[usize], value: f32) -> TensorResult<()> {
        self.ensure_allocated("padding")?;
        let &[top, bottom, left, right] = pads else {
            return Err(TensorError::invalid_argument(
                "pads",
                format!(
                    "expected 4 values [top, bottom, left, right], got {}",
                    pads.len()
                ),
            ));
        };

        let channels = self.data.n_slices();
        let rows = self.data.n_rows().checked_add(top).and_then(|n| n.checked_add(bottom));
        let cols = self.data.n_cols().checked_add(left).and_then(|n| n.checked_add(right));
        let (Some(rows), Some(cols)) = (rows, cols) else {
            return Err(TensorError::invalid_argument(
                "pads",
                format!("padding by {pads:?} overflows the tensor geometry"),
            ));
        };
        if shape_size(&[channels, rows, cols]).is_none() {
            return Err(TensorError::invalid_argument(
                "pads",
                format!("padded shape [{channels}, {rows}, {cols}] has too many elements"),
            ));
        }
        let mut padded = Cube::from_elem(rows, cols, channels, value);
        padded.assign_subcube(top, left, &self.data)?;

        let from = self.cube_shape();
        let to = [channels, rows, cols];
        tracing::debug!(from = ?from, to = ?to, "padding");
        self.data = padded;
        self.set_explicit_shape(&to);
        Ok(())
    }

    /// Apply `f` to every element in place
    ///
    /// Traversal order is unspecified, so `f` must not depend on it.
    pub fn transform<F>(&mut self, f: F) -> TensorResult<()>
    where
        F: Fn(f32) -> f32,
    {
        self.ensure_allocated("transform")?;
        self.data.transform(f);
        Ok(())
    }

    /// Log every channel matrix at `INFO` level
    pub fn show(&self) -> TensorResult<()> {
        let channels = self.channels()?;
        for channel in 0..channels {
            let matrix = self.slice(channel)?;
            tracing::info!(channel = channel, "\n{}", render_matrix(&matrix));
        }
        Ok(())
    }

    fn set_explicit_shape(&mut self, shape: &[usize]) {
        self.raw_shape = explicit_shape(shape);
    }
}

/// Write `values` (logical row-major) into `cube` (memory order).
fn write_row_major(cube: &mut Cube, values: &[f32]) {
    let layout: Layout = cube.layout();
    for (offset, dst) in cube.iter_mut().enumerate() {
        *dst = values[layout.logical_from_physical(offset)];
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Tensor(empty)");
        }
        writeln!(f, "Tensor {:?}", self.raw_shape.as_slice())?;
        write!(f, "{}", self.data)
    }
}
