//! The dense 3D `f32` buffer behind every tensor.
//!
//! [`Cube`] is a thin adapter over scirs2_core's ndarray. It stores its
//! geometry as `(n_rows, n_cols, n_slices)` and keeps each slice as a
//! contiguous column-major `(n_rows, n_cols)` matrix, slices laid out one
//! after another. Internally the array axes are `(slice, col, row)` in
//! standard order, which gives exactly that memory layout.
//!
//! The cube knows nothing about raw shapes; it only offers allocation,
//! element and slice access, fill, transform, sub-region assignment and
//! memory-order reinterpretation.
//!
//! # Examples
//!
//! ```
//! use wonton_core::Cube;
//!
//! let mut cube = Cube::zeros(2, 3, 1);
//! *cube.get_mut(1, 0, 0).unwrap() = 5.0;
//!
//! // (row 1, col 0) is the second element in memory
//! let memory: Vec<f32> = cube.iter().copied().collect();
//! assert_eq!(memory, vec![0.0, 5.0, 0.0, 0.0, 0.0, 0.0]);
//! ```

use crate::error::{TensorError, TensorResult};
use crate::layout::Layout;
use crate::shape::shape_size;
use scirs2_core::ndarray_ext::{s, Array3, ArrayView2, ArrayViewMut2, Axis};
use std::fmt;

/// Dense 3D buffer of `f32` with per-slice column-major storage
#[derive(Clone, Default, PartialEq)]
pub struct Cube {
    /// Axes are (slice, col, row)
    data: Array3<f32>,
}

impl Cube {
    /// Allocate a zero-filled cube
    ///
    /// # Panics
    ///
    /// If the element count overflows `isize`. [`Tensor`](crate::Tensor)
    /// constructors check this first.
    pub fn zeros(n_rows: usize, n_cols: usize, n_slices: usize) -> Self {
        Self {
            data: Array3::zeros((n_slices, n_cols, n_rows)),
        }
    }

    /// Allocate a cube with every element set to `value`
    pub fn from_elem(n_rows: usize, n_cols: usize, n_slices: usize, value: f32) -> Self {
        Self {
            data: Array3::from_elem((n_slices, n_cols, n_rows), value),
        }
    }

    /// Build a cube from values already in memory order
    /// (slice by slice, column-major within a slice).
    ///
    /// # Examples
    ///
    /// ```
    /// use wonton_core::Cube;
    ///
    /// let cube = Cube::from_memory_order(2, 2, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(cube.get(0, 1, 0), Some(3.0));
    /// assert!(Cube::from_memory_order(2, 2, 1, vec![1.0]).is_err());
    /// ```
    pub fn from_memory_order(
        n_rows: usize,
        n_cols: usize,
        n_slices: usize,
        values: Vec<f32>,
    ) -> TensorResult<Self> {
        let expected = shape_size(&[n_slices, n_rows, n_cols]).ok_or_else(|| {
            TensorError::invalid_shape(&[n_slices, n_rows, n_cols], "element count overflows")
        })?;
        if values.len() != expected {
            return Err(TensorError::size_mismatch(expected, values.len()));
        }
        let data = Array3::from_shape_vec((n_slices, n_cols, n_rows), values).map_err(|e| {
            TensorError::invalid_shape(&[n_slices, n_rows, n_cols], e.to_string())
        })?;
        Ok(Self { data })
    }

    /// Rows per slice
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.data.dim().2
    }

    /// Columns per slice
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.data.dim().1
    }

    /// Number of slices
    #[inline]
    pub fn n_slices(&self) -> usize {
        self.data.dim().0
    }

    /// Total number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the cube holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Geometry as a [`Layout`]
    #[inline]
    pub fn layout(&self) -> Layout {
        Layout::new(self.n_rows(), self.n_cols(), self.n_slices())
    }

    /// Element at `(row, col, slice)`
    #[inline]
    pub fn get(&self, row: usize, col: usize, slice: usize) -> Option<f32> {
        self.data.get([slice, col, row]).copied()
    }

    /// Mutable element at `(row, col, slice)`
    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize, slice: usize) -> Option<&mut f32> {
        self.data.get_mut([slice, col, row])
    }

    /// Element at a flat memory offset
    pub fn get_linear(&self, offset: usize) -> Option<f32> {
        if offset >= self.len() {
            return None;
        }
        let (slice, row, col) = self.layout().coords_from_physical(offset);
        self.get(row, col, slice)
    }

    /// Mutable element at a flat memory offset
    pub fn get_linear_mut(&mut self, offset: usize) -> Option<&mut f32> {
        if offset >= self.len() {
            return None;
        }
        let (slice, row, col) = self.layout().coords_from_physical(offset);
        self.get_mut(row, col, slice)
    }

    /// `(n_rows, n_cols)` view of one slice
    pub fn slice(&self, slice: usize) -> Option<ArrayView2<'_, f32>> {
        (slice < self.n_slices()).then(|| self.data.index_axis(Axis(0), slice).reversed_axes())
    }

    /// Mutable `(n_rows, n_cols)` view of one slice
    pub fn slice_mut(&mut self, slice: usize) -> Option<ArrayViewMut2<'_, f32>> {
        if slice >= self.n_slices() {
            return None;
        }
        Some(self.data.index_axis_mut(Axis(0), slice).reversed_axes())
    }

    /// Iterate elements in memory order
    pub fn iter(&self) -> impl Iterator<Item = &f32> + '_ {
        self.data.iter()
    }

    /// Iterate elements mutably in memory order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut f32> + '_ {
        self.data.iter_mut()
    }

    /// Set every element to `value`
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Apply `f` to every element in place
    pub fn transform<F>(&mut self, f: F)
    where
        F: Fn(f32) -> f32,
    {
        self.data.mapv_inplace(f);
    }

    /// Fill with samples from the standard normal distribution
    ///
    /// Uses scirs2_core::random for RNG (Box-Muller transform)
    pub fn randn(&mut self) {
        use scirs2_core::random::quick::random_f64;
        self.data.mapv_inplace(|_| {
            // 1 - u keeps the log argument in (0, 1]
            let u1 = 1.0 - random_f64();
            let u2 = random_f64();
            let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
            z as f32
        });
    }

    /// Copy `src` into the region starting at `(row, col, 0)`.
    ///
    /// `src` must have the same number of slices and fit inside `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wonton_core::Cube;
    ///
    /// let mut dst = Cube::zeros(4, 4, 1);
    /// let src = Cube::from_elem(2, 2, 1, 1.0);
    /// dst.assign_subcube(1, 2, &src).unwrap();
    /// assert_eq!(dst.get(1, 2, 0), Some(1.0));
    /// assert_eq!(dst.get(2, 3, 0), Some(1.0));
    /// assert_eq!(dst.get(0, 0, 0), Some(0.0));
    /// ```
    pub fn assign_subcube(&mut self, row: usize, col: usize, src: &Cube) -> TensorResult<()> {
        let bounds = [self.n_slices(), self.n_rows(), self.n_cols()];
        let (Some(row_end), Some(col_end)) =
            (row.checked_add(src.n_rows()), col.checked_add(src.n_cols()))
        else {
            return Err(TensorError::out_of_range(&[src.n_slices(), row, col], &bounds));
        };
        if src.n_slices() != self.n_slices() || row_end > self.n_rows() || col_end > self.n_cols()
        {
            return Err(TensorError::out_of_range(
                &[src.n_slices(), row_end, col_end],
                &bounds,
            ));
        }
        self.data
            .slice_mut(s![.., col..col_end, row..row_end])
            .assign(&src.data);
        Ok(())
    }

    /// Reinterpret the same memory under a new geometry.
    ///
    /// Elements keep their memory order; only the `(rows, cols, slices)`
    /// split changes.
    pub(crate) fn reshaped(
        &self,
        n_rows: usize,
        n_cols: usize,
        n_slices: usize,
    ) -> TensorResult<Self> {
        // an overflowing count can never match, so saturate it
        let expected = shape_size(&[n_slices, n_rows, n_cols]).unwrap_or(usize::MAX);
        if expected != self.len() {
            return Err(TensorError::size_mismatch(self.len(), expected));
        }
        let data = match self.data.view().into_shape_with_order((n_slices, n_cols, n_rows)) {
            Ok(view) => view.to_owned(),
            // Not contiguous: copy out in memory order instead
            Err(_) => {
                let flat: Vec<f32> = self.data.iter().copied().collect();
                Array3::from_shape_vec((n_slices, n_cols, n_rows), flat).map_err(|e| {
                    TensorError::invalid_shape(&[n_slices, n_rows, n_cols], e.to_string())
                })?
            }
        };
        Ok(Self { data })
    }
}

/// Render a `(rows, cols)` matrix one row per line.
pub(crate) fn render_matrix(matrix: &ArrayView2<'_, f32>) -> String {
    let mut out = String::new();
    for row in matrix.rows() {
        for value in row.iter() {
            out.push_str(&format!("{value:>10.4}"));
        }
        out.push('\n');
    }
    out
}

impl fmt::Debug for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cube")
            .field("n_rows", &self.n_rows())
            .field("n_cols", &self.n_cols())
            .field("n_slices", &self.n_slices())
            .finish()
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slice in 0..self.n_slices() {
            if let Some(matrix) = self.slice(slice) {
                writeln!(f, "Channel: {slice}")?;
                write!(f, "{}", render_matrix(&matrix))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry() {
        let cube = Cube::zeros(3, 4, 2);
        assert_eq!(cube.n_rows(), 3);
        assert_eq!(cube.n_cols(), 4);
        assert_eq!(cube.n_slices(), 2);
        assert_eq!(cube.len(), 24);
        assert!(!cube.is_empty());
        assert!(Cube::default().is_empty());
    }

    #[test]
    fn test_memory_order_is_column_major_per_slice() {
        let values: Vec<f32> = (0..12).map(|x| x as f32).collect();
        let cube = Cube::from_memory_order(2, 3, 2, values).unwrap();
        // slice 0: column 0 = [0, 1], column 1 = [2, 3], column 2 = [4, 5]
        assert_eq!(cube.get(0, 0, 0), Some(0.0));
        assert_eq!(cube.get(1, 0, 0), Some(1.0));
        assert_eq!(cube.get(0, 1, 0), Some(2.0));
        assert_eq!(cube.get(1, 2, 0), Some(5.0));
        assert_eq!(cube.get(0, 0, 1), Some(6.0));
        for offset in 0..12 {
            assert_eq!(cube.get_linear(offset), Some(offset as f32));
        }
        assert_eq!(cube.get_linear(12), None);
    }

    #[test]
    fn test_slice_view_is_rows_by_cols() {
        let values: Vec<f32> = (0..12).map(|x| x as f32).collect();
        let cube = Cube::from_memory_order(2, 3, 2, values).unwrap();
        let second = cube.slice(1).unwrap();
        assert_eq!(second.dim(), (2, 3));
        assert_eq!(second[[0, 0]], 6.0);
        assert_eq!(second[[1, 0]], 7.0);
        assert_eq!(second[[0, 1]], 8.0);
        assert!(cube.slice(2).is_none());
    }

    #[test]
    fn test_slice_mut_writes_through() {
        let mut cube = Cube::zeros(2, 2, 2);
        cube.slice_mut(1).unwrap().fill(3.0);
        assert_eq!(cube.get(1, 1, 1), Some(3.0));
        assert_eq!(cube.get(1, 1, 0), Some(0.0));
    }

    #[test]
    fn test_reshaped_keeps_memory_order() {
        let values: Vec<f32> = (0..24).map(|x| x as f32).collect();
        let cube = Cube::from_memory_order(3, 4, 2, values.clone()).unwrap();
        let reshaped = cube.reshaped(1, 24, 1).unwrap();
        assert_eq!(reshaped.n_cols(), 24);
        let memory: Vec<f32> = reshaped.iter().copied().collect();
        assert_eq!(memory, values);
        assert!(cube.reshaped(5, 5, 1).is_err());
    }

    #[test]
    fn test_assign_subcube_bounds() {
        let mut dst = Cube::zeros(3, 3, 2);
        let src = Cube::from_elem(2, 2, 2, 1.0);
        assert!(dst.assign_subcube(1, 1, &src).is_ok());
        assert!(dst.assign_subcube(2, 0, &src).is_err());
        let wrong_slices = Cube::from_elem(1, 1, 1, 1.0);
        assert!(dst.assign_subcube(0, 0, &wrong_slices).is_err());
    }

    #[test]
    fn test_overflowing_geometry_is_an_error() {
        let cube = Cube::zeros(2, 3, 4);
        assert_eq!(
            cube.reshaped(usize::MAX, 2, 1),
            Err(TensorError::size_mismatch(24, usize::MAX))
        );
        assert!(matches!(
            Cube::from_memory_order(usize::MAX, 2, 1, vec![0.0; 2]),
            Err(TensorError::InvalidShape { .. })
        ));

        let mut dst = Cube::zeros(3, 3, 1);
        let src = Cube::from_elem(2, 2, 1, 1.0);
        assert!(matches!(
            dst.assign_subcube(usize::MAX, 0, &src),
            Err(TensorError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            dst.assign_subcube(0, usize::MAX - 1, &src),
            Err(TensorError::IndexOutOfRange { .. })
        ));
        assert!(dst.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_transform_and_fill() {
        let mut cube = Cube::from_elem(2, 2, 1, 2.0);
        cube.transform(|x| x * x);
        assert!(cube.iter().all(|&x| x == 4.0));
        cube.fill(-1.0);
        assert!(cube.iter().all(|&x| x == -1.0));
    }

    #[test]
    fn test_randn_is_finite() {
        let mut cube = Cube::zeros(8, 8, 2);
        cube.randn();
        assert!(cube.iter().all(|x| x.is_finite()));
        assert!(cube.iter().any(|&x| x != 0.0));
    }

    #[test]
    fn test_display_lists_channels() {
        let cube = Cube::from_elem(1, 2, 2, 1.0);
        let text = cube.to_string();
        assert!(text.contains("Channel: 0"));
        assert!(text.contains("Channel: 1"));
    }
}
