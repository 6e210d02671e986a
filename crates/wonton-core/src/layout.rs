//! Mapping between logical row-major order and the cube's physical order.
//!
//! The cube stores each channel as a column-major `(rows, cols)` matrix and
//! places channels one after another. For an element `(channel, row, col)`:
//!
//! ```text
//! logical  (row-major) = channel * rows * cols + row * cols + col
//! physical (cube)      = channel * rows * cols + col * rows + row
//! ```
//!
//! Both orders keep channels contiguous, so the conversion only ever
//! transposes inside one channel plane. `fill` and `values` both go through
//! this single mapping.
//!
//! ```
//! use wonton_core::layout::Layout;
//!
//! let layout = Layout::new(2, 3, 1);
//! assert_eq!(layout.logical_index(0, 1, 0), 3);
//! assert_eq!(layout.physical_offset(0, 1, 0), 1);
//! assert_eq!(layout.logical_from_physical(1), 3);
//! ```

/// Cube geometry used to translate between element orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    rows: usize,
    cols: usize,
    channels: usize,
}

impl Layout {
    /// Layout of a cube with `(rows, cols, channels)` geometry
    pub fn new(rows: usize, cols: usize, channels: usize) -> Self {
        Self {
            rows,
            cols,
            channels,
        }
    }

    /// Elements in one channel plane
    #[inline]
    pub fn plane(&self) -> usize {
        self.rows * self.cols
    }

    /// Total number of elements
    #[inline]
    pub fn size(&self) -> usize {
        self.plane() * self.channels
    }

    /// Row-major flat index of `(channel, row, col)`
    #[inline]
    pub fn logical_index(&self, channel: usize, row: usize, col: usize) -> usize {
        debug_assert!(channel < self.channels && row < self.rows && col < self.cols);
        channel * self.plane() + row * self.cols + col
    }

    /// Offset of `(channel, row, col)` in cube memory
    #[inline]
    pub fn physical_offset(&self, channel: usize, row: usize, col: usize) -> usize {
        debug_assert!(channel < self.channels && row < self.rows && col < self.cols);
        channel * self.plane() + col * self.rows + row
    }

    /// `(channel, row, col)` at a row-major flat index
    #[inline]
    pub fn coords_from_logical(&self, index: usize) -> (usize, usize, usize) {
        debug_assert!(index < self.size());
        let plane = self.plane();
        let within = index % plane;
        (index / plane, within / self.cols, within % self.cols)
    }

    /// `(channel, row, col)` at a cube memory offset
    #[inline]
    pub fn coords_from_physical(&self, offset: usize) -> (usize, usize, usize) {
        debug_assert!(offset < self.size());
        let plane = self.plane();
        let within = offset % plane;
        (offset / plane, within % self.rows, within / self.rows)
    }

    /// Row-major index of the element stored at `offset`
    #[inline]
    pub fn logical_from_physical(&self, offset: usize) -> usize {
        let (channel, row, col) = self.coords_from_physical(offset);
        self.logical_index(channel, row, col)
    }

    /// Memory offset of the element at row-major `index`
    #[inline]
    pub fn physical_from_logical(&self, index: usize) -> usize {
        let (channel, row, col) = self.coords_from_logical(index);
        self.physical_offset(channel, row, col)
    }
}
