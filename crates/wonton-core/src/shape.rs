//! Raw shapes and the rules that relate them to the 3D cube geometry.
//!
//! A tensor remembers the shape it was built or reshaped with (its *raw
//! shape*, 1 to 3 dimensions, most-significant first) separately from the
//! always-3D geometry of its cube. Two separate rules produce raw shapes:
//!
//! - [`normalize_shape`] is used at construction and drops leading size-1
//!   dimensions (channels first, then rows). Cols are never dropped.
//! - [`explicit_shape`] is used by reshape and padding and keeps the shape
//!   exactly as given.
//!
//! ```
//! use wonton_core::shape::{explicit_shape, normalize_shape};
//!
//! assert_eq!(normalize_shape([1, 3, 4]).as_slice(), &[3, 4]);
//! assert_eq!(explicit_shape(&[1, 3, 4]).as_slice(), &[1, 3, 4]);
//! ```

use crate::error::{TensorError, TensorResult};
use smallvec::SmallVec;

/// Highest rank a tensor can have
pub const MAX_RANK: usize = 3;

/// Raw shape storage. Never spills to the heap since rank is capped at 3.
pub type Shape = SmallVec<[usize; MAX_RANK]>;

/// Check that `shape` has 1 to 3 dimensions, none of them zero.
pub fn validate_shape(shape: &[usize]) -> TensorResult<()> {
    if shape.is_empty() || shape.len() > MAX_RANK {
        return Err(TensorError::invalid_shape(
            shape,
            format!("rank must be between 1 and {MAX_RANK}, got {}", shape.len()),
        ));
    }
    if shape.contains(&0) {
        return Err(TensorError::invalid_shape(
            shape,
            "dimensions must be positive",
        ));
    }
    Ok(())
}

/// Align `shape` to the least-significant end of `[channels, rows, cols]`,
/// filling missing leading slots with 1.
///
/// `shape` must already have passed [`validate_shape`].
pub fn expand_shape(shape: &[usize]) -> [usize; MAX_RANK] {
    let mut expanded = [1usize; MAX_RANK];
    let skip = MAX_RANK - shape.len().min(MAX_RANK);
    expanded[skip..].copy_from_slice(&shape[..MAX_RANK - skip]);
    expanded
}

/// Minimal raw shape for a freshly constructed tensor.
pub fn normalize_shape([channels, rows, cols]: [usize; MAX_RANK]) -> Shape {
    if channels == 1 && rows == 1 {
        SmallVec::from_slice(&[cols])
    } else if channels == 1 {
        SmallVec::from_slice(&[rows, cols])
    } else {
        SmallVec::from_slice(&[channels, rows, cols])
    }
}

/// Raw shape taken verbatim from the caller.
pub fn explicit_shape(shape: &[usize]) -> Shape {
    SmallVec::from_slice(shape)
}

/// Cube geometry `(n_rows, n_cols, n_slices)` of an expanded shape.
#[inline]
pub fn cube_dims([channels, rows, cols]: [usize; MAX_RANK]) -> (usize, usize, usize) {
    (rows, cols, channels)
}

/// Number of elements described by `shape`.
///
/// `None` if the count does not fit in `isize`, the largest array ndarray
/// can address.
#[inline]
pub fn shape_size(shape: &[usize]) -> Option<usize> {
    shape
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .filter(|&n| n <= isize::MAX as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rank() {
        assert!(validate_shape(&[4]).is_ok());
        assert!(validate_shape(&[3, 4]).is_ok());
        assert!(validate_shape(&[2, 3, 4]).is_ok());
        assert!(matches!(
            validate_shape(&[]),
            Err(TensorError::InvalidShape { .. })
        ));
        assert!(matches!(
            validate_shape(&[1, 2, 3, 4]),
            Err(TensorError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_dims() {
        assert!(matches!(
            validate_shape(&[3, 0]),
            Err(TensorError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_expand_aligns_to_cols() {
        assert_eq!(expand_shape(&[10]), [1, 1, 10]);
        assert_eq!(expand_shape(&[3, 4]), [1, 3, 4]);
        assert_eq!(expand_shape(&[2, 3, 4]), [2, 3, 4]);
    }

    #[test]
    fn test_normalize_collapses_leading_ones() {
        assert_eq!(normalize_shape([3, 4, 5]).as_slice(), &[3, 4, 5]);
        assert_eq!(normalize_shape([1, 3, 4]).as_slice(), &[3, 4]);
        assert_eq!(normalize_shape([1, 1, 10]).as_slice(), &[10]);
    }

    #[test]
    fn test_normalize_never_drops_cols() {
        assert_eq!(normalize_shape([1, 1, 1]).as_slice(), &[1]);
        assert_eq!(normalize_shape([1, 4, 1]).as_slice(), &[4, 1]);
        // rows == 1 only collapses together with channels == 1
        assert_eq!(normalize_shape([2, 1, 5]).as_slice(), &[2, 1, 5]);
    }

    #[test]
    fn test_explicit_keeps_ones() {
        assert_eq!(explicit_shape(&[1, 1, 24]).as_slice(), &[1, 1, 24]);
        assert_eq!(explicit_shape(&[24]).as_slice(), &[24]);
    }

    #[test]
    fn test_shape_size_is_checked() {
        assert_eq!(shape_size(&[2, 3, 4]), Some(24));
        assert_eq!(shape_size(&[7]), Some(7));
        assert_eq!(shape_size(&[usize::MAX, 2]), None);
        // wraps to 24 with unchecked arithmetic
        assert_eq!(shape_size(&[(1usize << (usize::BITS - 1)) + 12, 2]), None);
        assert_eq!(shape_size(&[isize::MAX as usize + 1]), None);
        assert_eq!(shape_size(&[isize::MAX as usize]), Some(isize::MAX as usize));
    }

    #[test]
    fn test_cube_dims_order() {
        assert_eq!(cube_dims([2, 3, 4]), (3, 4, 2));
        assert_eq!(cube_dims(expand_shape(&[12, 24])), (12, 24, 1));
    }
}
