//! # wonton-core
//!
//! A small dense `f32` tensor with at most three dimensions
//! (channels, rows, cols), for educational deep-learning style code.
//!
//! - **Tensor value type** ([`Tensor`]) with raw-shape bookkeeping
//! - **Dense 3D buffer** ([`Cube`]) with per-slice column-major storage
//! - **Row-major conversions** ([`layout::Layout`]) shared by fill, values and reshape
//! - **Shape rules** ([`shape`]) for construction and explicit reshapes
//!
//! ## Memory Layout
//!
//! The cube keeps each channel as a contiguous column-major matrix, channels
//! one after another. Logical row-major order (cols fastest) is what
//! `fill_values(_, true)`, `values(true)` and `reshape(_, true)` speak.
//!
//! ## Quick Start
//!
//! ```
//! use wonton_core::Tensor;
//!
//! let mut tensor = Tensor::new_3d(2, 3, 4).unwrap();
//! assert_eq!(tensor.shapes().unwrap(), [2, 3, 4]);
//!
//! let values: Vec<f32> = (1..=24).map(|x| x as f32).collect();
//! tensor.fill_values(&values, true).unwrap();
//! assert_eq!(tensor.at(1, 0, 0).unwrap(), 13.0);
//!
//! tensor.flatten(true).unwrap();
//! assert_eq!(tensor.raw_shapes().unwrap(), &[24]);
//! assert_eq!(tensor.values(true).unwrap(), values);
//! ```
//!
//! ## Raw Shapes
//!
//! Construction drops leading size-1 dimensions; reshape keeps exactly what
//! it is given:
//!
//! ```
//! use wonton_core::Tensor;
//!
//! let mut tensor = Tensor::new_3d(1, 1, 10).unwrap();
//! assert_eq!(tensor.raw_shapes().unwrap(), &[10]);
//! assert_eq!(tensor.shapes().unwrap(), [1, 1, 10]);
//!
//! tensor.reshape(&[1, 2, 5], true).unwrap();
//! assert_eq!(tensor.raw_shapes().unwrap(), &[1, 2, 5]);
//! ```
//!
//! ## Error Handling
//!
//! Operations return [`TensorResult`]. Preconditions are checked before any
//! state changes:
//!
//! ```
//! use wonton_core::{Tensor, TensorError};
//!
//! let mut tensor = Tensor::new_2d(2, 3).unwrap();
//! assert!(matches!(tensor.reshape(&[7], true), Err(TensorError::SizeMismatch { .. })));
//! assert!(matches!(Tensor::default().rows(), Err(TensorError::EmptyTensor { .. })));
//! assert_eq!(tensor.raw_shapes().unwrap(), &[2, 3]);
//! ```

#![warn(missing_docs)]

pub mod cube;
pub mod error;
pub mod layout;
pub mod shape;
pub mod tensor;
pub mod tracing_support;


pub use cube::Cube;
pub use error::{TensorError, TensorResult};
pub use shape::Shape;
pub use tensor::Tensor;
