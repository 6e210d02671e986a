//! # wonton - Small Dense Tensors
//!
//! A 3D `f32` tensor (channels, rows, cols) for educational deep-learning
//! style code: construction, element access, row-major fills, reshape,
//! flatten, padding and elementwise transforms.
//!
//! This is the **meta crate** that re-exports the wonton components for
//! convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use wonton::prelude::*;
//!
//! let mut tensor = Tensor::new_3d(2, 3, 4)?;
//! tensor.fill(1.0)?;
//! tensor.padding(&[1, 1, 1, 1], 0.0)?;
//! assert_eq!(tensor.shapes()?, [2, 5, 6]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Core Tensor Operations ([`core`])
//!
//! The [`Tensor`](crate::core::Tensor) value type, the [`Cube`](crate::core::Cube)
//! buffer behind it, and the shape and layout rules that connect them.
//!
//! ```
//! use wonton::core::Tensor;
//!
//! let mut tensor = Tensor::new_2d(3, 4).unwrap();
//! tensor.flatten(true).unwrap();
//! assert_eq!(tensor.raw_shapes().unwrap(), &[12]);
//! ```
//!
//! ### Logging ([`core::tracing_support`])
//!
//! Tensor operations emit `tracing` events. Install a subscriber to see them:
//!
//! ```no_run
//! use wonton::core::tracing_support::{init_tracing, TracingConfig};
//!
//! init_tracing(TracingConfig::default()).unwrap();
//! ```

#![deny(warnings)]

pub use wonton_core as core;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use wonton::prelude::*;
    //!
    //! let tensor = Tensor::new_1d(10).unwrap();
    //! assert_eq!(tensor.size().unwrap(), 10);
    //! ```

    // Core types
    pub use crate::core::{Cube, Shape, Tensor, TensorError, TensorResult};

    // Logging
    pub use crate::core::tracing_support::{init_tracing, TracingConfig, TracingFormat};
}
