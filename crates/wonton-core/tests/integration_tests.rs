//! Integration tests for wonton-core
//!
//! End-to-end scenarios through the public API: construction, fills,
//! reshape, flatten, padding and transform.

use wonton_core::tracing_support::{init_tracing, TracingConfig};
use wonton_core::{Tensor, TensorError};

fn sequential(n: usize) -> Vec<f32> {
    (1..=n).map(|x| x as f32).collect()
}

fn minus_one(value: f32) -> f32 {
    value - 1.0
}

/// Route `show()` output through the test harness; later calls are no-ops.
fn setup_logging() {
    let _ = init_tracing(TracingConfig::compact("wonton_core=info"));
}

#[test]
fn test_row_major_fill_repeats_rows() {
    let mut t = Tensor::new_3d(2, 2, 3).unwrap();
    let values = [3.0, 4.0, 5.0, 3.0, 4.0, 5.0, 3.0, 4.0, 5.0, 3.0, 4.0, 5.0];
    t.fill_values(&values, true).unwrap();

    for channel in 0..2 {
        let matrix = t.slice(channel).unwrap();
        for row in matrix.rows() {
            assert_eq!(row.to_vec(), vec![3.0, 4.0, 5.0]);
        }
    }
}

#[test]
fn test_scalar_and_vector_fill_share_shapes() {
    let mut t1 = Tensor::new_3d(1, 2, 3).unwrap();
    t1.fill(3.0).unwrap();
    assert_eq!(t1.index(0).unwrap(), 3.0);

    let mut t2 = Tensor::new_3d(1, 2, 3).unwrap();
    t2.fill_values(&[3.0, 2.0, 1.0, 1.0, 2.0, 3.0], true).unwrap();
    assert_eq!(t1.shapes().unwrap(), t2.shapes().unwrap());
    assert_eq!(t2.at(0, 0, 0).unwrap(), 3.0);
    assert_eq!(t2.at(0, 1, 0).unwrap(), 1.0);
}

#[test]
fn test_init_raw_shapes() {
    setup_logging();
    let cases: [((usize, usize, usize), &[usize]); 5] = [
        ((1, 1, 4), &[4]),
        ((1, 4, 4), &[4, 4]),
        ((2, 3, 4), &[2, 3, 4]),
        ((1, 2, 3), &[2, 3]),
        ((1, 1, 3), &[3]),
    ];
    for ((c, r, k), raw) in cases {
        let mut t = Tensor::new_3d(c, r, k).unwrap();
        t.fill(1.0).unwrap();
        assert_eq!(t.raw_shapes().unwrap(), raw);
        t.show().unwrap();
    }
}

#[test]
fn test_fill_then_reshape() -> anyhow::Result<()> {
    setup_logging();
    let mut t = Tensor::new_3d(2, 3, 4)?;
    let values = sequential(24);
    t.fill_values(&values, true)?;
    t.show()?;

    t.reshape(&[4, 3, 2], true)?;
    t.show()?;
    assert_eq!(t.shapes()?, [4, 3, 2]);
    assert_eq!(t.values(true)?, values);
    // row-major order continues across the new channel boundaries
    assert_eq!(t.at(1, 0, 0)?, 7.0);
    assert_eq!(t.at(3, 2, 1)?, 24.0);
    Ok(())
}

#[test]
fn test_transform_after_rand() {
    let mut t = Tensor::new_3d(2, 3, 4).unwrap();
    t.rand().unwrap();
    let before = t.values(false).unwrap();
    t.transform(minus_one).unwrap();
    let after = t.values(false).unwrap();
    for (b, a) in before.iter().zip(&after) {
        assert_eq!(*a, b - 1.0);
    }
}

#[test]
fn test_flatten_3d() {
    let mut t = Tensor::new_3d(2, 3, 4).unwrap();
    t.flatten(true).unwrap();
    assert_eq!(t.raw_shapes().unwrap(), &[24]);
}

#[test]
fn test_flatten_2d() {
    let mut t = Tensor::new_2d(12, 24).unwrap();
    t.flatten(true).unwrap();
    assert_eq!(t.raw_shapes().unwrap(), &[24 * 12]);
}

#[test]
fn test_padding_uneven() {
    let mut t = Tensor::new_3d(3, 4, 5).unwrap();
    t.fill(1.0).unwrap();
    t.padding(&[1, 2, 3, 4], 0.0).unwrap();
    assert_eq!(t.channels().unwrap(), 3);
    assert_eq!(t.rows().unwrap(), 7);
    assert_eq!(t.cols().unwrap(), 12);

    for c in 0..3 {
        for r in 0..7 {
            for k in 0..12 {
                let expected = if (1..=4).contains(&r) && (3..=7).contains(&k) {
                    1.0
                } else {
                    0.0
                };
                assert_eq!(t.at(c, r, k).unwrap(), expected, "at ({c}, {r}, {k})");
            }
        }
    }
}

#[test]
fn test_padding_even() {
    let mut t = Tensor::new_3d(3, 4, 5).unwrap();
    t.fill(1.0).unwrap();
    t.padding(&[2, 2, 2, 2], 2.5).unwrap();
    assert_eq!(t.rows().unwrap(), 8);
    assert_eq!(t.cols().unwrap(), 9);
    assert_eq!(t.raw_shapes().unwrap(), &[3, 8, 9]);

    for c in 0..3 {
        for r in 0..8 {
            for k in 0..9 {
                let expected = if (2..=5).contains(&r) && (2..=6).contains(&k) {
                    1.0
                } else {
                    2.5
                };
                assert_eq!(t.at(c, r, k).unwrap(), expected, "at ({c}, {r}, {k})");
            }
        }
    }
}

#[test]
fn test_errors_surface_through_public_api() {
    let mut t = Tensor::new_2d(2, 3).unwrap();
    assert!(matches!(
        t.fill_values(&[1.0; 5], true),
        Err(TensorError::SizeMismatch {
            expected: 6,
            got: 5
        })
    ));
    assert!(matches!(
        t.at(0, 2, 0),
        Err(TensorError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
        t.padding(&[1, 1], 0.0),
        Err(TensorError::InvalidArgument { .. })
    ));

    let err = Tensor::default().size().unwrap_err();
    assert!(err.to_string().contains("size"));
}

#[test]
fn test_display_shows_every_channel() {
    let mut t = Tensor::new_3d(2, 2, 2).unwrap();
    t.fill_values(&sequential(8), true).unwrap();
    let text = format!("{t}");
    assert!(text.contains("Channel: 0"));
    assert!(text.contains("Channel: 1"));
    assert!(text.contains("8.0000"));
}
