//! Basic tensor creation and manipulation examples.
//!
//! This example walks through the core functionality of wonton-core:
//! - Creating tensors and reading their shapes
//! - Filling in row-major and memory order
//! - Reshaping, flattening and padding
//! - Logging channel matrices with `show`
//!
//! Run with:
//! ```bash
//! RUST_LOG=wonton_core=debug cargo run --example basic_tensor
//! ```

use anyhow::Result;
use wonton_core::tracing_support::{init_tracing, TracingConfig};
use wonton_core::Tensor;

fn main() -> Result<()> {
    init_tracing(TracingConfig::default())?;

    println!("=== wonton-core: Basic Tensor Examples ===\n");

    // Example 1: Construction and raw shapes
    example_creation()?;

    // Example 2: Element order
    example_fill_order()?;

    // Example 3: Reshape and flatten
    example_reshape()?;

    // Example 4: Padding
    example_padding()?;

    // Example 5: Random init and transform
    example_transform()?;

    println!("\n=== All examples completed successfully! ===");
    Ok(())
}

fn example_creation() -> Result<()> {
    println!("--- Example 1: Tensor Creation ---");

    for (c, r, k) in [(1, 1, 10), (1, 3, 4), (3, 4, 5)] {
        let tensor = Tensor::new_3d(c, r, k)?;
        println!(
            "new_3d({c}, {r}, {k}): shapes {:?}, raw shapes {:?}, size {}",
            tensor.shapes()?,
            tensor.raw_shapes()?,
            tensor.size()?
        );
    }

    let empty = Tensor::default();
    println!("Default tensor is empty? {}", empty.is_empty());
    if let Err(e) = empty.size() {
        println!("  size() on it: {e}");
    }

    println!();
    Ok(())
}

fn example_fill_order() -> Result<()> {
    println!("--- Example 2: Row-major vs Memory Order ---");

    let values: Vec<f32> = (1..=6).map(|x| x as f32).collect();

    let mut row_major = Tensor::new_2d(2, 3)?;
    row_major.fill_values(&values, true)?;
    println!("fill_values(1..=6, row_major = true):\n{row_major}");
    println!("  memory order: {:?}", row_major.values(false)?);

    let mut memory = Tensor::new_2d(2, 3)?;
    memory.fill_values(&values, false)?;
    println!("fill_values(1..=6, row_major = false):\n{memory}");
    println!("  row-major order: {:?}", memory.values(true)?);

    println!();
    Ok(())
}

fn example_reshape() -> Result<()> {
    println!("--- Example 3: Reshape and Flatten ---");

    let mut tensor = Tensor::new_3d(2, 3, 4)?;
    let values: Vec<f32> = (1..=24).map(|x| x as f32).collect();
    tensor.fill_values(&values, true)?;
    tensor.show()?;

    tensor.reshape(&[4, 3, 2], true)?;
    println!("After reshape to [4, 3, 2]: raw shapes {:?}", tensor.raw_shapes()?);
    tensor.show()?;

    tensor.flatten(true)?;
    println!("After flatten: raw shapes {:?}", tensor.raw_shapes()?);
    println!("  values preserved? {}", tensor.values(true)? == values);

    if let Err(e) = tensor.reshape(&[5, 5], true) {
        println!("  reshape to [5, 5]: {e}");
    }

    println!();
    Ok(())
}

fn example_padding() -> Result<()> {
    println!("--- Example 4: Padding ---");

    let mut tensor = Tensor::new_3d(2, 2, 3)?;
    tensor.ones()?;
    tensor.padding(&[1, 1, 2, 2], 0.0)?;
    println!(
        "2x2x3 ones padded by [1, 1, 2, 2]: shapes {:?}",
        tensor.shapes()?
    );
    println!("{tensor}");

    println!();
    Ok(())
}

fn example_transform() -> Result<()> {
    println!("--- Example 5: Random Init and Transform ---");

    let mut tensor = Tensor::new_2d(3, 3)?;
    tensor.rand()?;
    println!("Standard normal samples:\n{tensor}");

    tensor.transform(|x| x.max(0.0))?;
    println!("After ReLU:\n{tensor}");

    println!();
    Ok(())
}
