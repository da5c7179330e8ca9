//! # bitblend-ops
//!
//! Bitwise blending of two equally sized images.
//!
//! # Modules
//!
//! - [`operator`] - The `xor` / `or` / `and` registry and channel transforms
//! - [`factory`] - Output raster allocation matching the input color model
//! - [`blend`] - The pixel loop and the [`combine`] entry point
//! - `parallel` - Row-parallel engine (feature `parallel`, on by default)
//!
//! # Example
//!
//! ```rust
//! use bitblend_core::{ColorModel, Raster, Rgba};
//! use bitblend_ops::{combine, resolve};
//!
//! let a = Raster::filled(ColorModel::Nrgba8, 2, 2, Rgba::new(255, 0, 0, 255));
//! let b = Raster::filled(ColorModel::Nrgba8, 2, 2, Rgba::new(0, 255, 0, 255));
//!
//! let op = resolve("or")?;
//! let out = combine(&a, &b, op, true)?;
//! assert_eq!(out.rgba8(1, 1), Rgba::new(255, 255, 0, 255));
//! # Ok::<(), bitblend_ops::OpsError>(())
//! ```
//!
//! Every channel result keeps only the low 8 bits of the combined 16-bit
//! samples, so two opaque inputs XOR to a fully transparent alpha.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod blend;
pub mod factory;
pub mod operator;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use blend::{blend, combine};
pub use error::{OpsError, OpsResult};
pub use factory::allocate;
pub use operator::{resolve, Operator, Transform};
