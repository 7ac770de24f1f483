//! Mosaics of tinted tiles built from downsampled photographs
//!
//! A source image is reduced to a coarse grid of representative colors. Every grid
//! cell is rendered as a copy of a decorative tile multiplied by that cell's color
//! and composited onto a transparent canvas, optionally with enlarged tiles stacked
//! in random order.

#![forbid(unsafe_code)]

/// Input/output operations, configuration and error handling
pub mod io;
/// Grid sampling, tile tinting, selection and canvas compositing
pub mod mosaic;

pub use io::error::{MosaicError, Result};
