//! Reduction of the source photograph to one representative color per mosaic cell

use crate::io::configuration::GRID_FILTER;
use crate::io::error::{Result, invalid_parameter};
use image::{Rgb, RgbImage, imageops};

/// Coarse color grid with one cell per rendered tile
#[derive(Debug, Clone)]
pub struct DownsampledGrid {
    cells: RgbImage,
}

/// One grid cell visited during traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Column in the grid
    pub x: u32,
    /// Row in the grid
    pub y: u32,
    /// Sampled color of the source region behind this cell
    pub color: Rgb<u8>,
}

/// Grid size for a source of `width` x `height` pixels
///
/// Floor division clamped to at least one cell per axis.
///
/// # Errors
///
/// Returns an error if `pixel_size` is zero
pub fn grid_dimensions(width: u32, height: u32, pixel_size: u32) -> Result<(u32, u32)> {
    if pixel_size == 0 {
        return Err(invalid_parameter(
            "pixel_size",
            &pixel_size,
            &"must be a positive integer",
        ));
    }

    Ok(((width / pixel_size).max(1), (height / pixel_size).max(1)))
}

/// Downsample `source` with a bilinear filter so each cell blends its source region
///
/// # Errors
///
/// Returns an error if `pixel_size` is zero
pub fn downsample(source: &RgbImage, pixel_size: u32) -> Result<DownsampledGrid> {
    let (grid_width, grid_height) = grid_dimensions(source.width(), source.height(), pixel_size)?;
    let cells = imageops::resize(source, grid_width, grid_height, GRID_FILTER);

    Ok(DownsampledGrid { cells })
}

impl DownsampledGrid {
    /// Wrap an already sampled color grid
    ///
    /// # Errors
    ///
    /// Returns an error if the grid has no cells
    pub fn from_cells(cells: RgbImage) -> Result<Self> {
        if cells.width() == 0 || cells.height() == 0 {
            return Err(invalid_parameter(
                "grid",
                &format!("{}x{}", cells.width(), cells.height()),
                &"grid must contain at least one cell",
            ));
        }
        Ok(Self { cells })
    }

    /// Number of columns
    pub fn width(&self) -> u32 {
        self.cells.width()
    }

    /// Number of rows
    pub fn height(&self) -> u32 {
        self.cells.height()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Always false for a constructed grid, kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Color of the cell at (`x`, `y`), if inside the grid
    pub fn color(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        self.cells.get_pixel_checked(x, y).copied()
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: u32) -> impl Iterator<Item = Cell> + '_ {
        (0..self.width()).filter_map(move |x| self.color(x, y).map(|color| Cell { x, y, color }))
    }

    /// All cells in row-major order, top-left first
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells
            .enumerate_pixels()
            .map(|(x, y, color)| Cell { x, y, color: *color })
    }
}
