//! Cell traversal tying sampling, tinting, selection and compositing together

use crate::io::configuration::MAX_CANVAS_DIMENSION;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::mosaic::canvas::Canvas;
use crate::mosaic::downsample::{Cell, DownsampledGrid, downsample};
use crate::mosaic::selection::{TileSelection, TileSet};
use crate::mosaic::stacking::{Stacking, StackingSource};
use crate::mosaic::tint::tint;
use image::RgbImage;

/// Tile selection and placement variant for one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MosaicMode {
    /// One tile for every cell
    Fixed,
    /// Tiles cycled in order, one per cell
    Sequential,
    /// Tiles cycled in order, enlarged by `scale` and randomly stacked
    Overlap {
        /// Tile enlargement factor, strictly greater than one
        scale: f32,
    },
}

/// Parameters controlling grid coarseness, tile size and mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MosaicConfig {
    /// Source pixels per grid cell along each axis
    pub pixel_size: u32,
    /// Output pixels per grid cell along each axis
    pub tile_size: u32,
    /// Selection and placement variant
    pub mode: MosaicMode,
}

impl MosaicConfig {
    /// Check every parameter before any image work starts
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `pixel_size` or `tile_size` is zero
    /// - The overlap scale is not a finite number greater than one
    /// - The enlarged tile edge exceeds the canvas dimension limit
    pub fn validate(&self) -> Result<()> {
        if self.pixel_size == 0 {
            return Err(invalid_parameter(
                "pixel_size",
                &self.pixel_size,
                &"must be a positive integer",
            ));
        }
        if self.tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &"must be a positive integer",
            ));
        }
        self.tile_edge().map(|_| ())
    }

    /// Edge length tiles are resized to before tinting
    ///
    /// `tile_size`, or `tile_size * scale` truncated to whole pixels in overlap mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the overlap scale is invalid or the enlarged edge
    /// exceeds [`MAX_CANVAS_DIMENSION`]
    pub fn tile_edge(&self) -> Result<u32> {
        match self.mode {
            MosaicMode::Fixed | MosaicMode::Sequential => Ok(self.tile_size),
            MosaicMode::Overlap { scale } => {
                if !scale.is_finite() || scale <= 1.0 {
                    return Err(invalid_parameter(
                        "overlap_scale",
                        &scale,
                        &"must be a finite number greater than 1",
                    ));
                }
                let edge = (f64::from(self.tile_size) * f64::from(scale)).floor();
                if edge > f64::from(MAX_CANVAS_DIMENSION) {
                    // Saturating cast: the edge may not even fit in u64
                    let side = edge as u64;
                    return Err(MosaicError::CanvasTooLarge {
                        width: side,
                        height: side,
                        limit: MAX_CANVAS_DIMENSION,
                    });
                }
                Ok(edge as u32)
            }
        }
    }

    /// Tile selection policy implied by the mode
    pub const fn selection(&self) -> TileSelection {
        match self.mode {
            MosaicMode::Fixed => TileSelection::Fixed,
            MosaicMode::Sequential | MosaicMode::Overlap { .. } => TileSelection::RoundRobin,
        }
    }

    /// Whether tiles are randomly stacked rather than always painted on top
    pub const fn is_overlap(&self) -> bool {
        matches!(self.mode, MosaicMode::Overlap { .. })
    }
}

/// Top-left canvas position of the tile for cell (`x`, `y`)
///
/// Tiles larger than `tile_size` are centered over their nominal cell, so the
/// origin moves up and left by half the excess (rounded down).
pub fn placement_origin(x: u32, y: u32, tile_size: u32, edge: u32) -> (i64, i64) {
    let offset = i64::from(edge.saturating_sub(tile_size)) / 2;
    let size = i64::from(tile_size);
    (i64::from(x) * size - offset, i64::from(y) * size - offset)
}

/// Renders a mosaic one grid row at a time
///
/// The tile set is borrowed, so one loaded set serves any number of runs.
pub struct MosaicRenderer<'a, S> {
    config: MosaicConfig,
    grid: DownsampledGrid,
    tiles: &'a TileSet,
    canvas: Canvas,
    stacking: S,
    next_row: u32,
    ordinal: usize,
}

impl<'a, S: StackingSource> MosaicRenderer<'a, S> {
    /// Prepare a run over `source` with already resized `tiles`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The tiles do not have the edge length the configuration requires
    /// - The canvas would exceed the allocation limit
    pub fn new(
        config: MosaicConfig,
        source: &RgbImage,
        tiles: &'a TileSet,
        stacking: S,
    ) -> Result<Self> {
        config.validate()?;
        let grid = downsample(source, config.pixel_size)?;
        Self::from_grid(config, grid, tiles, stacking)
    }

    /// Prepare a run over an already sampled grid
    ///
    /// # Errors
    ///
    /// Same conditions as [`MosaicRenderer::new`]
    pub fn from_grid(
        config: MosaicConfig,
        grid: DownsampledGrid,
        tiles: &'a TileSet,
        stacking: S,
    ) -> Result<Self> {
        config.validate()?;
        let edge = config.tile_edge()?;
        if tiles.edge() != edge {
            return Err(invalid_parameter(
                "tiles",
                &format!("{0}x{0}", tiles.edge()),
                &format!("tiles must be resized to {edge}x{edge}"),
            ));
        }

        let canvas = Canvas::for_grid(grid.width(), grid.height(), config.tile_size)?;

        Ok(Self {
            config,
            grid,
            tiles,
            canvas,
            stacking,
            next_row: 0,
            ordinal: 0,
        })
    }

    /// Sampled cell grid
    pub const fn grid(&self) -> &DownsampledGrid {
        &self.grid
    }

    /// Canvas in its current, possibly partial, state
    pub const fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Number of grid rows to render
    pub fn rows(&self) -> u32 {
        self.grid.height()
    }

    /// Number of grid rows rendered so far
    pub const fn rows_rendered(&self) -> u32 {
        self.next_row
    }

    /// Render the next grid row
    ///
    /// Returns whether rows remain afterwards.
    pub fn render_row(&mut self) -> bool {
        if self.next_row >= self.grid.height() {
            return false;
        }

        let cells: Vec<Cell> = self.grid.row(self.next_row).collect();
        for cell in cells {
            self.render_cell(cell);
        }

        self.next_row += 1;
        self.next_row < self.grid.height()
    }

    /// Render all remaining rows and return the finished canvas
    pub fn render(mut self) -> Canvas {
        while self.render_row() {}
        self.canvas
    }

    /// Stop rendering and return the canvas as it is
    pub fn finish(self) -> Canvas {
        self.canvas
    }

    fn render_cell(&mut self, cell: Cell) {
        let index = self
            .config
            .selection()
            .index_for(self.ordinal, self.tiles.len());
        self.ordinal += 1;

        let tinted = tint(self.tiles.get_wrapped(index), cell.color);
        let (x, y) = placement_origin(cell.x, cell.y, self.config.tile_size, self.tiles.edge());

        let stacking = if self.config.is_overlap() {
            self.stacking.next_stacking()
        } else {
            Stacking::OnTop
        };
        self.canvas.place(&tinted, x, y, stacking);
    }
}

/// Render a complete mosaic in one call
///
/// # Errors
///
/// Returns an error under the same conditions as [`MosaicRenderer::new`]
pub fn render_mosaic<S: StackingSource>(
    config: MosaicConfig,
    source: &RgbImage,
    tiles: &TileSet,
    stacking: S,
) -> Result<Canvas> {
    Ok(MosaicRenderer::new(config, source, tiles, stacking)?.render())
}
