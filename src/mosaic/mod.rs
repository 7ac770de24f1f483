/// Output raster and alpha compositing
pub mod canvas;
/// Source sampling into a coarse color grid
pub mod downsample;
/// Cell traversal producing the finished mosaic
pub mod renderer;
/// Tile collections and per-cell tile choice
pub mod selection;
/// Front/back ordering of overlapping tiles
pub mod stacking;
/// Multiplicative tile recoloring
pub mod tint;

pub use canvas::Canvas;
pub use downsample::{DownsampledGrid, downsample};
pub use renderer::{MosaicConfig, MosaicMode, MosaicRenderer, render_mosaic};
pub use selection::{TileSelection, TileSet};
pub use stacking::{FixedStacking, RandomStacking, ScriptedStacking, Stacking, StackingSource};
