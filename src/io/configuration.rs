//! Mosaic constants and runtime configuration defaults

use image::imageops::FilterType;

// Default values for configurable parameters
/// Source pixels collapsed into one grid cell along each axis
pub const DEFAULT_PIXEL_SIZE: u32 = 40;
/// Edge length of one rendered tile in output pixels
pub const DEFAULT_TILE_SIZE: u32 = 20;
/// Overlap scale used when `--overlap` is given without a value
pub const DEFAULT_OVERLAP_SCALE: f32 = 1.5;

// Resampling
/// Filter used to reduce the source image to the cell grid
pub const GRID_FILTER: FilterType = FilterType::Triangle;
/// Filter used to bring tile images to their rendered edge length
pub const TILE_FILTER: FilterType = FilterType::CatmullRom;

/// Probability that an overlapping tile is drawn above the canvas
pub const ON_TOP_PROBABILITY: f64 = 0.5;

// Safety limit to prevent excessive memory allocation
/// Maximum canvas edge length in pixels
pub const MAX_CANVAS_DIMENSION: u32 = 50_000;

// Input filtering
/// File extensions accepted as tile and source images (compared case-insensitively)
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_mosaic";
/// Extension of rendered mosaics; the canvas carries alpha so PNG is used
pub const OUTPUT_EXTENSION: &str = "png";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;
