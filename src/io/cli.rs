//! Command-line interface for rendering one image or a directory of images

use crate::io::configuration::{
    DEFAULT_OVERLAP_SCALE, DEFAULT_PIXEL_SIZE, DEFAULT_TILE_SIZE, OUTPUT_EXTENSION, OUTPUT_SUFFIX,
};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image::{
    TileSource, has_image_extension, list_images, load_source, load_tile_set, save_canvas,
};
use crate::io::progress::ProgressManager;
use crate::mosaic::renderer::{MosaicConfig, MosaicMode, MosaicRenderer};
use crate::mosaic::selection::TileSet;
use crate::mosaic::stacking::RandomStacking;
use clap::Parser;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "tintmosaic")]
#[command(
    author,
    version,
    about = "Render photographs as mosaics of tinted tiles"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Source image or directory of source images
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Tile image, or a directory of tiles used in round-robin order
    #[arg(short, long, value_name = "TILES")]
    pub tiles: PathBuf,

    /// Output image (or output directory when TARGET is a directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Source pixels collapsed into one mosaic cell
    #[arg(short, long, default_value_t = DEFAULT_PIXEL_SIZE)]
    pub pixel_size: u32,

    /// Edge length of each rendered tile in pixels
    #[arg(short = 'T', long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: u32,

    /// Enlarge tiles by SCALE (default 1.5) and stack them in random order
    #[arg(short = 'l', long, value_name = "SCALE")]
    pub overlap: Option<Option<f32>>,

    /// Seed for reproducible overlap stacking
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Mode implied by the arguments: overlap when requested, otherwise
    /// sequential for a tile directory and fixed for a single tile
    pub fn mosaic_mode(&self) -> MosaicMode {
        match self.overlap {
            Some(scale) => MosaicMode::Overlap {
                scale: scale.unwrap_or(DEFAULT_OVERLAP_SCALE),
            },
            None if self.tiles.is_dir() => MosaicMode::Sequential,
            None => MosaicMode::Fixed,
        }
    }

    /// Check that an explicit single-file output names a PNG file
    ///
    /// # Errors
    ///
    /// Returns an error if `--output` is given for a file target with an
    /// extension other than `.png`
    pub fn validate_output(&self) -> Result<()> {
        let Some(output) = self.output.as_ref().filter(|_| !self.target.is_dir()) else {
            return Ok(());
        };

        let is_png = output
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(OUTPUT_EXTENSION));
        if is_png {
            Ok(())
        } else {
            Err(invalid_parameter(
                "output",
                &output.display(),
                &"mosaics are written as PNG; use a .png output path",
            ))
        }
    }

    /// Renderer configuration assembled from the arguments
    pub fn mosaic_config(&self) -> MosaicConfig {
        MosaicConfig {
            pixel_size: self.pixel_size,
            tile_size: self.tile_size,
            mode: self.mosaic_mode(),
        }
    }
}

/// Orchestrates rendering of every target image with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
    stacking: RandomStacking<StdRng>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);
        let stacking = cli
            .seed
            .map_or_else(
                RandomStacking::<StdRng>::from_entropy,
                RandomStacking::<StdRng>::seeded,
            );

        Self {
            cli,
            progress_manager,
            stacking,
        }
    }

    /// Render every target according to CLI arguments
    ///
    /// Configuration and tiles are validated and loaded once, before any
    /// source image is read.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or output path is invalid, tiles
    /// cannot be loaded, or any target fails to load, render or save
    pub fn process(&mut self) -> Result<()> {
        let config = self.cli.mosaic_config();
        config.validate()?;
        self.cli.validate_output()?;

        let tile_source = TileSource::from_path(&self.cli.tiles);
        let tiles = load_tile_set(&tile_source, config.tile_edge()?)?;

        let files = self.collect_files()?;
        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index, config, &tiles)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if self.should_process_file(target) {
                Ok(vec![target.clone()])
            } else {
                Ok(vec![])
            }
        } else if target.is_dir() {
            Ok(list_images(target)?
                .into_iter()
                .filter(|path| !Self::is_rendered_output(path))
                .filter(|path| self.should_process_file(path))
                .collect())
        } else {
            Err(MosaicError::FileSystem {
                path: target.clone(),
                operation: "open target",
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "target must be an image file or directory",
                ),
            })
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let Ok(output_path) = self.output_path(input_path) else {
            return true;
        };
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    // Allow print for the final success message
    #[allow(clippy::print_stderr)]
    fn process_file(
        &mut self,
        input_path: &Path,
        index: usize,
        config: MosaicConfig,
        tiles: &TileSet,
    ) -> Result<()> {
        let output_path = self.output_path(input_path)?;
        let source = load_source(input_path)?;

        let mut renderer = MosaicRenderer::new(config, &source, tiles, &mut self.stacking)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, renderer.rows());
        }

        loop {
            let more = renderer.render_row();
            if let Some(ref mut pm) = self.progress_manager {
                pm.update_rows(index, renderer.rows_rendered());
            }
            if !more {
                break;
            }
        }

        let canvas = renderer.finish();
        save_canvas(canvas.image(), &output_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }
        if !self.cli.quiet {
            eprintln!("Saved mosaic to {}", output_path.display());
        }

        Ok(())
    }

    /// Output location for `input_path`
    ///
    /// An explicit `--output` is used as-is for a single file target and as
    /// the destination directory for a directory target. Without it the mosaic
    /// is written beside the input as `<stem>_mosaic.png`.
    ///
    /// # Errors
    ///
    /// Returns an error if `input_path` has no file name
    pub fn output_path(&self, input_path: &Path) -> Result<PathBuf> {
        let stem = input_path.file_stem().ok_or_else(|| {
            invalid_parameter("target", &input_path.display(), &"missing file name")
        })?;
        let output_name = format!(
            "{}{OUTPUT_SUFFIX}.{OUTPUT_EXTENSION}",
            stem.to_string_lossy()
        );

        match (&self.cli.output, self.cli.target.is_dir()) {
            (Some(output), false) => Ok(output.clone()),
            (Some(output), true) => Ok(output.join(output_name)),
            (None, _) => Ok(input_path.parent().map_or_else(
                || PathBuf::from(&output_name),
                |parent| parent.join(&output_name),
            )),
        }
    }

    // Earlier results written into a source directory are not sources themselves
    fn is_rendered_output(path: &Path) -> bool {
        has_image_extension(path)
            && path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
    }
}
