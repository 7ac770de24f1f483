//! Loading source photographs and tile images, and saving finished mosaics

use crate::io::configuration::IMAGE_EXTENSIONS;
use crate::io::error::{MosaicError, Result};
use crate::mosaic::selection::TileSet;
use image::{RgbImage, RgbaImage};
use std::path::{Path, PathBuf};

/// Where tile images come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileSource {
    /// A single tile image used for every cell
    Single(PathBuf),
    /// A folder whose supported images are used in sorted file name order
    Folder(PathBuf),
}

impl TileSource {
    /// Classify `path` as a folder or a single tile image
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_dir() {
            Self::Folder(path)
        } else {
            Self::Single(path)
        }
    }

    /// Path given for this source
    pub fn path(&self) -> &Path {
        match self {
            Self::Single(path) | Self::Folder(path) => path,
        }
    }
}

/// Whether `path` has one of the supported image extensions, ignoring case
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Supported image files directly inside `dir`, sorted by path
///
/// # Errors
///
/// Returns an error if the directory cannot be listed
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| MosaicError::FileSystem {
        path: dir.to_path_buf(),
        operation: "read directory",
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| MosaicError::FileSystem {
                path: dir.to_path_buf(),
                operation: "read directory entry",
                source: e,
            })?
            .path();
        if path.is_file() && has_image_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load the photograph to be turned into a mosaic
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded
pub fn load_source(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|e| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgb8())
}

/// Load one tile image with its alpha channel
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded
pub fn load_tile(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgba8())
}

/// Load every tile from `source` and resize them to `edge` x `edge`
///
/// # Errors
///
/// Returns an error if:
/// - A folder source contains no supported images
/// - Any tile cannot be read or decoded
/// - `edge` is zero
pub fn load_tile_set(source: &TileSource, edge: u32) -> Result<TileSet> {
    let paths = match source {
        TileSource::Single(path) => vec![path.clone()],
        TileSource::Folder(dir) => list_images(dir)?,
    };

    if paths.is_empty() {
        return Err(MosaicError::EmptyTileSet {
            path: source.path().to_path_buf(),
        });
    }

    let images = paths
        .iter()
        .map(|path| load_tile(path))
        .collect::<Result<Vec<_>>>()?;

    TileSet::resized(&images, edge)
}

/// Save `canvas` to `path`, creating missing parent directories
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_canvas(canvas: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    canvas.save(path).map_err(|e| MosaicError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}
