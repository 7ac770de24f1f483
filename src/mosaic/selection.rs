//! Preloaded tile images and the policy choosing one per cell

use crate::io::configuration::TILE_FILTER;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use image::{RgbaImage, imageops};
use std::path::PathBuf;

/// Ordered, non-empty collection of square tiles sharing one edge length
#[derive(Debug, Clone)]
pub struct TileSet {
    first: RgbaImage,
    rest: Vec<RgbaImage>,
    edge: u32,
}

impl TileSet {
    /// Build a set from tiles that are already square and equally sized
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `tiles` is empty
    /// - A tile is not square or differs in size from the first tile
    pub fn new(tiles: Vec<RgbaImage>) -> Result<Self> {
        let mut tiles = tiles.into_iter();
        let Some(first) = tiles.next() else {
            return Err(MosaicError::EmptyTileSet {
                path: PathBuf::from("<memory>"),
            });
        };
        let rest: Vec<RgbaImage> = tiles.collect();
        let edge = first.width();

        if edge == 0 {
            return Err(invalid_parameter("tile", &edge, &"tiles must not be empty"));
        }

        for (index, tile) in std::iter::once(&first).chain(&rest).enumerate() {
            if tile.width() != edge || tile.height() != edge {
                return Err(invalid_parameter(
                    "tile",
                    &format!("#{index} {}x{}", tile.width(), tile.height()),
                    &format!("expected a {edge}x{edge} tile"),
                ));
            }
        }

        Ok(Self { first, rest, edge })
    }

    /// Resize arbitrary tile images to `edge` x `edge` and collect them in order
    ///
    /// # Errors
    ///
    /// Returns an error if `images` is empty or `edge` is zero
    pub fn resized(images: &[RgbaImage], edge: u32) -> Result<Self> {
        if edge == 0 {
            return Err(invalid_parameter(
                "tile_edge",
                &edge,
                &"must be a positive integer",
            ));
        }

        let tiles = images
            .iter()
            .map(|image| {
                if image.width() == edge && image.height() == edge {
                    image.clone()
                } else {
                    imageops::resize(image, edge, edge, TILE_FILTER)
                }
            })
            .collect();

        Self::new(tiles)
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    /// Always false: construction rejects empty sets
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shared edge length of every tile
    pub const fn edge(&self) -> u32 {
        self.edge
    }

    /// Tile at `index`
    pub fn get(&self, index: usize) -> Option<&RgbaImage> {
        match index.checked_sub(1) {
            None => Some(&self.first),
            Some(rest_index) => self.rest.get(rest_index),
        }
    }

    /// Tile at `index` modulo the set size, so every index maps to a tile
    pub fn get_wrapped(&self, index: usize) -> &RgbaImage {
        self.get(index % self.len()).unwrap_or(&self.first)
    }

    /// Tiles in load order
    pub fn iter(&self) -> impl Iterator<Item = &RgbaImage> {
        std::iter::once(&self.first).chain(&self.rest)
    }
}

/// How tiles are assigned to cells during one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileSelection {
    /// Every cell uses the first tile
    Fixed,
    /// The i-th cell visited uses tile `i mod N`
    RoundRobin,
}

impl TileSelection {
    /// Tile index for the `ordinal`-th cell in traversal order
    pub const fn index_for(self, ordinal: usize, tile_count: usize) -> usize {
        match self {
            Self::Fixed => 0,
            Self::RoundRobin => {
                if tile_count == 0 {
                    0
                } else {
                    ordinal % tile_count
                }
            }
        }
    }

    /// Infinite sequence of tile indices in traversal order
    pub fn sequence(self, tile_count: usize) -> impl Iterator<Item = usize> {
        (0..).map(move |ordinal| self.index_for(ordinal, tile_count))
    }
}
