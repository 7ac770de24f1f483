//! Output raster and the two ways a tile is composited onto it
//!
//! Tiles may extend past the canvas on any side (overlap mode places them at
//! negative offsets along the top and left edges); only the intersecting
//! region is touched.

use crate::io::configuration::MAX_CANVAS_DIMENSION;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::mosaic::stacking::Stacking;
use image::{Rgba, RgbaImage};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Mosaic output, fully transparent until tiles are placed
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: RgbaImage,
}

// Overlap of a layer with the canvas, in canvas coordinates plus layer offset
#[derive(Debug, Clone, Copy)]
struct Region {
    canvas_x: u32,
    canvas_y: u32,
    layer_x: u32,
    layer_y: u32,
    width: u32,
    height: u32,
}

impl Region {
    fn clip(canvas: &RgbaImage, layer: &RgbaImage, x: i64, y: i64) -> Option<Self> {
        let left = x.max(0);
        let top = y.max(0);
        let right = (x + i64::from(layer.width())).min(i64::from(canvas.width()));
        let bottom = (y + i64::from(layer.height())).min(i64::from(canvas.height()));

        (right > left && bottom > top).then(|| Self {
            canvas_x: left as u32,
            canvas_y: top as u32,
            layer_x: (left - x) as u32,
            layer_y: (top - y) as u32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }

    fn pixels(self) -> impl Iterator<Item = ((u32, u32), (u32, u32))> {
        (0..self.height).flat_map(move |dy| {
            (0..self.width).map(move |dx| {
                (
                    (self.canvas_x + dx, self.canvas_y + dy),
                    (self.layer_x + dx, self.layer_y + dy),
                )
            })
        })
    }
}

impl Canvas {
    /// Transparent canvas of `width` x `height` pixels
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, TRANSPARENT),
        }
    }

    /// Canvas covering a grid of `grid_width` x `grid_height` cells of `tile_size` pixels
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `tile_size` is zero
    /// - Either edge exceeds [`MAX_CANVAS_DIMENSION`]
    pub fn for_grid(grid_width: u32, grid_height: u32, tile_size: u32) -> Result<Self> {
        if tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &tile_size,
                &"must be a positive integer",
            ));
        }

        let width = u64::from(grid_width) * u64::from(tile_size);
        let height = u64::from(grid_height) * u64::from(tile_size);
        let limit = u64::from(MAX_CANVAS_DIMENSION);
        if width > limit || height > limit {
            return Err(MosaicError::CanvasTooLarge {
                width,
                height,
                limit: MAX_CANVAS_DIMENSION,
            });
        }

        Ok(Self::new(width as u32, height as u32))
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Pixel at (`x`, `y`), if inside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.pixels.get_pixel_checked(x, y).copied()
    }

    /// Borrow the composited raster
    pub const fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Take ownership of the composited raster
    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Paste `layer` at (`x`, `y`) using its own alpha channel as the mask
    ///
    /// Opaque layer pixels replace the canvas, transparent ones leave it
    /// untouched and partial alpha interpolates all four channels.
    pub fn paste_masked(&mut self, layer: &RgbaImage, x: i64, y: i64) {
        let Some(region) = Region::clip(&self.pixels, layer, x, y) else {
            return;
        };

        for ((cx, cy), (lx, ly)) in region.pixels() {
            if let (Some(&source), Some(target)) = (
                layer.get_pixel_checked(lx, ly),
                self.pixels.get_pixel_mut_checked(cx, cy),
            ) {
                *target = masked(*target, source);
            }
        }
    }

    /// Place `layer` at (`x`, `y`) underneath everything already painted
    ///
    /// The layer is pasted onto a transparent scratch layer and the current
    /// canvas is composited over it. Outside the layer the scratch is empty,
    /// so only the covered region is recomputed.
    pub fn paste_below(&mut self, layer: &RgbaImage, x: i64, y: i64) {
        let Some(region) = Region::clip(&self.pixels, layer, x, y) else {
            return;
        };

        for ((cx, cy), (lx, ly)) in region.pixels() {
            if let (Some(&source), Some(target)) = (
                layer.get_pixel_checked(lx, ly),
                self.pixels.get_pixel_mut_checked(cx, cy),
            ) {
                let scratch = masked(TRANSPARENT, source);
                *target = over(*target, scratch);
            }
        }
    }

    /// Composite `layer` at (`x`, `y`) according to `stacking`
    pub fn place(&mut self, layer: &RgbaImage, x: i64, y: i64, stacking: Stacking) {
        match stacking {
            Stacking::OnTop => self.paste_masked(layer, x, y),
            Stacking::Below => self.paste_below(layer, x, y),
        }
    }
}

// Linear interpolation of every channel by the source alpha, rounded to nearest
fn masked(target: Rgba<u8>, source: Rgba<u8>) -> Rgba<u8> {
    let mask = u32::from(source.0[3]);
    let inverse = 255 - mask;
    let mut out = target;
    for (channel, (&dst, &src)) in out
        .0
        .iter_mut()
        .zip(target.0.iter().zip(source.0.iter()))
    {
        *channel = ((u32::from(src) * mask + u32::from(dst) * inverse + 127) / 255) as u8;
    }
    out
}

// Porter-Duff "over" of straight-alpha pixels, rounded to nearest where
// `Pixel::blend` would truncate
fn over(front: Rgba<u8>, back: Rgba<u8>) -> Rgba<u8> {
    let [fr, fg, fb, fa] = front.0;
    let [br, bg, bb, ba] = back.0;

    if fa == 0 {
        return back;
    }
    if fa == 255 || ba == 0 {
        return front;
    }

    let front_alpha = f32::from(fa) / 255.0;
    let back_alpha = f32::from(ba) / 255.0 * (1.0 - front_alpha);
    let out_alpha = front_alpha + back_alpha;
    let blend = |f: u8, b: u8| {
        ((f32::from(f) * front_alpha + f32::from(b) * back_alpha) / out_alpha)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend(fr, br),
        blend(fg, bg),
        blend(fb, bb),
        (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}
