//! Multiplicative recoloring of tiles by a cell color

use image::{Rgb, RgbaImage};

/// Scale one channel by `factor` in [0, 1], clamping and truncating to 8 bits
pub fn tint_channel(value: u8, factor: f64) -> u8 {
    (f64::from(value) * factor).clamp(0.0, 255.0) as u8
}

/// Tint `tile` by `color`
///
/// Each RGB channel is multiplied by the matching channel of `color` over 255,
/// so a white cell reproduces the tile and a black cell zeroes it. Alpha is copied.
pub fn tint(tile: &RgbaImage, color: Rgb<u8>) -> RgbaImage {
    let [red, green, blue] = color.0.map(|channel| f64::from(channel) / 255.0);
    let mut tinted = tile.clone();

    for pixel in tinted.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        pixel.0 = [
            tint_channel(r, red),
            tint_channel(g, green),
            tint_channel(b, blue),
            a,
        ];
    }

    tinted
}
