/// Radial three-zone shading used for generated icons
///
/// Zone boundaries are fractions of the image width, measured from the
/// integer center `(width / 2, height / 2)`.

use crate::Rgb;

/// Inner radius (fraction of width) of the unmodified core ring
pub const HIGHLIGHT_RADIUS: f64 = 0.35;
/// Radius (fraction of width) where the shadow falloff starts
pub const SHADOW_RADIUS: f64 = 0.47;
/// Width (fraction of width) of the falloff band before full darkening
pub const SHADOW_FALLOFF: f64 = 0.1;
/// Amount added to each channel inside the highlight disc
pub const HIGHLIGHT_BOOST: u8 = 40;
/// Maximum darkening applied in the shadow zone
pub const SHADOW_STRENGTH: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zone {
    Highlight,
    Core,
    /// Darkening factor in `[0, 1]`
    Shadow(f64),
}

impl Zone {
    pub fn classify(dist: f64, width: u32) -> Zone {
        let w = width as f64;
        if dist < w * HIGHLIGHT_RADIUS {
            Zone::Highlight
        } else if dist < w * SHADOW_RADIUS {
            Zone::Core
        } else {
            let f = ((dist - w * SHADOW_RADIUS) / (w * SHADOW_FALLOFF)).min(1.0);
            Zone::Shadow(f)
        }
    }

    pub fn apply(self, base: Rgb) -> [u8; 3] {
        match self {
            Zone::Highlight => base.channels().map(|c| c.saturating_add(HIGHLIGHT_BOOST)),
            Zone::Core => base.channels(),
            // float -> u8 `as` casts saturate, so the floor result stays in [0, 255]
            Zone::Shadow(f) => base
                .channels()
                .map(|c| (c as f64 * (1.0 - f * SHADOW_STRENGTH)).floor() as u8),
        }
    }
}

/// Euclidean distance of (x, y) from the integer image center
pub fn center_distance(x: u32, y: u32, width: u32, height: u32) -> f64 {
    let dx = x as f64 - (width / 2) as f64;
    let dy = y as f64 - (height / 2) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Color of pixel (x, y) in a `width` x `height` icon
#[inline]
pub fn shade_pixel(x: u32, y: u32, width: u32, height: u32, base: Rgb) -> [u8; 3] {
    Zone::classify(center_distance(x, y, width, height), width).apply(base)
}
