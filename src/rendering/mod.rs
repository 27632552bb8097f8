//! Pixel buffer generation
//!
//! Produces the raw, unfiltered PNG scanline representation of an icon:
//! every row is a filter-type byte (always 0) followed by `width * 3` RGB
//! bytes. The buffer is consumed once by the compressor.

pub mod raster;
pub mod shade;

pub use raster::rasterize;
pub use shade::{shade_pixel, Zone};

/// Bytes per RGB pixel
pub const BYTES_PER_PIXEL: usize = 3;

/// PNG filter type "None"
pub const FILTER_NONE: u8 = 0;

/// Length of the scanline buffer for the given dimensions, or `None` if it
/// overflows `usize`.
pub fn scanline_len(width: u32, height: u32) -> Option<usize> {
    row_len(width)?.checked_mul(height as usize)
}

pub(crate) fn row_len(width: u32) -> Option<usize> {
    (width as usize).checked_mul(BYTES_PER_PIXEL)?.checked_add(1)
}

/// Raw scanlines for one image, filter bytes included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanlineBuffer {
    pub width: u32,
    pub height: u32,
    data: Vec<u8>,
}

impl ScanlineBuffer {
    pub(crate) fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(Some(data.len()), scanline_len(width, height));
        Self { width, height, data }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate rows, each including its leading filter byte
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let stride = 1 + self.width as usize * BYTES_PER_PIXEL;
        self.data.chunks_exact(stride)
    }

    /// RGB value at (x, y); `None` when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let stride = 1 + self.width as usize * BYTES_PER_PIXEL;
        let idx = y as usize * stride + 1 + x as usize * BYTES_PER_PIXEL;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    /// Pixel bytes with filter bytes removed, row-major RGB
    pub fn to_rgb(&self) -> Vec<u8> {
        self.rows().flat_map(|row| row[1..].iter().copied()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scanline_len_includes_filter_bytes() {
        assert_eq!(scanline_len(16, 16), Some(16 * (1 + 48)));
        assert_eq!(scanline_len(1, 1), Some(4));
        assert_eq!(scanline_len(5, 0), Some(0));
    }

    #[test]
    fn pixel_lookup_skips_filter_byte() {
        let buf = ScanlineBuffer::from_raw(2, 1, vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(buf.pixel(0, 0), Some([1, 2, 3]));
        assert_eq!(buf.pixel(1, 0), Some([4, 5, 6]));
        assert_eq!(buf.pixel(2, 0), None);
        assert_eq!(buf.to_rgb(), vec![1, 2, 3, 4, 5, 6]);
    }
}
