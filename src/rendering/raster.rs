/// Rasterizes an icon into PNG scanlines

use log::debug;

use crate::rendering::{shade_pixel, ScanlineBuffer, FILTER_NONE};
use crate::ImageDescriptor;

/// Produce the filtered-scanline buffer for `desc`.
///
/// Deterministic: the same descriptor always yields identical bytes.
pub fn rasterize(desc: &ImageDescriptor) -> ScanlineBuffer {
    let (w, h) = (desc.width(), desc.height());
    let color = desc.color();
    // ImageDescriptor::new already proved this fits
    let len = crate::rendering::scanline_len(w, h).unwrap_or(0);
    let mut data = Vec::with_capacity(len);

    for y in 0..h {
        data.push(FILTER_NONE);
        for x in 0..w {
            data.extend_from_slice(&shade_pixel(x, y, w, h, color));
        }
    }

    debug!("rasterized {}x{} icon in {} ({} scanline bytes)", w, h, color, data.len());
    ScanlineBuffer::from_raw(w, h, data)
}
