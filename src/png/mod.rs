//! PNG byte stream assembly and structural inspection
//!
//! Encoding is a fixed pipeline: rasterize, deflate, then frame
//! signature ‖ IHDR ‖ IDAT ‖ IEND. `inspect` walks an encoded stream and
//! re-checks that order plus every chunk checksum; it does not decode pixels.

pub mod chunk;
pub mod compress;

pub use chunk::{Chunk, ChunkIter, RawChunk, SIGNATURE};

use log::debug;
use serde::Serialize;

use crate::rendering::{rasterize, ScanlineBuffer};
use crate::{Error, ImageDescriptor, Result};

/// Encode a shaded icon for `desc` as a complete PNG file
pub fn encode_png(desc: &ImageDescriptor) -> Result<Vec<u8>> {
    encode_scanlines(&rasterize(desc))
}

/// Frame already-rasterized scanlines as a PNG file
pub fn encode_scanlines(scanlines: &ScanlineBuffer) -> Result<Vec<u8>> {
    let compressed = compress::compress(scanlines.as_bytes());
    debug!(
        "deflated {} scanline bytes to {} ({}x{})",
        scanlines.len(),
        compressed.len(),
        scanlines.width,
        scanlines.height
    );

    let chunks = [
        Chunk::ihdr(scanlines.width, scanlines.height),
        Chunk::idat(compressed),
        Chunk::iend(),
    ];
    let total = SIGNATURE.len() + chunks.iter().map(Chunk::encoded_len).sum::<usize>();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&SIGNATURE);
    for c in &chunks {
        c.write_to(&mut out)?;
    }
    Ok(out)
}

/// Header fields and layout facts recovered from an encoded PNG
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PngSummary {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    pub interlace: u8,
    /// Total compressed bytes across all IDAT chunks
    pub idat_len: usize,
    /// Chunk types in file order
    pub chunk_kinds: Vec<String>,
}

/// Validate signature, chunk order and checksums of an encoded PNG
pub fn inspect(bytes: &[u8]) -> Result<PngSummary> {
    let mut summary: Option<PngSummary> = None;
    walk(bytes, &mut summary, |c, slot| {
        if let Some(s) = slot.as_mut() {
            s.chunk_kinds.push(c.kind_str());
            if c.kind == chunk::IDAT {
                s.idat_len += c.data.len();
            }
        } else {
            *slot = Some(parse_ihdr(c.data)?);
        }
        Ok(())
    })?;
    summary.ok_or_else(|| Error::Malformed("missing IHDR".into()))
}

/// Concatenated IDAT payloads (the zlib stream) of an encoded PNG
pub fn idat_data(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut data: Vec<u8> = Vec::new();
    walk(bytes, &mut data, |c, data| {
        if c.kind == chunk::IDAT {
            data.extend_from_slice(c.data);
        }
        Ok(())
    })?;
    Ok(data)
}

// Shared order/CRC checks; `visit` sees every chunk after it passed them.
fn walk<T>(
    bytes: &[u8],
    state: &mut T,
    mut visit: impl FnMut(&RawChunk<'_>, &mut T) -> Result<()>,
) -> Result<()> {
    let body = bytes
        .strip_prefix(&SIGNATURE[..])
        .ok_or_else(|| Error::Malformed("bad PNG signature".into()))?;

    let mut seen_idat = false;
    let mut idat_closed = false;
    let mut seen_iend = false;
    for (i, c) in ChunkIter::new(body).enumerate() {
        let c = c?;
        if seen_iend {
            return Err(Error::Malformed(format!("{} chunk after IEND", c.kind_str())));
        }
        c.verify_crc()?;
        match (i, c.kind) {
            (0, chunk::IHDR) => {}
            (0, _) => {
                let msg = format!("first chunk is {}, expected IHDR", c.kind_str());
                return Err(Error::Malformed(msg));
            }
            (_, chunk::IHDR) => return Err(Error::Malformed("duplicate IHDR".into())),
            (_, chunk::IDAT) => {
                if idat_closed {
                    return Err(Error::Malformed("IDAT chunks are not consecutive".into()));
                }
                seen_idat = true;
            }
            (_, chunk::IEND) => {
                if !seen_idat {
                    return Err(Error::Malformed("IEND before any IDAT".into()));
                }
                seen_iend = true;
            }
            _ => idat_closed = seen_idat,
        }
        visit(&c, state)?;
    }
    if !seen_iend {
        return Err(Error::Malformed("missing IEND".into()));
    }
    Ok(())
}

fn parse_ihdr(data: &[u8]) -> Result<PngSummary> {
    if data.len() != chunk::IHDR_LEN {
        return Err(Error::Malformed(format!("IHDR is {} bytes, expected 13", data.len())));
    }
    let width = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
    let height = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    Ok(PngSummary {
        width,
        height,
        bit_depth: data[8],
        color_type: data[9],
        interlace: data[12],
        idat_len: 0,
        chunk_kinds: vec!["IHDR".to_string()],
    })
}
