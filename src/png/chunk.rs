//! PNG chunk framing: length + type + data + CRC32(type ‖ data)

use crc32fast::Hasher;

use crate::{Error, Result};

/// The fixed 8-byte PNG file signature
pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// PNG caps chunk payloads at 2^31 - 1 bytes
pub const MAX_CHUNK_LEN: usize = (1 << 31) - 1;

pub const IHDR: [u8; 4] = *b"IHDR";
pub const IDAT: [u8; 4] = *b"IDAT";
pub const IEND: [u8; 4] = *b"IEND";

pub const IHDR_LEN: usize = 13;
pub const BIT_DEPTH: u8 = 8;
pub const COLOR_TYPE_TRUECOLOR: u8 = 2;
pub const COMPRESSION_DEFLATE: u8 = 0;
pub const FILTER_METHOD_ADAPTIVE: u8 = 0;
pub const INTERLACE_NONE: u8 = 0;

/// CRC32 over the chunk type followed by its payload
pub fn chunk_crc(kind: &[u8; 4], data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(kind);
    hasher.update(data);
    hasher.finalize()
}

/// Value for the 4-byte length field, or `ChunkTooLarge` past the PNG limit
pub fn chunk_len(kind: [u8; 4], len: usize) -> Result<u32> {
    if len > MAX_CHUNK_LEN {
        return Err(Error::ChunkTooLarge { kind, len });
    }
    Ok(len as u32)
}

/// An owned chunk ready to be serialized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub kind: [u8; 4],
    pub data: Vec<u8>,
}

impl Chunk {
    pub fn new(kind: [u8; 4], data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    /// Header for an 8-bit truecolor, non-interlaced image
    pub fn ihdr(width: u32, height: u32) -> Self {
        let mut data = Vec::with_capacity(IHDR_LEN);
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&[
            BIT_DEPTH,
            COLOR_TYPE_TRUECOLOR,
            COMPRESSION_DEFLATE,
            FILTER_METHOD_ADAPTIVE,
            INTERLACE_NONE,
        ]);
        Self::new(IHDR, data)
    }

    pub fn idat(compressed: Vec<u8>) -> Self {
        Self::new(IDAT, compressed)
    }

    pub fn iend() -> Self {
        Self::new(IEND, Vec::new())
    }

    pub fn crc(&self) -> u32 {
        chunk_crc(&self.kind, &self.data)
    }

    /// Serialized size: 4 (length) + 4 (type) + data + 4 (crc)
    pub fn encoded_len(&self) -> usize {
        12 + self.data.len()
    }

    /// Append the framed chunk to `out`.
    ///
    /// Fails with `ChunkTooLarge` rather than truncating the length field.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        let len = chunk_len(self.kind, self.data.len())?;
        out.reserve(self.encoded_len());
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(&self.kind);
        out.extend_from_slice(&self.data);
        out.extend_from_slice(&self.crc().to_be_bytes());
        Ok(())
    }
}

/// A chunk borrowed from an encoded byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawChunk<'a> {
    pub kind: [u8; 4],
    pub data: &'a [u8],
    pub stored_crc: u32,
}

impl RawChunk<'_> {
    pub fn computed_crc(&self) -> u32 {
        chunk_crc(&self.kind, self.data)
    }

    pub fn verify_crc(&self) -> Result<()> {
        let computed = self.computed_crc();
        if computed != self.stored_crc {
            return Err(Error::CrcMismatch { kind: self.kind, stored: self.stored_crc, computed });
        }
        Ok(())
    }

    pub fn kind_str(&self) -> String {
        String::from_utf8_lossy(&self.kind).into_owned()
    }
}

/// Walks the chunks that follow the signature.
///
/// Yields one `Err` and then stops if the stream is truncated.
pub struct ChunkIter<'a> {
    rest: &'a [u8],
    done: bool,
}

impl<'a> ChunkIter<'a> {
    /// `bytes` must start right after the 8-byte signature
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { rest: bytes, done: false }
    }

    fn fail(&mut self, msg: String) -> Option<Result<RawChunk<'a>>> {
        self.done = true;
        Some(Err(Error::Malformed(msg)))
    }
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = Result<RawChunk<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.rest.is_empty() {
            return None;
        }
        if self.rest.len() < 12 {
            let n = self.rest.len();
            return self.fail(format!("truncated chunk header ({} trailing bytes)", n));
        }
        let len =
            u32::from_be_bytes([self.rest[0], self.rest[1], self.rest[2], self.rest[3]]) as usize;
        let kind = [self.rest[4], self.rest[5], self.rest[6], self.rest[7]];
        if len > MAX_CHUNK_LEN || self.rest.len() - 12 < len {
            let kind = String::from_utf8_lossy(&kind).into_owned();
            return self.fail(format!("chunk {} declares {} bytes past end of stream", kind, len));
        }
        let data = &self.rest[8..8 + len];
        let crc = &self.rest[8 + len..12 + len];
        let stored_crc = u32::from_be_bytes([crc[0], crc[1], crc[2], crc[3]]);
        self.rest = &self.rest[12 + len..];
        Some(Ok(RawChunk { kind, data, stored_crc }))
    }
}
