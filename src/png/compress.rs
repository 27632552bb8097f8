/// zlib compression of scanline data (IDAT payload)

use miniz_oxide::deflate::compress_to_vec_zlib;

/// Highest standard zlib level
pub const COMPRESSION_LEVEL: u8 = 9;

/// Deflate `data` into a complete zlib stream (header, deflate blocks, Adler-32)
pub fn compress(data: &[u8]) -> Vec<u8> {
    compress_to_vec_zlib(data, COMPRESSION_LEVEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniz_oxide::inflate::decompress_to_vec_zlib;

    #[test]
    fn output_is_a_zlib_stream() {
        let raw: Vec<u8> = (0..4096u32).map(|i| (i % 7) as u8).collect();
        let z = compress(&raw);
        // CMF: deflate with 32K window
        assert_eq!(z[0], 0x78);
        assert_eq!((u16::from(z[0]) << 8 | u16::from(z[1])) % 31, 0);
        assert!(z.len() < raw.len());
        assert_eq!(decompress_to_vec_zlib(&z).unwrap(), raw);
    }

    #[test]
    fn empty_input_still_valid() {
        let z = compress(&[]);
        assert!(decompress_to_vec_zlib(&z).unwrap().is_empty());
    }
}
