//! icongen
//!
//! Procedural app-icon generator built around a small, self-contained PNG
//! encoder. Icons are square truecolor images shaded in three concentric
//! zones around a base color; the encoder frames them as signature, IHDR,
//! IDAT and IEND chunks with CRC32 checksums and a zlib-compressed payload.
//!
//! # Features
//!
//! - **Encoder**: `encode_png` turns an `ImageDescriptor` into PNG bytes
//! - **Generator**: `generate_icons` writes one `icon<N>.png` per configured size
//! - **Inspection**: `png::inspect` re-checks chunk order and checksums
//!
//! # Example
//!
//! ```no_run
//! use icongen::{IconConfig, Rgb};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IconConfig {
//!     sizes: vec![16, 32],
//!     color: Rgb::from_hex("#4a6cf7")?,
//!     ..Default::default()
//! };
//!
//! for icon in icongen::generate_icons(&config)? {
//!     println!("{} ({} bytes)", icon.path.display(), icon.bytes_written);
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod generate;
pub mod png;
pub mod rendering;

pub use generate::{generate_icons, GeneratedIcon};
pub use crate::png::{encode_png, inspect, PngSummary};

/// Largest width or height a PNG header may declare
pub const MAX_DIMENSION: u32 = (1 << 31) - 1;

/// An 8-bit RGB color
///
/// Serialized as a `#rrggbb` string so config files stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Default brand blue (#4a6cf7)
    pub const BRAND: Rgb = Rgb::new(74, 108, 247);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb` (case-insensitive)
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::BRAND
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Rgb::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Rgb::from_hex(&s)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb::new(r, g, b)
    }
}

/// Validated input to the encoder: dimensions plus base color
///
/// Construct through `ImageDescriptor::new`, which rejects zero-sized images
/// and dimensions whose scanline buffer would not fit in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDescriptor {
    width: u32,
    height: u32,
    color: Rgb,
}

impl ImageDescriptor {
    pub fn new(width: u32, height: u32, color: impl Into<Rgb>) -> Result<Self> {
        let invalid = || Error::InvalidDimensions { width, height };
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(invalid());
        }
        rendering::scanline_len(width, height).ok_or_else(invalid)?;
        Ok(Self { width, height, color: color.into() })
    }

    /// Square icon descriptor
    pub fn square(size: u32, color: impl Into<Rgb>) -> Result<Self> {
        Self::new(size, size, color)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn color(&self) -> Rgb {
        self.color
    }
}

/// Configuration for a batch of generated icons
///
/// Every field has a default, so a JSON config file only needs the keys it
/// wants to change.
///
/// # Examples
///
/// ```
/// let cfg = icongen::IconConfig::default();
/// assert_eq!(cfg.sizes, vec![16, 32, 48, 128]);
/// assert_eq!(cfg.color.to_string(), "#4a6cf7");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// Edge lengths of the square icons to produce
    pub sizes: Vec<u32>,
    /// Base color of every icon
    pub color: Rgb,
    /// Directory the PNG files are written into (created if absent)
    pub output_dir: PathBuf,
    /// File name prefix; files are named `<prefix><size>.png`
    pub file_prefix: String,
    /// Worker threads used for encoding (0 => one per CPU)
    pub jobs: usize,
    /// Whether to write an `icons.json` size-to-path map next to the icons
    pub write_manifest: bool,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            sizes: vec![16, 32, 48, 128],
            color: Rgb::BRAND,
            output_dir: PathBuf::from("icons"),
            file_prefix: "icon".to_string(),
            jobs: 1,
            write_manifest: false,
        }
    }
}

impl IconConfig {
    /// Load a config from a JSON file; missing keys keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_json::from_str(&text)
            .map_err(|e| Error::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// Check sizes and naming before any file is touched
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(Error::ConfigError("no icon sizes configured".into()));
        }
        for (i, &size) in self.sizes.iter().enumerate() {
            ImageDescriptor::square(size, self.color)?;
            if self.sizes[..i].contains(&size) {
                return Err(Error::ConfigError(format!("duplicate icon size {}", size)));
            }
        }
        if self.file_prefix.contains(['/', '\\']) {
            return Err(Error::ConfigError(format!(
                "file prefix must not contain path separators: {:?}",
                self.file_prefix
            )));
        }
        Ok(())
    }

    /// Worker count after resolving `0` to the number of CPUs
    pub fn effective_jobs(&self) -> usize {
        match self.jobs {
            0 => num_cpus::get().max(1),
            n => n,
        }
    }

    /// Path of the icon file for `size`
    pub fn icon_path(&self, size: u32) -> PathBuf {
        self.output_dir.join(format!("{}{}.png", self.file_prefix, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IconConfig::default();
        assert_eq!(config.sizes, vec![16, 32, 48, 128]);
        assert_eq!(config.color, Rgb::new(74, 108, 247));
        assert_eq!(config.icon_path(48), PathBuf::from("icons/icon48.png"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rgb_hex_parsing() {
        assert_eq!(Rgb::from_hex("#4A6CF7").unwrap(), Rgb::BRAND);
        assert_eq!("00ff10".parse::<Rgb>().unwrap(), Rgb::new(0, 255, 16));
        assert!(Rgb::from_hex("#4a6cf").is_err());
        assert!(Rgb::from_hex("#4a6cfz").is_err());
        assert!(Rgb::from_hex("#+a6cf7").is_err());
        assert_eq!(Rgb::new(1, 2, 255).to_string(), "#0102ff");
    }

    #[test]
    fn descriptor_rejects_degenerate_sizes() {
        assert!(matches!(
            ImageDescriptor::new(0, 16, Rgb::BRAND),
            Err(Error::InvalidDimensions { width: 0, height: 16 })
        ));
        assert!(ImageDescriptor::new(16, 0, Rgb::BRAND).is_err());
        assert!(ImageDescriptor::new(MAX_DIMENSION + 1, 1, Rgb::BRAND).is_err());
        let d = ImageDescriptor::new(3, 2, (1, 2, 3)).unwrap();
        assert_eq!((d.width(), d.height()), (3, 2));
        assert_eq!(d.color(), Rgb::new(1, 2, 3));
    }

    #[test]
    fn config_validation() {
        let dup = IconConfig { sizes: vec![16, 32, 16], ..Default::default() };
        assert!(matches!(dup.validate(), Err(Error::ConfigError(_))));

        let empty = IconConfig { sizes: vec![], ..Default::default() };
        assert!(empty.validate().is_err());

        let zero = IconConfig { sizes: vec![0], ..Default::default() };
        assert!(matches!(zero.validate(), Err(Error::InvalidDimensions { .. })));

        let bad_prefix = IconConfig { file_prefix: "a/b".into(), ..Default::default() };
        assert!(bad_prefix.validate().is_err());
    }

    #[test]
    fn config_from_partial_json() {
        let cfg: IconConfig =
            serde_json::from_str(r##"{"sizes":[64],"color":"#ff0000"}"##).unwrap();
        assert_eq!(cfg.sizes, vec![64]);
        assert_eq!(cfg.color, Rgb::new(255, 0, 0));
        assert_eq!(cfg.file_prefix, "icon");
        assert_eq!(cfg.jobs, 1);

        let bad = serde_json::from_str::<IconConfig>(r#"{"color":"blue"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn unparsable_config_file_is_a_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("icons.json");
        std::fs::write(&path, "{ not json").unwrap();
        match IconConfig::from_json_file(&path) {
            Err(Error::ConfigError(msg)) => assert!(msg.contains("icons.json")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn zero_jobs_means_all_cpus() {
        let cfg = IconConfig { jobs: 0, ..Default::default() };
        assert!(cfg.effective_jobs() >= 1);
        let cfg = IconConfig { jobs: 3, ..Default::default() };
        assert_eq!(cfg.effective_jobs(), 3);
    }
}
