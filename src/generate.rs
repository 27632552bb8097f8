//! Batch icon generation: one PNG per configured size, written to disk

use std::fs;
use std::path::PathBuf;

use log::{debug, info};
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::png::encode_png;
use crate::{Error, IconConfig, ImageDescriptor, Result};

/// File name of the size-to-path map written when `write_manifest` is set
pub const MANIFEST_FILE: &str = "icons.json";

/// A written icon file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedIcon {
    pub size: u32,
    pub path: PathBuf,
    pub bytes_written: usize,
    /// Hex SHA-256 of the file contents
    pub sha256: String,
}

/// Render and write every icon in `config`, in the order of `config.sizes`.
///
/// The output directory is created if needed. The first failure aborts the
/// batch; files already written are left in place.
pub fn generate_icons(config: &IconConfig) -> Result<Vec<GeneratedIcon>> {
    config.validate()?;
    fs::create_dir_all(&config.output_dir).map_err(|e| Error::io(&config.output_dir, e))?;

    let jobs = config.effective_jobs().min(config.sizes.len());
    let icons = if jobs <= 1 {
        config
            .sizes
            .iter()
            .map(|&size| write_icon(config, size))
            .collect::<Result<Vec<_>>>()?
    } else {
        generate_parallel(config, jobs)?
    };

    if config.write_manifest {
        let path = config.output_dir.join(MANIFEST_FILE);
        fs::write(&path, manifest_json(config, &icons)?).map_err(|e| Error::io(&path, e))?;
        info!("Wrote manifest {}", path.display());
    }

    info!("Generated {} icons in {}", icons.len(), config.output_dir.display());
    Ok(icons)
}

// Sizes are split into contiguous runs so results come back in input order.
fn generate_parallel(config: &IconConfig, jobs: usize) -> Result<Vec<GeneratedIcon>> {
    let per_worker = config.sizes.len().div_ceil(jobs);
    debug!("encoding {} sizes on {} workers", config.sizes.len(), jobs);

    std::thread::scope(|scope| {
        let handles: Vec<_> = config
            .sizes
            .chunks(per_worker)
            .map(|run| {
                scope.spawn(move || {
                    run.iter().map(|&size| write_icon(config, size)).collect::<Result<Vec<_>>>()
                })
            })
            .collect();

        let mut icons = Vec::with_capacity(config.sizes.len());
        for handle in handles {
            let run = handle
                .join()
                .map_err(|_| Error::Other("icon worker thread panicked".into()))??;
            icons.extend(run);
        }
        Ok(icons)
    })
}

/// Encode and write a single square icon
pub fn write_icon(config: &IconConfig, size: u32) -> Result<GeneratedIcon> {
    let desc = ImageDescriptor::square(size, config.color)?;
    let bytes = encode_png(&desc)?;
    let path = config.icon_path(size);
    fs::write(&path, &bytes).map_err(|e| Error::io(&path, e))?;
    info!("Created {}", path.display());

    Ok(GeneratedIcon {
        size,
        sha256: hex::encode(Sha256::digest(&bytes)),
        bytes_written: bytes.len(),
        path,
    })
}

struct OrderedMap<'a>(&'a [(String, String)]);

impl Serialize for OrderedMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

/// JSON object mapping each size to `<output dir name>/<file name>`,
/// in the shape browser-extension manifests expect for `"icons"`.
pub fn manifest_json(config: &IconConfig, icons: &[GeneratedIcon]) -> Result<String> {
    let dir = config
        .output_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());
    let entries: Vec<(String, String)> = icons
        .iter()
        .map(|icon| {
            let file = icon
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let rel = match &dir {
                Some(d) => format!("{}/{}", d, file),
                None => file,
            };
            (icon.size.to_string(), rel)
        })
        .collect();
    serde_json::to_string_pretty(&OrderedMap(&entries)).map_err(Error::Manifest)
}
