use std::fs;
use std::path::PathBuf;

use icongen::rendering::rasterize;
use icongen::{ImageDescriptor, Rgb};
use sha2::{Digest, Sha256};

fn golden_path(size: u32) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(format!("scanlines_{}.sha256", size));
    p
}

#[test]
fn golden_scanlines_match_fixtures() {
    for size in [16u32, 32, 48, 128] {
        let desc = ImageDescriptor::square(size, Rgb::BRAND).expect("valid size");
        let scanlines = rasterize(&desc);
        let digest = hex::encode(Sha256::digest(scanlines.as_bytes()));

        let expected_path = golden_path(size);
        if std::env::var("UPDATE_GOLDENS").is_ok() {
            fs::create_dir_all("tests/goldens/expected").ok();
            fs::write(&expected_path, format!("{}\n", digest)).expect("write golden");
            println!("Updated golden: {:?}", expected_path);
            continue;
        }

        let exp = fs::read_to_string(&expected_path).expect("unable to read golden");
        assert_eq!(digest, exp.trim(), "scanlines for {}px icon changed", size);
    }
}
