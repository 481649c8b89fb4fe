//! Build script for the macro calculator
//!
//! Bumps the local build counter and embeds build metadata for the startup banner.

use std::fs;
use std::path::Path;

const BUILD_NUMBER_FILE: &str = "build_number.txt";

fn read_build_number(path: &Path) -> u64 {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn main() {
    println!("cargo:rerun-if-changed=src");

    let counter = Path::new(BUILD_NUMBER_FILE);
    let build = read_build_number(counter) + 1;

    // A read-only checkout still builds; it just keeps reporting the old number
    if let Err(e) = fs::write(counter, build.to_string()) {
        println!("cargo:warning=could not update {}: {}", BUILD_NUMBER_FILE, e);
    }

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=MACROCALC_BUILD_NUMBER={}", build);
    println!("cargo:rustc-env=MACROCALC_BUILD_TIMESTAMP={}", timestamp);
}
