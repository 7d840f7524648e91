//! Computes the stylesheet fingerprint at compile time.
//!
//! Templates append `?v=<hash>` to the stylesheet URL through the
//! `css_hash` filter, so an edited file busts browser caches without
//! renaming anything on disk.

use std::env;
use std::fs;
use std::path::PathBuf;

use sha2::{Digest, Sha256};

fn main() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let css_path = PathBuf::from(manifest_dir).join("static/css/main.css");

    println!("cargo:rerun-if-changed={}", css_path.display());

    // The stylesheet may be absent in a fresh checkout; fall back to a
    // fixed marker instead of failing the build.
    let hash = match fs::read(&css_path) {
        Ok(content) => short_hash(&content),
        Err(e) => {
            println!("cargo:warning=Could not read main.css: {e}");
            "dev".to_string()
        }
    };

    println!("cargo:rustc-env=CSS_HASH={hash}");
}

/// First 8 hex characters of the SHA-256 digest.
fn short_hash(bytes: &[u8]) -> String {
    let digest = format!("{:x}", Sha256::digest(bytes));
    digest.get(..8).unwrap_or("dev").to_string()
}
