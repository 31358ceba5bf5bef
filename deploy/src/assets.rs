//! Collection of the compiled static site files.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use ignore::WalkBuilder;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::DeployError;

pub const INDEX_DOCUMENT: &str = "index.html";
pub const ERROR_DOCUMENT: &str = "404.html";

/// One file to upload, keyed by its `/`-separated path relative to the site root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteAsset {
    pub key: String,
    pub size: u64,
    pub sha256: String,
    pub content_type: &'static str,
}

/// Walks `site_dir` and fingerprints every non-hidden file, sorted by key.
pub fn collect_assets(site_dir: &Path) -> Result<Vec<SiteAsset>, DeployError> {
    if !site_dir.is_dir() {
        return Err(DeployError::MissingSiteDir {
            path: site_dir.to_path_buf(),
        });
    }

    let walker = WalkBuilder::new(site_dir)
        .hidden(true)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .ignore(false)
        .parents(false)
        .build();

    let mut assets = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let key = path
            .strip_prefix(site_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        let (size, sha256) = fingerprint(path).map_err(|source| DeployError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(%key, size, "Collected site asset");
        assets.push(SiteAsset {
            content_type: content_type(&key),
            key,
            size,
            sha256,
        });
    }

    assets.sort_by(|a, b| a.key.cmp(&b.key));

    if !assets.iter().any(|asset| asset.key == INDEX_DOCUMENT) {
        return Err(DeployError::MissingIndex {
            path: site_dir.to_path_buf(),
        });
    }
    Ok(assets)
}

fn fingerprint(path: &Path) -> io::Result<(u64, String)> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    let mut size = 0u64;
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        size += n as u64;
    }
    Ok((size, format!("{:x}", hasher.finalize())))
}

/// MIME type served for a key, by extension.
#[must_use]
pub fn content_type(key: &str) -> &'static str {
    let ext = key
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" | "map" => "application/json",
        "webmanifest" => "application/manifest+json",
        "txt" => "text/plain; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "wasm" => "application/wasm",
        _ => "application/octet-stream",
    }
}
