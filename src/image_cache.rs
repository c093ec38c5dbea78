//! Persistent cache for poster images
//!
//! One JPEG per id in the cache directory. A file on disk is a cache hit;
//! there is no expiry, size bound or eviction.

use crate::api::MovieApi;
use crate::error::{Error, Result};
use image::codecs::jpeg::JpegEncoder;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Re-encode quality for cached posters (a quarter of full quality)
pub const JPEG_QUALITY: u8 = 25;

/// Persistent cache for poster images
#[derive(Debug, Clone)]
pub struct ImageCache {
    cache_dir: PathBuf,
}

impl ImageCache {
    /// Create a cache rooted at `cache_dir`, creating the directory if needed.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        let cache_dir = cache_dir.into();

        if let Err(e) = std::fs::create_dir_all(&cache_dir) {
            log::warn!("Failed to create image cache directory: {}", e);
        } else {
            log::info!("Image cache directory: {:?}", cache_dir);
        }

        Self { cache_dir }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Filename for an id. Bytes outside `[A-Za-z0-9-]` are written as
    /// `_XX` (hex), so distinct ids never share a file and an id can never
    /// leave the cache directory.
    fn file_name(id: &str) -> String {
        let mut stem = String::with_capacity(id.len());
        for byte in id.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                stem.push(byte as char);
            } else {
                stem.push_str(&format!("_{:02X}", byte));
            }
        }
        format!("{}.jpg", stem)
    }

    /// Deterministic location of the cached image for `id`
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.cache_dir.join(Self::file_name(id))
    }

    /// Check if an image is cached
    pub fn contains(&self, id: &str) -> bool {
        self.path_for(id).is_file()
    }

    /// Return the cached file for `id`, downloading and compressing `url` on a miss.
    pub async fn get_or_fetch(&self, api: &MovieApi, url: &str, id: &str) -> Result<PathBuf> {
        let path = self.path_for(id);
        if path.is_file() {
            log::debug!("Image cache hit for {}", id);
            return Ok(path);
        }

        log::info!("Image cache miss for {}, fetching poster", id);
        let bytes = api.fetch_bytes(url).await?;

        let dir = self.cache_dir.clone();
        let target = path.clone();
        let written = tokio::task::spawn_blocking(move || {
            let compressed = compress_jpeg(&bytes, JPEG_QUALITY)?;
            write_atomic(&dir, &target, &compressed)
        })
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e)))?;

        settle_write(path, id, written)
    }
}

/// Resolve a finished write. A failed write still counts as a hit when a
/// concurrent fetch for the same id already produced the file.
fn settle_write(path: PathBuf, id: &str, written: Result<()>) -> Result<PathBuf> {
    match written {
        Ok(()) => {
            log::debug!("Cached image for {}", id);
            Ok(path)
        }
        Err(e) if path.is_file() => {
            log::warn!("Failed to cache image for {}, using existing file: {}", id, e);
            Ok(path)
        }
        Err(e) => Err(e),
    }
}

/// Decode any supported image format and re-encode it as JPEG at `quality`.
pub fn compress_jpeg(bytes: &[u8], quality: u8) -> Result<Vec<u8>> {
    let image = image::load_from_memory(bytes)?;
    let rgb = image.to_rgb8();

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);
    rgb.write_with_encoder(encoder)?;
    Ok(out)
}

/// Write to a temp file in `dir`, then rename over `target`.
///
/// On failure the temp file is removed and `target` is untouched.
fn write_atomic(dir: &Path, target: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.flush()?;
    file.persist(target).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
#[path = "image_cache_tests.rs"]
mod tests;
