//! Image decoding and the path-keyed image cache

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use macroquad::texture::{FilterMode, Texture2D};
use thiserror::Error;

/// Error type for image loading
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Image too large: {width}x{height}")]
    TooLarge { width: u32, height: u32 },
}

/// RGBA8 pixels ready for upload
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u16,
    pub height: u16,
    pub rgba: Vec<u8>,
}

/// Decode PNG/JPEG/BMP bytes into RGBA8.
pub fn decode_image_bytes(bytes: &[u8]) -> Result<DecodedImage, ImageError> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = img.dimensions();
    let too_large = || ImageError::TooLarge { width, height };
    Ok(DecodedImage {
        width: u16::try_from(width).map_err(|_| too_large())?,
        height: u16::try_from(height).map_err(|_| too_large())?,
        rgba: img.into_raw(),
    })
}

/// Read and decode an image file.
pub fn decode_image(path: &Path) -> Result<DecodedImage, ImageError> {
    let bytes = std::fs::read(path)?;
    decode_image_bytes(&bytes)
}

/// Decode an image file and upload it as a texture.
pub fn load_texture(path: &Path) -> Result<Texture2D, ImageError> {
    let img = decode_image(path)?;
    let texture = Texture2D::from_rgba8(img.width, img.height, &img.rgba);
    texture.set_filter(FilterMode::Nearest);
    Ok(texture)
}

/// Path-keyed cache of loaded images. Failed loads are cached as `None`
/// and never retried.
#[derive(Debug)]
pub struct ImageCache<T> {
    /// Directory sprite image paths are relative to
    base_dir: PathBuf,
    entries: HashMap<String, Option<T>>,
}

/// Cache of GPU textures used by the renderer
pub type TextureCache = ImageCache<Texture2D>;

impl<T> ImageCache<T> {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            entries: HashMap::new(),
        }
    }

    /// Look up `path`, loading it on first request.
    /// Returns None while the image is unavailable (now or previously failed).
    pub fn get_or_load<F>(&mut self, path: &str, loader: F) -> Option<&T>
    where
        F: FnOnce(&Path) -> Result<T, ImageError>,
    {
        if !self.entries.contains_key(path) {
            let full = self.base_dir.join(path);
            let loaded = match loader(&full) {
                Ok(value) => {
                    log::debug!("loaded image {}", full.display());
                    Some(value)
                }
                Err(e) => {
                    log::warn!("failed to load image {}: {e}", full.display());
                    None
                }
            };
            self.entries.insert(path.to_string(), loaded);
        }
        self.entries.get(path).and_then(Option::as_ref)
    }
}

impl<T> Default for ImageCache<T> {
    fn default() -> Self {
        Self::new("assets")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let img = decode_image_bytes(&png_bytes(3, 2)).unwrap();
        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(img.rgba.len(), 3 * 2 * 4);
        assert_eq!(&img.rgba[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_garbage_is_decode_error() {
        let err = decode_image_bytes(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ImageError::Decode(_)));
    }

    #[test]
    fn test_decode_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ship.png");
        std::fs::write(&path, png_bytes(4, 4)).unwrap();

        assert_eq!(decode_image(&path).unwrap().width, 4);
        let err = decode_image(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, ImageError::Io(_)));
    }

    #[test]
    fn test_same_path_loads_once() {
        let mut cache: ImageCache<u32> = ImageCache::new("assets");
        let calls = Cell::new(0);
        let loader = |_: &Path| {
            calls.set(calls.get() + 1);
            Ok(7)
        };

        assert_eq!(cache.get_or_load("images/a.png", loader), Some(&7));
        assert_eq!(cache.get_or_load("images/a.png", loader), Some(&7));
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.entries.len(), 1);
    }

    #[test]
    fn test_failure_is_cached() {
        let mut cache: ImageCache<u32> = ImageCache::new("assets");
        let calls = Cell::new(0);
        let failing = |_: &Path| {
            calls.set(calls.get() + 1);
            Err(ImageError::Io(std::io::Error::from(std::io::ErrorKind::NotFound)))
        };

        assert_eq!(cache.get_or_load("images/missing.png", failing), None);
        assert_eq!(cache.get_or_load("images/missing.png", |_: &Path| Ok(1)), None);
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.entries.get("images/missing.png"), Some(&None));
    }

    #[test]
    fn test_paths_resolve_against_base_dir() {
        let mut cache: ImageCache<PathBuf> = ImageCache::new("/data");
        let got = cache.get_or_load("images/x.png", |p: &Path| Ok(p.to_path_buf())).cloned();
        assert_eq!(got, Some(PathBuf::from("/data/images/x.png")));
    }
}
