//! Image path resolution and loading.
//!
//! Images are referenced by path from inside a note. Absolute paths are taken as written, `~`
//! expands to the home directory, and everything else is relative to the notes root.

use crate::model::ImagePreview;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Reads the natural size of an image.
///
/// The parser only needs to know whether an image exists and how big it is; returning `None`
/// leaves the Markdown as literal text.
pub trait ImageLoader: Send + Sync {
    fn load(&self, resolved: &Path) -> Option<ImagePreview>;
}

/// Reads image headers from disk with the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageLoader;

impl ImageLoader for FsImageLoader {
    fn load(&self, resolved: &Path) -> Option<ImagePreview> {
        match image::image_dimensions(resolved) {
            Ok((width, height)) => Some(ImagePreview {
                path: resolved.to_path_buf(),
                width: width as f32,
                height: height as f32,
            }),
            Err(err) => {
                log::debug!("image {} not loaded: {err}", resolved.display());
                None
            }
        }
    }
}

/// Never loads anything; every image stays literal Markdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageLoader for NoImages {
    fn load(&self, _resolved: &Path) -> Option<ImagePreview> {
        None
    }
}

/// Fixed set of known images, keyed by resolved path.
#[derive(Debug, Clone, Default)]
pub struct MemoryImages {
    sizes: HashMap<PathBuf, (f32, f32)>,
}

impl MemoryImages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<PathBuf>, width: f32, height: f32) -> Self {
        self.sizes.insert(path.into(), (width, height));
        self
    }
}

impl ImageLoader for MemoryImages {
    fn load(&self, resolved: &Path) -> Option<ImagePreview> {
        self.sizes
            .get(resolved)
            .map(|&(width, height)| ImagePreview {
                path: resolved.to_path_buf(),
                width,
                height,
            })
    }
}

/// Where an image path written in a note points on disk.
pub fn resolve_image_path(path: &str, notes_root: &Path, home: Option<&Path>) -> PathBuf {
    if path.starts_with('/') {
        return PathBuf::from(path);
    }
    if let Some(rest) = path.strip_prefix('~') {
        return match home {
            Some(home) => home.join(rest.trim_start_matches('/')),
            None => PathBuf::from(path),
        };
    }
    notes_root.join(path)
}

/// Shrink a preview to `max_width`, keeping its aspect ratio. Narrower images are untouched.
pub fn fit_width(preview: ImagePreview, max_width: f32) -> ImagePreview {
    if preview.width <= max_width || preview.width <= 0.0 {
        return preview;
    }
    let scale = max_width / preview.width;
    ImagePreview {
        width: preview.width * scale,
        height: preview.height * scale,
        ..preview
    }
}
