//! Image cells: small thumbnails loaded from a file or a named icon.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;

/// Edge length of the thumbnails stored in image cells.
pub const SMALL_ICON_SIZE: u32 = 16;

const ICON_THEMES: &[&str] = &["hicolor", "Adwaita"];
const ICON_SIZES: &[&str] = &["16x16", "22x22", "24x24", "32x32", "48x48"];
const ICON_CATEGORIES: &[&str] = &[
    "apps",
    "actions",
    "status",
    "places",
    "devices",
    "mimetypes",
    "emblems",
];

pub trait ImageLoader {
    fn load(&self, source: &str) -> ImageHandle;
}

#[derive(Debug, Clone)]
pub enum ImageKind {
    Decoded(Arc<RgbaImage>),
    Missing,
}

#[derive(Debug, Clone)]
pub struct ImageHandle {
    source: String,
    kind: ImageKind,
}

impl ImageHandle {
    pub fn decoded(source: impl Into<String>, thumbnail: RgbaImage) -> Self {
        Self {
            source: source.into(),
            kind: ImageKind::Decoded(Arc::new(thumbnail)),
        }
    }

    pub fn missing(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind: ImageKind::Missing,
        }
    }

    /// The path or icon name the handle was created from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn kind(&self) -> &ImageKind {
        &self.kind
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.kind, ImageKind::Decoded(_))
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match &self.kind {
            ImageKind::Decoded(img) => Some(img.dimensions()),
            ImageKind::Missing => None,
        }
    }

    /// Alpha-weighted mean colour, used as the terminal swatch.
    pub fn average_rgb(&self) -> Option<(u8, u8, u8)> {
        let ImageKind::Decoded(img) = &self.kind else {
            return None;
        };

        let (mut r, mut g, mut b, mut weight) = (0u64, 0u64, 0u64, 0u64);
        for px in img.pixels() {
            let [pr, pg, pb, pa] = px.0;
            let a = u64::from(pa);
            r += u64::from(pr) * a;
            g += u64::from(pg) * a;
            b += u64::from(pb) * a;
            weight += a;
        }
        if weight == 0 {
            return None;
        }
        Some(((r / weight) as u8, (g / weight) as u8, (b / weight) as u8))
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.is_loaded() == other.is_loaded()
    }
}

/// Resolves image sources as file paths first, then as icon names.
#[derive(Debug, Clone, Default)]
pub struct IconResolver {
    dirs: Vec<PathBuf>,
}

impl IconResolver {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// Extra directories first, then the XDG icon locations.
    pub fn with_system_dirs(extra: Vec<PathBuf>) -> Self {
        let mut dirs = extra;
        dirs.extend(system_icon_dirs());
        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn resolve(&self, source: &str) -> Option<PathBuf> {
        if source.is_empty() {
            return None;
        }

        let direct = Path::new(source);
        if direct.is_file() {
            return Some(direct.to_path_buf());
        }

        let file_name = format!("{source}.png");
        for dir in &self.dirs {
            let flat = dir.join(&file_name);
            if flat.is_file() {
                return Some(flat);
            }
            for theme in ICON_THEMES {
                for size in ICON_SIZES {
                    for category in ICON_CATEGORIES {
                        let candidate = dir.join(theme).join(size).join(category).join(&file_name);
                        if candidate.is_file() {
                            return Some(candidate);
                        }
                    }
                }
            }
        }

        None
    }
}

impl ImageLoader for IconResolver {
    fn load(&self, source: &str) -> ImageHandle {
        let Some(path) = self.resolve(source) else {
            tracing::debug!(source, "image not found");
            return ImageHandle::missing(source);
        };

        match image::open(&path) {
            Ok(img) => {
                let thumb = img.thumbnail(SMALL_ICON_SIZE, SMALL_ICON_SIZE).to_rgba8();
                ImageHandle::decoded(source, thumb)
            }
            Err(err) => {
                tracing::debug!(source, path = %path.display(), error = %err, "image decode failed");
                ImageHandle::missing(source)
            }
        }
    }
}

fn system_icon_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    let home = std::env::var_os("HOME").map(PathBuf::from);
    match std::env::var_os("XDG_DATA_HOME") {
        Some(data_home) => dirs.push(PathBuf::from(data_home).join("icons")),
        None => {
            if let Some(home) = &home {
                dirs.push(home.join(".local/share/icons"));
            }
        }
    }
    if let Some(home) = &home {
        dirs.push(home.join(".icons"));
    }

    let data_dirs = std::env::var("XDG_DATA_DIRS")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "/usr/local/share:/usr/share".to_string());
    for dir in data_dirs.split(':').filter(|d| !d.is_empty()) {
        dirs.push(PathBuf::from(dir).join("icons"));
    }

    dirs.push(PathBuf::from("/usr/share/pixmaps"));
    dirs
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/image.rs"]
mod tests;
