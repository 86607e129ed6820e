use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
};

use engine::{
    graphics::Color,
    image::{Image, ImageError},
};

/// Side length of the stand-in icon used when a node's icon cannot be loaded.
pub const PLACEHOLDER_ICON_SIZE: u32 = 24;
const COLOR_PLACEHOLDER_ICON: Color = [200, 60, 200, 255];

/// Resolves asset-relative image paths (e.g. `icons/fire.png`) to decoded images.
pub trait ImageSource {
    fn load_image(&self, path: &str) -> Result<Image, ImageError>;
}

/// Loads PNG files below a root directory.
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `SKILLTREE_ASSETS_DIR`, falling back to the crate's bundled `assets/`.
    pub fn from_env() -> Self {
        if let Some(dir) = std::env::var_os("SKILLTREE_ASSETS_DIR") {
            return Self::new(dir);
        }
        Self::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}

impl ImageSource for AssetDir {
    fn load_image(&self, path: &str) -> Result<Image, ImageError> {
        Image::load_png(self.path(path))
    }
}

/// In-memory image table, for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryImages {
    images: HashMap<String, Image>,
}

impl MemoryImages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<String>, image: Image) -> Self {
        self.insert(path, image);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, image: Image) {
        self.images.insert(path.into(), image);
    }
}

impl ImageSource for MemoryImages {
    fn load_image(&self, path: &str) -> Result<Image, ImageError> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| ImageError::Io {
                path: PathBuf::from(path),
                source: io::Error::new(io::ErrorKind::NotFound, "no such in-memory image"),
            })
    }
}

/// Loads `path`, or logs a warning and returns the placeholder icon.
pub fn load_image_or_placeholder(images: &dyn ImageSource, path: &str) -> Image {
    match images.load_image(path) {
        Ok(image) => image,
        Err(err) => {
            log::warn!("using placeholder for icon {path:?}: {err}");
            Image::solid(
                PLACEHOLDER_ICON_SIZE,
                PLACEHOLDER_ICON_SIZE,
                COLOR_PLACEHOLDER_ICON,
            )
        }
    }
}
