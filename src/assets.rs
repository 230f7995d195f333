//! Asset sources and image decoding.
//!
//! The engine never knows where art lives. It asks an [`AssetSource`] for
//! bytes by reference string, decodes them with `image`, and premultiplies
//! them into a `tiny_skia::Pixmap`.

use std::io;
use std::path::{Component, Path, PathBuf};

use rustc_hash::FxHashMap;
use tiny_skia::{IntSize, Pixmap};

use crate::error::AssetError;

/// Resolves asset references to encoded image bytes.
pub trait AssetSource {
    fn fetch(&self, reference: &str) -> Result<Vec<u8>, AssetError>;
}

impl<T: AssetSource + ?Sized> AssetSource for &T {
    fn fetch(&self, reference: &str) -> Result<Vec<u8>, AssetError> {
        (**self).fetch(reference)
    }
}

/// In-memory assets keyed by reference.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssets {
    entries: FxHashMap<String, Vec<u8>>,
}

impl MemoryAssets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, reference: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(reference.into(), bytes.into());
    }

    #[must_use]
    pub fn with(mut self, reference: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(reference, bytes);
        self
    }

    pub fn remove(&mut self, reference: &str) -> Option<Vec<u8>> {
        self.entries.remove(reference)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AssetSource for MemoryAssets {
    fn fetch(&self, reference: &str) -> Result<Vec<u8>, AssetError> {
        self.entries
            .get(reference)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(reference.to_string()))
    }
}

/// Assets read from files under a root directory.
///
/// References are relative paths. Absolute paths and `..` components are
/// treated as not found, so a reference cannot escape the root.
#[derive(Clone, Debug)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, reference: &str) -> Option<PathBuf> {
        let rel = Path::new(reference);
        let contained = rel
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        (contained && !reference.is_empty()).then(|| self.root.join(rel))
    }
}

impl AssetSource for DirAssets {
    fn fetch(&self, reference: &str) -> Result<Vec<u8>, AssetError> {
        let path = self
            .resolve(reference)
            .ok_or_else(|| AssetError::NotFound(reference.to_string()))?;
        std::fs::read(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => AssetError::NotFound(reference.to_string()),
            _ => AssetError::Io {
                reference: reference.to_string(),
                source,
            },
        })
    }
}

/// Decode PNG or JPEG bytes into a premultiplied pixmap.
pub fn decode_image(reference: &str, bytes: &[u8]) -> Result<Pixmap, AssetError> {
    let rgba = image::load_from_memory(bytes)
        .map_err(|source| AssetError::Decode {
            reference: reference.to_string(),
            source,
        })?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    let size =
        IntSize::from_wh(width, height).ok_or_else(|| AssetError::EmptyImage(reference.to_string()))?;

    let mut data = rgba.into_raw();
    for px in data.chunks_exact_mut(4) {
        let a = px[3];
        px[0] = premul_u8(px[0], a);
        px[1] = premul_u8(px[1], a);
        px[2] = premul_u8(px[2], a);
    }
    Pixmap::from_vec(data, size).ok_or_else(|| AssetError::EmptyImage(reference.to_string()))
}

fn premul_u8(c: u8, a: u8) -> u8 {
    ((c as u16 * a as u16 + 127) / 255) as u8
}

/// Per-export loader. Each reference is fetched and decoded at most once;
/// failures are logged and remembered as absent.
pub(crate) struct AssetLoader<'a> {
    source: &'a dyn AssetSource,
    cache: FxHashMap<String, Option<Pixmap>>,
}

impl<'a> AssetLoader<'a> {
    pub(crate) fn new(source: &'a dyn AssetSource) -> Self {
        Self {
            source,
            cache: FxHashMap::default(),
        }
    }

    fn fetch_decode(&self, reference: &str) -> Result<Pixmap, AssetError> {
        let bytes = self.source.fetch(reference)?;
        decode_image(reference, &bytes)
    }

    /// Load an asset that must be present.
    pub(crate) fn require(&mut self, reference: &str) -> Result<&Pixmap, AssetError> {
        if !self.cache.contains_key(reference) {
            let pixmap = self.fetch_decode(reference)?;
            self.cache.insert(reference.to_string(), Some(pixmap));
        }
        self.cache
            .get(reference)
            .and_then(Option::as_ref)
            .ok_or_else(|| AssetError::NotFound(reference.to_string()))
    }

    /// Load an optional asset; `None` if it cannot be fetched or decoded.
    pub(crate) fn load(&mut self, reference: &str) -> Option<&Pixmap> {
        if !self.cache.contains_key(reference) {
            let pixmap = match self.fetch_decode(reference) {
                Ok(p) => Some(p),
                Err(e) => {
                    log::warn!("skipping image: {e}");
                    None
                }
            };
            self.cache.insert(reference.to_string(), pixmap);
        }
        self.cache.get(reference).and_then(Option::as_ref)
    }

    #[cfg(test)]
    fn cached(&self) -> usize {
        self.cache.len()
    }
}
