//! Asset existence checks for the sound resolver

use std::path::{Path, PathBuf};

use hashbrown::HashSet;

/// Answers whether a named sound asset can be played
pub trait AssetStore: Send + Sync {
    fn exists(&self, asset: &str) -> bool;
}

/// Sound files on disk, searched across directories in order.
///
/// The first directory is usually the user's override directory, the last the
/// bundled sounds shipped with the appliance.
#[derive(Debug, Clone)]
pub struct SoundsDirectory {
    roots: Vec<PathBuf>,
}

impl SoundsDirectory {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn single(root: impl AsRef<Path>) -> Self {
        Self::new(vec![root.as_ref().to_path_buf()])
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Full path of the first matching file
    pub fn locate(&self, asset: &str) -> Option<PathBuf> {
        self.roots
            .iter()
            .map(|root| root.join(asset))
            .find(|path| path.is_file())
    }
}

impl AssetStore for SoundsDirectory {
    fn exists(&self, asset: &str) -> bool {
        self.locate(asset).is_some()
    }
}

/// Fixed in-memory asset list
#[derive(Debug, Clone, Default)]
pub struct StaticAssets {
    names: HashSet<String>,
}

impl StaticAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset: impl Into<String>) {
        self.names.insert(asset.into());
    }
}

impl<S: Into<String>> FromIterator<S> for StaticAssets {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl AssetStore for StaticAssets {
    fn exists(&self, asset: &str) -> bool {
        self.names.contains(asset)
    }
}
