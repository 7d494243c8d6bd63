//! Fixed file layout of the data directory.

use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "public/data";

pub const NATIONAL_FORESTS: &str = "national-forests.json";
pub const RANGER_DISTRICTS: &str = "ranger-districts.json";
/// The shared artifact every stage rewrites.
pub const FORESTS_WITH_DISTRICTS: &str = "forests-with-districts.json";
pub const MVUM_ROADS: &str = "mvum-roads.json";
pub const MVUM_TRAILS: &str = "mvum-trails.json";
pub const CLOSED_ROADS: &str = "closed-roads.json";
pub const NFS_ROADS: &str = "nfs-roads.json";
/// Optional override for the built-in correction table.
pub const CORRECTIONS: &str = "corrections.json";

#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn artifact(&self) -> PathBuf {
        self.file(FORESTS_WITH_DISTRICTS)
    }
}

impl Default for DataDir {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}
