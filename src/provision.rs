use std::path::{Path, PathBuf};

use crate::data::manager::DatasetManager;
use crate::error::{DataError, Result};

// ---------------------------------------------------------------------------
// Archive provisioning contract
// ---------------------------------------------------------------------------

/// Published archive of the challenge's public dataset.
pub const PUBLIC_DATASET_URL: &str =
    "https://www.codabench.org/datasets/download/9c99a23c-f199-405a-b795-b42ea2dd652d/";

/// Name of the directory the archive extracts to inside the cache.
pub const INPUT_DATA_DIR: &str = "input_data";

/// Ensures a local cache directory contains the extracted dataset tree.
///
/// Implementations must be idempotent: when the tree is already present they
/// return its root without downloading or extracting anything.  The data
/// layer depends only on receiving a root path laid out as the loader
/// expects; download and extraction mechanics stay behind this trait.
pub trait ArchiveProvisioner {
    fn ensure_local(&self, url: &str, cache_dir: &Path) -> Result<PathBuf>;
}

/// Provisioner for trees that are already on disk.
///
/// Resolves `cache_dir/input_data` when present and fails with `MissingFile`
/// otherwise; it never touches the network.
pub struct PreExtracted;

impl ArchiveProvisioner for PreExtracted {
    fn ensure_local(&self, _url: &str, cache_dir: &Path) -> Result<PathBuf> {
        let root = cache_dir.join(INPUT_DATA_DIR);
        if !root.is_dir() {
            return Err(DataError::missing(&root));
        }
        Ok(root)
    }
}

/// Manager for the public challenge dataset, provisioned into `cache_dir`.
///
/// Runs the provisioner against [`PUBLIC_DATASET_URL`] and returns a manager
/// rooted at the extracted tree; nothing is loaded yet.
pub fn public_dataset<P: ArchiveProvisioner>(
    provisioner: &P,
    cache_dir: &Path,
) -> Result<DatasetManager> {
    let root = provisioner.ensure_local(PUBLIC_DATASET_URL, cache_dir)?;
    log::info!("public dataset available at {}", root.display());
    Ok(DatasetManager::new(root))
}
