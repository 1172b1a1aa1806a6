//! Dataset loader configuration

use crate::{
    split::{DatasetInfo, Split},
    Error, Result,
};
use directories::ProjectDirs;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

/// Where and what to load
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Directory under which every dataset gets its own subdirectory
    pub cache_root: Box<Path>,

    /// Corpus to be loaded
    pub dataset: DatasetInfo,
}
//
impl Config {
    /// Configure the loader to use a specific cache root
    pub fn new(cache_root: impl Into<PathBuf>, dataset: DatasetInfo) -> Arc<Self> {
        Arc::new(Self {
            cache_root: cache_root.into().into_boxed_path(),
            dataset,
        })
    }

    /// Configure the loader to use the per-user cache directory
    pub fn with_default_cache_root(dataset: DatasetInfo) -> Result<Arc<Self>> {
        let dirs = ProjectDirs::from("", "", env!("CARGO_PKG_NAME")).ok_or(Error::NoCacheDir)?;
        Ok(Self::new(dirs.cache_dir(), dataset))
    }

    /// Directory into which the dataset archive gets extracted
    pub fn dataset_dir(&self) -> PathBuf {
        self.cache_root.join(self.dataset.name)
    }

    /// Expected location of a split file
    pub fn split_path(&self, split: Split) -> PathBuf {
        self.dataset_dir().join(self.dataset.split(split).relative_path)
    }
}
