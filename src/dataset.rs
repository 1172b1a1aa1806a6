//! Entry point that ties split location and parsing together

use crate::{
    config::Config,
    conll::{self, Sentences},
    fetch::Fetch,
    locate::Locator,
    split::Split,
    Result,
};
use std::{fs::File, io::BufReader, path::Path, sync::Arc};

/// Sentences of one split file
pub type SplitSentences = Sentences<BufReader<File>>;

/// Downloadable, cached dependency parsing corpus
#[derive(Debug)]
pub struct Dataset<F> {
    /// Finds (and if needed fetches) split files
    locator: Locator<F>,
}
//
impl<F: Fetch> Dataset<F> {
    /// Set up the dataset
    pub fn new(config: Arc<Config>, fetcher: F) -> Self {
        Self {
            locator: Locator::new(config, fetcher),
        }
    }

    /// Loader configuration
    pub fn config(&self) -> &Config {
        self.locator.config()
    }

    /// Make sure a split is available locally, then iterate over its sentences
    pub async fn load(&self, split: Split) -> Result<SplitSentences> {
        let path = self.locator.locate(split).await?;
        conll::parse(path, split)
    }

    /// Iterate over the sentences of a local file, as if it were a split of
    /// this dataset
    pub fn load_file(&self, path: impl AsRef<Path>, split: Split) -> Result<SplitSentences> {
        conll::parse(path, split)
    }
}
