//! Resolution of split files inside the local cache

use crate::{checksum, config::Config, fetch::Fetch, split::Split, Error, Result};
use std::{path::PathBuf, sync::Arc};

/// Finds split files in the cache, fetching the dataset when they are missing
/// or corrupted
///
/// There is no locking around the cache directory: concurrent first-time
/// fetches of the same dataset must be serialized by the caller.
#[derive(Debug)]
pub struct Locator<F> {
    /// Cache location and dataset description
    config: Arc<Config>,

    /// Source of dataset archives
    fetcher: F,
}
//
impl<F: Fetch> Locator<F> {
    /// Set up a locator
    pub fn new(config: Arc<Config>, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    /// Loader configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path of a split file, fetching the dataset if needed
    ///
    /// Once a fetch succeeds, the split file is not checked again.
    pub async fn locate(&self, split: Split) -> Result<PathBuf> {
        let path = self.config.split_path(split);
        let expected = self.config.dataset.split(split).expected_checksum;
        if checksum::file_matches(&path, expected).await {
            log::debug!("Using cached {split} split at {}", path.display());
            return Ok(path);
        }

        let dataset = &self.config.dataset;
        log::info!(
            "The {split} split is missing or corrupted at {}, fetching {}",
            path.display(),
            dataset.url
        );
        self.fetcher
            .fetch(
                dataset.url,
                &self.config.dataset_dir(),
                dataset.archive_checksum,
            )
            .await
            .map_err(|e| Error::DownloadFailure {
                url: dataset.url.into(),
                source: e.into(),
            })?;
        Ok(path)
    }

    /// Like [`locate()`](Self::locate), with a split name
    pub async fn locate_by_name(&self, split: &str) -> Result<PathBuf> {
        self.locate(split.parse()?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::{DatasetInfo, SplitMetadata};
    use std::{
        path::Path,
        sync::atomic::{AtomicUsize, Ordering},
    };

    /// MD5 of "1\tx\n\n"
    const CONTENTS_MD5: &str = "8383449db4bf0b1f64fbd15ebe8a9e87";

    fn test_dataset(checksum: &'static str) -> DatasetInfo {
        let meta = |relative_path| SplitMetadata {
            relative_path,
            expected_checksum: checksum,
        };
        DatasetInfo {
            name: "Corpus",
            url: "https://example.com/corpus.tar.gz",
            archive_checksum: "00000000000000000000000000000000",
            splits: [
                meta("corpus/train.conll"),
                meta("corpus/dev.conll"),
                meta("corpus/test.conll"),
            ],
        }
    }

    /// Fetcher that writes the same contents into every split file
    #[derive(Default)]
    struct FakeFetcher {
        calls: AtomicUsize,
        fail: bool,
    }
    //
    impl Fetch for FakeFetcher {
        async fn fetch(&self, url: &str, dest_dir: &Path, archive_checksum: &str) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            assert_eq!(url, "https://example.com/corpus.tar.gz");
            assert_eq!(archive_checksum, "00000000000000000000000000000000");
            anyhow::ensure!(!self.fail, "network is down");
            let corpus = dest_dir.join("corpus");
            std::fs::create_dir_all(&corpus)?;
            for split in Split::ALL {
                std::fs::write(corpus.join(format!("{split}.conll")), "1\tx\n\n")?;
            }
            Ok(())
        }
    }

    fn locator(root: &Path, fetcher: FakeFetcher) -> Locator<FakeFetcher> {
        Locator::new(Config::new(root, test_dataset(CONTENTS_MD5)), fetcher)
    }

    #[tokio::test]
    async fn fetch_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let locator = locator(dir.path(), FakeFetcher::default());
        let path = locator.locate(Split::Train).await.unwrap();
        assert_eq!(path, dir.path().join("Corpus/corpus/train.conll"));
        assert!(path.exists());
        assert_eq!(locator.fetcher.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn reuse_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let locator = locator(dir.path(), FakeFetcher::default());
        locator.locate(Split::Dev).await.unwrap();
        let path = locator.locate(Split::Dev).await.unwrap();
        assert_eq!(path, dir.path().join("Corpus/corpus/dev.conll"));
        let path = locator.locate_by_name("test").await.unwrap();
        assert_eq!(path, dir.path().join("Corpus/corpus/test.conll"));
        assert_eq!(locator.fetcher.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn refetch_corrupted_file() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("Corpus/corpus");
        std::fs::create_dir_all(&corpus).unwrap();
        std::fs::write(corpus.join("test.conll"), "truncated").unwrap();

        let locator = locator(dir.path(), FakeFetcher::default());
        let path = locator.locate(Split::Test).await.unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "1\tx\n\n");
        assert_eq!(locator.fetcher.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn report_download_failure() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher {
            fail: true,
            ..Default::default()
        };
        let locator = locator(dir.path(), fetcher);
        match locator.locate(Split::Train).await {
            Err(Error::DownloadFailure { url, source }) => {
                assert_eq!(&*url, "https://example.com/corpus.tar.gz");
                assert_eq!(source.to_string(), "network is down");
            }
            other => panic!("expected DownloadFailure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reject_unknown_split_without_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let locator = locator(dir.path(), FakeFetcher::default());
        assert!(matches!(
            locator.locate_by_name("validation").await,
            Err(Error::UnknownSplit(_))
        ));
        assert_eq!(locator.fetcher.calls.load(Ordering::Relaxed), 0);
    }
}
