//! Download of the dataset archive

pub mod archive;

use crate::{
    checksum,
    progress::{ProgressReport, Work},
};
use anyhow::Context;
use futures::stream::StreamExt;
use md5::{Digest, Md5};
use reqwest::Response;
use std::{
    future::Future,
    io,
    path::{Path, PathBuf},
};
use tokio::{fs, io::AsyncWriteExt};

/// Number of download attempts before giving up on an archive
pub const DOWNLOAD_ATTEMPTS: usize = 3;

/// Mechanism that makes the contents of a dataset archive available locally
pub trait Fetch {
    /// Download the archive at `url`, check that it has the expected MD5
    /// digest, and extract it into `dest_dir`
    fn fetch(
        &self,
        url: &str,
        dest_dir: &Path,
        archive_checksum: &str,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// [`Fetch`] implementation that downloads archives over HTTP(S)
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    /// HTTP client
    client: reqwest::Client,

    /// Where download progress is displayed
    report: ProgressReport,
}
//
impl HttpFetcher {
    /// Set up an HTTP fetcher
    pub fn new(client: reqwest::Client, report: ProgressReport) -> Self {
        Self { client, report }
    }

    /// Download an archive into `archive_path` unless a valid copy is
    /// already there
    async fn download_verified(
        &self,
        url: &str,
        archive_path: &Path,
        archive_checksum: &str,
    ) -> anyhow::Result<()> {
        if checksum::file_matches(archive_path, archive_checksum).await {
            log::info!(
                "Reusing previously downloaded archive {}",
                archive_path.display()
            );
            return Ok(());
        }

        let part_path = part_path(archive_path);
        let mut attempt = 1;
        loop {
            let outcome = self.download(url, &part_path).await.and_then(|digest| {
                anyhow::ensure!(
                    digest == archive_checksum,
                    "downloaded archive has MD5 {digest}, expected {archive_checksum}"
                );
                Ok(())
            });
            match outcome {
                Ok(()) => {
                    return fs::rename(&part_path, archive_path).await.with_context(|| {
                        format!("moving download to {}", archive_path.display())
                    })
                }
                Err(e) => {
                    discard(&part_path).await;
                    if attempt >= DOWNLOAD_ATTEMPTS {
                        return Err(e).with_context(|| {
                            format!("downloading {url} failed after {DOWNLOAD_ATTEMPTS} attempts")
                        });
                    }
                    log::warn!("Download attempt {attempt}/{DOWNLOAD_ATTEMPTS} of {url} failed: {e:#}");
                    attempt += 1;
                }
            }
        }
    }

    /// Download a file into `dest_path`, return its MD5 digest
    async fn download(&self, url: &str, dest_path: &Path) -> anyhow::Result<String> {
        // Start the download
        let context = || format!("initiating download of {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(Response::error_for_status)
            .with_context(context)?;
        let tracker = self
            .report
            .add(
                format!("Downloading {url}"),
                Work::from(response.content_length()),
            )
            .finish_on_drop();

        // Stream the body into the file, hashing it on the way
        let mut file = fs::File::create(dest_path)
            .await
            .with_context(|| format!("creating {}", dest_path.display()))?;
        let mut hasher = Md5::new();
        let mut bytes = response.bytes_stream();
        let context = || format!("downloading {url}");
        while let Some(block) = bytes.next().await {
            let block = block.with_context(context)?;
            hasher.update(&block);
            file.write_all(&block).await.with_context(context)?;
            tracker.make_progress(block.len() as u64);
        }
        file.flush().await.with_context(context)?;
        Ok(hex::encode(hasher.finalize()))
    }
}
//
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str, dest_dir: &Path, archive_checksum: &str) -> anyhow::Result<()> {
        fs::create_dir_all(dest_dir)
            .await
            .with_context(|| format!("setting up {}", dest_dir.display()))?;
        let archive_path = dest_dir.join(archive_name(url)?);
        self.download_verified(url, &archive_path, archive_checksum)
            .await?;
        archive::extract(&archive_path, dest_dir).await?;
        fs::remove_file(&archive_path)
            .await
            .with_context(|| format!("removing {}", archive_path.display()))?;
        Ok(())
    }
}

/// File name under which an archive is saved, taken from its URL
fn archive_name(url: &str) -> anyhow::Result<&str> {
    url.rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .with_context(|| format!("{url} does not end with a file name"))
}

/// Remove a failed download, if anything was written
async fn discard(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => log::warn!("Failed to remove {}: {e}", path.display()),
    }
}

/// Temporary location of an ongoing download
fn part_path(dest_path: &Path) -> PathBuf {
    let mut part = dest_path.as_os_str().to_owned();
    part.push(".part");
    part.into()
}
