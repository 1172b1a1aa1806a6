//! Extraction of gzipped tar archives

use anyhow::Context;
use async_compression::tokio::bufread::GzipDecoder;
use std::path::Path;
use tokio::{fs::File, io::BufReader};
use tokio_tar::Archive;

/// Unpack a `.tar.gz` archive into a directory
pub async fn extract(archive_path: &Path, dest_dir: &Path) -> anyhow::Result<()> {
    let context = || format!("extracting {}", archive_path.display());
    let gz_bytes = BufReader::new(File::open(archive_path).await.with_context(context)?);
    let tar_bytes = GzipDecoder::new(gz_bytes);
    Archive::new(tar_bytes)
        .unpack(dest_dir)
        .await
        .with_context(context)?;
    log::info!(
        "Extracted {} into {}",
        archive_path.display(),
        dest_dir.display()
    );
    Ok(())
}
