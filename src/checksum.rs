//! MD5 digests of cached files

use md5::{Digest, Md5};
use std::{io, path::Path};
use tokio::{fs::File, io::AsyncReadExt};

/// Size of the blocks in which files are hashed
const BLOCK_SIZE: usize = 64 * 1024;

/// Compute the lowercase hex MD5 digest of a file
pub async fn md5_file(path: impl AsRef<Path>) -> io::Result<String> {
    let mut file = File::open(path).await?;
    let mut hasher = Md5::new();
    let mut block = vec![0; BLOCK_SIZE];
    loop {
        let len = file.read(&mut block).await?;
        if len == 0 {
            break;
        }
        hasher.update(&block[..len]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Truth that a file exists and has the expected MD5 digest
///
/// Files which cannot be read are reported as not matching.
pub async fn file_matches(path: impl AsRef<Path>, expected: &str) -> bool {
    let path = path.as_ref();
    match md5_file(path).await {
        Ok(digest) if digest == expected => true,
        Ok(digest) => {
            log::debug!("{} has MD5 {digest}, expected {expected}", path.display());
            false
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            log::warn!("Failed to hash {}: {e}", path.display());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn digest_of_known_contents() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty");
        let hello = dir.path().join("hello");
        std::fs::write(&empty, b"").unwrap();
        std::fs::write(&hello, b"hello").unwrap();
        assert_eq!(
            md5_file(&empty).await.unwrap(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
        assert_eq!(
            md5_file(&hello).await.unwrap(),
            "5d41402abc4b2a76b9719d911017c592"
        );
    }

    #[tokio::test]
    async fn digest_spanning_several_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big");
        let contents = vec![b'x'; 3 * BLOCK_SIZE + 17];
        std::fs::write(&path, &contents).unwrap();
        assert_eq!(
            md5_file(&path).await.unwrap(),
            hex::encode(Md5::digest(&contents))
        );
    }

    #[tokio::test]
    async fn matching() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello");
        assert!(!file_matches(&path, "5d41402abc4b2a76b9719d911017c592").await);
        std::fs::write(&path, b"hello").unwrap();
        assert!(file_matches(&path, "5d41402abc4b2a76b9719d911017c592").await);
        assert!(!file_matches(&path, "d41d8cd98f00b204e9800998ecf8427e").await);
    }
}
