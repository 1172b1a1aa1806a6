//! Dataset splits and the static description of the corpus

use crate::{Error, Result};
use dialoguer::FuzzySelect;
use std::{fmt, str::FromStr};

/// Partition of the corpus
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Split {
    /// Training sentences, with projective head columns
    Train,

    /// Development sentences, with projective head columns
    Dev,

    /// Test sentences, without projective head columns
    Test,
}
//
impl Split {
    /// All splits, in canonical order
    pub const ALL: [Split; 3] = [Split::Train, Split::Dev, Split::Test];

    /// Name of the split, as used on the command line and in file names
    pub fn name(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Dev => "dev",
            Split::Test => "test",
        }
    }

    /// Number of tab-separated columns that every token line must provide
    pub fn column_count(self) -> usize {
        match self {
            Split::Train | Split::Dev => 10,
            Split::Test => 8,
        }
    }
}
//
impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
//
impl FromStr for Split {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Split::ALL
            .into_iter()
            .find(|split| split.name() == s)
            .ok_or_else(|| Error::UnknownSplit(s.into()))
    }
}

/// Ask the user to select a split
pub fn prompt() -> dialoguer::Result<Split> {
    let names = Split::ALL.map(Split::name);
    let split_idx = FuzzySelect::new()
        .with_prompt("Which split should I load?")
        .items(&names)
        .default(0)
        .interact()?;
    Ok(Split::ALL[split_idx])
}

/// Where a split lives inside the extracted archive, and what it should hash to
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SplitMetadata {
    /// Path relative to the dataset directory
    pub relative_path: &'static str,

    /// Lowercase hex MD5 digest of the file
    pub expected_checksum: &'static str,
}

/// What we know about a downloadable corpus
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DatasetInfo {
    /// Name of the dataset directory under the cache root
    pub name: &'static str,

    /// Location of the gzipped tar archive
    pub url: &'static str,

    /// Lowercase hex MD5 digest of the archive
    pub archive_checksum: &'static str,

    /// Per-split metadata, indexed like [`Split::ALL`]
    pub splits: [SplitMetadata; 3],
}
//
impl DatasetInfo {
    /// Metadata of one split
    pub fn split(&self, split: Split) -> SplitMetadata {
        match split {
            Split::Train => self.splits[0],
            Split::Dev => self.splits[1],
            Split::Test => self.splits[2],
        }
    }
}

/// The NLPCC 2013 EVSAM05 corpus, as mirrored by PaddleNLP
pub static NLPCC13_EVSAM05_HIT: DatasetInfo = DatasetInfo {
    name: "NLPCC13EVSAM05HIT",
    url: "https://paddlenlp.bj.bcebos.com/datasets/nlpcc13_evsam05_hit.tar.gz",
    archive_checksum: "5988ede79690dc87aa6e4343b5299944",
    splits: [
        SplitMetadata {
            relative_path: "nlpcc13_evsam05_hit/train.conll",
            expected_checksum: "d82e667950a5e22b18baf595b9feb30f",
        },
        SplitMetadata {
            relative_path: "nlpcc13_evsam05_hit/dev.conll",
            expected_checksum: "b71b08dc85e652769bfbda30b1e352a9",
        },
        SplitMetadata {
            relative_path: "nlpcc13_evsam05_hit/test.conll",
            expected_checksum: "784fb9d966a286df5370f7eee4013cf0",
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_splits() {
        for split in Split::ALL {
            assert_eq!(split.name().parse::<Split>().unwrap(), split);
            assert_eq!(split.to_string(), split.name());
        }
    }

    #[test]
    fn reject_unknown_split() {
        for name in ["validation", "Train", "", " test"] {
            match name.parse::<Split>() {
                Err(Error::UnknownSplit(bad)) => assert_eq!(&*bad, name),
                other => panic!("expected UnknownSplit for {name:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn column_counts() {
        assert_eq!(Split::Train.column_count(), 10);
        assert_eq!(Split::Dev.column_count(), 10);
        assert_eq!(Split::Test.column_count(), 8);
    }

    #[test]
    fn split_metadata_matches_split_names() {
        for split in Split::ALL {
            let meta = NLPCC13_EVSAM05_HIT.split(split);
            assert!(meta.relative_path.ends_with(&format!("/{split}.conll")));
            assert_eq!(meta.expected_checksum.len(), 32);
        }
    }
}
