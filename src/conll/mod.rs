//! Sentence reader for CoNLL-X style files

pub mod line;

use self::line::{IgnoreCause, RawLine};
use crate::{split::Split, Error, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    path::Path,
};

/// One token attribute per token of a sentence
pub type Column = Vec<Box<str>>;

/// Dependency-parsed sentence
///
/// All columns have one entry per token, in sentence order.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct SentenceRecord {
    /// Token counter, starting at 1
    pub id: Column,

    /// Word form or punctuation symbol
    pub form: Column,

    /// Lemma or stem of the word form
    pub lemma: Column,

    /// Coarse-grained part-of-speech tag
    pub cpos: Column,

    /// Fine-grained part-of-speech tag
    pub pos: Column,

    /// Morphological features
    pub feats: Column,

    /// ID of the head token, `0` for the root
    pub head: Column,

    /// Dependency relation to the head
    pub deprel: Column,
}
//
impl SentenceRecord {
    /// Number of tokens in the sentence
    pub fn len(&self) -> usize {
        self.id.len()
    }

    /// Truth that the sentence has no token
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    /// Build a record out of a block of token lines
    ///
    /// Lines are split on tabs and transposed into columns. Like a zip of all
    /// lines, the transposition stops at the shortest line, and the resulting
    /// column count must be exactly the one of the split.
    fn from_block(block: &[String], split: Split) -> Result<Self, usize> {
        let rows = block
            .iter()
            .map(|line| line.split('\t').collect::<Vec<_>>())
            .collect::<Vec<_>>();
        let width = rows.iter().map(Vec::len).min().unwrap_or(0);
        if width != split.column_count() {
            return Err(width);
        }

        let new_column = || Column::with_capacity(rows.len());
        let mut record = Self {
            id: new_column(),
            form: new_column(),
            lemma: new_column(),
            cpos: new_column(),
            pos: new_column(),
            feats: new_column(),
            head: new_column(),
            deprel: new_column(),
        };
        for row in &rows {
            let targets = [
                &mut record.id,
                &mut record.form,
                &mut record.lemma,
                &mut record.cpos,
                &mut record.pos,
                &mut record.feats,
                &mut record.head,
                &mut record.deprel,
            ];
            // PHEAD and PDEPREL, when present, are not part of the record
            for (column, field) in targets.into_iter().zip(row) {
                column.push((*field).into());
            }
        }
        Ok(record)
    }
}

/// Open a split file and iterate over its sentences
///
/// Each call re-reads the file from the start.
pub fn parse(path: impl AsRef<Path>, split: Split) -> Result<Sentences<BufReader<File>>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    log::debug!("Parsing {split} sentences from {}", path.display());
    Ok(Sentences::new(BufReader::new(file), split, path))
}

/// Lazy sequence of the sentences of a CoNLL-X file
///
/// Only sentences terminated by a boundary line are produced: a trailing
/// sentence without a final blank line is dropped. The sequence ends after
/// the first error.
#[derive(Debug)]
pub struct Sentences<R> {
    /// Remaining physical lines
    lines: Lines<R>,

    /// Split being read, which dictates the column count
    split: Split,

    /// Origin of the data, for error reporting
    path: Box<Path>,

    /// Token lines of the sentence being accumulated
    block: Vec<String>,

    /// Line number of the first token of `block`
    block_start: usize,

    /// Number of physical lines read so far
    line_no: usize,

    /// Truth that an error has been reported
    failed: bool,
}
//
impl<R: BufRead> Sentences<R> {
    /// Read sentences from a buffered reader
    pub fn new(reader: R, split: Split, path: impl AsRef<Path>) -> Self {
        Self {
            lines: reader.lines(),
            split,
            path: path.as_ref().into(),
            block: Vec::new(),
            block_start: 0,
            line_no: 0,
            failed: false,
        }
    }

    /// Turn the accumulated block into a record
    fn finish_block(&mut self) -> Result<SentenceRecord> {
        let block = std::mem::take(&mut self.block);
        SentenceRecord::from_block(&block, self.split).map_err(|found| {
            Error::MalformedRecord {
                path: self.path.clone(),
                line: self.block_start,
                expected: self.split.column_count(),
                found,
            }
        })
    }
}
//
impl<R: BufRead> Iterator for Sentences<R> {
    type Item = Result<SentenceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        while let Some(raw) = self.lines.next() {
            self.line_no += 1;
            let raw = match raw {
                Ok(raw) => raw,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(Error::io(&self.path, e)));
                }
            };
            match line::classify(&raw) {
                RawLine::Content(content) => {
                    if self.block.is_empty() {
                        self.block_start = self.line_no;
                    }
                    self.block.push(content.to_owned());
                }
                RawLine::Boundary if self.block.is_empty() => {}
                RawLine::Boundary => {
                    let record = self.finish_block();
                    self.failed = record.is_err();
                    return Some(record);
                }
                RawLine::Ignored(cause) => {
                    let cause = match cause {
                        IgnoreCause::Comment => "it's a comment",
                        IgnoreCause::NotAToken => "it doesn't start with a token ID",
                    };
                    log::trace!("Ignored line {} {raw:?} because {cause}", self.line_no);
                }
            }
        }
        if !self.block.is_empty() {
            log::debug!(
                "Dropped {} token lines after the last sentence boundary of {}",
                self.block.len(),
                self.path.display()
            );
            self.block.clear();
        }
        None
    }
}
