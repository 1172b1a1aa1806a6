//! Loader for the NLPCC 2013 EVSAM05 (HIT) Chinese dependency parsing corpus
//!
//! The corpus is distributed as a gzipped tarball of CoNLL-X style text files,
//! one per split. This crate knows where to fetch it, keeps a verified copy in
//! a local cache, and parses each split into a lazy sequence of
//! [`SentenceRecord`]s.
//!
//! The CoNLL-X columns are, in order:
//!
//! - `ID`: token counter, starting at 1 for each new sentence
//! - `FORM`: word form or punctuation symbol
//! - `LEMMA`: lemma or stem of the word form, or `_` if not available
//! - `CPOSTAG`: coarse-grained part-of-speech tag
//! - `POSTAG`: fine-grained part-of-speech tag
//! - `FEATS`: syntactic and/or morphological features, or `_`
//! - `HEAD`: head of the current token, either an `ID` or `0` for the root
//! - `DEPREL`: dependency relation to the `HEAD`
//! - `PHEAD`: projective head of the current token, or `_`
//! - `PDEPREL`: dependency relation to the `PHEAD`, or `_`
//!
//! The test split only carries the first eight columns.

pub mod checksum;
pub mod config;
pub mod conll;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod locate;
pub mod progress;
pub mod split;

pub use crate::{
    config::Config,
    conll::{SentenceRecord, Sentences},
    dataset::Dataset,
    error::{Error, Result},
    fetch::{Fetch, HttpFetcher},
    locate::Locator,
    split::{DatasetInfo, Split, SplitMetadata, NLPCC13_EVSAM05_HIT},
};
