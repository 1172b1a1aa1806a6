//! Command line front-end to the NLPCC 2013 EVSAM05 dependency corpus
//!
//! Makes sure a split of the corpus is available in the local cache, then
//! prints its sentences as JSON lines, or a summary of them.

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use nlpcc13_evsam05::{
    conll, progress::ProgressReport, split, Config, Dataset, HttpFetcher, SentenceRecord, Split,
    NLPCC13_EVSAM05_HIT,
};
use std::{num::NonZeroUsize, path::PathBuf, sync::Arc};
use tokio::io::{AsyncWriteExt, BufWriter};

/// Load a split of the NLPCC 2013 EVSAM05 (HIT) Chinese dependency treebank
///
/// The corpus is downloaded on first use and kept in a local cache. Every
/// sentence is printed as a JSON object whose keys are the CoNLL-X columns
/// ID, FORM, LEMMA, CPOS, POS, FEATS, HEAD and DEPREL.
#[derive(Parser, Debug)]
#[command(version, author)]
struct Args {
    /// Split to be loaded: train, dev or test
    ///
    /// Will interactively prompt for a split if not specified.
    #[arg(short, long, default_value = None)]
    split: Option<Split>,

    /// Directory where datasets are cached
    ///
    /// By default, the per-user cache directory of this program is used.
    #[arg(long, env = "NLPCC13_EVSAM05_CACHE")]
    cache_dir: Option<PathBuf>,

    /// Parse this file instead of the cached corpus
    ///
    /// The file must follow the column layout of the selected split. Nothing
    /// is downloaded in this mode.
    #[arg(short = 'f', long)]
    data_file: Option<PathBuf>,

    /// Stop after this many sentences
    #[arg(short = 'n', long)]
    max_sentences: Option<NonZeroUsize>,

    /// Only print sentence and token counts
    #[arg(long, default_value_t = false)]
    summary: bool,
}
//
impl Args {
    /// Where sentences should be read from
    ///
    /// The cache directory is only resolved when no data file was given.
    fn source(&self) -> Result<Source> {
        if let Some(path) = &self.data_file {
            return Ok(Source::File(path.clone()));
        }
        let config = match &self.cache_dir {
            Some(cache_dir) => Config::new(cache_dir.clone(), NLPCC13_EVSAM05_HIT),
            None => Config::with_default_cache_root(NLPCC13_EVSAM05_HIT)?,
        };
        Ok(Source::Cache(config))
    }
}

/// Origin of the sentences to be displayed
#[derive(Debug)]
enum Source {
    /// User-provided file
    File(PathBuf),

    /// Cached copy of the corpus, downloaded as needed
    Cache(Arc<Config>),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Set up logging
    setup_logging().map_err(|e| anyhow::format_err!("{e}"))?;

    // Decode CLI arguments
    let args = Args::parse();

    // Pick a split
    let split = match args.split {
        Some(split) => split,
        None => split::prompt().context("prompting for a dataset split")?,
    };

    // Open the sentence stream
    let sentences = match args.source()? {
        Source::File(path) => conll::parse(path, split)?,
        Source::Cache(config) => {
            let fetcher = HttpFetcher::new(reqwest::Client::new(), ProgressReport::new());
            Dataset::new(config, fetcher).load(split).await?
        }
    };
    let limit = args.max_sentences.map_or(usize::MAX, NonZeroUsize::get);
    let sentences = sentences.take(limit);

    // Display sentences or their summary
    let stdout = tokio::io::stdout();
    let mut stdout = BufWriter::new(stdout);
    if args.summary {
        let mut num_sentences = 0;
        let mut num_tokens = 0;
        for sentence in sentences {
            num_sentences += 1;
            num_tokens += sentence?.len();
        }
        let summary = format!("{split}: {num_sentences} sentences, {num_tokens} tokens\n");
        stdout.write_all(summary.as_bytes()).await?;
    } else {
        for sentence in sentences {
            let sentence: SentenceRecord = sentence?;
            let json = serde_json::to_vec(&sentence).context("serializing a sentence")?;
            stdout.write_all(&json).await?;
            stdout.write_all(b"\n").await?;
        }
    }
    stdout.flush().await?;
    Ok(())
}

/// Set up logging
fn setup_logging() -> syslog::Result<()> {
    syslog::init(
        syslog::Facility::LOG_USER,
        if cfg!(feature = "log-trace") {
            LevelFilter::Trace
        } else if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        None,
    )
}
