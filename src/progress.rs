//! Progress reporting infrastructure

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::{borrow::Cow, ops::Deref};

/// CLI progress report of ongoing operations
///
/// To avoid corrupted terminal output, you should not write anything to stderr
/// yourself as long as a report is being displayed. Please use logs for debug
/// messages.
#[derive(Clone, Debug, Default)]
pub struct ProgressReport(MultiProgress);
//
impl ProgressReport {
    /// Prepare to report progress on the cli
    pub fn new() -> Self {
        Self::default()
    }

    /// Report that is never displayed, e.g. for tests and library users
    pub fn hidden() -> Self {
        Self(MultiProgress::with_draw_target(ProgressDrawTarget::hidden()))
    }

    /// Prepare to report on a new operation
    pub fn add(&self, what: impl Into<Cow<'static, str>>, work: Work) -> ProgressTracker {
        let style_trailer = match work {
            Work::Bytes(_) => {
                "{decimal_bytes}/{decimal_total_bytes} ({decimal_bytes_per_sec}, ~{eta} left)"
            }
            Work::UnknownBytes => "{decimal_bytes} ({decimal_bytes_per_sec})",
        };
        let bar = match work {
            Work::Bytes(len) => ProgressBar::new(len),
            Work::UnknownBytes => ProgressBar::new_spinner(),
        };
        let bar = bar.with_prefix(what.into()).with_style(
            ProgressStyle::with_template(&format!("{{prefix}} {{wide_bar}} {style_trailer}"))
                .expect("all styles above should be valid indicatif styles"),
        );
        ProgressTracker {
            bar: self.0.add(bar),
            report: self.0.clone(),
            work,
        }
    }
}

/// Work whose progression can be tracked
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Work {
    /// Known number of bytes to be processed
    Bytes(u64),

    /// Bytes to be processed, total unknown
    UnknownBytes,
}
//
impl From<Option<u64>> for Work {
    fn from(len: Option<u64>) -> Self {
        len.map_or(Work::UnknownBytes, Work::Bytes)
    }
}

/// Mechanism to track progress
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    /// Progress bar for this specific process
    bar: ProgressBar,

    /// Underlying process report
    report: MultiProgress,

    /// Amount of work that was announced
    work: Work,
}
//
impl ProgressTracker {
    /// Show that a certain amount of progress has been made
    ///
    /// Returns truth that the progress bar has reached its maximum value. This
    /// never happens when the total amount of work is unknown.
    pub fn make_progress(&self, progress: u64) -> bool {
        self.bar.inc(progress);
        match self.work {
            Work::Bytes(max) => {
                let current = self.bar.position();
                if current > max {
                    log::debug!("Recorded {current} bytes of progress out of {max} announced");
                }
                current >= max
            }
            Work::UnknownBytes => false,
        }
    }

    /// Hide the progress bar, whether the work is complete or abandoned
    pub fn finish(&self) {
        self.bar.finish_and_clear();
        self.report.remove(&self.bar);
    }

    /// Truth that the progress bar has been hidden
    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }

    /// Hide the progress bar once the returned guard goes out of scope,
    /// including on early returns
    pub fn finish_on_drop(self) -> FinishOnDrop {
        FinishOnDrop(self)
    }
}

/// [`ProgressTracker`] that is finished when dropped
#[derive(Debug)]
pub struct FinishOnDrop(ProgressTracker);
//
impl Deref for FinishOnDrop {
    type Target = ProgressTracker;

    fn deref(&self) -> &ProgressTracker {
        &self.0
    }
}
//
impl Drop for FinishOnDrop {
    fn drop(&mut self) {
        self.0.finish();
    }
}
