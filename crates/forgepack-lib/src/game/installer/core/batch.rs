use crate::error::{ModDownloadError, ModFailureKind};
use crate::game::installer::mods::ModDownloader;
use crate::game::installer::types::ProgressReporter;
use crate::game::modpack::{CurseForgeFile, ModReference};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Lifecycle of a single mod download inside a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    InFlight,
    Succeeded,
    Failed(ModFailureKind),
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Succeeded | TaskState::Failed(_))
    }
}

struct ModTask {
    reference: ModReference,
    state: TaskState,
}

impl ModTask {
    fn new(reference: ModReference) -> Self {
        Self {
            reference,
            state: TaskState::Pending,
        }
    }

    fn transition(&mut self, next: TaskState) {
        debug_assert!(!self.state.is_terminal(), "task {} already finished", self.reference);
        log::trace!("{}: {:?} -> {:?}", self.reference, self.state, next);
        self.state = next;
    }
}

#[derive(Debug)]
pub struct ModFailure {
    pub reference: ModReference,
    pub error: ModDownloadError,
}

/// Aggregated outcome of a batch. Every attempted reference ends up in exactly
/// one of `downloaded` or `failures`.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub attempted: usize,
    pub downloaded: Vec<PathBuf>,
    pub failures: Vec<ModFailure>,
    /// Entries without a usable project/file id pair
    pub skipped: Vec<CurseForgeFile>,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

pub struct BatchDownloader {
    downloader: ModDownloader,
    concurrency: usize,
}

impl BatchDownloader {
    pub fn new(downloader: ModDownloader, concurrency: usize) -> Self {
        Self {
            downloader,
            concurrency: concurrency.max(1),
        }
    }

    /// Download every valid reference into `dest_dir`, at most `concurrency` at a time.
    ///
    /// `skipped` entries are logged and carried into the report untouched.
    /// Completions are consumed in arrival order and a failure never cancels
    /// the downloads still in flight.
    pub async fn download_all(
        &self,
        references: Vec<ModReference>,
        skipped: Vec<CurseForgeFile>,
        dest_dir: &Path,
        reporter: Arc<dyn ProgressReporter>,
    ) -> BatchReport {
        for entry in &skipped {
            log::warn!("Invalid file information: {:?}", entry);
        }

        let total = references.len();
        let mut report = BatchReport {
            attempted: total,
            skipped,
            ..Default::default()
        };
        if total == 0 {
            return report;
        }

        reporter.start_step("Downloading mods", Some(total as u32));
        reporter.set_step_count(0, Some(total as u32));

        let mut completions = stream::iter(references.into_iter().map(ModTask::new))
            .map(|mut task| {
                let downloader = self.downloader.clone();
                let dest_dir = dest_dir.to_path_buf();
                async move {
                    task.transition(TaskState::InFlight);
                    let result = downloader.download_mod(&dest_dir, task.reference).await;
                    match &result {
                        Ok(_) => task.transition(TaskState::Succeeded),
                        Err(e) => task.transition(TaskState::Failed(e.kind())),
                    }
                    (task, result)
                }
            })
            .buffer_unordered(self.concurrency);

        let mut finished = 0usize;
        while let Some((task, result)) = completions.next().await {
            finished += 1;
            match result {
                Ok(path) => report.downloaded.push(path),
                Err(error) => {
                    log::warn!("Failed to download {}: {}", task.reference, error);
                    report.failures.push(ModFailure {
                        reference: task.reference,
                        error,
                    });
                }
            }

            reporter.set_step_count(finished as u32, Some(total as u32));
            reporter.set_message(&format!("Downloading mods... ({}/{})", finished, total));
            if finished % 10 == 0 || finished == total {
                log::info!("Batch download progress: {}/{}", finished, total);
            }
        }

        reporter.done(
            !report.has_failures(),
            Some(&format!(
                "{} downloaded, {} failed",
                report.downloaded.len(),
                report.failures.len()
            )),
        );
        report
    }
}
