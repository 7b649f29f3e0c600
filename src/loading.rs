use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError, channel};
use std::thread;

use anyhow::Result;

use crate::analysis::{CorrelationAnalysis, analyze};
use crate::config::EngineConfig;
use crate::data::loader::load_file;

/// Read a dataset and run the whole pipeline on it. Blocking.
pub fn load_and_analyze(path: &Path, config: &EngineConfig) -> Result<CorrelationAnalysis> {
    let table = load_file(path)?;
    log::info!(
        "Loaded {} rows x {} columns from {}",
        table.len(),
        table.headers.len(),
        path.display()
    );
    let mut analysis = analyze(&table, config);
    analysis.source = Some(path.to_path_buf());
    Ok(analysis)
}

// ---------------------------------------------------------------------------
// Background load job
// ---------------------------------------------------------------------------

/// A dataset load running on a worker thread.
///
/// The worker sends exactly one message once the full analysis is ready.
/// Dropping the job drops the receiver, so a late result is discarded
/// instead of being applied.
pub struct LoadJob {
    pub path: PathBuf,
    rx: Receiver<Result<CorrelationAnalysis>>,
}

impl LoadJob {
    /// Start loading `path`. `notify` runs on the worker after the result is
    /// sent, typically to request a UI repaint.
    pub fn spawn<F>(path: PathBuf, config: EngineConfig, notify: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (tx, rx) = channel();
        let worker_path = path.clone();

        thread::spawn(move || {
            let result = load_and_analyze(&worker_path, &config);
            if tx.send(result).is_err() {
                log::debug!(
                    "Discarding result for {}: load was cancelled",
                    worker_path.display()
                );
                return;
            }
            notify();
        });

        Self { path, rx }
    }

    /// Non-blocking check. `Some` exactly once, when the worker is done.
    pub fn poll(&self) -> Option<Result<CorrelationAnalysis>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(anyhow::anyhow!(
                "loader thread for {} exited without a result",
                self.path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::{Duration, Instant};

    fn wait(job: &LoadJob) -> Result<CorrelationAnalysis> {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(result) = job.poll() {
                return result;
            }
            assert!(Instant::now() < deadline, "load job timed out");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn job_delivers_complete_analysis() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"File_ID,A,B\nx,1,2\ny,2,4\nz,3,7\n").unwrap();

        let job = LoadJob::spawn(file.path().to_path_buf(), EngineConfig::default(), || {});
        let analysis = wait(&job).unwrap();

        assert_eq!(analysis.row_count, 3);
        assert_eq!(analysis.selection.names, vec!["A", "B"]);
        assert_eq!(analysis.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn job_reports_load_failure() {
        let job = LoadJob::spawn(
            PathBuf::from("/no/such/dataset.csv"),
            EngineConfig::default(),
            || {},
        );
        assert!(wait(&job).is_err());
    }
}
