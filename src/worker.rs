//! Background run and message relay
//!
//! The run executes on its own thread and talks to the rest of the app only
//! through an mpsc channel. A relay loop drains that channel on a fixed tick
//! and forwards batches to a `RelaySink` (the Tauri event layer in the app).

use std::io;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::models::{DatasetRequest, LogLevel, LogLine, ProcessingProgress, RunSummary};
use crate::processor::{run_dataset, CancelFlag, ProgressReporter};

/// How often the relay drains pending worker messages
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub enum WorkerMessage {
    Progress(ProcessingProgress),
    Log(LogLine),
    Finished(RunSummary),
    Failed(String),
}

/// `ProgressReporter` that forwards to the relay channel and the `log` facade
pub struct ChannelReporter {
    tx: Sender<WorkerMessage>,
}

impl ChannelReporter {
    pub fn new(tx: Sender<WorkerMessage>) -> Self {
        Self { tx }
    }
}

impl ProgressReporter for ChannelReporter {
    fn progress(&mut self, progress: ProcessingProgress) {
        let _ = self.tx.send(WorkerMessage::Progress(progress));
    }

    fn log(&mut self, level: LogLevel, message: String) {
        match level {
            LogLevel::Info => log::info!("{}", message),
            LogLevel::Warn => log::warn!("{}", message),
            LogLevel::Error => log::error!("{}", message),
        }
        let _ = self.tx.send(WorkerMessage::Log(LogLine::new(level, message)));
    }
}

/// Start a run on a dedicated thread. The last message it sends is always
/// `Finished` or `Failed`.
pub fn spawn_worker(
    request: DatasetRequest,
    cancel: CancelFlag,
    tx: Sender<WorkerMessage>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("dataset-worker".to_string())
        .spawn(move || {
            let mut reporter = ChannelReporter::new(tx.clone());
            let message = match run_dataset(&request, &cancel, &mut reporter) {
                Ok(summary) => WorkerMessage::Finished(summary),
                Err(e) => {
                    reporter.log(LogLevel::Error, e.to_string());
                    WorkerMessage::Failed(e.to_string())
                }
            };
            let _ = tx.send(message);
        })
}

/// Everything that was waiting in the channel at one tick
#[derive(Debug, Default)]
pub struct Drained {
    /// Only the newest progress update matters to the UI
    pub progress: Option<ProcessingProgress>,
    pub logs: Vec<LogLine>,
    pub finished: Option<Result<RunSummary, String>>,
    pub disconnected: bool,
}

pub fn drain_pending(rx: &Receiver<WorkerMessage>) -> Drained {
    let mut drained = Drained::default();
    loop {
        match rx.try_recv() {
            Ok(WorkerMessage::Progress(p)) => drained.progress = Some(p),
            Ok(WorkerMessage::Log(line)) => drained.logs.push(line),
            Ok(WorkerMessage::Finished(summary)) => drained.finished = Some(Ok(summary)),
            Ok(WorkerMessage::Failed(error)) => drained.finished = Some(Err(error)),
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                drained.disconnected = true;
                break;
            }
        }
    }
    drained
}

/// Receiver side of the relay, one call per kind of update
pub trait RelaySink {
    fn on_logs(&self, lines: &[LogLine]);
    fn on_progress(&self, progress: &ProcessingProgress);
    fn on_finished(&self, result: &Result<RunSummary, String>);
}

/// Poll the channel every `interval` until the worker finishes or goes away
pub fn relay_until_done(
    rx: Receiver<WorkerMessage>,
    interval: Duration,
    sink: &impl RelaySink,
) -> Result<RunSummary, String> {
    loop {
        thread::sleep(interval);
        let drained = drain_pending(&rx);

        if !drained.logs.is_empty() {
            sink.on_logs(&drained.logs);
        }
        if let Some(progress) = &drained.progress {
            sink.on_progress(progress);
        }

        let finished = match (drained.finished, drained.disconnected) {
            (Some(result), _) => result,
            (None, true) => Err("Worker stopped unexpectedly".to_string()),
            (None, false) => continue,
        };
        sink.on_finished(&finished);
        return finished;
    }
}
