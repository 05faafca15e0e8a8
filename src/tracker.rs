//! The facade over the job api: pull-based queries, command dispatch, and the
//! fan-out of push-delivered job/progress updates to registered watchers.

use std::sync::{Arc, Mutex};

use crate::command::{self, CommandOutcome, JobCommand};
use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::job::{self, JobInfo, JobProgress};

/// Handle returned from `watch`, usable to drop the registration again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatcherId(u64);

/// A registered callback. Watchers report their own failures as values so one
/// misbehaving watcher cannot keep the rest from being notified.
type Watcher<T> = Arc<dyn Fn(&T) -> std::io::Result<()> + Send + Sync>;

/// An ordered registry of watchers for one kind of pushed record. Mutation
/// and dispatch share one lock, but dispatch snapshots the list before
/// invoking anything so a watcher can subscribe/unsubscribe mid-dispatch.
pub struct Watchers<T> {
  /// Registered callbacks, in registration order, keyed for removal.
  entries: Mutex<Vec<(WatcherId, Watcher<T>)>>,

  /// Source of watcher ids, shared across both channels of a tracker.
  counter: Arc<std::sync::atomic::AtomicU64>,
}

impl<T> Watchers<T> {
  #[allow(clippy::missing_docs_in_private_items)]
  fn new(counter: Arc<std::sync::atomic::AtomicU64>) -> Self {
    Self {
      entries: Mutex::new(Vec::new()),
      counter,
    }
  }

  /// Locks the entry list, recovering from a poisoned lock; watcher panics
  /// should not wedge the registry for everyone else.
  fn entries(&self) -> std::sync::MutexGuard<'_, Vec<(WatcherId, Watcher<T>)>> {
    self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }

  /// Registers a watcher, keeping registration order, and returns the handle
  /// that removes it again.
  pub fn watch<F>(&self, watcher: F) -> WatcherId
  where
    F: Fn(&T) -> std::io::Result<()> + Send + Sync + 'static,
  {
    let id = WatcherId(self.counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed));
    self.entries().push((id, Arc::new(watcher)));
    id
  }

  /// Drops a registration, reporting whether anything was actually removed.
  pub fn unwatch(&self, id: WatcherId) -> bool {
    let mut entries = self.entries();
    let before = entries.len();
    entries.retain(|(entry, _)| *entry != id);
    entries.len() != before
  }

  /// Whether anybody is listening at all, so a push source can skip decoding
  /// work when the answer is no.
  pub fn has_watchers(&self) -> bool {
    !self.entries().is_empty()
  }

  /// Invokes every registered watcher, in registration order, with the same
  /// record. With no watchers this is a no-op. A watcher error is logged and
  /// the remaining watchers still run.
  pub fn dispatch(&self, record: &T) {
    let snapshot = self.entries().clone();

    for (id, watcher) in snapshot {
      if let Err(error) = watcher(record) {
        log::warn!("watcher {id:?} failed - {error}");
      }
    }
  }
}

/// Tracks the current print job on a remote server: queries it, sends it
/// control commands, and fans pushed updates out to watchers.
pub struct JobTracker<C> {
  /// The transport used for queries and commands.
  connection: C,

  /// Watchers for pushed job info records.
  jobs: Watchers<JobInfo>,

  /// Watchers for pushed progress records.
  progress: Watchers<JobProgress>,
}

impl<C> JobTracker<C> {
  #[allow(clippy::missing_docs_in_private_items)]
  pub fn new(connection: C) -> Self {
    let counter = Arc::new(std::sync::atomic::AtomicU64::new(0));

    Self {
      connection,
      jobs: Watchers::new(counter.clone()),
      progress: Watchers::new(counter),
    }
  }

  /// Grants access to the underlying transport.
  pub fn connection(&self) -> &C {
    &self.connection
  }

  /// The registry notified with every pushed job info record.
  pub fn job_watchers(&self) -> &Watchers<JobInfo> {
    &self.jobs
  }

  /// The registry notified with every pushed progress record.
  pub fn progress_watchers(&self) -> &Watchers<JobProgress> {
    &self.progress
  }

  /// Entry point for the external push source: fans a decoded job info record
  /// out to everyone watching.
  pub fn push_job(&self, info: &JobInfo) {
    self.jobs.dispatch(info);
  }

  /// Entry point for the external push source: fans a decoded progress record
  /// out to everyone watching.
  pub fn push_progress(&self, progress: &JobProgress) {
    self.progress.dispatch(progress);
  }
}

impl<C> JobTracker<C>
where
  C: Connection,
{
  /// Fetches and decodes the full job response; both query methods read from
  /// the same endpoint.
  async fn fetch(&self) -> Result<job::JobResponse> {
    let body = self.connection.get("api/job").await?;
    job::decode(&body)
  }

  /// Queries the server for the current job's info.
  pub async fn info(&self) -> Result<JobInfo> {
    self
      .fetch()
      .await?
      .job
      .map(JobInfo::from)
      .ok_or_else(|| Error::Protocol("response missing its 'job' object".into()))
  }

  /// Queries the server for the current job's progress.
  pub async fn progress(&self) -> Result<JobProgress> {
    self
      .fetch()
      .await?
      .progress
      .map(JobProgress::from)
      .ok_or_else(|| Error::Protocol("response missing its 'progress' object".into()))
  }

  /// Starts the currently selected job.
  pub async fn start_job(&self) -> CommandOutcome {
    command::dispatch(&self.connection, JobCommand::Start).await
  }

  /// Cancels the running job.
  pub async fn cancel_job(&self) -> CommandOutcome {
    command::dispatch(&self.connection, JobCommand::Cancel).await
  }

  /// Restarts the running job from the beginning.
  pub async fn restart_job(&self) -> CommandOutcome {
    command::dispatch(&self.connection, JobCommand::Restart).await
  }

  /// Pauses the running job.
  pub async fn pause_job(&self) -> CommandOutcome {
    command::dispatch(&self.connection, JobCommand::Pause).await
  }

  /// Resumes a paused job.
  pub async fn resume_job(&self) -> CommandOutcome {
    command::dispatch(&self.connection, JobCommand::Resume).await
  }

  /// Pauses the job if it runs, resumes it if it is paused.
  pub async fn toggle_job(&self) -> CommandOutcome {
    command::dispatch(&self.connection, JobCommand::Toggle).await
  }
}
