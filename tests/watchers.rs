//! Integration tests for the push-update fan-out: the entry points an
//! external push source drives after decoding a socket message.

mod common;

use std::sync::{Arc, Mutex};

use common::MockConnection;
use jobsight::job::{FileInfo, JobInfo, JobProgress};
use jobsight::tracker::JobTracker;

fn sample_info() -> JobInfo {
  JobInfo {
    file: FileInfo {
      name: "benchy.gcode".into(),
      origin: "local".into(),
      size: Some(1337),
      date: Some(1700000000),
    },
    estimated_print_time: Some(3600),
    filament: None,
  }
}

#[test]
fn a_fresh_tracker_has_nobody_listening() {
  let tracker = JobTracker::new(MockConnection::default());
  assert!(!tracker.job_watchers().has_watchers());
  assert!(!tracker.progress_watchers().has_watchers());
}

#[test]
fn pushed_job_records_reach_every_watcher_in_order() {
  let tracker = JobTracker::new(MockConnection::default());
  let seen = Arc::new(Mutex::new(Vec::new()));

  for label in ["first", "second"] {
    let seen = seen.clone();
    tracker.job_watchers().watch(move |info: &JobInfo| {
      seen.lock().unwrap().push((label, info.clone()));
      Ok(())
    });
  }

  assert!(tracker.job_watchers().has_watchers());
  tracker.push_job(&sample_info());

  let seen = seen.lock().unwrap();
  assert_eq!(seen.len(), 2);
  assert_eq!(seen[0].0, "first");
  assert_eq!(seen[1].0, "second");
  assert_eq!(seen[0].1, sample_info());
  assert_eq!(seen[0].1, seen[1].1, "every watcher sees the same record");
}

#[test]
fn the_two_channels_are_independent() {
  let tracker = JobTracker::new(MockConnection::default());
  let progress_seen = Arc::new(Mutex::new(0u8));

  let counter = progress_seen.clone();
  tracker.progress_watchers().watch(move |_: &JobProgress| {
    *counter.lock().unwrap() += 1;
    Ok(())
  });

  assert!(tracker.progress_watchers().has_watchers());
  assert!(
    !tracker.job_watchers().has_watchers(),
    "a progress watcher must not arm the job channel"
  );

  tracker.push_job(&sample_info());
  assert_eq!(*progress_seen.lock().unwrap(), 0);

  tracker.push_progress(&JobProgress::default());
  assert_eq!(*progress_seen.lock().unwrap(), 1);
}

#[test]
fn unwatch_disarms_the_channel_again() {
  let tracker = JobTracker::new(MockConnection::default());
  let id = tracker.progress_watchers().watch(|_: &JobProgress| Ok(()));

  assert!(tracker.progress_watchers().has_watchers());
  assert!(tracker.progress_watchers().unwatch(id));
  assert!(!tracker.progress_watchers().has_watchers());

  // Dispatching into the now-empty channel must stay a no-op.
  tracker.push_progress(&JobProgress::default());
}
