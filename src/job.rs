//! Records parsed out of `GET api/job`. Internally every numeric that the
//! server may omit is an `Option`; the `-1` sentinel that downstream consumers
//! branch on only exists at the serialization edge.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Serialization helpers that keep the wire-level `-1` convention for absent
/// numerics without letting the sentinel leak into the types themselves.
mod sentinel {
  use serde::Serializer;

  #[allow(clippy::missing_docs_in_private_items)]
  pub fn int<S>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_i64(value.unwrap_or(-1))
  }

  #[allow(clippy::missing_docs_in_private_items)]
  pub fn float<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_f64(value.unwrap_or(-1.0))
  }
}

/// The file the current job was started from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileInfo {
  /// File name as the server reports it, empty when unknown.
  pub name: String,

  /// Storage origin (`local`, `sdcard`, ...), empty when unknown.
  pub origin: String,

  /// File size in bytes.
  #[serde(serialize_with = "sentinel::int")]
  pub size: Option<i64>,

  /// Upload timestamp as unix epoch seconds.
  #[serde(serialize_with = "sentinel::int")]
  pub date: Option<i64>,
}

/// Filament estimates for the current job. Only attached to a `JobInfo` when
/// the server actually populated something; an empty filament object on the
/// wire means no filament info at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilamentInfo {
  /// Estimated filament length in millimeters.
  #[serde(serialize_with = "sentinel::int")]
  pub length: Option<i64>,

  /// Estimated filament volume in cubic centimeters.
  #[serde(serialize_with = "sentinel::float")]
  pub volume: Option<f64>,
}

/// Everything the server knows about the current job itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobInfo {
  /// The file being printed. Always present, defaulted when the server sent
  /// no file object.
  pub file: FileInfo,

  /// Estimated total print time in seconds.
  #[serde(rename = "estimatedPrintTime", serialize_with = "sentinel::int")]
  pub estimated_print_time: Option<i64>,

  /// Filament estimates, absent unless the server populated them.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub filament: Option<FilamentInfo>,
}

/// Progress of the current job. A record without a `filepos` represents "no
/// job currently running".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobProgress {
  /// Completion percentage, 0.0 through 100.0.
  #[serde(serialize_with = "sentinel::float")]
  pub completion: Option<f64>,

  /// Byte position within the file being printed.
  #[serde(serialize_with = "sentinel::int")]
  pub filepos: Option<i64>,

  /// Seconds spent printing so far.
  #[serde(rename = "printTime", serialize_with = "sentinel::int")]
  pub print_time: Option<i64>,

  /// Estimated seconds remaining.
  #[serde(rename = "printTimeLeft", serialize_with = "sentinel::int")]
  pub print_time_left: Option<i64>,
}

impl JobProgress {
  /// Whether the server considers a job to be running at all.
  pub fn is_active(&self) -> bool {
    self.filepos.is_some()
  }
}

impl std::fmt::Display for JobProgress {
  fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self.filepos {
      Some(filepos) => write!(
        formatter,
        "completion[{:.1}] filepos[{}] time[{}] left[{}]",
        self.completion.unwrap_or(-1.0),
        filepos,
        self.print_time.unwrap_or(-1),
        self.print_time_left.unwrap_or(-1),
      ),
      None => write!(formatter, "no job currently running"),
    }
  }
}

#[allow(clippy::missing_docs_in_private_items)]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FilePayload {
  name: Option<String>,
  origin: Option<String>,
  size: Option<i64>,
  date: Option<i64>,
}

#[allow(clippy::missing_docs_in_private_items)]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FilamentPayload {
  length: Option<i64>,
  volume: Option<f64>,
}

impl FilamentPayload {
  /// An empty filament object carries no information and maps to nothing.
  fn into_info(self) -> Option<FilamentInfo> {
    if self.length.is_none() && self.volume.is_none() {
      return None;
    }

    Some(FilamentInfo {
      length: self.length,
      volume: self.volume,
    })
  }
}

#[allow(clippy::missing_docs_in_private_items)]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobPayload {
  estimated_print_time: Option<i64>,
  filament: Option<FilamentPayload>,
  file: Option<FilePayload>,
}

#[allow(clippy::missing_docs_in_private_items)]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProgressPayload {
  completion: Option<f64>,
  filepos: Option<i64>,
  print_time: Option<i64>,
  print_time_left: Option<i64>,
}

/// The schema of a full `api/job` response.
#[derive(Debug, Deserialize)]
pub(crate) struct JobResponse {
  #[allow(clippy::missing_docs_in_private_items)]
  pub(crate) job: Option<JobPayload>,

  #[allow(clippy::missing_docs_in_private_items)]
  pub(crate) progress: Option<ProgressPayload>,
}

/// Decodes a raw `api/job` body, surfacing invalid json as a protocol error
/// instead of letting callers trip over missing keys later.
pub(crate) fn decode(raw: &str) -> Result<JobResponse> {
  serde_json::from_str(raw).map_err(|error| {
    log::warn!("invalid response from print server - {error}");
    Error::Protocol(format!("{error}"))
  })
}

impl From<JobPayload> for JobInfo {
  fn from(payload: JobPayload) -> Self {
    let file = payload
      .file
      .map(|file| FileInfo {
        name: file.name.unwrap_or_default(),
        origin: file.origin.unwrap_or_default(),
        size: file.size,
        date: file.date,
      })
      .unwrap_or_default();

    Self {
      file,
      estimated_print_time: payload.estimated_print_time,
      filament: payload.filament.and_then(FilamentPayload::into_info),
    }
  }
}

impl From<ProgressPayload> for JobProgress {
  fn from(payload: ProgressPayload) -> Self {
    Self {
      completion: payload.completion,
      filepos: payload.filepos,
      print_time: payload.print_time,
      print_time_left: payload.print_time_left,
    }
  }
}
