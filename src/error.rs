/// Faults raised by the http seam. Commands care about the status code, so it
/// is carried explicitly rather than flattened into a message.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
  /// The server answered, but with a non-2xx status.
  #[error("request failed with status {status}")]
  Status {
    /// The http status code the server answered with.
    status: u16,

    /// Whatever body came along with the failure, possibly empty.
    body: String,
  },

  /// The request never produced an http response at all.
  #[error("unable to reach print server - {0}")]
  Unreachable(String),
}

impl TransportError {
  /// Returns the http status code when the server produced one.
  pub fn status(&self) -> Option<u16> {
    match self {
      TransportError::Status { status, .. } => Some(*status),
      TransportError::Unreachable(_) => None,
    }
  }
}

/// The caller-facing error type for the query path. Command dispatch never
/// returns this; conflicts and other command faults are values, not errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The transport failed before any json could be considered.
  #[error(transparent)]
  Transport(#[from] TransportError),

  /// The server answered with something that does not look like a job
  /// response.
  #[error("unexpected job response - {0}")]
  Protocol(String),
}

#[allow(clippy::missing_docs_in_private_items)]
pub type Result<T> = std::result::Result<T, Error>;
