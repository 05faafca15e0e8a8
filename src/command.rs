//! Control commands for the current job and the classification of what the
//! server made of them. A rejected command is a normal business condition, so
//! outcomes are values; only the query path ever returns an `Err`.

use crate::connection::Connection;
use crate::error::TransportError;

/// Message telling the server the request could not apply to the job in its
/// current state, e.g pausing a job that is not printing.
const CONFLICT_MESSAGE: &str = "409 Current jobstate is incompatible with this type of interaction";

/// Fallback message for every other command-path transport fault.
const FAILURE_MESSAGE: &str = "unknown webexception occured";

/// The commands the job api understands. Pause, resume and toggle all share
/// the `pause` command word and differ only in their action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobCommand {
  Start,
  Cancel,
  Restart,
  Pause,
  Resume,
  Toggle,
}

impl JobCommand {
  /// The command word posted to the server.
  pub fn command(&self) -> &'static str {
    match self {
      JobCommand::Start => "start",
      JobCommand::Cancel => "cancel",
      JobCommand::Restart => "restart",
      JobCommand::Pause | JobCommand::Resume | JobCommand::Toggle => "pause",
    }
  }

  /// The action refining the command word, where one applies.
  pub fn action(&self) -> Option<&'static str> {
    match self {
      JobCommand::Pause => Some("pause"),
      JobCommand::Resume => Some("resume"),
      JobCommand::Toggle => Some("toggle"),
      JobCommand::Start | JobCommand::Cancel | JobCommand::Restart => None,
    }
  }

  /// Builds the json body for this command. The `action` key is left out
  /// entirely for commands that take none.
  pub(crate) fn payload(&self) -> serde_json::Value {
    let mut body = serde_json::json!({ "command": self.command() });

    if let Some(action) = self.action() {
      body["action"] = serde_json::Value::String(action.into());
    }

    body
  }
}

/// What the server made of a posted command. Rendered to the compatibility
/// strings only at the display boundary, so callers can branch on the variant
/// instead of string-matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
  /// The server took the command; carries the raw response body, which is
  /// usually empty.
  Accepted(String),

  /// The job's current state disallows the requested command.
  Conflict,

  /// Some other transport fault; nothing more specific is known.
  Failed,
}

impl CommandOutcome {
  #[allow(clippy::missing_docs_in_private_items)]
  pub fn is_accepted(&self) -> bool {
    matches!(self, CommandOutcome::Accepted(_))
  }
}

impl std::fmt::Display for CommandOutcome {
  fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      CommandOutcome::Accepted(body) => write!(formatter, "{body}"),
      CommandOutcome::Conflict => write!(formatter, "{CONFLICT_MESSAGE}"),
      CommandOutcome::Failed => write!(formatter, "{FAILURE_MESSAGE}"),
    }
  }
}

/// Posts a command to `api/job` and classifies the result. Faults never
/// escape as errors here; a 409 means the job state refused the command and
/// anything else collapses into the generic failure.
pub(crate) async fn dispatch<C>(connection: &C, command: JobCommand) -> CommandOutcome
where
  C: Connection + ?Sized,
{
  match connection.post_json("api/job", &command.payload()).await {
    Ok(body) => CommandOutcome::Accepted(body),

    Err(TransportError::Status { status: 409, .. }) => {
      log::info!("command '{}' refused by current job state", command.command());
      CommandOutcome::Conflict
    }

    Err(error) => {
      log::warn!("command '{}' failed - {error}", command.command());
      CommandOutcome::Failed
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{CommandOutcome, JobCommand};

  #[test]
  fn plain_commands_carry_no_action() {
    for command in [JobCommand::Start, JobCommand::Cancel, JobCommand::Restart] {
      let payload = command.payload();
      assert_eq!(payload["command"], serde_json::json!(command.command()));
      assert!(payload.get("action").is_none());
    }
  }

  #[test]
  fn pause_family_shares_the_command_word() {
    for (command, action) in [
      (JobCommand::Pause, "pause"),
      (JobCommand::Resume, "resume"),
      (JobCommand::Toggle, "toggle"),
    ] {
      let payload = command.payload();
      assert_eq!(payload["command"], serde_json::json!("pause"));
      assert_eq!(payload["action"], serde_json::json!(action));
    }
  }

  #[test]
  fn outcomes_render_compatibility_strings() {
    assert_eq!(
      format!("{}", CommandOutcome::Conflict),
      "409 Current jobstate is incompatible with this type of interaction"
    );
    assert_eq!(format!("{}", CommandOutcome::Failed), "unknown webexception occured");
    assert_eq!(format!("{}", CommandOutcome::Accepted("ok".into())), "ok");
  }
}
