//! Shared test support: a scripted stand-in for the http seam so tracker
//! behavior can be exercised without a print server.

// Not every test binary touches every helper here.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use jobsight::connection::Connection;
use jobsight::error::TransportError;

/// A connection that answers from a scripted queue and records everything it
/// was asked to do.
#[derive(Default)]
pub struct MockConnection {
  /// Responses handed out in order, one per request.
  responses: Mutex<VecDeque<Result<String, TransportError>>>,

  /// Paths of every GET issued.
  pub gets: Mutex<Vec<String>>,

  /// Path and payload of every POST issued.
  pub posts: Mutex<Vec<(String, serde_json::Value)>>,
}

impl MockConnection {
  pub fn replying(response: Result<String, TransportError>) -> Self {
    let connection = Self::default();
    connection.push(response);
    connection
  }

  pub fn push(&self, response: Result<String, TransportError>) {
    self.responses.lock().unwrap().push_back(response);
  }

  fn next(&self) -> Result<String, TransportError> {
    self
      .responses
      .lock()
      .unwrap()
      .pop_front()
      .unwrap_or_else(|| Err(TransportError::Unreachable("no scripted response left".into())))
  }
}

#[async_trait::async_trait]
impl Connection for MockConnection {
  async fn get(&self, path: &str) -> Result<String, TransportError> {
    self.gets.lock().unwrap().push(path.to_string());
    self.next()
  }

  async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<String, TransportError> {
    self.posts.lock().unwrap().push((path.to_string(), body.clone()));
    self.next()
  }
}

/// A response body matching what a real server sends while a job is selected
/// but nothing is printing yet.
pub fn idle_job_body() -> String {
  concat!(
    r#"{"job":{"estimatedPrintTime":120,"filament":{},"#,
    r#""file":{"name":"a.gcode","origin":"local","size":100,"date":111}},"#,
    r#""progress":{"completion":null,"filepos":null,"printTime":null,"printTimeLeft":null}}"#,
  )
  .to_string()
}
