use crate::config::Configuration;
use crate::error::TransportError;

/// The transport seam. The tracker only ever needs these two verbs; keeping
/// them behind a trait keeps the tracker testable without a real server.
#[async_trait::async_trait]
pub trait Connection: Send + Sync {
  /// Issues an authenticated GET and returns the raw response body.
  async fn get(&self, path: &str) -> Result<String, TransportError>;

  /// Posts a json payload and returns the raw response body, which may be
  /// empty on success.
  async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<String, TransportError>;
}

/// The surf-backed connection used against a real print server.
#[derive(Debug, Clone)]
pub struct HttpConnection {
  /// Server address and api key.
  config: Configuration,
}

impl HttpConnection {
  #[allow(clippy::missing_docs_in_private_items)]
  pub fn new(config: Configuration) -> Self {
    Self { config }
  }

  /// Joins the configured base url with an api path.
  fn url(&self, path: &str) -> String {
    format!("{}/{}", self.config.api_url.trim_end_matches('/'), path)
  }

  /// Drains the response body and folds non-2xx statuses into a transport
  /// fault carrying the status code.
  async fn drain(mut response: surf::Response) -> Result<String, TransportError> {
    let status = response.status();

    let body = response.body_string().await.map_err(|error| {
      log::warn!("unable to read response body - {error}");
      TransportError::Unreachable(format!("{error}"))
    })?;

    if !status.is_success() {
      return Err(TransportError::Status {
        status: status.into(),
        body,
      });
    }

    Ok(body)
  }
}

#[async_trait::async_trait]
impl Connection for HttpConnection {
  async fn get(&self, path: &str) -> Result<String, TransportError> {
    let response = surf::get(self.url(path))
      .header("X-Api-Key", &self.config.api_key)
      .await
      .map_err(|error| {
        log::warn!("unable to issue request to print server - {error}");
        TransportError::Unreachable(format!("{error}"))
      })?;

    Self::drain(response).await
  }

  async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<String, TransportError> {
    let response = surf::post(self.url(path))
      .header("X-Api-Key", &self.config.api_key)
      .body_json(body)
      .map_err(|error| {
        log::warn!("unable to serialize command payload - {error}");
        TransportError::Unreachable(format!("{error}"))
      })?
      .await
      .map_err(|error| {
        log::warn!("unable to issue request to print server - {error}");
        TransportError::Unreachable(format!("{error}"))
      })?;

    Self::drain(response).await
  }
}

#[cfg(test)]
mod tests {
  use super::HttpConnection;
  use crate::config::Configuration;

  #[test]
  fn url_joins_without_doubling_slashes() {
    let connection = HttpConnection::new(Configuration {
      api_url: "http://octopi.local/".into(),
      api_key: "key".into(),
    });
    assert_eq!(connection.url("api/job"), "http://octopi.local/api/job");
  }
}
