use serde::Deserialize;

/// Where the print server lives and how to authenticate against it. The api
/// key is attached as the `X-Api-Key` header on every request.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Configuration {
  /// Base url of the print server, e.g `http://octopi.local`.
  pub api_url: String,

  /// Application api key issued by the print server.
  pub api_key: String,
}
