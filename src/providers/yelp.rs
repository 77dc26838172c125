//! Business search through the Yelp Fusion API.

use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Production host of the Yelp Fusion API.
pub const DEFAULT_BASE_URL: &str = "https://api.yelp.com";

const API_PREFIX: &str = "/v3";
const SEARCH_ENDPOINT: &str = "/businesses/search";
const RESTAURANTS_CATEGORY: &str = "restaurants";

/// One business as returned by `/businesses/search`.
///
/// Only `name` and `distance` are required; every other field may be absent
/// depending on the business and the locale.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Business {
  pub name: String,

  /// Distance from the searched location, in meters.
  pub distance: f64,

  /// Price tier symbol ("€", "$$", ...).
  #[serde(skip_serializing_if = "Option::is_none")]
  pub price: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub rating: Option<f64>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub review_count: Option<u32>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("request to {url} failed: {source}")]
  Transport {
    url: String,
    #[source]
    source: reqwest::Error,
  },
  #[error("{url} answered with HTTP {status}: {body}")]
  Status {
    url: String,
    status: StatusCode,
    body: String,
  },
  #[error("{url} did not answer with valid JSON: {source}")]
  Decode {
    url: String,
    #[source]
    source: reqwest::Error,
  },
  #[error("response has no `{0}` field")]
  MissingField(&'static str),
  #[error("response field `{field}` has an unexpected shape: {source}")]
  Shape {
    field: &'static str,
    #[source]
    source: serde_json::Error,
  },
}

/// Authenticated client for the Yelp Fusion API.
#[derive(Debug, Clone)]
pub struct Client {
  http: reqwest::Client,
  base_url: String,
  api_key: String,
}

impl Client {
  pub fn new(
    http: reqwest::Client,
    base_url: impl Into<String>,
    api_key: impl Into<String>,
  ) -> Self {
    let base_url = base_url.into().trim_end_matches('/').to_string();
    Self {
      http,
      base_url,
      api_key: api_key.into(),
    }
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Sends an authenticated GET to `<base>/v3<endpoint>` and returns the
  /// decoded JSON body.
  ///
  /// `query` is URL-encoded by `reqwest`, so user input can be passed as-is.
  ///
  /// # Errors
  ///
  /// - `Transport` if the request cannot be sent
  /// - `Status` for any non-2xx answer
  /// - `Decode` if the body is not JSON
  pub async fn get_json<Q>(
    &self,
    endpoint: &str,
    query: &Q,
  ) -> Result<Value, Error>
  where
    Q: Serialize + ?Sized,
  {
    let url = format!("{}{API_PREFIX}{endpoint}", self.base_url);
    tracing::debug!(%url, "sending GET");

    let response = self
      .http
      .get(&url)
      .query(query)
      .bearer_auth(&self.api_key)
      .header(header::ACCEPT, "application/json")
      .send()
      .await
      .map_err(|source| Error::Transport {
        url: url.clone(),
        source,
      })?;

    let status = response.status();
    tracing::debug!(%url, %status, "response received");
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(Error::Status { url, status, body });
    }

    response
      .json::<Value>()
      .await
      .map_err(|source| Error::Decode { url, source })
  }

  /// Fetches the restaurants within `radius` meters of `location`.
  ///
  /// # Errors
  ///
  /// Any error of [`Client::get_json`], plus `MissingField` when the answer
  /// has no `businesses` array and `Shape` when its entries are not
  /// businesses.
  pub async fn search_businesses(
    &self,
    location: &str,
    radius: u32,
  ) -> Result<Vec<Business>, Error> {
    let radius = radius.to_string();
    let query = [
      ("location", location),
      ("radius", radius.as_str()),
      ("categories", RESTAURANTS_CATEGORY),
    ];

    let mut body = self.get_json(SEARCH_ENDPOINT, &query).await?;
    let businesses = body
      .get_mut("businesses")
      .map(Value::take)
      .ok_or(Error::MissingField("businesses"))?;

    serde_json::from_value(businesses).map_err(|source| Error::Shape {
      field: "businesses",
      source,
    })
  }
}
