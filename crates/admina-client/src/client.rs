//! The Admina REST client.

use std::time::Duration;

use admina_core::{Identity, IdentityPage, IdentityService, MergeReceipt};
use chrono::Utc;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use tracing::{debug, info, trace, warn};
use url::Url;

use crate::{
  Error, Result,
  wire::{Envelope, MergePair, MergeRequest, Organization},
};

pub const DEFAULT_BASE_URL: &str = "https://api.itmc.i.moneyforward.com/api/v1";

/// Connection settings for one organization.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  pub base_url:        String,
  pub organization_id: String,
  pub api_key:         String,
  pub timeout:         Duration,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      base_url:        DEFAULT_BASE_URL.to_string(),
      organization_id: String::new(),
      api_key:         String::new(),
      timeout:         Duration::from_secs(30),
    }
  }
}

impl ClientConfig {
  /// Both credentials must be present before any request is made.
  pub fn validate(&self) -> Result<()> {
    if self.organization_id.trim().is_empty() {
      return Err(Error::MissingSetting("ADMINA_ORGANIZATION_ID"));
    }
    if self.api_key.trim().is_empty() {
      return Err(Error::MissingSetting("ADMINA_API_KEY"));
    }
    Ok(())
  }
}

/// Strip credentials from a proxy URL so it can be logged.
pub fn redact_proxy(raw: &str) -> Result<String, url::ParseError> {
  let mut url = Url::parse(raw)?;
  // Only fails for cannot-be-a-base URLs, which carry no credentials.
  let _ = url.set_username("");
  let _ = url.set_password(None);
  Ok(url.to_string())
}

fn log_proxy() {
  let Some(raw) = ["HTTPS_PROXY", "HTTP_PROXY"]
    .iter()
    .find_map(|name| std::env::var(name).ok().filter(|v| !v.is_empty()))
  else {
    return;
  };
  match redact_proxy(&raw) {
    Ok(proxy) => info!(%proxy, "using proxy"),
    Err(e) => warn!(error = %e, "failed to parse proxy URL from environment"),
  }
}

/// Async client for the Admina identity API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based. Proxies
/// are taken from `HTTPS_PROXY`/`HTTP_PROXY`.
#[derive(Clone)]
pub struct AdminaClient {
  client: Client,
  config: ClientConfig,
}

impl AdminaClient {
  pub fn new(config: ClientConfig) -> Result<Self> {
    config.validate()?;
    log_proxy();
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(Error::Build)?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/organizations/{}{}",
      self.config.base_url.trim_end_matches('/'),
      self.config.organization_id,
      path
    )
  }

  fn request(&self, method: Method, path: &str) -> RequestBuilder {
    let url = self.url(path);
    debug!(%method, %url, "request");
    self
      .client
      .request(method, url)
      .bearer_auth(&self.config.api_key)
  }

  /// Read the body, turning 4xx/5xx into [`Error::Status`].
  async fn body(&self, response: Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    trace!(%status, %body, "raw response body");

    if status.is_client_error() || status.is_server_error() {
      return Err(Error::Status {
        status,
        body,
        at: Utc::now(),
      });
    }
    Ok(body)
  }

  // ── Organization ──────────────────────────────────────────────────────────

  /// `GET /organizations/{id}`
  pub async fn get_organization(&self) -> Result<Organization> {
    let response = self.request(Method::GET, "").send().await?;
    let body = self.body(response).await?;
    serde_json::from_str(&body).map_err(|source| Error::Decode {
      what: "organization",
      source,
    })
  }

  // ── Identities ────────────────────────────────────────────────────────────

  /// `GET /organizations/{id}/identity[?cursor=...]`
  pub async fn identities(&self, cursor: &str) -> Result<IdentityPage> {
    let mut request = self.request(Method::GET, "/identity");
    if !cursor.is_empty() {
      request = request.query(&[("cursor", cursor)]);
    }
    let response = request.send().await?;

    if response.status() == StatusCode::NOT_FOUND && !cursor.is_empty() {
      debug!(cursor, "cursor not found, treating as last page");
      return Ok(IdentityPage::end());
    }

    let body = self.body(response).await?;
    let envelope: Envelope<Vec<Identity>> =
      serde_json::from_str(&body).map_err(|source| Error::Decode {
        what: "identity page",
        source,
      })?;
    envelope.meta.check()?;

    let items = envelope.items.unwrap_or_default();
    debug!(
      count = items.len(),
      total = envelope.meta.total_count,
      "retrieved identities"
    );
    Ok(IdentityPage {
      items,
      next_cursor: envelope.meta.next_cursor.unwrap_or_default(),
    })
  }

  /// `POST /organizations/{id}/identity/merge`
  ///
  /// The service answers inconsistently for merges it considers done, so an
  /// empty body, `{}`, `[]`, or a page not mentioning the pair all count as
  /// success. Only a non-JSON body or an explicit error fails.
  pub async fn merge(&self, from_people_id: i64, to_people_id: i64) -> Result<MergeReceipt> {
    let payload = MergeRequest {
      merges: vec![MergePair {
        from_people_id,
        to_people_id,
      }],
    };
    let response = self
      .request(Method::POST, "/identity/merge")
      .json(&payload)
      .send()
      .await?;
    let body = self.body(response).await?;

    let receipt = MergeReceipt {
      from_people_id,
      to_people_id,
    };

    let body = body.trim();
    if body.is_empty() || body == "{}" || body == "[]" {
      debug!("empty merge response, assuming success");
      return Ok(receipt);
    }

    let envelope: Envelope<Vec<Identity>> =
      serde_json::from_str(body).map_err(|source| Error::Decode {
        what: "merge result",
        source,
      })?;
    envelope.meta.check()?;

    let confirmed = envelope.items.unwrap_or_default().iter().any(|item| {
      item.people_id == to_people_id
        && item.merged_people.iter().any(|p| p.id == from_people_id)
    });
    if confirmed {
      debug!(from_people_id, to_people_id, "merge confirmed by response");
    } else {
      debug!(
        from_people_id,
        to_people_id, "merge not echoed in response, assuming success"
      );
    }
    Ok(receipt)
  }
}

impl IdentityService for AdminaClient {
  type Error = Error;

  async fn list_identities<'a>(&'a self, cursor: &'a str) -> Result<IdentityPage> {
    self.identities(cursor).await
  }

  async fn merge_identities(
    &self,
    from_people_id: i64,
    to_people_id: i64,
  ) -> Result<MergeReceipt> {
    self.merge(from_people_id, to_people_id).await
  }
}
