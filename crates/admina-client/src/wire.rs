//! JSON shapes exchanged with the Admina API, other than [`Identity`]
//! itself.
//!
//! [`Identity`]: admina_core::Identity

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Metadata attached to every list response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct Meta {
  pub error_code:    Option<String>,
  pub error_message: Option<String>,
  pub next_cursor:   Option<String>,
  pub total_count:   i64,
}

impl Meta {
  /// `Err` when the service reported an error code in-band.
  pub fn check(&self) -> Result<()> {
    match self.error_code.as_deref() {
      Some(code) if !code.is_empty() => Err(Error::Api {
        code:    code.to_string(),
        message: self.error_message.clone().unwrap_or_default(),
      }),
      _ => Ok(()),
    }
  }
}

/// `{ "meta": {...}, "items": ... }`
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
  #[serde(default)]
  pub meta:  Meta,
  #[serde(default)]
  pub items: Option<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MergePair {
  pub from_people_id: i64,
  pub to_people_id:   i64,
}

/// Body of `POST /identity/merge`.
#[derive(Debug, Serialize)]
pub(crate) struct MergeRequest {
  pub merges: Vec<MergePair>,
}

/// The organization the configured credentials belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Organization {
  pub id:               i64,
  pub name:             String,
  pub unique_name:      String,
  pub status:           String,
  pub system_language:  String,
  pub location:         String,
  pub time_zone:        String,
  pub domains:          Vec<String>,
  pub forwarding_email: String,
  pub trial_count:      i64,
}
