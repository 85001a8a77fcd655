//! Identity: one directory entry as the Admina service reports it.
//!
//! This is the single canonical shape: the HTTP client deserialises straight
//! into it and the engine reads it without an intermediate adapter type.

use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::email;

// ─── Management type ─────────────────────────────────────────────────────────

/// How an identity is governed, from most to least trusted.
///
/// The service also reports `unmanaged` for what it elsewhere calls
/// `unregistered`; both parse to [`ManagementType::Unregistered`].
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  AsRefStr,
  Display,
  EnumIter,
  EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum ManagementType {
  Managed,
  External,
  System,
  #[strum(to_string = "unregistered", serialize = "unmanaged")]
  Unregistered,
  Unknown,
}

// ─── Identity ────────────────────────────────────────────────────────────────

/// A person absorbed into another identity by an earlier merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergedPerson {
  #[serde(deserialize_with = "null_as_default")]
  pub id:            i64,
  #[serde(deserialize_with = "null_as_default")]
  pub display_name:  String,
  #[serde(deserialize_with = "null_as_default")]
  pub primary_email: String,
  #[serde(deserialize_with = "null_as_default")]
  pub username:      String,
}

/// One identity in the organization's directory.
///
/// `management_type` and `employee_status` are kept verbatim: the matrix
/// reports whatever the service sends, blanks included. Use
/// [`Identity::management_kind`] for the typed view the merge policy needs.
/// Missing and `null` fields both decode to the field's zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Identity {
  /// Opaque identity ID, used for display and CSV output.
  #[serde(deserialize_with = "null_as_default")]
  pub id:               String,
  #[serde(deserialize_with = "null_as_default")]
  pub organization_id:  i64,
  /// Key for the merge operation; distinct from `id`.
  #[serde(deserialize_with = "null_as_default")]
  pub people_id:        i64,
  #[serde(deserialize_with = "null_as_default")]
  pub display_name:     String,
  #[serde(deserialize_with = "null_as_default")]
  pub management_type:  String,
  #[serde(deserialize_with = "null_as_default")]
  pub employee_type:    String,
  #[serde(deserialize_with = "null_as_default")]
  pub employee_status:  String,
  #[serde(rename = "primaryEmail", deserialize_with = "null_as_default")]
  pub email:            String,
  /// Filled in by the service after a successful merge.
  #[serde(deserialize_with = "null_as_default")]
  pub secondary_emails: Vec<String>,
  #[serde(
    deserialize_with = "null_as_default",
    skip_serializing_if = "Vec::is_empty"
  )]
  pub merged_people:    Vec<MergedPerson>,
}

impl Identity {
  /// The management type, or `None` when the service sent a value the
  /// merge policy does not know.
  pub fn management_kind(&self) -> Option<ManagementType> {
    self.management_type.parse().ok()
  }

  /// Domain of the primary email; empty for a malformed address.
  pub fn domain(&self) -> &str { email::extract_domain(&self.email) }

  /// Local part of the primary email; empty for a malformed address.
  pub fn local_part(&self) -> &str { email::extract_local_part(&self.email) }
}

/// The service sends `null` for unset fields on some identities.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de> + Default,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
