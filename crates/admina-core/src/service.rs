//! The `IdentityService` trait: what the engine needs from the directory.
//!
//! Implemented by the HTTP client in `admina-client`. The engine depends
//! only on this abstraction, so tests substitute an in-memory directory.

use std::future::Future;

use crate::identity::Identity;

/// One page of the identity listing.
#[derive(Debug, Clone, Default)]
pub struct IdentityPage {
  pub items:       Vec<Identity>,
  /// Empty when there are no more pages.
  pub next_cursor: String,
}

impl IdentityPage {
  /// The page a service returns once pagination is exhausted.
  pub fn end() -> Self { Self::default() }
}

/// Echo of a completed merge: `from` was absorbed into `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeReceipt {
  pub from_people_id: i64,
  pub to_people_id:   i64,
}

/// Abstraction over the organization's identity directory.
pub trait IdentityService: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// List one page of identities. Start with an empty `cursor` and continue
  /// with each page's `next_cursor` until it comes back empty.
  ///
  /// Implementations report a "not found" for a non-empty cursor as
  /// [`IdentityPage::end`], not as an error.
  fn list_identities<'a>(
    &'a self,
    cursor: &'a str,
  ) -> impl Future<Output = Result<IdentityPage, Self::Error>> + Send + 'a;

  /// Absorb the person `from_people_id` into `to_people_id`.
  ///
  /// Already-merged pairs and empty responses count as success.
  fn merge_identities(
    &self,
    from_people_id: i64,
    to_people_id: i64,
  ) -> impl Future<Output = Result<MergeReceipt, Self::Error>> + Send + '_;
}
