//! Error types for `admina-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("parent domain is required")]
  MissingParentDomain,

  #[error("at least one child domain is required")]
  MissingChildDomains,

  #[error("child domain {0:?} is the same as the parent domain")]
  ChildIsParent(String),

  /// Listing identities failed; nothing fetched so far is returned.
  #[error("failed to fetch identities (page {page}): {source}")]
  Fetch {
    page:   usize,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  /// Some merges failed. Every candidate was still processed.
  #[error("completed with {errors} errors, {merged} merged, {skipped} skipped")]
  MergeIncomplete {
    errors:  usize,
    merged:  usize,
    skipped: usize,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
