//! Draining the paginated identity listing into memory.

use tracing::info;

use crate::{
  Error, Result,
  identity::Identity,
  service::IdentityService,
};

/// Fetch every identity, following cursors until the service reports none.
///
/// The first failing page aborts the whole fetch; identities gathered from
/// earlier pages are discarded with it.
pub async fn fetch_all<S: IdentityService>(service: &S) -> Result<Vec<Identity>> {
  let mut identities = Vec::new();
  let mut cursor = String::new();
  let mut page = 0;

  loop {
    page += 1;
    let result = service.list_identities(&cursor).await.map_err(|e| {
      Error::Fetch {
        page,
        source: Box::new(e),
      }
    })?;

    identities.extend(result.items);
    info!(page, total = identities.len(), "fetched identity page");

    if result.next_cursor.is_empty() {
      break;
    }
    cursor = result.next_cursor;
  }

  info!(pages = page, identities = identities.len(), "fetched all identities");
  Ok(identities)
}
