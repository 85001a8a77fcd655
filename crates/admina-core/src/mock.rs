//! In-memory [`IdentityService`] for engine tests.

use std::{collections::HashSet, sync::Mutex};

use thiserror::Error;

use crate::{
  identity::Identity,
  service::{IdentityPage, IdentityService, MergeReceipt},
};

#[derive(Debug, Error)]
#[error("mock directory: {0}")]
pub struct MockError(pub String);

/// Serves fixed pages and records every merge it is asked to perform.
#[derive(Default)]
pub struct MockDirectory {
  pages:         Vec<Vec<Identity>>,
  fail_list_at:  Option<usize>,
  failing_froms: HashSet<i64>,
  cursors:       Mutex<Vec<String>>,
  merges:        Mutex<Vec<(i64, i64)>>,
}

impl MockDirectory {
  pub fn new(identities: Vec<Identity>) -> Self { Self::paged(vec![identities]) }

  /// Page `n` (0-based) is reached with cursor `page-n`.
  pub fn paged(pages: Vec<Vec<Identity>>) -> Self {
    Self {
      pages,
      ..Default::default()
    }
  }

  /// Fail the listing call for the given 1-based page.
  pub fn failing_list_at(mut self, page: usize) -> Self {
    self.fail_list_at = Some(page);
    self
  }

  /// Fail any merge whose source is `from_people_id`.
  pub fn failing_merge_from(mut self, from_people_id: i64) -> Self {
    self.failing_froms.insert(from_people_id);
    self
  }

  pub fn cursors_seen(&self) -> Vec<String> { self.cursors.lock().unwrap().clone() }

  pub fn merges(&self) -> Vec<(i64, i64)> { self.merges.lock().unwrap().clone() }
}

impl IdentityService for MockDirectory {
  type Error = MockError;

  async fn list_identities<'a>(
    &'a self,
    cursor: &'a str,
  ) -> Result<IdentityPage, MockError> {
    self.cursors.lock().unwrap().push(cursor.to_string());

    let index = match cursor.strip_prefix("page-") {
      Some(n) => n.parse::<usize>().map_err(|e| MockError(e.to_string()))?,
      None => 0,
    };
    if self.fail_list_at == Some(index + 1) {
      return Err(MockError(format!("listing page {} failed", index + 1)));
    }

    let Some(items) = self.pages.get(index) else {
      return Ok(IdentityPage::end());
    };
    let next_cursor = if index + 1 < self.pages.len() {
      format!("page-{}", index + 1)
    } else {
      String::new()
    };
    Ok(IdentityPage {
      items: items.clone(),
      next_cursor,
    })
  }

  async fn merge_identities(
    &self,
    from_people_id: i64,
    to_people_id: i64,
  ) -> Result<MergeReceipt, MockError> {
    if self.failing_froms.contains(&from_people_id) {
      return Err(MockError(format!("merge of {from_people_id} rejected")));
    }
    self.merges.lock().unwrap().push((from_people_id, to_people_id));
    Ok(MergeReceipt {
      from_people_id,
      to_people_id,
    })
  }
}

/// An active identity with `id-<people_id>` as its display ID.
pub fn identity(people_id: i64, email: &str, management_type: &str) -> Identity {
  Identity {
    id: format!("id-{people_id}"),
    people_id,
    display_name: email.to_string(),
    management_type: management_type.to_string(),
    employee_status: "active".to_string(),
    email: email.to_string(),
    ..Default::default()
  }
}
