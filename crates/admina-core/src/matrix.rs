//! Cross-tabulation of identities by management type and employee status.

use std::collections::HashMap;

use serde::Serialize;

use crate::identity::Identity;

/// The lifecycle order statuses are presented in when known.
pub const STATUS_ORDER: [&str; 7] = [
  "draft",
  "preactive",
  "active",
  "on_leave",
  "retired",
  "untracked",
  "archived",
];

/// Counts of identities per (management type, employee status).
///
/// `counts[row][column]` pairs `management_types[row]` with
/// `statuses[column]`. Values are taken verbatim, so a blank type or status
/// gets its own row or column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Matrix {
  pub management_types: Vec<String>,
  pub statuses:         Vec<String>,
  #[serde(rename = "Matrix")]
  pub counts:           Vec<Vec<usize>>,
}

impl Matrix {
  /// Build the matrix in a single pass. Rows and columns appear in the order
  /// their values are first seen.
  pub fn build(identities: &[Identity]) -> Self {
    let mut matrix = Self::default();
    let mut rows: HashMap<&str, usize> = HashMap::new();
    let mut columns: HashMap<&str, usize> = HashMap::new();

    for identity in identities {
      let row = *rows
        .entry(identity.management_type.as_str())
        .or_insert_with(|| {
          matrix.management_types.push(identity.management_type.clone());
          matrix.counts.push(vec![0; matrix.statuses.len()]);
          matrix.management_types.len() - 1
        });
      let column = *columns
        .entry(identity.employee_status.as_str())
        .or_insert_with(|| {
          matrix.statuses.push(identity.employee_status.clone());
          for counts in &mut matrix.counts {
            counts.push(0);
          }
          matrix.statuses.len() - 1
        });
      matrix.counts[row][column] += 1;
    }

    matrix
  }

  /// Reorder columns so statuses in [`STATUS_ORDER`] come first, in that
  /// order, followed by any other statuses in their first-seen order.
  pub fn with_canonical_status_order(mut self) -> Self {
    let rank = |status: &str| {
      STATUS_ORDER
        .iter()
        .position(|known| *known == status)
        .unwrap_or(STATUS_ORDER.len())
    };

    let mut order: Vec<usize> = (0..self.statuses.len()).collect();
    // Stable sort keeps first-seen order among unknown statuses.
    order.sort_by_key(|&column| rank(&self.statuses[column]));

    self.statuses = order.iter().map(|&c| self.statuses[c].clone()).collect();
    for counts in &mut self.counts {
      *counts = order.iter().map(|&c| counts[c]).collect();
    }
    self
  }

  pub fn is_empty(&self) -> bool {
    self.management_types.is_empty() || self.statuses.is_empty()
  }

  pub fn row_total(&self, row: usize) -> usize { self.counts[row].iter().sum() }

  pub fn column_total(&self, column: usize) -> usize {
    self.counts.iter().map(|counts| counts[column]).sum()
  }

  /// Sum of every cell; equals the number of identities the matrix was
  /// built from.
  pub fn total(&self) -> usize { self.counts.iter().flatten().sum() }

  /// Count for a (management type, status) pair; 0 if either is absent.
  pub fn get(&self, management_type: &str, status: &str) -> usize {
    let row = self.management_types.iter().position(|t| t == management_type);
    let column = self.statuses.iter().position(|s| s == status);
    match (row, column) {
      (Some(row), Some(column)) => self.counts[row][column],
      _ => 0,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn identity(management_type: &str, status: &str) -> Identity {
    Identity {
      management_type: management_type.into(),
      employee_status: status.into(),
      ..Default::default()
    }
  }

  #[test]
  fn empty_input_gives_empty_matrix() {
    let matrix = Matrix::build(&[]);
    assert!(matrix.is_empty());
    assert!(matrix.counts.is_empty());
    assert_eq!(matrix.total(), 0);
  }

  #[test]
  fn rows_and_columns_follow_first_seen_order() {
    let matrix = Matrix::build(&[
      identity("external", "retired"),
      identity("managed", "active"),
      identity("external", "active"),
    ]);
    assert_eq!(matrix.management_types, ["external", "managed"]);
    assert_eq!(matrix.statuses, ["retired", "active"]);
    assert_eq!(matrix.counts, vec![vec![1, 1], vec![0, 1]]);
  }

  #[test]
  fn cells_sum_to_identity_count() {
    let identities = vec![
      identity("managed", "active"),
      identity("managed", "active"),
      identity("managed", "draft"),
      identity("system", "active"),
      identity("", ""),
      identity("unknown", "archived"),
    ];
    let matrix = Matrix::build(&identities);
    assert_eq!(matrix.total(), identities.len());
    assert_eq!(matrix.management_types.len(), 4);
    assert_eq!(matrix.statuses.len(), 4);
    assert_eq!(matrix.get("managed", "active"), 2);
    assert_eq!(matrix.get("", ""), 1);
    assert_eq!(matrix.row_total(0), 3);
    assert_eq!(matrix.column_total(0), 3);
  }

  #[test]
  fn canonical_order_moves_columns_with_counts() {
    let matrix = Matrix::build(&[
      identity("managed", "retired"),
      identity("managed", "custom"),
      identity("managed", "active"),
      identity("managed", "active"),
      identity("external", "draft"),
    ])
    .with_canonical_status_order();

    assert_eq!(matrix.statuses, ["draft", "active", "retired", "custom"]);
    assert_eq!(matrix.get("managed", "active"), 2);
    assert_eq!(matrix.get("managed", "retired"), 1);
    assert_eq!(matrix.get("managed", "custom"), 1);
    assert_eq!(matrix.get("external", "draft"), 1);
    assert_eq!(matrix.counts[0], vec![0, 2, 1, 1]);
    assert_eq!(matrix.total(), 5);
  }

  #[test]
  fn unknown_statuses_keep_first_seen_order() {
    let matrix = Matrix::build(&[
      identity("managed", "zeta"),
      identity("managed", "alpha"),
      identity("managed", "active"),
    ])
    .with_canonical_status_order();
    assert_eq!(matrix.statuses, ["active", "zeta", "alpha"]);
  }

  #[test]
  fn serialises_with_service_field_names() {
    let matrix = Matrix::build(&[identity("managed", "active")]);
    let json = serde_json::to_value(&matrix).unwrap();
    assert_eq!(json["ManagementTypes"][0], "managed");
    assert_eq!(json["Statuses"][0], "active");
    assert_eq!(json["Matrix"][0][0], 1);
  }
}
