//! Which management types may be absorbed into which.
//!
//! Keyed by the child (the identity that disappears). A better-governed
//! child is never absorbed into a less-governed parent: `managed` only merges
//! into `managed`, while `unknown` may merge into anything but itself.

use crate::identity::ManagementType::{self, *};

/// Child management type → parent management types it may merge into.
pub const MERGE_POLICY: [(ManagementType, &[ManagementType]); 5] = [
  (Managed, &[Managed]),
  (External, &[Managed, External]),
  (System, &[Managed, External, System]),
  (Unregistered, &[Managed, External, System]),
  (Unknown, &[Managed, External, System, Unregistered]),
];

/// The parent types a `child` may be merged into.
pub fn allowed_parents(child: ManagementType) -> &'static [ManagementType] {
  MERGE_POLICY
    .iter()
    .find(|(kind, _)| *kind == child)
    .map(|(_, parents)| *parents)
    .unwrap_or_default()
}

/// Whether an identity of type `child` may be merged into one of type
/// `parent`. Not symmetric.
pub fn is_merge_allowed(parent: ManagementType, child: ManagementType) -> bool {
  allowed_parents(child).contains(&parent)
}
