//! Core types and the merge engine for the Admina identity tools.
//!
//! Nothing in here talks HTTP or touches the filesystem. The directory is
//! reached through [`IdentityService`]; confirmation through [`Confirm`].

#![allow(async_fn_in_trait)]

pub mod email;
pub mod error;
pub mod execute;
pub mod fetch;
pub mod identity;
pub mod matrix;
pub mod merge;
pub mod policy;
pub mod service;

#[cfg(test)]
mod mock;

pub use email::EmailMask;
pub use error::{Error, Result};
pub use execute::{Confirm, MergeTally, execute_merges};
pub use fetch::fetch_all;
pub use identity::{Identity, ManagementType, MergedPerson};
pub use matrix::Matrix;
pub use merge::{
  DomainCounts, MergeCandidate, MergeConfig, MergeStatus, MergeSummary,
  Resolution, find_merge_candidates,
};
pub use service::{IdentityPage, IdentityService, MergeReceipt};
