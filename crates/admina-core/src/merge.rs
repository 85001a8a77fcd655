//! Finding merge candidates: child-domain identities whose email local part
//! matches an identity on the parent domain.

use std::collections::HashMap;

use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::{Error, Result, email::EmailMask, identity::Identity};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Parameters for one same-local-part merge run.
#[derive(Debug, Clone, Default)]
pub struct MergeConfig {
  /// Destination domain, e.g. `example.com`.
  pub parent_domain: String,
  /// Source domains, e.g. `sub1.example.com`. Order is kept for reporting.
  pub child_domains: Vec<String>,
  /// Decide every candidate but never call the remote merge.
  pub dry_run:       bool,
  /// Merge without asking for confirmation.
  pub auto_approve:  bool,
  /// How addresses appear in logs and prompts.
  pub mask:          EmailMask,
}

impl MergeConfig {
  /// Fail fast on a configuration that cannot produce a meaningful run.
  pub fn validate(&self) -> Result<()> {
    if self.parent_domain.trim().is_empty() {
      return Err(Error::MissingParentDomain);
    }
    if self.child_domains.iter().all(|d| d.trim().is_empty()) {
      return Err(Error::MissingChildDomains);
    }
    if let Some(domain) = self
      .child_domains
      .iter()
      .find(|d| d.as_str() == self.parent_domain)
    {
      return Err(Error::ChildIsParent(domain.clone()));
    }
    Ok(())
  }
}

// ─── Candidates ──────────────────────────────────────────────────────────────

/// Where a candidate ended up after the executor looked at it.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, AsRefStr, Display, Serialize,
)]
pub enum MergeStatus {
  /// Not processed yet.
  #[default]
  Pending,
  #[strum(to_string = "Success")]
  #[serde(rename = "Success")]
  Merged,
  #[strum(to_string = "Skip")]
  #[serde(rename = "Skip")]
  Skipped,
  #[strum(to_string = "Error")]
  #[serde(rename = "Error")]
  Failed,
}

/// A proposed merge of `child` into `parent`.
///
/// `parent` lives on the parent domain, `child` on one of the child domains,
/// and both share the same email local part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCandidate {
  pub parent: Identity,
  pub child:  Identity,
  pub status: MergeStatus,
  /// Why the candidate was not merged; `None` on success or while pending.
  pub reason: Option<String>,
}

impl MergeCandidate {
  pub fn new(parent: Identity, child: Identity) -> Self {
    Self {
      parent,
      child,
      status: MergeStatus::Pending,
      reason: None,
    }
  }
}

// ─── Summary ─────────────────────────────────────────────────────────────────

/// Per-domain counts for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DomainCounts {
  pub domain:     String,
  /// Identities observed on this domain.
  pub identities: usize,
  /// Child identities that found a parent. Always 0 for the parent domain.
  pub matched:    usize,
  pub unmapped:   usize,
}

/// Aggregate counts from one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
  pub total_identities:    usize,
  pub merge_candidates:    usize,
  pub unmapped_identities: usize,
  pub parent:              DomainCounts,
  /// One entry per configured child domain, in configuration order.
  pub children:            Vec<DomainCounts>,
}

impl MergeSummary {
  fn child(&self, domain: &str) -> Option<&DomainCounts> {
    self.children.iter().find(|c| c.domain == domain)
  }

  pub fn match_count(&self, domain: &str) -> usize {
    self.child(domain).map_or(0, |c| c.matched)
  }

  pub fn unmapped_count(&self, domain: &str) -> usize {
    self.child(domain).map_or(0, |c| c.unmapped)
  }
}

/// Everything a resolution pass produces.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
  pub candidates: Vec<MergeCandidate>,
  /// Child-domain identities with no parent-domain counterpart.
  pub unmapped:   Vec<Identity>,
  pub summary:    MergeSummary,
}

// ─── Resolver ────────────────────────────────────────────────────────────────

/// Pair every child-domain identity with the parent-domain identity sharing
/// its local part.
///
/// Candidates and unmapped identities keep input order. When several
/// parent-domain identities share a local part, the first one in input order
/// is the parent for all matching children. Parent-domain identities nobody
/// matched are not reported.
pub fn find_merge_candidates(
  identities: &[Identity],
  parent_domain: &str,
  child_domains: &[String],
) -> Resolution {
  let mut parents: HashMap<&str, &Identity> = HashMap::new();
  let mut parent_counts = DomainCounts {
    domain: parent_domain.to_string(),
    ..Default::default()
  };
  for identity in identities.iter().filter(|i| i.domain() == parent_domain) {
    parent_counts.identities += 1;
    parents.entry(identity.local_part()).or_insert(identity);
  }

  let mut children: Vec<DomainCounts> = child_domains
    .iter()
    .map(|domain| DomainCounts {
      domain: domain.clone(),
      ..Default::default()
    })
    .collect();

  let mut candidates = Vec::new();
  let mut unmapped = Vec::new();

  for identity in identities {
    let Some(counts) = children.iter_mut().find(|c| c.domain == identity.domain())
    else {
      continue;
    };
    counts.identities += 1;

    match parents.get(identity.local_part()) {
      Some(&parent) => {
        candidates.push(MergeCandidate::new(parent.clone(), identity.clone()));
        counts.matched += 1;
      }
      None => {
        unmapped.push(identity.clone());
        counts.unmapped += 1;
      }
    }
  }

  let summary = MergeSummary {
    total_identities: identities.len(),
    merge_candidates: candidates.len(),
    unmapped_identities: unmapped.len(),
    parent: parent_counts,
    children,
  };

  Resolution {
    candidates,
    unmapped,
    summary,
  }
}
