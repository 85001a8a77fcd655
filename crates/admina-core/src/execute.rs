//! Driving resolved candidates through policy, approval, and the remote
//! merge.
//!
//! Each candidate moves from `Pending` to exactly one of `Skipped`,
//! `Failed`, or `Merged`, in discovery order, one at a time. A failure is
//! recorded on its candidate and processing continues; merges already made
//! stay made.

use serde::Serialize;
use tracing::{info, warn};

use crate::{
  Error, Result,
  merge::{MergeCandidate, MergeConfig, MergeStatus},
  policy,
  service::IdentityService,
};

// ─── Confirmation ────────────────────────────────────────────────────────────

/// Source of yes/no answers for merges that need manual approval.
///
/// This is the only point where a run waits on a person.
pub trait Confirm {
  /// Ask `prompt`; `true` proceeds. Unreadable input answers `false`.
  fn confirm(&mut self, prompt: &str) -> bool;
}

// ─── Tally ───────────────────────────────────────────────────────────────────

/// Outcome counts across one executor pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeTally {
  pub merged:  usize,
  pub skipped: usize,
  pub errors:  usize,
}

impl MergeTally {
  fn record(&mut self, status: MergeStatus) {
    match status {
      MergeStatus::Merged => self.merged += 1,
      MergeStatus::Skipped => self.skipped += 1,
      MergeStatus::Failed => self.errors += 1,
      MergeStatus::Pending => {}
    }
  }

  /// `Err` summarising the counts when any merge failed.
  pub fn into_result(self) -> Result<Self> {
    if self.errors > 0 {
      return Err(Error::MergeIncomplete {
        errors:  self.errors,
        merged:  self.merged,
        skipped: self.skipped,
      });
    }
    Ok(self)
  }
}

// ─── Executor ────────────────────────────────────────────────────────────────

/// Process every candidate, writing its status and reason in place.
///
/// In order, a candidate is skipped when the policy forbids it, skipped when
/// `config.dry_run` is set, skipped when approval is required and `confirm`
/// declines, and otherwise merged remotely (`child` into `parent`). The
/// returned tally never fails; use [`MergeTally::into_result`] once output
/// has been produced.
pub async fn execute_merges<S, C>(
  service: &S,
  candidates: &mut [MergeCandidate],
  config: &MergeConfig,
  confirm: &mut C,
) -> MergeTally
where
  S: IdentityService,
  C: Confirm + ?Sized,
{
  let mut tally = MergeTally::default();

  for candidate in candidates.iter_mut() {
    let (status, reason) = decide(service, candidate, config, confirm).await;
    candidate.status = status;
    candidate.reason = reason;
    tally.record(status);
  }

  info!(
    merged = tally.merged,
    skipped = tally.skipped,
    errors = tally.errors,
    "merge pass finished"
  );
  tally
}

async fn decide<S, C>(
  service: &S,
  candidate: &MergeCandidate,
  config: &MergeConfig,
  confirm: &mut C,
) -> (MergeStatus, Option<String>)
where
  S: IdentityService,
  C: Confirm + ?Sized,
{
  let child = config.mask.apply(&candidate.child.email);
  let parent = config.mask.apply(&candidate.parent.email);

  let allowed = match (
    candidate.parent.management_kind(),
    candidate.child.management_kind(),
  ) {
    (Some(p), Some(c)) => policy::is_merge_allowed(p, c),
    _ => false,
  };
  if !allowed {
    let reason = format!(
      "cannot merge from {} to {}",
      candidate.child.management_type, candidate.parent.management_type
    );
    info!(%child, %parent, "{reason}");
    return (MergeStatus::Skipped, Some(reason));
  }

  if config.dry_run {
    info!(%child, %parent, "dry run: would merge");
    return (MergeStatus::Skipped, Some("dry run".to_string()));
  }

  if !config.auto_approve
    && !confirm.confirm(&format!("Merge {child} -> {parent}? (y/n): "))
  {
    info!(%child, %parent, "skipped at prompt");
    return (MergeStatus::Skipped, Some("declined at prompt".to_string()));
  }

  match service
    .merge_identities(candidate.child.people_id, candidate.parent.people_id)
    .await
  {
    Ok(receipt) => {
      info!(
        from = receipt.from_people_id,
        to = receipt.to_people_id,
        "merged"
      );
      (MergeStatus::Merged, None)
    }
    Err(e) => {
      warn!(%child, %parent, error = %e, "merge failed");
      (MergeStatus::Failed, Some(format!("Failed to merge: {e}")))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    email::EmailMask,
    merge::find_merge_candidates,
    mock::{MockDirectory, identity},
  };

  fn config(dry_run: bool, auto_approve: bool) -> MergeConfig {
    MergeConfig {
      parent_domain: "parent.com".into(),
      child_domains: vec!["child.com".into()],
      dry_run,
      auto_approve,
      mask: EmailMask::masked(),
    }
  }

  struct NeverAsked;

  impl Confirm for NeverAsked {
    fn confirm(&mut self, prompt: &str) -> bool {
      panic!("confirmation should not be requested: {prompt}")
    }
  }

  /// Replays fixed answers and records the prompts it was shown.
  struct Scripted {
    answers: std::vec::IntoIter<bool>,
    prompts: Vec<String>,
  }

  impl Confirm for Scripted {
    fn confirm(&mut self, prompt: &str) -> bool {
      self.prompts.push(prompt.to_string());
      self.answers.next().unwrap_or(false)
    }
  }

  async fn run(
    directory: &MockDirectory,
    config: &MergeConfig,
    confirm: &mut impl Confirm,
  ) -> (Vec<MergeCandidate>, MergeTally) {
    let identities = crate::fetch::fetch_all(directory).await.unwrap();
    let mut resolution =
      find_merge_candidates(&identities, &config.parent_domain, &config.child_domains);
    let tally =
      execute_merges(directory, &mut resolution.candidates, config, confirm).await;
    (resolution.candidates, tally)
  }

  #[tokio::test]
  async fn auto_approved_merge_calls_service_child_into_parent() {
    let directory = MockDirectory::new(vec![
      identity(10, "alice@parent.com", "managed"),
      identity(20, "alice@child.com", "external"),
    ]);

    let (candidates, tally) =
      run(&directory, &config(false, true), &mut NeverAsked).await;

    assert_eq!(directory.merges(), [(20, 10)]);
    assert_eq!(tally, MergeTally { merged: 1, skipped: 0, errors: 0 });
    assert_eq!(candidates[0].status, MergeStatus::Merged);
    assert_eq!(candidates[0].reason, None);
    assert!(tally.into_result().is_ok());
  }

  #[tokio::test]
  async fn dry_run_never_merges() {
    let directory = MockDirectory::new(vec![
      identity(1, "a@parent.com", "managed"),
      identity(2, "b@parent.com", "managed"),
      identity(3, "a@child.com", "external"),
      identity(4, "b@child.com", "unknown"),
      identity(5, "a@child.com", "managed"),
    ]);

    let (candidates, tally) =
      run(&directory, &config(true, false), &mut NeverAsked).await;

    assert!(directory.merges().is_empty());
    assert_eq!(tally.merged, 0);
    assert_eq!(tally.skipped, 3);
    assert!(candidates.iter().all(|c| c.status == MergeStatus::Skipped));
  }

  #[tokio::test]
  async fn policy_rejection_skips_without_asking() {
    let directory = MockDirectory::new(vec![
      identity(1, "alice@parent.com", "external"),
      identity(2, "alice@child.com", "managed"),
    ]);

    let (candidates, tally) =
      run(&directory, &config(false, false), &mut NeverAsked).await;

    assert!(directory.merges().is_empty());
    assert_eq!(tally.skipped, 1);
    assert_eq!(
      candidates[0].reason.as_deref(),
      Some("cannot merge from managed to external")
    );
  }

  #[tokio::test]
  async fn unrecognised_management_type_is_skipped() {
    let directory = MockDirectory::new(vec![
      identity(1, "alice@parent.com", "managed"),
      identity(2, "alice@child.com", ""),
    ]);

    let (candidates, _) =
      run(&directory, &config(false, true), &mut NeverAsked).await;

    assert!(directory.merges().is_empty());
    assert_eq!(candidates[0].status, MergeStatus::Skipped);
  }

  #[tokio::test]
  async fn prompt_answers_decide_each_candidate() {
    let directory = MockDirectory::new(vec![
      identity(1, "alice@parent.com", "managed"),
      identity(2, "bobby@parent.com", "managed"),
      identity(3, "alice@child.com", "external"),
      identity(4, "bobby@child.com", "external"),
    ]);
    let mut confirm = Scripted {
      answers: vec![false, true].into_iter(),
      prompts: Vec::new(),
    };

    let (candidates, tally) =
      run(&directory, &config(false, false), &mut confirm).await;

    assert_eq!(directory.merges(), [(4, 2)]);
    assert_eq!(tally, MergeTally { merged: 1, skipped: 1, errors: 0 });
    assert_eq!(candidates[0].reason.as_deref(), Some("declined at prompt"));
    assert_eq!(confirm.prompts[0], "Merge ali**@child.com -> ali**@parent.com? (y/n): ");
  }

  #[tokio::test]
  async fn failures_are_recorded_and_processing_continues() {
    let directory = MockDirectory::new(vec![
      identity(1, "alice@parent.com", "managed"),
      identity(2, "bobby@parent.com", "managed"),
      identity(3, "alice@child.com", "external"),
      identity(4, "bobby@child.com", "external"),
    ])
    .failing_merge_from(3);

    let (candidates, tally) =
      run(&directory, &config(false, true), &mut NeverAsked).await;

    assert_eq!(directory.merges(), [(4, 2)]);
    assert_eq!(candidates[0].status, MergeStatus::Failed);
    assert!(
      candidates[0]
        .reason
        .as_deref()
        .unwrap()
        .contains("merge of 3 rejected")
    );
    assert_eq!(candidates[1].status, MergeStatus::Merged);

    let err = tally.into_result().unwrap_err();
    assert_eq!(err.to_string(), "completed with 1 errors, 1 merged, 0 skipped");
  }
}
