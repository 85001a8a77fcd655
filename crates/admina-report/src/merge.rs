//! Merge result renderers.

use std::path::Path;

use admina_core::{EmailMask, Identity, MergeStatus, MergeTally, Resolution};
use serde::Serialize;

use crate::{OutputFormat, Result, artifacts::write_artifacts};

/// A finished merge run, ready to be displayed.
#[derive(Debug, Clone, Copy)]
pub struct MergeReport<'a> {
  pub resolution: &'a Resolution,
  pub tally:      MergeTally,
  pub mask:       EmailMask,
}

#[derive(Serialize)]
struct CandidateLine<'a> {
  index:  usize,
  status: MergeStatus,
  #[serde(skip_serializing_if = "Option::is_none")]
  reason: Option<&'a str>,
  parent: Identity,
  child:  Identity,
}

impl MergeReport<'_> {
  /// Render as `format`. For [`OutputFormat::Csv`] the artifacts are written
  /// under `out_dir` and a one-line notice is returned.
  pub fn render(&self, format: OutputFormat, out_dir: &Path) -> Result<String> {
    match format {
      OutputFormat::Json => self.json(),
      OutputFormat::Markdown => Ok(self.markdown()),
      OutputFormat::Pretty => Ok(self.pretty()),
      OutputFormat::Csv => {
        let paths = write_artifacts(self.resolution, self.mask, out_dir)?;
        Ok(format!("CSV files written to {}\n", paths.dir.display()))
      }
    }
  }

  fn masked(&self, identity: &Identity) -> Identity {
    Identity {
      email: self.mask.apply(&identity.email).into_owned(),
      ..identity.clone()
    }
  }

  /// One JSON object per line, one line per candidate.
  pub fn json(&self) -> Result<String> {
    let mut out = String::new();
    for (i, candidate) in self.resolution.candidates.iter().enumerate() {
      let line = CandidateLine {
        index:  i + 1,
        status: candidate.status,
        reason: candidate.reason.as_deref(),
        parent: self.masked(&candidate.parent),
        child:  self.masked(&candidate.child),
      };
      out.push_str(&serde_json::to_string(&line)?);
      out.push('\n');
    }
    Ok(out)
  }

  pub fn markdown(&self) -> String {
    let mut out = String::from("# Merge Result\n\n## Candidates\n\n");
    out.push_str("| No. | Status | Parent | Child | Reason |\n");
    out.push_str("|-----|--------|--------|-------|--------|\n");

    for (i, candidate) in self.resolution.candidates.iter().enumerate() {
      let reason = candidate.reason.as_deref().unwrap_or_default();
      out.push_str(&format!(
        "| {} | {} | {} | {} | {} |\n",
        i + 1,
        candidate.status,
        self.mask.apply(&candidate.parent.email),
        self.mask.apply(&candidate.child.email),
        reason.replace('|', "\\|"),
      ));
    }

    out.push_str(&format!("\n{}\n", self.counts_line()));
    out
  }

  pub fn pretty(&self) -> String {
    let mut out = String::from("=== Merge Result ===\n\nCandidates:\n");
    for (i, candidate) in self.resolution.candidates.iter().enumerate() {
      out.push_str(&format!(
        "{}. {} -> {} [{}]\n",
        i + 1,
        self.mask.apply(&candidate.child.email),
        self.mask.apply(&candidate.parent.email),
        candidate.status,
      ));
    }
    out.push_str(&format!("\n{}\n", self.counts_line()));
    out
  }

  fn counts_line(&self) -> String {
    let summary = &self.resolution.summary;
    format!(
      "Candidates: {}, Unmapped: {}, Merged: {}, Skipped: {}, Errors: {}",
      summary.merge_candidates,
      summary.unmapped_identities,
      self.tally.merged,
      self.tally.skipped,
      self.tally.errors,
    )
  }
}
