//! The `identity` subcommands.

use std::path::PathBuf;

use admina_client::{AdminaClient, Organization};
use admina_core::{
  EmailMask, Matrix, MergeConfig, Resolution, execute_merges, fetch_all,
  find_merge_candidates,
};
use admina_report::{MergeReport, OutputFormat, render_matrix, write_artifacts};
use anyhow::{Context, Result, bail};
use tracing::info;

use crate::{prompt::LineConfirm, settings::Settings};

// ─── Shared ──────────────────────────────────────────────────────────────────

/// Build a client and log which organization it is talking to.
async fn connect(settings: &Settings) -> Result<AdminaClient> {
  let client = AdminaClient::new(settings.client_config())?;
  let org = client
    .get_organization()
    .await
    .context("failed to get organization")?;
  log_banner(&org);
  Ok(client)
}

fn log_banner(org: &Organization) {
  let rule = "-".repeat(65);
  info!("{rule}");
  info!("{} | {} | {} ({})", org.name, org.unique_name, org.id, org.status);
  info!(
    "Language: {} | Location: {} | TimeZone: {}",
    org.system_language, org.location, org.time_zone
  );
  info!("Domains: {}", org.domains.join(", "));
  info!("{rule}");
}

fn emit(output: &str) {
  if output.ends_with('\n') {
    print!("{output}");
  } else {
    println!("{output}");
  }
}

// ─── matrix ──────────────────────────────────────────────────────────────────

pub async fn matrix(settings: &Settings, output: OutputFormat) -> Result<()> {
  if !output.supports_matrix() {
    bail!("output format {output} is not supported for the identity matrix");
  }

  let client = connect(settings).await?;
  let identities = fetch_all(&client).await?;
  let matrix = Matrix::build(&identities).with_canonical_status_order();
  info!(
    management_types = matrix.management_types.len(),
    statuses = matrix.statuses.len(),
    "built identity matrix"
  );

  emit(&render_matrix(&matrix, output)?);
  Ok(())
}

// ─── samemerge ───────────────────────────────────────────────────────────────

/// Options for `identity samemerge` after argument parsing.
pub struct SameMerge {
  pub parent_domain: String,
  pub child_domains: String,
  pub dry_run:       bool,
  pub auto_approve:  bool,
  pub nomask:        bool,
  pub output:        OutputFormat,
  pub out_dir:       Option<PathBuf>,
}

/// Split a comma-separated list, trimming entries and dropping blanks and
/// repeats. First occurrence wins.
pub fn parse_child_domains(raw: &str) -> Vec<String> {
  let mut domains: Vec<String> = Vec::new();
  for domain in raw.split(',').map(str::trim).filter(|d| !d.is_empty()) {
    if !domains.iter().any(|d| d == domain) {
      domains.push(domain.to_string());
    }
  }
  domains
}

pub async fn samemerge(settings: &Settings, args: SameMerge) -> Result<()> {
  let config = MergeConfig {
    parent_domain: args.parent_domain.trim().to_string(),
    child_domains: parse_child_domains(&args.child_domains),
    dry_run:       args.dry_run,
    auto_approve:  args.auto_approve,
    mask:          if args.nomask {
      EmailMask::plain()
    } else {
      EmailMask::masked()
    },
  };
  config.validate()?;
  let out_dir = settings.out_dir(args.out_dir)?;

  info!(
    parent = %config.parent_domain,
    children = %config.child_domains.join(","),
    dry_run = config.dry_run,
    auto_approve = config.auto_approve,
    "starting same-local-part merge"
  );

  let client = connect(settings).await?;
  let identities = fetch_all(&client).await?;
  let mut resolution = find_merge_candidates(
    &identities,
    &config.parent_domain,
    &config.child_domains,
  );
  log_resolution(&resolution);

  let tally = execute_merges(
    &client,
    &mut resolution.candidates,
    &config,
    &mut LineConfirm::stdio(),
  )
  .await;

  let report = MergeReport {
    resolution: &resolution,
    tally,
    mask: config.mask,
  };
  let rendered = report.render(args.output, &out_dir)?;
  if args.output != OutputFormat::Csv {
    write_artifacts(&resolution, config.mask, &out_dir)?;
  }
  emit(&rendered);

  tally.into_result()?;
  Ok(())
}

fn log_resolution(resolution: &Resolution) {
  let summary = &resolution.summary;
  info!(
    total = summary.total_identities,
    candidates = summary.merge_candidates,
    unmapped = summary.unmapped_identities,
    "resolved merge candidates"
  );
  info!(
    domain = %summary.parent.domain,
    identities = summary.parent.identities,
    "parent domain"
  );
  for child in &summary.children {
    info!(
      domain = %child.domain,
      identities = child.identities,
      matched = child.matched,
      unmapped = child.unmapped,
      "child domain"
    );
  }
}
