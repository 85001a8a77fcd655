//! CSV artifacts for a merge run: the parent/child mapping and the child
//! identities that found no parent.

use std::path::{Path, PathBuf};

use admina_core::{EmailMask, Resolution};
use serde::Serialize;
use tracing::info;

use crate::{Error, Result};

pub const MAPPINGS_FILE: &str = "identity_mappings.csv";
pub const UNMAPPED_FILE: &str = "unmapped_child_identities.csv";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct MappingRecord<'a> {
  parent_email:       String,
  #[serde(rename = "ParentIdentityID")]
  parent_identity_id: &'a str,
  child_email:        String,
  #[serde(rename = "ChildIdentityID")]
  child_identity_id:  &'a str,
  status:             String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct UnmappedRecord<'a> {
  child_email:       String,
  #[serde(rename = "ChildIdentityID")]
  child_identity_id: &'a str,
}

/// Where [`write_artifacts`] put its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
  pub dir:      PathBuf,
  pub mappings: PathBuf,
  pub unmapped: PathBuf,
}

/// Write both CSV files into `dir`, creating it if needed. Existing files
/// are replaced. Emails are rendered through `mask`.
pub fn write_artifacts(
  resolution: &Resolution,
  mask: EmailMask,
  dir: &Path,
) -> Result<ArtifactPaths> {
  std::fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
    path: dir.to_path_buf(),
    source,
  })?;

  let mappings = dir.join(MAPPINGS_FILE);
  let records = resolution.candidates.iter().map(|c| MappingRecord {
    parent_email:       mask.apply(&c.parent.email).into_owned(),
    parent_identity_id: &c.parent.id,
    child_email:        mask.apply(&c.child.email).into_owned(),
    child_identity_id:  &c.child.id,
    status:             c.status.to_string(),
  });
  write_csv(&mappings, records, &[
    "ParentEmail",
    "ParentIdentityID",
    "ChildEmail",
    "ChildIdentityID",
    "Status",
  ])?;

  let unmapped = dir.join(UNMAPPED_FILE);
  let records = resolution.unmapped.iter().map(|u| UnmappedRecord {
    child_email:       mask.apply(&u.email).into_owned(),
    child_identity_id: &u.id,
  });
  write_csv(&unmapped, records, &[
    "ChildEmail",
    "ChildIdentityID",
  ])?;

  info!(
    mappings = resolution.candidates.len(),
    unmapped = resolution.unmapped.len(),
    dir = %dir.display(),
    "wrote CSV artifacts"
  );
  Ok(ArtifactPaths {
    dir: dir.to_path_buf(),
    mappings,
    unmapped,
  })
}

/// The header row is written explicitly so an empty file still carries it.
fn write_csv<T: Serialize>(
  path: &Path,
  records: impl Iterator<Item = T>,
  header: &[&str],
) -> Result<()> {
  let wrap = |source| Error::Csv {
    path: path.to_path_buf(),
    source,
  };

  let mut writer = csv::WriterBuilder::new()
    .has_headers(false)
    .from_path(path)
    .map_err(wrap)?;
  writer.write_record(header).map_err(wrap)?;
  for record in records {
    writer.serialize(record).map_err(wrap)?;
  }
  writer.flush().map_err(|e| wrap(e.into()))?;
  Ok(())
}
