//! Identity matrix renderers.

use admina_core::Matrix;

use crate::{Error, OutputFormat, Result};

const TYPE_WIDTH: usize = 20;
const CELL_WIDTH: usize = 15;

/// Render `matrix` as `format`. CSV is rejected.
pub fn render_matrix(matrix: &Matrix, format: OutputFormat) -> Result<String> {
  match format {
    OutputFormat::Json => Ok(serde_json::to_string_pretty(matrix)?),
    OutputFormat::Markdown => Ok(markdown(matrix)),
    OutputFormat::Pretty => Ok(pretty(matrix)),
    OutputFormat::Csv => Err(Error::UnsupportedFormat {
      format,
      report: "the identity matrix",
    }),
  }
}

fn markdown(matrix: &Matrix) -> String {
  if matrix.is_empty() {
    return "# Identity Matrix\nNo data available.\n".to_string();
  }

  let mut out = String::from("# Identity Matrix\n| Type          |");
  for status in &matrix.statuses {
    out.push_str(&format!(" {status:<CELL_WIDTH$} |"));
  }
  out.push_str(" Total          |\n");

  out.push_str("|---------------|");
  out.push_str(&"----------------|".repeat(matrix.statuses.len() + 1));
  out.push('\n');

  for (row, management_type) in matrix.management_types.iter().enumerate() {
    out.push_str(&format!("| {management_type:<13} |"));
    for count in &matrix.counts[row] {
      out.push_str(&format!(" {count:<CELL_WIDTH$} |"));
    }
    out.push_str(&format!(" {:<CELL_WIDTH$} |\n", matrix.row_total(row)));
  }

  out.push_str("| Total         |");
  for column in 0..matrix.statuses.len() {
    out.push_str(&format!(" {:<CELL_WIDTH$} |", matrix.column_total(column)));
  }
  out.push_str(&format!(" {:<CELL_WIDTH$} |\n", matrix.total()));

  out.push_str(&format!("\n\nTotal Identities: {}\n", matrix.total()));
  out
}

fn pretty(matrix: &Matrix) -> String {
  let rule = "-".repeat(TYPE_WIDTH + CELL_WIDTH * (matrix.statuses.len() + 1));

  let mut out = String::from("Identity Matrix:\n");
  out.push_str(&format!("{:<TYPE_WIDTH$}", "Type"));
  for status in &matrix.statuses {
    out.push_str(&format!("{status:<CELL_WIDTH$}"));
  }
  out.push_str(&format!("{:<CELL_WIDTH$}\n", "Total"));
  out.push_str(&format!("{rule}\n"));

  for (row, management_type) in matrix.management_types.iter().enumerate() {
    out.push_str(&format!("{management_type:<TYPE_WIDTH$}"));
    for count in &matrix.counts[row] {
      out.push_str(&format!("{count:<CELL_WIDTH$}"));
    }
    out.push_str(&format!("{:<CELL_WIDTH$}\n", matrix.row_total(row)));
  }

  out.push_str(&format!("{rule}\n"));
  out.push_str(&format!("{:<TYPE_WIDTH$}", "Total"));
  for column in 0..matrix.statuses.len() {
    out.push_str(&format!("{:<CELL_WIDTH$}", matrix.column_total(column)));
  }
  out.push_str(&format!("{:<CELL_WIDTH$}\n", matrix.total()));

  out.push_str(&format!("\n\nTotal Identities: {}\n", matrix.total()));
  out
}
