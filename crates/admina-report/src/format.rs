use strum::{Display, EnumIter, EnumString};

/// The output kinds a command can be asked for.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
  #[default]
  Json,
  Markdown,
  Pretty,
  /// Files on disk rather than text; only meaningful for merge results.
  Csv,
}

impl OutputFormat {
  pub fn supports_matrix(self) -> bool { self != Self::Csv }
}
