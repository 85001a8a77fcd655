//! `admina-sysutils`: identity maintenance for an Admina organization.
//!
//! # Usage
//!
//! ```text
//! admina-sysutils identity matrix --output markdown
//! admina-sysutils identity samemerge --parent-domain example.com \
//!   --child-domains sub1.example.com,sub2.example.com --dry-run
//! ```
//!
//! Credentials come from `ADMINA_ORGANIZATION_ID` and `ADMINA_API_KEY`, or
//! from a config file given with `--config`.

mod commands;
mod prompt;
mod settings;

use std::{path::PathBuf, process::ExitCode, time::Instant};

use admina_report::OutputFormat;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use commands::SameMerge;
use settings::Settings;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "admina-sysutils", version, about = "Admina identity utilities")]
struct Cli {
  /// Log at debug level (RUST_LOG still takes precedence).
  #[arg(long, global = true, env = "ADMINA_DEBUG")]
  debug: bool,

  /// Config file with base_url, organization_id, api_key, cli_root,
  /// timeout_secs. ADMINA_* environment variables override it.
  #[arg(short, long, global = true, env = "ADMINA_CONFIG", value_name = "FILE")]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Identity reports and maintenance.
  #[command(subcommand)]
  Identity(IdentityCommand),
}

#[derive(Subcommand, Debug)]
enum IdentityCommand {
  /// Count identities by management type and employee status.
  Matrix {
    /// json, markdown, or pretty.
    #[arg(short, long, env = "ADMINA_OUTPUT", default_value_t = OutputFormat::Json)]
    output: OutputFormat,
  },

  /// Merge child-domain identities into the parent-domain identity with the
  /// same email local part.
  #[command(name = "samemerge")]
  SameMerge(SameMergeArgs),
}

#[derive(Args, Debug)]
struct SameMergeArgs {
  /// Domain identities are merged into, e.g. example.com.
  #[arg(long, env = "ADMINA_PARENT_DOMAIN")]
  parent_domain: Option<String>,

  /// Comma-separated domains identities are merged from.
  #[arg(long, env = "ADMINA_CHILD_DOMAINS")]
  child_domains: Option<String>,

  /// Decide every merge but perform none.
  #[arg(long)]
  dry_run: bool,

  /// Merge without asking for confirmation.
  #[arg(short = 'y', long = "yes")]
  yes: bool,

  /// Show email addresses unmasked.
  #[arg(long)]
  nomask: bool,

  /// json, markdown, pretty, or csv.
  #[arg(short, long, env = "ADMINA_OUTPUT", default_value_t = OutputFormat::Json)]
  output: OutputFormat,

  /// Directory for the CSV artifacts (default: <ADMINA_CLI_ROOT or cwd>/out/data).
  #[arg(long, env = "ADMINA_OUT_DIR", value_name = "DIR")]
  out_dir: Option<PathBuf>,
}

impl From<SameMergeArgs> for SameMerge {
  fn from(args: SameMergeArgs) -> Self {
    Self {
      parent_domain: args.parent_domain.unwrap_or_default(),
      child_domains: args.child_domains.unwrap_or_default(),
      dry_run:       args.dry_run,
      auto_approve:  args.yes,
      nomask:        args.nomask,
      output:        args.output,
      out_dir:       args.out_dir,
    }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.debug {
    LevelFilter::DEBUG
  } else {
    LevelFilter::INFO
  };
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let command_line = std::env::args().collect::<Vec<_>>().join(" ");
  info!("Executed command: {command_line}");
  let started = Instant::now();

  let result = run(cli).await;

  info!("Processing time: {:?}", started.elapsed());
  match result {
    Ok(()) => {
      info!("Result: 0 (Success)");
      ExitCode::SUCCESS
    }
    Err(e) => {
      error!("{e:#}");
      info!("Result: 1 (Error)");
      ExitCode::FAILURE
    }
  }
}

async fn run(cli: Cli) -> Result<()> {
  let settings = Settings::load(cli.config.as_deref())?;

  match cli.command {
    Command::Identity(IdentityCommand::Matrix { output }) => {
      commands::matrix(&settings, output).await
    }
    Command::Identity(IdentityCommand::SameMerge(args)) => {
      commands::samemerge(&settings, args.into()).await
    }
  }
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn cli_is_well_formed() { Cli::command().debug_assert(); }

  #[test]
  fn parses_samemerge_flags() {
    let cli = Cli::try_parse_from([
      "admina-sysutils",
      "--debug",
      "identity",
      "samemerge",
      "--parent-domain",
      "example.com",
      "--child-domains",
      "a.example.com, b.example.com",
      "-y",
      "--nomask",
      "--output",
      "csv",
    ])
    .unwrap();
    assert!(cli.debug);

    let Command::Identity(IdentityCommand::SameMerge(args)) = cli.command else {
      panic!("expected samemerge");
    };
    let merge = SameMerge::from(args);
    assert_eq!(merge.parent_domain, "example.com");
    assert!(merge.auto_approve && merge.nomask && !merge.dry_run);
    assert_eq!(merge.output, OutputFormat::Csv);
  }

  #[test]
  fn rejects_unknown_output_format() {
    let err = Cli::try_parse_from(["admina-sysutils", "identity", "matrix", "-o", "yaml"]);
    assert!(err.is_err());
  }

  fn env_of(command: &clap::Command, id: &str) -> Option<String> {
    command
      .get_arguments()
      .find(|arg| arg.get_id() == id)
      .and_then(|arg| arg.get_env())
      .map(|env| env.to_string_lossy().into_owned())
  }

  #[test]
  fn flags_fall_back_to_environment() {
    let cli = Cli::command();
    assert_eq!(env_of(&cli, "debug").as_deref(), Some("ADMINA_DEBUG"));
    assert_eq!(env_of(&cli, "config").as_deref(), Some("ADMINA_CONFIG"));

    let identity = cli.find_subcommand("identity").unwrap();
    let matrix = identity.find_subcommand("matrix").unwrap();
    assert_eq!(env_of(matrix, "output").as_deref(), Some("ADMINA_OUTPUT"));

    let merge = identity.find_subcommand("samemerge").unwrap();
    for (id, env) in [
      ("parent_domain", "ADMINA_PARENT_DOMAIN"),
      ("child_domains", "ADMINA_CHILD_DOMAINS"),
      ("output", "ADMINA_OUTPUT"),
      ("out_dir", "ADMINA_OUT_DIR"),
    ] {
      assert_eq!(env_of(merge, id).as_deref(), Some(env), "{id}");
    }
  }

  #[test]
  fn matrix_defaults_to_json() {
    let cli = Cli::try_parse_from(["admina-sysutils", "identity", "matrix"]).unwrap();
    assert!(matches!(
      cli.command,
      Command::Identity(IdentityCommand::Matrix { output: OutputFormat::Json })
    ));
  }
}
