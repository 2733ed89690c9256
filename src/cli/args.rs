//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::checks::build_config::Profile;
use crate::checks::fetch::FetchVia;
use crate::runtime::python::DEFAULT_INTERPRETER;

/// pyverify - Smoke tests for an installed Python runtime.
#[derive(Debug, Parser)]
#[command(name = "pyverify")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Interpreter to verify
    #[arg(long, global = true, env = "PYVERIFY_PYTHON", default_value = DEFAULT_INTERPRETER)]
    pub python: PathBuf,

    /// Path to settings file (overrides ./.pyverify.yml)
    #[arg(short, long, global = true, env = "PYVERIFY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect packages installed more than once (duplicate *.dist-info)
    DistInfo(DistInfoArgs),

    /// Validate library location, shared build and OpenSSL flags
    Config(ConfigArgs),

    /// Import every standard-library module expected for the runtime
    Modules(ModulesArgs),

    /// Open a database connection with the sqlite3 driver
    Sqlite(SqliteArgs),

    /// Download a pinned file and check its size
    Fetch(FetchArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `dist-info` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DistInfoArgs {
    /// Installation root to scan instead of the interpreter's site-packages (repeatable)
    #[arg(long = "root", value_name = "DIR")]
    pub roots: Vec<PathBuf>,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
    /// Runtime version as installed in the tools directory (e.g. 3.12.1)
    #[arg(id = "target_version", value_name = "VERSION")]
    pub version: String,

    /// Version the OpenSSL rules are keyed on (defaults to VERSION)
    pub native_version: Option<String>,

    /// Rule set to apply (default: installer when NATIVE_VERSION is given)
    #[arg(long, value_enum)]
    pub profile: Option<Profile>,

    /// Root of the agent tool cache
    #[arg(long, env = "AGENT_TOOLSDIRECTORY", value_name = "DIR")]
    pub tools_directory: Option<String>,

    /// OS name to assume instead of asking the interpreter (Linux, Darwin, ...)
    #[arg(long)]
    pub os: Option<String>,
}

/// Arguments for the `modules` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ModulesArgs {
    /// Version whose major component selects the module list
    #[arg(id = "target_version", value_name = "VERSION")]
    pub version: Option<String>,
}

/// Arguments for the `sqlite` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SqliteArgs {
    /// Database file to open (default: in-memory)
    #[arg(long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Enable extension loading on the connection
    #[arg(long)]
    pub enable_extensions: bool,
}

/// Arguments for the `fetch` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FetchArgs {
    /// HTTP stack performing the download
    #[arg(long, value_enum, default_value_t = FetchVia::Interpreter)]
    pub via: FetchVia,

    /// URL to download instead of the pinned file
    #[arg(long)]
    pub url: Option<String>,

    /// Expected body size in bytes
    #[arg(long, value_name = "BYTES")]
    pub expected_length: Option<usize>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
