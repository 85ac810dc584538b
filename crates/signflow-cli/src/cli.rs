//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Signflow CLI - Turn plain-text signing requirements into published workflows.
#[derive(Debug, Parser)]
#[command(name = "signflow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.signflow/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Bearer token for the workflow service
    #[arg(long, global = true, env = "SIGNFLOW_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Gemini API key for --ai
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_key: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (ids only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract documents and signers and print them
    Parse(TextArgs),

    /// Print the request body the text would produce
    Build(TextArgs),

    /// Create, populate and publish a workflow from text
    Create(CreateArgs),

    /// Run the lifecycle with a request body read from a JSON file
    Submit(SubmitArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),
}

/// Requirement text, inline or from a file.
#[derive(Debug, Parser)]
pub struct TextArgs {
    /// Requirement text ("-" reads stdin)
    #[arg(required_unless_present = "file")]
    pub text: Option<String>,

    /// Read the requirement from a file
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

/// Arguments for the create command.
#[derive(Debug, Parser)]
pub struct CreateArgs {
    #[command(flatten)]
    pub input: TextArgs,

    /// Have Gemini compose the request body instead of the rule-based extractor
    #[arg(long)]
    pub ai: bool,
}

/// Arguments for the submit command.
#[derive(Debug, Parser)]
pub struct SubmitArgs {
    /// JSON file with the complete request body
    #[arg(required_unless_present = "skip_update")]
    pub file: Option<PathBuf>,

    /// Update this existing draft instead of creating one
    #[arg(long, requires = "version")]
    pub workflow_id: Option<String>,

    /// Version of the existing draft
    #[arg(long, requires = "workflow_id")]
    pub version: Option<String>,

    /// Create and approve without an update (template defaults)
    #[arg(long, conflicts_with_all = ["file", "workflow_id"])]
    pub skip_update: bool,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Use {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Gateway base URL
        #[arg(short, long)]
        url: Option<String>,
        /// Workflow template id
        #[arg(short, long)]
        template_id: Option<String>,
        /// Workflow template version
        #[arg(long)]
        template_version: Option<String>,
        /// Gemini model for --ai
        #[arg(long)]
        gemini_model: Option<String>,
        /// Domain for placeholder e-mail addresses
        #[arg(long)]
        email_domain: Option<String>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
