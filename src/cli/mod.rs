//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the dome9 binary.

use clap::{Args, Parser, Subcommand};

use crate::models::{OperationMode, TrustDirection};

/// Dome9 API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "dome9", about = "Dome9 API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log HTTP activity to stderr.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(flatten)]
    pub auth: AuthArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Credentials and endpoint, normally taken from the environment.
#[derive(Args, Debug, Clone)]
pub struct AuthArgs {
    /// API key id.
    #[arg(long, env = "DOME9_ACCESS_ID", hide_env_values = true, global = true)]
    pub access_id: Option<String>,

    /// API key secret.
    #[arg(long, env = "DOME9_SECRET_KEY", hide_env_values = true, global = true)]
    pub secret_key: Option<String>,

    /// Override the API base URL.
    #[arg(long, env = "DOME9_BASE_URL", global = true)]
    pub base_url: Option<String>,
}

/// Resource groups.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Trust relationships between Dome9 accounts.
    #[command(subcommand)]
    #[command(alias = "trust")]
    Trusts(TrustCommand),

    /// Onboarded Azure subscriptions.
    #[command(subcommand)]
    Azure(AzureCommand),

    /// Stored compliance assessment results.
    #[command(subcommand)]
    History(HistoryCommand),
}

/// Account trust actions.
#[derive(Subcommand, Debug)]
pub enum TrustCommand {
    /// List roles this account may assume elsewhere.
    Roles,

    /// List trusts.
    List {
        /// `target` (accounts we trust) or `source` (accounts trusting us).
        #[arg(long, default_value = "target")]
        direction: TrustDirection,
    },

    /// Delete a trust.
    Delete {
        /// Trust id.
        id: String,
    },
}

/// Azure account actions.
#[derive(Subcommand, Debug)]
pub enum AzureCommand {
    /// List onboarded accounts.
    List,

    /// Remove an account from Dome9.
    Delete {
        /// Dome9 account id.
        id: String,
    },

    /// Show permissions Dome9 is missing.
    MissingPermissions {
        /// Dome9 account id.
        id: String,

        /// Restrict to one entity type (requires --sub-type).
        #[arg(long, requires = "sub_type")]
        entity_type: Option<String>,

        /// Entity sub type.
        #[arg(long, requires = "entity_type")]
        sub_type: Option<String>,
    },

    /// Ask Dome9 to re-validate missing permissions.
    ResetPermissions {
        /// Dome9 account id.
        id: String,
    },

    /// Rename an account inside Dome9.
    Rename {
        /// Dome9 account id.
        id: String,

        /// New display name.
        name: String,
    },

    /// Change the operation mode.
    Mode {
        /// Dome9 account id.
        id: String,

        /// `read` or `manage`.
        mode: OperationMode,
    },
}

/// Assessment history actions.
#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// Show a stored assessment result.
    Get {
        /// History id.
        id: i64,
    },

    /// Delete a stored assessment result.
    Delete {
        /// History id.
        id: i64,
    },
}
