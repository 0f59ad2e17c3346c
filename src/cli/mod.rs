//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the huntress binary.

use clap::{Parser, Subcommand, ValueEnum};

/// Huntress API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "huntress", about = "Huntress API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Give up on a command after this many seconds.
    #[arg(long, global = true, env = "HUNTRESS_TIMEOUT")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the account the credentials belong to.
    Account,

    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// The numeric entity ID.
        id: u64,
    },

    /// List entities with optional filtering and pagination.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Page number (1-indexed).
        #[arg(long)]
        page: Option<u32>,

        /// Number of items per page.
        #[arg(long)]
        limit: Option<u32>,

        /// Only entities belonging to this organization.
        #[arg(long)]
        organization: Option<u64>,
    },
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A customer organization.
    #[value(alias = "organizations", alias = "org", alias = "orgs")]
    Organization,
    /// An endpoint agent.
    #[value(alias = "agents")]
    Agent,
    /// An incident report.
    #[value(alias = "incidents", alias = "incident-report", alias = "incident-reports")]
    Incident,
    /// A summary report.
    #[value(alias = "reports")]
    Report,
    /// A billing report.
    #[value(alias = "billing", alias = "billing-reports")]
    BillingReport,
}
