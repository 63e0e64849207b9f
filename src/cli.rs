//! CLI command definitions and subcommands

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::{Priority, TaskStatus};

/// Choreboard - household task board
#[derive(Parser)]
#[command(
    name = "cb",
    about = "Household task board with template-driven routines",
    version,
    after_help = "Logs are written under the configured data directory."
)]
pub struct Cli {
    /// Path to config file (long-only: -c belongs to --category on task subcommands)
    #[arg(long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Username to act as (defaults to defaults.user from the config)
    #[arg(long = "as", global = true, value_name = "USERNAME")]
    pub acting_user: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the store and seed builtin categories and templates
    Init,

    /// Manage tasks
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },

    /// Browse and instantiate templates
    Template {
        #[command(subcommand)]
        command: TemplateCommand,
    },

    /// Manage household members
    User {
        #[command(subcommand)]
        command: UserCommand,
    },

    /// List categories
    Categories {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show task statistics
    Stats {
        /// Limit to tasks this user created or is assigned to
        #[arg(short, long, value_name = "USERNAME")]
        user: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Task subcommands
#[derive(Subcommand)]
pub enum TaskCommand {
    /// Add a new task
    Add {
        /// Task title
        title: String,

        /// Category name
        #[arg(short, long, default_value = "Other")]
        category: String,

        /// Priority (LOW, MEDIUM, HIGH, URGENT)
        #[arg(short, long, default_value = "MEDIUM")]
        priority: Priority,

        /// Reward points
        #[arg(long)]
        points: Option<u32>,

        /// Longer description
        #[arg(short, long)]
        description: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,

        /// Username to assign the task to
        #[arg(short, long, value_name = "USERNAME")]
        assign: Option<String>,

        /// Recurrence pattern (stored only, e.g. "weekly")
        #[arg(long, value_name = "PATTERN")]
        recurring: Option<String>,
    },

    /// List tasks
    List {
        /// Filter by status
        #[arg(short, long)]
        status: Option<TaskStatus>,

        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Filter by priority
        #[arg(short, long)]
        priority: Option<Priority>,

        /// Filter by assignee username
        #[arg(short, long, value_name = "USERNAME")]
        assign: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show one task
    Show {
        /// Task id
        id: String,
    },

    /// Edit a task's fields; only the given flags change
    Edit {
        /// Task id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New category
        #[arg(short, long)]
        category: Option<String>,

        /// New priority (LOW, MEDIUM, HIGH, URGENT)
        #[arg(short, long)]
        priority: Option<Priority>,

        /// New reward points
        #[arg(long)]
        points: Option<u32>,

        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,

        /// Reassign to a username
        #[arg(short, long, value_name = "USERNAME")]
        assign: Option<String>,
    },

    /// Mark a task in progress
    Start {
        /// Task id
        id: String,
    },

    /// Mark a task completed
    Complete {
        /// Task id
        id: String,
    },

    /// Cancel a task
    Cancel {
        /// Task id
        id: String,
    },

    /// Delete a task
    Remove {
        /// Task id
        id: String,
    },
}

/// Template subcommands
#[derive(Subcommand)]
pub enum TemplateCommand {
    /// List templates
    List {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a template and its steps
    Show {
        /// Template id
        id: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Instantiate a template into concrete tasks
    Use {
        /// Template id
        id: String,

        /// Username to assign every created task to
        #[arg(short, long, value_name = "USERNAME")]
        assign: Option<String>,

        /// Date the first step lands on (YYYY-MM-DD); omit for no due dates
        #[arg(short, long, value_name = "DATE")]
        start_date: Option<NaiveDate>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommand {
    /// Add a household member
    Add {
        /// Unique login name
        username: String,

        /// Name shown in listings
        #[arg(short, long)]
        display_name: Option<String>,

        /// Give the member the admin role
        #[arg(long)]
        admin: bool,
    },

    /// List household members
    List {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Output format for listing commands
#[derive(Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
