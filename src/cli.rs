use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sprint-relay",
    about = "Route AI-drafted updates to team tools and forecast sprint health",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, env = "SPRINT_RELAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default configuration file
    Init {
        /// Where to write the configuration file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Route a generated content block to Jira, Slack, or Notion
    Dispatch {
        /// Read the content block from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Classify and extract fields without invoking any backend
        #[arg(long)]
        dry_run: bool,
    },

    /// Compute a velocity forecast for the active sprint
    Forecast {
        /// Post the forecast to the configured Slack channel
        #[arg(long)]
        notify: bool,

        /// Post even outside the end-of-sprint notification window
        #[arg(long)]
        force: bool,
    },

    /// Send checkpoint-day status reminders for the active sprint
    Remind {
        /// Send even when today is not the checkpoint day
        #[arg(long)]
        force: bool,
    },
}
