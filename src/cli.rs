use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ioc-fusion", version, about = "Fuse threat-intel provider verdicts into one IOC verdict")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score a provider result set (JSON file, or `-` for stdin)
    Score {
        input: PathBuf,
        /// Scoring rules file (defaults to $IOC_FUSION_RULES, then built-in rules)
        #[arg(long)]
        rules: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        pretty: bool,
        /// Record the verdict in the history database
        #[arg(long = "log", default_value_t = false, requires_all = ["owner_type", "owner_id", "ioc_type", "ioc_value"])]
        record: bool,
        #[arg(long)]
        owner_type: Option<String>,
        #[arg(long)]
        owner_id: Option<String>,
        #[arg(long)]
        ioc_type: Option<String>,
        #[arg(long)]
        ioc_value: Option<String>,
        #[arg(long)]
        history_db: Option<PathBuf>,
    },
    /// Show recent verdict history for an owner
    History {
        #[arg(long)]
        owner_type: String,
        #[arg(long)]
        owner_id: String,
        #[arg(long, default_value_t = 20)]
        limit: usize,
        #[arg(long)]
        history_db: Option<PathBuf>,
    },
    /// Print the effective scoring rules
    Rules {
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}
