//! IOC Fusion - Main Entry Point

mod cli;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use ioc_fusion::constants;
use ioc_fusion::logic::history::{HistoryLogger, HistoryOwner, HistoryRecord, SqliteHistoryLogger};
use ioc_fusion::logic::scoring::{self, rules, ScoringEngine, ScoringInput};

use cli::{Args, Command};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let args = Args::parse();
    log::debug!("ioc-fusion v{}", constants::APP_VERSION);

    match args.command {
        Command::Score {
            input,
            rules: rules_path,
            pretty,
            record,
            owner_type,
            owner_id,
            ioc_type,
            ioc_value,
            history_db,
        } => {
            rules::init(rules_path.as_deref())?;
            let input = read_input(&input)?;
            let result = scoring::score(&input);

            // The verdict stands even if recording it fails below
            print_json(&result, pretty)?;

            if record {
                let owner = HistoryOwner::new(
                    owner_type.as_deref().unwrap_or_default(),
                    owner_id.as_deref().unwrap_or_default(),
                );
                let record = HistoryRecord::from_result(
                    owner,
                    ioc_type.as_deref().unwrap_or_default(),
                    ioc_value.as_deref().unwrap_or_default(),
                    &result,
                );

                let logger = open_history(history_db)?;
                logger.record(&record).context("failed to record IOC history")?;
            }
        }
        Command::History {
            owner_type,
            owner_id,
            limit,
            history_db,
        } => {
            let logger = open_history(history_db)?;
            let entries = logger.recent_for_owner(&HistoryOwner::new(&owner_type, &owner_id), limit)?;
            log::info!(
                "Showing {} entries for {}:{} ({} rows stored)",
                entries.len(),
                owner_type,
                owner_id,
                logger.count()?
            );
            print_json(&entries, true)?;
        }
        Command::Rules { rules: rules_path } => {
            rules::init(rules_path.as_deref())?;
            let engine = ScoringEngine::from_current_rules();
            print_json(engine.rules(), true)?;
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<ScoringInput> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read scoring input from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scoring input {:?}", path))?
    };

    serde_json::from_str(&content).context("scoring input is not a valid provider result set")
}

fn open_history(path: Option<PathBuf>) -> Result<SqliteHistoryLogger> {
    let path = path.unwrap_or_else(constants::get_history_db_path);
    SqliteHistoryLogger::open(&path)
        .with_context(|| format!("failed to open history database {:?}", path))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
