//! Bulk user settings operator CLI.
//!
//! Drives a settings session against a JSON store fixture: inspect how the
//! selected users' settings agree, or apply one edit to all of them.
//!
//! # Usage
//!
//! ```bash
//! # Browse the user directory
//! bulk-settings --fixture store.json users --filter contoso --business-unit Sales
//!
//! # Effective values and per-user breakdowns
//! bulk-settings --fixture store.json show --user Alice --user Bob
//!
//! # Preview the partial updates
//! bulk-settings --fixture store.json set --user Alice --user Bob \
//!     --field paginglimit=50 --field homepagearea=null --dry-run
//!
//! # Edit every user of a business unit
//! bulk-settings --fixture store.json set --business-unit Sales --field showweeknumber=true
//! ```

// CLI tools are expected to print to stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod fixture;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use bulk_user_settings::domain::batch::build_requests;
use bulk_user_settings::infra::notify::{CollectingNotifier, TracingNotifier};
use bulk_user_settings::{BulkSettingsConfig, SettingsSession};
use bulk_user_settings_sdk::{SettingValue, SettingsField, UserRecord};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::fixture::{StoreFixture, directory_filter, select_users};

/// Bulk user settings editor
#[derive(Parser, Debug)]
#[command(name = "bulk-settings")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON store fixture with users, settings rows and lookup labels
    #[arg(long, value_name = "FILE")]
    fixture: PathBuf,

    /// YAML configuration file (BULK_SETTINGS_* variables override it)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Directory search narrowing the users that can be selected
#[derive(Args, Debug)]
struct DirectoryArgs {
    /// Case-insensitive search over name, email and business unit
    #[arg(long)]
    filter: Option<String>,

    /// Business unit id or name
    #[arg(long)]
    business_unit: Option<String>,
}

/// Which users to edit: named users, every filtered user, or both combined
#[derive(Args, Debug)]
struct SelectArgs {
    /// User id or display name (repeatable)
    #[arg(long = "user", short = 'u')]
    users: Vec<String>,

    #[command(flatten)]
    directory: DirectoryArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the user directory, optionally filtered
    Users {
        #[command(flatten)]
        directory: DirectoryArgs,
    },
    /// Show the effective value of every field for the selection
    Show {
        #[command(flatten)]
        select: SelectArgs,
    },
    /// Apply field edits to every selected user and save them
    Set {
        #[command(flatten)]
        select: SelectArgs,

        /// Edit as `<field>=<value>`; an empty value means no change, `null` clears
        #[arg(long = "field", short = 'f', required = true, value_parser = parse_edit)]
        edits: Vec<(SettingsField, SettingValue)>,

        /// Print the per-user payloads instead of saving
        #[arg(long)]
        dry_run: bool,
    },
}

fn parse_edit(arg: &str) -> Result<(SettingsField, SettingValue), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected <field>=<value>, got '{arg}'"))?;
    let field: SettingsField = name.trim().parse().map_err(|e| format!("{e}"))?;
    let value = field.parse_value(value).map_err(|e| format!("{e}"))?;
    Ok((field, value))
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = BulkSettingsConfig::load(cli.config.as_deref())?;
    let (store, directory, catalog) = StoreFixture::load(&cli.fixture)?.into_store();
    let store = Arc::new(store);
    info!(
        fixture = %cli.fixture.display(),
        users = directory.users().len(),
        business_units = directory.business_units().len(),
        "Fixture loaded"
    );

    let select = |args: &SelectArgs| -> anyhow::Result<Vec<UserRecord>> {
        let filter = directory_filter(
            &directory,
            args.directory.filter.as_deref(),
            args.directory.business_unit.as_deref(),
        )?;
        select_users(&directory, &filter, &args.users)
    };

    match cli.command {
        Commands::Users { directory: args } => {
            let filter = directory_filter(
                &directory,
                args.filter.as_deref(),
                args.business_unit.as_deref(),
            )?;
            output::print_directory(&directory.filter(&filter));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Show { select: args } => {
            let selection = select(&args)?;
            let session = SettingsSession::new(store, Arc::new(TracingNotifier), config);
            session.select(selection).await;
            output::print_selection(&session, &catalog);
            Ok(if session.loaded().is_empty() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Commands::Set {
            select: args,
            edits,
            dry_run,
        } => {
            let selection = select(&args)?;
            let notifier = Arc::new(CollectingNotifier::new());
            let session = SettingsSession::new(store, notifier.clone(), config);
            session.select(selection).await;
            output::print_excluded(&session);

            for (field, value) in &edits {
                session.set_field(*field, value);
            }

            if dry_run {
                let requests = build_requests(&session.pending())
                    .context("pending edits cannot be written")?;
                output::print_requests(&requests)?;
                return Ok(ExitCode::SUCCESS);
            }

            let report = session.save(Some(&output::print_progress)).await;
            output::print_notifications(&notifier.drain());

            let report = report?;
            output::print_outcome(&report);
            Ok(if report.outcome.failures.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
