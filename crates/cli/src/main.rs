//! # alastlog - report the most recent login of each account
//!
//! Reads the binary lastlog file through the paged [`store`] and prints one
//! row per account from the passwd database, in passwd order.
//!
//! ## Usage
//!
//! ```text
//! alastlog [-u LOGIN] [-t DAYS] [-f FILE] [-v]
//!
//!   -u LOGIN   only this account (user name or numeric UID)
//!   -t DAYS    only logins within the last DAYS days
//!   -f FILE    read FILE instead of the configured lastlog
//!   -v         log store activity to stderr
//! ```
//!
//! ## Configuration
//!
//! See the `config` crate: `LASTLOG_PATH`, `LASTLOG_PASSWD`,
//! `LASTLOG_PAGE_RECORDS`, `LASTLOG_TIME_BYTES`, `LASTLOG_LINE_SIZE`,
//! `LASTLOG_HOST_SIZE`. `RUST_LOG` overrides the log filter.
//!
//! ## Exit status
//!
//! `0` on success, `1` if the log or account database cannot be read, the
//! `-u` account does not exist, or closing the log fails; `2` for usage
//! errors.

mod accounts;
mod args;
mod report;

use anyhow::{Context, Result};
use args::Cli;
use chrono::Local;
use clap::Parser;
use config::Config;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use store::PagedStore;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::report::{lookup, Report};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut cfg = Config::from_env().context("bad configuration")?;
    if let Some(file) = cli.file {
        cfg.log_path = file;
    }
    debug!(?cfg, "configuration");

    let all = accounts::load(&cfg.passwd_path)?;
    let selected = match cli.user.as_deref() {
        Some(login) => vec![accounts::resolve(&all, login)?.clone()],
        None => all,
    };

    let mut store = PagedStore::open(&cfg.log_path, cfg.layout, cfg.page_records)?;

    let now = chrono::Utc::now().timestamp();
    let stdout = io::stdout();
    let mut report = Report::new(BufWriter::new(stdout.lock()), Local, now, cli.days);

    for account in &selected {
        let entry = lookup(&mut store, account.uid);
        report.row(account, entry.as_ref()).context("failed to write report")?;
    }
    report.finish().context("failed to write report")?;

    debug!(stats = ?store.stats(), "scan complete");
    store.close().context("failed to close lastlog")?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("alastlog: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
