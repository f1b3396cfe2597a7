//! Report formatting and the `-t` recency filter.
//!
//! ```text
//! Username         Port     From             Latest
//! root             tty1                      Tue Nov 14 22:13:20 +0000 2023
//! daemon                                     **Never logged in**
//! ```

use chrono::TimeZone;
use record::LogRecord;
use std::fmt::Display;
use std::io::{Read, Seek, Write};
use store::PagedStore;
use tracing::debug;

use crate::accounts::Account;

pub const TIME_FORMAT: &str = "%a %b %e %H:%M:%S %z %Y";
pub const NEVER_LOGGED_IN: &str = "**Never logged in**";

const SECONDS_IN_DAY: i64 = 86_400;

/// Looks up the record for `uid`. A failed seek is "no entry", not an error.
pub fn lookup<R: Read + Seek>(store: &mut PagedStore<R>, uid: u32) -> Option<LogRecord> {
    match store.seek(u64::from(uid)) {
        Ok(()) => store.read_next(),
        Err(e) => {
            debug!(uid, error = %e, "no entry");
            None
        }
    }
}

/// Writes report rows, printing the header once before the first row.
pub struct Report<W, Tz> {
    out: W,
    tz: Tz,
    now: i64,
    days: Option<i64>,
    header_done: bool,
}

impl<W, Tz> Report<W, Tz>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// `days` is the `-t` window, measured back from `now` (epoch seconds).
    pub fn new(out: W, tz: Tz, now: i64, days: Option<i64>) -> Self {
        Self {
            out,
            tz,
            now,
            days,
            header_done: false,
        }
    }

    /// `true` if `entry` passes the `-t` filter. A missing entry counts as a
    /// login at time zero.
    pub fn wants(&self, entry: Option<&LogRecord>) -> bool {
        match self.days {
            None => true,
            Some(days) => {
                let login = entry.map_or(0, LogRecord::timestamp);
                self.now.saturating_sub(login) <= days.saturating_mul(SECONDS_IN_DAY)
            }
        }
    }

    /// Prints one row for `account` unless the filter rejects it. Returns
    /// whether a row was printed.
    pub fn row(&mut self, account: &Account, entry: Option<&LogRecord>) -> std::io::Result<bool> {
        if !self.wants(entry) {
            return Ok(false);
        }

        if !self.header_done {
            writeln!(self.out, "{:<16.16} {:<8.8} {:<16.16} Latest", "Username", "Port", "From")?;
            self.header_done = true;
        }

        let (line, host) = entry.map_or(("", ""), |r| (r.terminal(), r.remote_host()));
        write!(self.out, "{:<16.16} {:<8.8} {:<16.16} ", account.name, line, host)?;

        let latest = match entry.and_then(LogRecord::last_login) {
            Some(ts) => self.format_time(ts),
            None => NEVER_LOGGED_IN.to_string(),
        };
        writeln!(self.out, "{}", latest)?;
        Ok(true)
    }

    pub fn format_time(&self, ts: i64) -> String {
        match self.tz.timestamp_opt(ts, 0).earliest() {
            Some(dt) => dt.format(TIME_FORMAT).to_string(),
            None => ts.to_string(),
        }
    }

    /// Flushes and returns the writer.
    pub fn finish(mut self) -> std::io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
