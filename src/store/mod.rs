//! SQLite-backed record store.
//!
//! [`ChatStore`] holds one transcript's records in a single `messages` table
//! and answers the aggregate questions asked about a chat: who talks most,
//! when, how much media, which days were quiet.
//!
//! # Lifecycle
//!
//! 1. Open a store ([`ChatStore::in_memory`] or [`ChatStore::open`])
//! 2. [`load`](ChatStore::load) the parsed records exactly once
//! 3. Run any number of queries
//! 4. [`close`](ChatStore::close) it, or just drop it
//!
//! Queries before `load` fail with [`StoreError::NotLoaded`]; a second `load`
//! fails with [`StoreError::AlreadyLoaded`].
//!
//! # Example
//!
//! ```rust
//! use chatstat::parser::Parser;
//! use chatstat::parsers::WhatsAppParser;
//! use chatstat::store::ChatStore;
//!
//! # fn main() -> chatstat::Result<()> {
//! let records = WhatsAppParser::new().parse_str(
//!     "12/1/23, 10:00 AM - Alice: Hello there\n12/1/23, 10:01 AM - Bob: Hi",
//! )?;
//!
//! let mut store = ChatStore::in_memory()?;
//! store.load(&records)?;
//!
//! assert_eq!(store.total_records()?, 2);
//! assert_eq!(store.peak_hour()?.map(|h| h.hour), Some(10));
//! store.close()?;
//! # Ok(())
//! # }
//! ```

pub mod models;
mod queries;
mod schema;

use std::path::{Path, PathBuf};

use chrono::{Datelike, Timelike};
use rusqlite::{Connection, params};
use tracing::{debug, info};

use crate::Record;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};

pub use models::{
    Contribution, DateCount, DateRange, HourCount, KindShare, MonthCount, UserCount,
    UserHourCount, WeekdayCount, weekday_name,
};

/// Queryable store of one transcript's records.
///
/// The connection is owned exclusively; dropping the store closes it.
pub struct ChatStore {
    conn: Connection,
    path: Option<PathBuf>,
    loaded: bool,
}

impl ChatStore {
    /// Opens a private in-memory store.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn, None)
    }

    /// Opens or creates a store file.
    ///
    /// Existing rows stay on disk until [`load`](Self::load) replaces them.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        Self::init(conn, Some(path.to_path_buf()))
    }

    /// Opens the store described by `config`.
    pub fn with_config(config: &StoreConfig) -> Result<Self> {
        match &config.database {
            Some(path) => Self::open(path),
            None => Self::in_memory(),
        }
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch(schema::CREATE)?;
        debug!(path = ?path, "store schema ready");
        Ok(Self {
            conn,
            path,
            loaded: false,
        })
    }

    /// Returns the backing file, or `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns `true` once [`load`](Self::load) has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Bulk-inserts `records` in source order, inside one transaction.
    ///
    /// Rows left in a store file by an earlier session are replaced.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyLoaded`] on a second call; the first
    /// load is left untouched.
    pub fn load(&mut self, records: &[Record]) -> Result<()> {
        if self.loaded {
            return Err(StoreError::AlreadyLoaded.into());
        }

        let tx = self.conn.transaction()?;
        let cleared = tx.execute(schema::CLEAR, [])?;
        if cleared > 0 {
            debug!(rows = cleared, "replaced rows from a previous session");
        }

        {
            let mut stmt = tx.prepare(schema::INSERT)?;
            for (seq, record) in records.iter().enumerate() {
                let ts = record.timestamp.naive_utc();
                let weekday = ts.weekday();
                stmt.execute(params![
                    seq as i64,
                    ts.format(schema::TIMESTAMP_FORMAT).to_string(),
                    record.sender,
                    record.body,
                    record.kind,
                    record.length() as i64,
                    ts.date().format(schema::DATE_FORMAT).to_string(),
                    ts.hour(),
                    weekday.num_days_from_monday(),
                    weekday_name(weekday),
                    ts.year(),
                    ts.month(),
                ])?;
            }
        }

        tx.commit()?;
        self.loaded = true;
        info!(records = records.len(), "loaded records into store");
        Ok(())
    }

    /// Closes the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| err)?;
        Ok(())
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.loaded {
            Ok(())
        } else {
            Err(StoreError::NotLoaded.into())
        }
    }
}
