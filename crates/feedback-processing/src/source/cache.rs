//! Caller-owned cache of fetched raw tables.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use polars::prelude::DataFrame;
use tracing::{debug, info};

use super::RawTableSource;
use crate::error::{Result, ResultExt};

/// A fetched table and the moment it was fetched.
#[derive(Debug, Clone)]
pub struct CachedTable {
    pub table: DataFrame,
    pub fetched_at: DateTime<Utc>,
}

/// Memoizes raw tables per source identifier.
///
/// Entries never expire unless a TTL is set. Callers receive a clone of the
/// cached frame (polars columns are reference counted), so every pipeline run
/// works on its own copy.
#[derive(Debug, Default)]
pub struct TableCache {
    entries: HashMap<String, CachedTable>,
    ttl: Option<TimeDelta>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache whose entries are refetched once older than `ttl`.
    pub fn with_ttl(ttl: TimeDelta) -> Self {
        Self {
            entries: HashMap::new(),
            ttl: Some(ttl),
        }
    }

    /// Return the cached table for `source`, fetching it when absent or stale.
    pub fn get_or_fetch(&mut self, source: &dyn RawTableSource) -> Result<DataFrame> {
        self.get_or_fetch_at(source, Utc::now())
    }

    /// Same as [`get_or_fetch`](Self::get_or_fetch) with an explicit clock.
    pub fn get_or_fetch_at(
        &mut self,
        source: &dyn RawTableSource,
        now: DateTime<Utc>,
    ) -> Result<DataFrame> {
        let id = source.id();

        if let Some(entry) = self.entries.get(id)
            && self.is_fresh(entry, now)
        {
            debug!("Using cached table for '{}' (fetched {})", id, entry.fetched_at);
            return Ok(entry.table.clone());
        }

        info!("Fetching raw table from '{}'", id);
        let table = source
            .fetch()
            .context(format!("Fetching raw table from '{}'", id))?;

        self.entries.insert(
            id.to_string(),
            CachedTable {
                table: table.clone(),
                fetched_at: now,
            },
        );
        Ok(table)
    }

    /// When the table for `source_id` was fetched, if cached.
    pub fn fetched_at(&self, source_id: &str) -> Option<DateTime<Utc>> {
        self.entries.get(source_id).map(|entry| entry.fetched_at)
    }

    /// Drop the cached table for `source_id`. Returns whether one was cached.
    pub fn invalidate(&mut self, source_id: &str) -> bool {
        self.entries.remove(source_id).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_fresh(&self, entry: &CachedTable, now: DateTime<Utc>) -> bool {
        match self.ttl {
            Some(ttl) => now - entry.fetched_at < ttl,
            None => true,
        }
    }
}
