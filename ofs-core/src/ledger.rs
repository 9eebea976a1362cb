use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use dashmap::DashMap;
use ofs_types::{
    DailyStats, GameId, LedgerEntry, LineId, PlayedGame, ReferenceLine, ResolvedLine, UserId,
};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{DailyAggregator, DayWindow, DeviationMatcher, LedgerError};

/// Most games accepted in a single submission.
pub const MAX_BATCH_SIZE: usize = 70;

/// Storage the ledger runs against. Implementations must make
/// [`LedgerStore::commit_day`] all-or-nothing.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Every cached entry for the user, whatever day it belongs to.
    async fn load_entries(&self, user_id: &str) -> anyhow::Result<Vec<LedgerEntry>>;

    /// All reference lines across all of the user's playlists.
    async fn load_corpus(&self, user_id: &str) -> anyhow::Result<Vec<ReferenceLine>>;

    /// Delete `stale` and insert `processed` in one transaction.
    async fn commit_day(
        &self,
        user_id: &str,
        stale: &[GameId],
        processed: &[LedgerEntry],
    ) -> anyhow::Result<()>;

    async fn resolve_lines(&self, line_ids: &[LineId]) -> anyhow::Result<Vec<ResolvedLine>>;
}

/// Validate a raw `query` payload and decode its games.
pub fn parse_submission(query: &serde_json::Value) -> Result<Vec<PlayedGame>, LedgerError> {
    let items = query
        .as_array()
        .ok_or_else(|| LedgerError::Validation("query must be a list of games".to_string()))?;

    check_batch_size(items.len())?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            PlayedGame::deserialize(item)
                .map_err(|e| LedgerError::Validation(format!("game #{index} is malformed: {e}")))
        })
        .collect()
}

fn check_batch_size(len: usize) -> Result<(), LedgerError> {
    if len > MAX_BATCH_SIZE {
        return Err(LedgerError::Validation(format!(
            "{len} games submitted, at most {MAX_BATCH_SIZE} allowed"
        )));
    }
    Ok(())
}

/// Per-user, per-day cache of scored games.
pub struct DailyLedger {
    store: Arc<dyn LedgerStore>,
    user_locks: DashMap<UserId, Arc<Mutex<()>>>,
}

impl DailyLedger {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self {
            store,
            user_locks: DashMap::new(),
        }
    }

    /// Score today's unseen games, evict entries from previous days and
    /// return everything cached for today.
    pub async fn reconcile(
        &self,
        user_id: &str,
        incoming: Vec<PlayedGame>,
    ) -> Result<DailyStats, LedgerError> {
        self.reconcile_within(user_id, incoming, DayWindow::today())
            .await
    }

    /// Same as [`DailyLedger::reconcile`] with an explicit day boundary.
    pub async fn reconcile_within(
        &self,
        user_id: &str,
        incoming: Vec<PlayedGame>,
        today: DayWindow,
    ) -> Result<DailyStats, LedgerError> {
        check_batch_size(incoming.len())?;

        let lock = self.user_lock(user_id);
        let _guard = lock.mutex.lock().await;
        self.reconcile_locked(user_id, incoming, today).await
    }

    async fn reconcile_locked(
        &self,
        user_id: &str,
        incoming: Vec<PlayedGame>,
        today: DayWindow,
    ) -> Result<DailyStats, LedgerError> {
        let existing = self
            .store
            .load_entries(user_id)
            .await
            .context("failed to load ledger entries")?;

        let mut seen: HashSet<GameId> = existing.iter().map(|e| e.game.id.clone()).collect();

        let (fresh, stale): (Vec<LedgerEntry>, Vec<LedgerEntry>) = existing
            .into_iter()
            .partition(|entry| today.contains(entry.game.created_at));

        // Games already in the ledger are never recomputed, whatever their day.
        // `insert` also collapses repeated ids within the batch.
        let submitted = incoming.len();
        let new_games: Vec<PlayedGame> = incoming
            .into_iter()
            .filter(|game| seen.insert(game.id.clone()))
            .collect();

        let corpus = self
            .store
            .load_corpus(user_id)
            .await
            .context("failed to load reference lines")?;

        debug!(
            user_id,
            submitted,
            new_games = new_games.len(),
            corpus = corpus.len(),
            "matching new games"
        );

        let processed: Vec<LedgerEntry> = new_games
            .into_iter()
            .map(|game| DeviationMatcher::process(game, &corpus))
            .collect();

        let stale_ids: Vec<GameId> = stale.iter().map(|entry| entry.game.id.clone()).collect();

        if !stale_ids.is_empty() || !processed.is_empty() {
            self.store
                .commit_day(user_id, &stale_ids, &processed)
                .await
                .context("failed to commit daily ledger")?;
        }

        info!(
            user_id,
            fresh = fresh.len(),
            processed = processed.len(),
            evicted = stale_ids.len(),
            "reconciled daily ledger"
        );

        let mut pages = fresh;
        pages.extend(processed);
        // Same order the store reads back in
        pages.sort_by(|a, b| {
            a.game
                .created_at
                .cmp(&b.game.created_at)
                .then_with(|| a.game.id.cmp(&b.game.id))
        });

        let lines = self.resolve_referenced_lines(&pages).await?;
        let summary = DailyAggregator::summarize(&pages);

        Ok(DailyStats {
            pages,
            lines,
            summary,
        })
    }

    async fn resolve_referenced_lines(
        &self,
        pages: &[LedgerEntry],
    ) -> Result<Vec<ResolvedLine>, LedgerError> {
        let mut line_ids: Vec<LineId> = Vec::new();
        for id in pages.iter().filter_map(|e| e.outcome.best_match_line_id.as_ref()) {
            if !line_ids.contains(id) {
                line_ids.push(id.clone());
            }
        }

        if line_ids.is_empty() {
            return Ok(Vec::new());
        }

        let lines = self
            .store
            .resolve_lines(&line_ids)
            .await
            .context("failed to resolve matched lines")?;

        Ok(lines)
    }

    fn user_lock<'a>(&'a self, user_id: &'a str) -> UserLock<'a> {
        let mutex = self
            .user_locks
            .entry(user_id.to_string())
            .or_default()
            .clone();

        UserLock {
            locks: &self.user_locks,
            user_id,
            mutex,
        }
    }
}

/// A handle on one user's reconcile lock. Dropping it forgets the lock once
/// no other call holds or waits on it, including when the call is cancelled.
struct UserLock<'a> {
    locks: &'a DashMap<UserId, Arc<Mutex<()>>>,
    user_id: &'a str,
    mutex: Arc<Mutex<()>>,
}

impl Drop for UserLock<'_> {
    fn drop(&mut self) {
        // Two references left: the map's and ours.
        self.locks
            .remove_if(self.user_id, |_, lock| Arc::strong_count(lock) == 2);
    }
}
