#![allow(dead_code)]

use anyhow::anyhow;
use async_trait::async_trait;
use ofs_core::{DayWindow, LedgerStore};
use ofs_types::{
    Color, GameId, LedgerEntry, LineId, PlayedGame, ReferenceLine, ResolvedLine, TimeControl,
    UserId,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;
/// 2024-03-10T00:00:00Z
pub const TODAY_START: i64 = 1_710_028_800_000;

pub fn today() -> DayWindow {
    DayWindow {
        start_ms: TODAY_START,
        end_ms: TODAY_START + DAY_MS,
    }
}

/// In-memory ledger store that counts calls and can be told to fail commits
#[derive(Default)]
pub struct MemoryLedgerStore {
    entries: Mutex<HashMap<UserId, Vec<LedgerEntry>>>,
    lines: Mutex<Vec<(UserId, ResolvedLine)>>,
    reads: AtomicUsize,
    commits: AtomicUsize,
    fail_commits: AtomicBool,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_line(&self, user_id: &str, line: ReferenceLine) {
        let resolved = ResolvedLine {
            playlist_name: format!("playlist {}", line.playlist_id),
            line,
        };
        self.lines
            .lock()
            .unwrap()
            .push((user_id.to_string(), resolved));
    }

    pub fn seed_entry(&self, user_id: &str, entry: LedgerEntry) {
        self.entries
            .lock()
            .unwrap()
            .entry(user_id.to_string())
            .or_default()
            .push(entry);
    }

    pub fn stored(&self, user_id: &str) -> Vec<LedgerEntry> {
        self.entries
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn set_fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn load_entries(&self, user_id: &str) -> anyhow::Result<Vec<LedgerEntry>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        // Give other tasks a turn, like a real database round trip would.
        tokio::task::yield_now().await;
        Ok(self.stored(user_id))
    }

    async fn load_corpus(&self, user_id: &str) -> anyhow::Result<Vec<ReferenceLine>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| owner == user_id)
            .map(|(_, resolved)| resolved.line.clone())
            .collect())
    }

    async fn commit_day(
        &self,
        user_id: &str,
        stale: &[GameId],
        processed: &[LedgerEntry],
    ) -> anyhow::Result<()> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(anyhow!("disk I/O error"));
        }

        let mut entries = self.entries.lock().unwrap();
        let rows = entries.entry(user_id.to_string()).or_default();

        let mut next: Vec<LedgerEntry> = rows
            .iter()
            .filter(|row| !stale.contains(&row.game.id))
            .cloned()
            .collect();
        for entry in processed {
            if next.iter().any(|row| row.game.id == entry.game.id) {
                return Err(anyhow!("UNIQUE constraint failed: {}", entry.game.id));
            }
            next.push(entry.clone());
        }

        *rows = next;
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn resolve_lines(&self, line_ids: &[LineId]) -> anyhow::Result<Vec<ResolvedLine>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, resolved)| line_ids.contains(&resolved.line.id))
            .map(|(_, resolved)| resolved.clone())
            .collect())
    }
}

pub fn create_line(id: &str, moves: &str) -> ReferenceLine {
    ReferenceLine {
        id: id.to_string(),
        playlist_id: "playlist-1".to_string(),
        name: format!("Line {id}"),
        moves: moves.to_string(),
        orientation: Color::White,
        slot: 0,
        created_at: "2024-03-01T12:00:00+00:00".to_string(),
    }
}

/// A won blitz game played as white, one hour into today
pub fn create_game(id: &str, ucis: &str) -> PlayedGame {
    create_game_at(id, ucis, TODAY_START + 60 * 60 * 1000)
}

pub fn create_game_at(id: &str, ucis: &str, created_at: i64) -> PlayedGame {
    PlayedGame {
        id: id.to_string(),
        created_at,
        color: Color::White,
        you: "tester".to_string(),
        opponent: "rival".to_string(),
        time_control: TimeControl::Blitz,
        did_you_win: true,
        did_you_lose: false,
        ucis: ucis.to_string(),
    }
}

pub fn create_games(count: usize) -> Vec<PlayedGame> {
    (0..count)
        .map(|i| create_game(&format!("game-{i}"), "e2e4 e7e5"))
        .collect()
}
