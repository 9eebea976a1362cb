use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{LedgerEntry, ResolvedLine, TimeControl};

/// Result of one daily reconcile: today's entries and the lines they matched.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyStats {
    pub pages: Vec<LedgerEntry>,
    pub lines: Vec<ResolvedLine>,
    pub summary: DailySummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimeControlSummary {
    pub time_control: TimeControl,
    pub nb_games: u32,
    pub raw: f64,
}

/// Day-level fitness, weighted across time controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailySummary {
    pub ofs: f64,
    pub time_controls: Vec<TimeControlSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ApiSuccess<T: TS> {
    pub ok: bool,
    pub data: T,
}

impl<T: TS> ApiSuccess<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ApiFailure {
    pub ok: bool,
    pub errors: String,
}

impl ApiFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            errors: message.into(),
        }
    }
}
