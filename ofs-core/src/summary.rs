use ofs_types::{DailySummary, LedgerEntry, TimeControl, TimeControlSummary};

/// Games per day after which a time control stops earning a volume bonus.
fn volume_target(time_control: TimeControl) -> f64 {
    match time_control {
        TimeControl::Bullet => 15.0,
        TimeControl::Blitz => 20.0,
        TimeControl::Rapid => 10.0,
        TimeControl::Classical => 1.0,
    }
}

fn day_weight(time_control: TimeControl) -> f64 {
    match time_control {
        TimeControl::Classical => 0.1,
        _ => 0.3,
    }
}

pub struct DailyAggregator;

impl DailyAggregator {
    /// Roll a day's entries up into one fitness figure, per time control and overall.
    pub fn summarize(entries: &[LedgerEntry]) -> DailySummary {
        let time_controls: Vec<TimeControlSummary> = TimeControl::ALL
            .into_iter()
            .map(|time_control| Self::summarize_time_control(entries, time_control))
            .collect();

        let ofs = time_controls
            .iter()
            .map(|summary| summary.raw * day_weight(summary.time_control))
            .sum::<f64>()
            * 100.0;

        DailySummary { ofs, time_controls }
    }

    fn summarize_time_control(entries: &[LedgerEntry], time_control: TimeControl) -> TimeControlSummary {
        let scores: Vec<f64> = entries
            .iter()
            .filter(|entry| entry.game.time_control == time_control)
            .map(|entry| entry.ofs / 100.0)
            .collect();

        // Running fold, each step divides by the number of games seen so far
        let acc = scores
            .iter()
            .enumerate()
            .fold(0.0, |acc, (index, score)| (acc + score) / (index as f64 + 1.0));

        let nb_games = scores.len() as u32;
        let volume = (f64::from(nb_games) / volume_target(time_control)).min(1.0);
        let raw = acc * (0.8 + 2.0 * volume);

        TimeControlSummary {
            time_control,
            nb_games,
            raw,
        }
    }
}
