use ofs_types::{Deviator, GameResult, ScoreBreakdown};

const DEPTH_WEIGHT: f64 = 0.6;
const WIN_WEIGHT: f64 = 0.4;
const DEVIATION_WEIGHT: f64 = 0.5;

fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

pub struct FitnessScorer;

impl FitnessScorer {
    /// Turn a matched prefix into an opening fitness score.
    ///
    /// `total_plies` is the length of the reference line and must be non-zero;
    /// the matcher never scores against an empty line.
    pub fn score(
        matched_plies: u32,
        total_plies: u32,
        result: GameResult,
        deviator: Deviator,
    ) -> ScoreBreakdown {
        assert!(total_plies > 0, "cannot score against an empty reference line");

        let matched = f64::from(matched_plies);
        let total = f64::from(total_plies);

        let depth = (matched / total).min(1.0) * 100.0;
        let deficit = clamp_percent((total - matched) / total * 100.0);

        let user_deviation_penalty = if deviator == Deviator::User { deficit } else { 0.0 };
        let opponent_deviation_penalty = if deviator == Deviator::Opponent { deficit } else { 0.0 };

        let win = Self::win_score(result);

        let raw = DEPTH_WEIGHT * depth + WIN_WEIGHT * win
            - DEVIATION_WEIGHT * user_deviation_penalty
            - DEVIATION_WEIGHT * opponent_deviation_penalty;

        // one decimal
        let ofs = clamp_percent((raw * 10.0).round() / 10.0);

        ScoreBreakdown {
            depth,
            deficit,
            win,
            user_deviation_penalty,
            opponent_deviation_penalty,
            raw,
            ofs,
        }
    }

    pub fn win_score(result: GameResult) -> f64 {
        match result {
            GameResult::Win => 100.0,
            GameResult::Draw => 50.0,
            GameResult::Loss => 0.0,
        }
    }
}
