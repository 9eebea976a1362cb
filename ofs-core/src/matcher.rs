use ofs_types::{Color, Deviator, LedgerEntry, MatchOutcome, PlayedGame, ReferenceLine, ScoreBreakdown};
use tracing::debug;

use crate::FitnessScorer;

/// Longest prefix (in plies) ever compared against a played game.
pub const MAX_MATCH_WINDOW: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport {
    pub outcome: MatchOutcome,
    /// `None` when nothing matched, in which case the score is a flat zero.
    pub score: Option<ScoreBreakdown>,
}

impl MatchReport {
    pub fn ofs(&self) -> f64 {
        self.score.map_or(0.0, |s| s.ofs)
    }

    pub fn depth(&self) -> f64 {
        self.score.map_or(0.0, |s| s.depth)
    }
}

struct Candidate<'a> {
    line: &'a ReferenceLine,
    plies: Vec<&'a str>,
}

pub struct DeviationMatcher;

impl DeviationMatcher {
    /// Find the reference line the game followed furthest and score the game against it.
    pub fn match_game(game: &PlayedGame, corpus: &[ReferenceLine]) -> MatchReport {
        let plies = game.plies();

        let Some((best, nb_deviation)) = Self::find_best_match(&plies, corpus) else {
            debug!(game_id = %game.id, "no reference line matched");
            return MatchReport {
                outcome: MatchOutcome::unmatched(),
                score: None,
            };
        };

        let total_plies = best.plies().len() as u32;
        let nb_deviation = nb_deviation as u32;

        let did_you_deviated = (game.color == Color::Black) == (nb_deviation % 2 == 0);
        let all_completed = nb_deviation == total_plies;

        let deviator = if did_you_deviated {
            Deviator::User
        } else if all_completed {
            Deviator::None
        } else {
            Deviator::Opponent
        };

        let score = FitnessScorer::score(nb_deviation, total_plies, game.result(), deviator);

        debug!(
            game_id = %game.id,
            line_id = %best.id,
            nb_deviation,
            total_plies,
            deviator = deviator.as_str(),
            ofs = score.ofs,
            "matched game against reference line"
        );

        MatchReport {
            outcome: MatchOutcome {
                best_match_line_id: Some(best.id.clone()),
                nb_deviation,
                did_you_deviated,
                deviator,
            },
            score: Some(score),
        }
    }

    /// Match and fold the result into the cacheable form.
    pub fn process(game: PlayedGame, corpus: &[ReferenceLine]) -> LedgerEntry {
        let report = Self::match_game(&game, corpus);
        LedgerEntry {
            ofs: report.ofs(),
            depth: report.depth(),
            outcome: report.outcome,
            game,
        }
    }

    /// Shrink the window from `min(30, plies)` down to one ply and stop at the
    /// first window that has a candidate. Returns the line and the window.
    fn find_best_match<'a>(
        plies: &[&str],
        corpus: &'a [ReferenceLine],
    ) -> Option<(&'a ReferenceLine, usize)> {
        let played = plies.join(" ");

        // Empty lines can't be scored, so they never compete.
        let candidates: Vec<Candidate<'a>> = corpus
            .iter()
            .map(|line| Candidate {
                line,
                plies: line.plies(),
            })
            .filter(|candidate| !candidate.plies.is_empty())
            .collect();

        for window in (1..=plies.len().min(MAX_MATCH_WINDOW)).rev() {
            let mut best: Option<&Candidate<'a>> = None;

            for candidate in &candidates {
                let opening = candidate.plies[..window.min(candidate.plies.len())].join(" ");
                if !occurs_anywhere_in_game(&played, &opening) {
                    continue;
                }

                // Ranked by raw move string length, first one wins ties
                if best.is_none_or(|b| candidate.line.moves.len() > b.line.moves.len()) {
                    best = Some(candidate);
                }
            }

            if let Some(best) = best {
                return Some((best.line, window.min(best.plies.len())));
            }
        }

        None
    }
}

/// Substring test, not a prefix test: the opening may be found at any point
/// of the played sequence.
fn occurs_anywhere_in_game(played: &str, opening: &str) -> bool {
    played.contains(opening)
}
