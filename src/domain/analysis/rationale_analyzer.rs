//! Rationale Analyzer - explains why the winner won.
//!
//! Produces structured strengths, weaknesses, trade-offs and a rationale
//! narrative. The narrative is a list of segments so presentation layers can
//! phrase it however they like; [`Rationale::to_text`] renders a plain
//! English default.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::decision::Criterion;
use crate::domain::foundation::{Score, Weight};

use super::{OptionRef, RankedOption};

/// Maximum number of strengths reported for the winner.
pub const MAX_STRENGTHS: usize = 3;

/// Maximum number of weaknesses reported for the winner.
pub const MAX_WEAKNESSES: usize = 2;

/// A winner's score must reach this to count as a strength.
pub const STRENGTH_MIN_SCORE: u8 = 7;

/// A winner's score at or below this can count as a weakness.
pub const WEAKNESS_MAX_SCORE: u8 = 5;

/// Scores at or above this are a pro in the trade-off table.
pub const PRO_MIN_SCORE: u8 = 8;

/// Scores at or below this are a con in the trade-off table.
pub const CON_MAX_SCORE: u8 = 4;

/// Normalized-score gap under which the runner-up is "very close".
pub const VERY_CLOSE_GAP: f64 = 0.5;

/// A criterion on which the winner stands out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strength {
    pub criterion_id: String,
    pub criterion_name: String,
    pub weight: Weight,
    pub score: Score,
    /// Mean score of all ranked options on this criterion.
    pub average: f64,
    /// `score - average`.
    pub advantage: f64,
}

impl Strength {
    /// Sort key: advantage scaled by importance.
    pub fn impact(&self) -> f64 {
        self.advantage * self.weight.as_f64()
    }
}

/// A criterion on which the winner lags another option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weakness {
    pub criterion_id: String,
    pub criterion_name: String,
    pub score: Score,
    /// Best score any ranked option has on this criterion.
    pub best_score: Score,
    /// `best_score - score`.
    pub deficit: u8,
}

/// Per-option pros and cons, by criterion name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tradeoff {
    pub option_id: String,
    pub option_name: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

/// One step of the rationale narrative, in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RationaleSegment {
    Recommendation {
        option: String,
        score: f64,
        /// Whole-percent reduction from constraint penalties, if any.
        penalty_percent: Option<u32>,
    },
    Strengths {
        criteria: Vec<String>,
    },
    RunnerUp {
        option: String,
        score: f64,
        gap: f64,
        very_close: bool,
    },
    Caveat {
        criteria: Vec<String>,
    },
}

impl fmt::Display for RationaleSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RationaleSegment::Recommendation {
                option,
                score,
                penalty_percent,
            } => {
                write!(
                    f,
                    "{} is the recommended option with a score of {:.1}/10.",
                    option, score
                )?;
                if let Some(percent) = penalty_percent {
                    write!(
                        f,
                        " This includes a {}% reduction for constraint violations.",
                        percent
                    )?;
                }
                Ok(())
            }
            RationaleSegment::Strengths { criteria } => {
                write!(f, "It performs especially well on {}.", join_names(criteria))
            }
            RationaleSegment::RunnerUp {
                option,
                score,
                gap,
                very_close,
            } => {
                if *very_close {
                    write!(
                        f,
                        "{} is a very close second at {:.1}/10, so both deserve a careful look.",
                        option, score
                    )
                } else {
                    write!(
                        f,
                        "{} comes second at {:.1}/10, {:.1} points behind.",
                        option, score, gap
                    )
                }
            }
            RationaleSegment::Caveat { criteria } => {
                write!(f, "Keep in mind it is weaker on {}.", join_names(criteria))
            }
        }
    }
}

/// Ordered rationale narrative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rationale {
    pub segments: Vec<RationaleSegment>,
}

impl Rationale {
    /// Renders the segments as sentences separated by spaces.
    pub fn to_text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Rationale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Explanation of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub winner: OptionRef,
    pub runner_up: Option<OptionRef>,
    pub strengths: Vec<Strength>,
    pub weaknesses: Vec<Weakness>,
    pub rationale: Rationale,
    /// `rationale` rendered as text.
    pub rationale_text: String,
    /// One entry per moderate or severe violation of any ranked option.
    pub constraint_warnings: Vec<String>,
    pub tradeoffs: Vec<Tradeoff>,
}

/// Rationale and trade-off derivation.
pub struct RationaleAnalyzer;

impl RationaleAnalyzer {
    /// Builds the analysis for sorted, penalized rankings.
    ///
    /// Constraint effects are read from each ranked option's penalty and
    /// violations.
    ///
    /// # Edge Cases
    /// - Empty rankings: None
    /// - Single option: no runner-up, no weaknesses
    pub fn generate_analysis(
        rankings: &[RankedOption],
        criteria: &[Criterion],
    ) -> Option<Analysis> {
        let winner = rankings.first()?;
        let runner_up = rankings.get(1);

        let strengths = Self::find_strengths(rankings, criteria);
        let weaknesses = Self::find_weaknesses(rankings, criteria);
        let rationale = Self::build_rationale(winner, runner_up, &strengths, &weaknesses);

        Some(Analysis {
            winner: winner.to_ref(),
            runner_up: runner_up.map(RankedOption::to_ref),
            rationale_text: rationale.to_text(),
            rationale,
            strengths,
            weaknesses,
            constraint_warnings: Self::constraint_warnings(rankings),
            tradeoffs: Self::tradeoffs(rankings, criteria),
        })
    }

    /// Criteria where the winner beats the field average and scores at least 7.
    ///
    /// Sorted by `advantage * weight` descending, at most 3.
    pub fn find_strengths(rankings: &[RankedOption], criteria: &[Criterion]) -> Vec<Strength> {
        let Some(winner) = rankings.first() else {
            return Vec::new();
        };

        let mut strengths: Vec<Strength> = criteria
            .iter()
            .filter_map(|criterion| {
                let score = score_of(winner, criterion);
                let average = rankings
                    .iter()
                    .map(|r| score_of(r, criterion).as_f64())
                    .sum::<f64>()
                    / rankings.len() as f64;

                let qualifies = score.as_f64() > average && score.value() >= STRENGTH_MIN_SCORE;
                qualifies.then(|| Strength {
                    criterion_id: criterion.id.clone(),
                    criterion_name: criterion.name.clone(),
                    weight: criterion.weight,
                    score,
                    average,
                    advantage: score.as_f64() - average,
                })
            })
            .collect();

        strengths.sort_by(|a, b| b.impact().total_cmp(&a.impact()));
        strengths.truncate(MAX_STRENGTHS);
        strengths
    }

    /// Criteria where another option scores higher and the winner scores at most 5.
    ///
    /// Sorted by deficit descending, at most 2.
    pub fn find_weaknesses(rankings: &[RankedOption], criteria: &[Criterion]) -> Vec<Weakness> {
        let Some(winner) = rankings.first() else {
            return Vec::new();
        };

        let mut weaknesses: Vec<Weakness> = criteria
            .iter()
            .filter_map(|criterion| {
                let score = score_of(winner, criterion);
                let best_score = rankings.iter().map(|r| score_of(r, criterion)).max()?;

                let qualifies = score < best_score && score.value() <= WEAKNESS_MAX_SCORE;
                qualifies.then(|| Weakness {
                    criterion_id: criterion.id.clone(),
                    criterion_name: criterion.name.clone(),
                    score,
                    best_score,
                    deficit: best_score.value() - score.value(),
                })
            })
            .collect();

        weaknesses.sort_by(|a, b| b.deficit.cmp(&a.deficit));
        weaknesses.truncate(MAX_WEAKNESSES);
        weaknesses
    }

    /// Warning messages for every moderate or severe violation, in rank order.
    pub fn constraint_warnings(rankings: &[RankedOption]) -> Vec<String> {
        rankings
            .iter()
            .flat_map(|ranked| {
                ranked
                    .constraint_violations
                    .iter()
                    .filter(|v| v.severity.is_warning())
                    .map(move |v| format!("{}: {}", ranked.name(), v.message))
            })
            .collect()
    }

    /// Absolute pros (score >= 8) and cons (score <= 4) for every option.
    pub fn tradeoffs(rankings: &[RankedOption], criteria: &[Criterion]) -> Vec<Tradeoff> {
        rankings
            .iter()
            .map(|ranked| {
                let mut pros = Vec::new();
                let mut cons = Vec::new();

                for criterion in criteria {
                    let score = score_of(ranked, criterion).value();
                    if score >= PRO_MIN_SCORE {
                        pros.push(criterion.name.clone());
                    } else if score <= CON_MAX_SCORE {
                        cons.push(criterion.name.clone());
                    }
                }

                Tradeoff {
                    option_id: ranked.id().to_string(),
                    option_name: ranked.name().to_string(),
                    pros,
                    cons,
                }
            })
            .collect()
    }

    fn build_rationale(
        winner: &RankedOption,
        runner_up: Option<&RankedOption>,
        strengths: &[Strength],
        weaknesses: &[Weakness],
    ) -> Rationale {
        let mut segments = Vec::new();

        let penalty_percent = (winner.constraint_penalty < 1.0)
            .then(|| ((1.0 - winner.constraint_penalty) * 100.0).round() as u32);
        segments.push(RationaleSegment::Recommendation {
            option: winner.name().to_string(),
            score: winner.normalized_score,
            penalty_percent,
        });

        if !strengths.is_empty() {
            segments.push(RationaleSegment::Strengths {
                criteria: strengths.iter().map(|s| s.criterion_name.clone()).collect(),
            });
        }

        if let Some(second) = runner_up {
            let gap = winner.normalized_score - second.normalized_score;
            segments.push(RationaleSegment::RunnerUp {
                option: second.name().to_string(),
                score: second.normalized_score,
                gap,
                very_close: gap < VERY_CLOSE_GAP,
            });
        }

        if !weaknesses.is_empty() {
            segments.push(RationaleSegment::Caveat {
                criteria: weaknesses.iter().map(|w| w.criterion_name.clone()).collect(),
            });
        }

        Rationale { segments }
    }
}

/// Score a ranked option was ranked with on a criterion.
///
/// Rankings computed against `criteria` always carry every criterion.
fn score_of(ranked: &RankedOption, criterion: &Criterion) -> Score {
    ranked.score_on(&criterion.id).unwrap_or(Score::MIN)
}

/// "a", "a and b", "a, b and c".
fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
