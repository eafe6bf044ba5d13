//! End-to-end evaluation of decision documents.

use std::io::Write;
use std::process::Command;

use decision_engine::application::{
    DecisionReport, EvaluateDecisionCommand, EvaluateDecisionHandler, EvaluationError,
    EvaluationSettings,
};
use decision_engine::domain::analysis::{ConfidenceLevel, Direction};
use decision_engine::domain::decision::Decision;

const JOB_OFFERS: &str = r#"{
    "title": "Which offer should I take?",
    "criteria": [
        { "id": "salary", "name": "Salary", "weight": 9 },
        { "id": "growth", "name": "Growth", "weight": 7 },
        { "id": "commute", "name": "Commute", "weight": 4 },
        { "id": "culture", "name": "Culture", "weight": 6 }
    ],
    "options": [
        {
            "id": "startup", "name": "Startup",
            "scores": { "salary": 6, "growth": 10, "commute": 3, "culture": 9 },
            "estimated_cost": "$0"
        },
        {
            "id": "bank", "name": "Bank",
            "scores": { "salary": 9, "growth": 4, "commute": 8, "culture": 5 }
        },
        {
            "id": "agency", "name": "Agency",
            "scores": { "salary": 5, "growth": 6, "commute": 6, "culture": 6 }
        }
    ],
    "constraints": { "budget": "$5,000", "deadline": "2031-01-15" },
    "score_ranges": {
        "startup": { "salary": { "min": 4, "max": 8 } },
        "bank": { "growth": { "min": 3, "max": 6 } }
    }
}"#;

fn evaluate(json: &str) -> Result<DecisionReport, EvaluationError> {
    let decision: Decision = serde_json::from_str(json).unwrap();
    let cmd = EvaluateDecisionCommand {
        seed: Some(17),
        simulations: Some(500),
        ..EvaluateDecisionCommand::new(decision)
    };
    EvaluateDecisionHandler::new(EvaluationSettings::default()).handle(cmd)
}

#[test]
fn job_offers_rank_startup_first() {
    let report = evaluate(JOB_OFFERS).unwrap();

    // 190, 171 and 147 out of 260
    let order: Vec<&str> = report.rankings.iter().map(|r| r.id()).collect();
    assert_eq!(order, vec!["startup", "bank", "agency"]);
    assert_eq!(report.rankings[0].total_score, 190.0);
    assert_eq!(report.rankings[0].max_possible, 260.0);
    assert_eq!(report.title, "Which offer should I take?");

    let ranks: Vec<usize> = report.rankings.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[test]
fn job_offers_confidence_and_rationale() {
    let report = evaluate(JOB_OFFERS).unwrap();

    // (190 - 171) / 260 = 0.073
    let confidence = report.confidence.unwrap();
    assert_eq!(confidence.level, ConfidenceLevel::Medium);
    assert_eq!(confidence.value, 0.6);

    let analysis = report.analysis.unwrap();
    assert_eq!(analysis.winner.id, "startup");
    assert_eq!(analysis.runner_up.unwrap().id, "bank");

    let strengths: Vec<&str> = analysis
        .strengths
        .iter()
        .map(|s| s.criterion_id.as_str())
        .collect();
    assert_eq!(strengths, vec!["growth", "culture"]);
    assert_eq!(analysis.weaknesses[0].criterion_id, "commute");
    assert!(analysis.rationale_text.starts_with("Startup is the recommended option"));
    assert!(analysis.constraint_warnings.is_empty());
}

#[test]
fn job_offers_sensitivity_and_simulation() {
    let report = evaluate(JOB_OFFERS).unwrap();

    let sensitivity = report.sensitivity.unwrap();
    assert_eq!(sensitivity.winner.id, "startup");
    assert_eq!(sensitivity.tipping_points.len(), 4);
    let salary = sensitivity
        .tipping_points
        .iter()
        .find(|t| t.criterion_id == "salary")
        .unwrap();
    assert_eq!(salary.direction, Direction::Increase);
    assert!(sensitivity.robustness.value() <= 100);

    let monte_carlo = report.monte_carlo.unwrap();
    assert_eq!(monte_carlo.simulations, 500);
    assert_eq!(monte_carlo.results.len(), 3);
    let wins: u32 = monte_carlo.results.iter().map(|t| t.wins).sum();
    assert_eq!(wins, 500);
}

#[test]
fn seeded_evaluations_agree() {
    let first = evaluate(JOB_OFFERS).unwrap();
    let second = evaluate(JOB_OFFERS).unwrap();

    assert_eq!(first.monte_carlo, second.monte_carlo);
}

#[test]
fn deadline_in_future_has_positive_days() {
    let report = evaluate(JOB_OFFERS).unwrap();
    assert!(report.days_until_deadline.unwrap() > 0);
}

#[test]
fn missing_scores_default_to_neutral() {
    let json = r#"{
        "title": "Sparse",
        "criteria": [{ "id": "x", "name": "X", "weight": 10 }],
        "options": [
            { "id": "blank", "name": "Blank" },
            { "id": "four", "name": "Four", "scores": { "x": 4 } }
        ]
    }"#;

    let report = evaluate(json).unwrap();

    assert_eq!(report.rankings[0].id(), "blank");
    assert_eq!(report.rankings[0].raw_score, 50.0);
}

#[test]
fn out_of_range_score_is_rejected_at_parse() {
    let json = r#"{
        "title": "Bad",
        "criteria": [{ "id": "x", "name": "X", "weight": 5 }],
        "options": [{ "id": "a", "name": "A", "scores": { "x": 11 } }]
    }"#;

    assert!(serde_json::from_str::<Decision>(json).is_err());
}

#[test]
fn duplicate_criteria_are_rejected() {
    let json = r#"{
        "title": "Dupes",
        "criteria": [
            { "id": "x", "name": "X", "weight": 5 },
            { "id": "x", "name": "X again", "weight": 3 }
        ],
        "options": []
    }"#;

    assert!(matches!(evaluate(json), Err(EvaluationError::InvalidDecision(_))));
}

#[test]
fn report_round_trips_through_json() {
    let report = evaluate(JOB_OFFERS).unwrap();
    let json = serde_json::to_string(&report).unwrap();
    let parsed: DecisionReport = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.decision_id, report.decision_id);
    assert_eq!(parsed.rankings.len(), 3);
}

#[test]
fn cli_evaluates_document_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(JOB_OFFERS.as_bytes()).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_decision-engine"))
        .arg("evaluate")
        .arg(file.path())
        .args(["--simulations", "100", "--seed", "3"])
        .env("DECISION_ENGINE__LOGGING__FILTER", "off")
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["rankings"][0]["option"]["id"], "startup");
    assert_eq!(report["monte_carlo"]["simulations"], 100);
}

#[test]
fn cli_reports_tipping_point() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(JOB_OFFERS.as_bytes()).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_decision-engine"))
        .arg("tipping-point")
        .arg(file.path())
        .args(["--criterion", "growth"])
        .env("DECISION_ENGINE__LOGGING__FILTER", "off")
        .output()
        .unwrap();

    assert!(output.status.success());
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["new_winner"]["id"], "bank");
}

#[test]
fn cli_fails_on_missing_file() {
    let output = Command::new(env!("CARGO_BIN_EXE_decision-engine"))
        .args(["evaluate", "/nonexistent/decision.json"])
        .env("DECISION_ENGINE__LOGGING__FILTER", "off")
        .output()
        .unwrap();

    assert!(!output.status.success());
}
