//! End-to-end tests for the evaluation pipeline:
//! scorer → circuit → approval → history.

use std::sync::Arc;

use zkbounty_core::{
    BountyEvaluator, CriteriaSet, FixedNonce, MemoryHistoryStore, ReviewRequest,
};

/// A 500-character submission carrying all scoring keywords, plus six
/// deliverables. Heuristics give it 55/100/75/70/80 → weighted 76.
fn high_quality_request(bounty_id: &str) -> ReviewRequest {
    let mut content = String::from("security audit performance documentation ");
    let padding = 500 - content.chars().count();
    content.push_str(&"x".repeat(padding));
    assert_eq!(content.chars().count(), 500);

    ReviewRequest {
        bounty_id: bounty_id.to_string(),
        submission_content: content,
        deliverables: (1..=6).map(|i| format!("Deliverable {}", i)).collect(),
        metrics: None,
    }
}

fn low_quality_request(bounty_id: &str) -> ReviewRequest {
    ReviewRequest {
        bounty_id: bounty_id.to_string(),
        submission_content: "Quick implementation.".to_string(),
        deliverables: vec!["Basic implementation".to_string()],
        metrics: None,
    }
}

#[tokio::test]
async fn test_high_quality_submission_is_approved() {
    let evaluator = BountyEvaluator::new();
    let evaluation = evaluator
        .evaluate(&high_quality_request("bounty-high-001"), "evaluator-001")
        .await
        .expect("evaluate");

    assert_eq!(evaluation.scores.code_quality, 55.0);
    assert_eq!(evaluation.scores.completeness, 100.0);
    assert_eq!(evaluation.scores.documentation, 75.0);
    assert_eq!(evaluation.scores.performance, 70.0);
    assert_eq!(evaluation.scores.security, 80.0);

    assert!((evaluation.weighted_score - 76.0).abs() < 1e-9);
    assert!(evaluation.weighted_score >= 65.0);
    assert!(evaluation.approved);
}

#[tokio::test]
async fn test_low_quality_submission_is_rejected() {
    let evaluator = BountyEvaluator::new();
    let evaluation = evaluator
        .evaluate(&low_quality_request("bounty-low-001"), "evaluator-001")
        .await
        .expect("evaluate");

    // One deliverable scores completeness 20, below its 60 threshold: the
    // dimension is zeroed in the aggregate but still weighted.
    assert_eq!(evaluation.scores.completeness, 20.0);
    assert!((evaluation.weighted_score - 16.0).abs() < 1e-9);
    assert!(!evaluation.approved);
}

#[tokio::test]
async fn test_proof_and_commitment_shape() {
    let evaluator = BountyEvaluator::new();
    let evaluation = evaluator
        .evaluate(&high_quality_request("bounty-shape-001"), "evaluator-001")
        .await
        .expect("evaluate");

    let commitment = &evaluation.circuit_output.commitment;
    assert_eq!(commitment.len(), 64);
    assert!(commitment
        .chars()
        .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

    assert_eq!(evaluation.zk_proof, evaluation.circuit_output.proof);
    assert!(evaluation.zk_proof.starts_with("0x"));
    assert_eq!(evaluation.zk_proof.len(), 66);
    assert!(evaluation.zk_proof[2..]
        .chars()
        .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

    assert_eq!(evaluation.circuit_output.public_inputs.len(), 2);
    assert_eq!(&evaluation.circuit_output.public_inputs[0], commitment);
    assert!(evaluation.circuit_output.public_inputs[1]
        .parse::<f64>()
        .is_ok());
}

#[tokio::test]
async fn test_fresh_evaluations_always_verify() {
    let evaluator = BountyEvaluator::new();
    for (i, request) in [
        high_quality_request("bounty-v1"),
        low_quality_request("bounty-v2"),
    ]
    .iter()
    .enumerate()
    {
        let evaluation = evaluator
            .evaluate(request, &format!("evaluator-{}", i))
            .await
            .expect("evaluate");
        assert!(evaluator.verify(&evaluation));
    }
}

#[tokio::test]
async fn test_identical_inputs_give_identical_scores_but_distinct_proofs() {
    let evaluator = BountyEvaluator::new();
    let request = high_quality_request("bounty-det-001");

    let first = evaluator.evaluate(&request, "evaluator-001").await.expect("first");
    let second = evaluator.evaluate(&request, "evaluator-001").await.expect("second");

    // Heuristic scoring is deterministic...
    assert_eq!(first.scores, second.scores);
    assert_eq!(first.weighted_score, second.weighted_score);
    // ...but the attestation is salted with a random nonce.
    assert_ne!(first.zk_proof, second.zk_proof);
}

#[tokio::test]
async fn test_history_keeps_latest_result_per_bounty() {
    let store = Arc::new(MemoryHistoryStore::new());
    let evaluator = BountyEvaluator::with_store(store);

    evaluator
        .evaluate(&low_quality_request("bounty-1"), "evaluator-001")
        .await
        .expect("first evaluation");
    let second = evaluator
        .evaluate(&high_quality_request("bounty-1"), "evaluator-001")
        .await
        .expect("second evaluation");

    let history = evaluator.history().await.expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history["bounty-1"].zk_proof, second.zk_proof);
    assert!(history["bounty-1"].approved);
}

#[tokio::test]
async fn test_metrics_override_heuristics() {
    let evaluator = BountyEvaluator::new();
    let mut request = low_quality_request("bounty-metrics-001");
    request.metrics = Some(
        [
            ("codeQuality", 90.0),
            ("completeness", 95.0),
            ("documentation", 80.0),
            ("performance", 85.0),
            ("security", 90.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect(),
    );

    let evaluation = evaluator
        .evaluate(&request, "evaluator-001")
        .await
        .expect("evaluate");
    assert_eq!(evaluation.scores.code_quality, 90.0);
    assert!(evaluation.approved);
}

#[tokio::test]
async fn test_fixed_nonce_keeps_commitment_verifiable() {
    let evaluator = BountyEvaluator::with_parts(
        CriteriaSet::default_set(),
        Box::new(FixedNonce("test-nonce".to_string())),
        Arc::new(MemoryHistoryStore::new()),
    );
    let evaluation = evaluator
        .evaluate(&high_quality_request("bounty-nonce-001"), "evaluator-001")
        .await
        .expect("evaluate");

    assert!(evaluator.verify(&evaluation));
    // The committed record never contains the attestation nonce.
    assert!(!evaluation.circuit_output.private_inputs[0].contains("test-nonce"));
}

#[tokio::test]
async fn test_audit_report_reflects_evaluation_fields() {
    let evaluator = BountyEvaluator::new();
    let evaluation = evaluator
        .evaluate(&high_quality_request("bounty-report-001"), "evaluator-001")
        .await
        .expect("evaluate");

    let report = evaluator.audit_report(&evaluation);
    assert!(report.starts_with("BOUNTY EVALUATION AUDIT REPORT"));
    assert!(report.contains("Bounty ID: bounty-report-001"));
    assert!(report.contains("Status: APPROVED"));
    assert!(report.contains("Weighted Score: 76.00/100"));
    assert!(report.contains(&format!(
        "Commitment: {}",
        evaluation.circuit_output.commitment
    )));
    assert!(report.contains(&format!("Proof: {}", evaluation.zk_proof)));
}
