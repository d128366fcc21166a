//! Audit report rendering.

use chrono::{SecondsFormat, TimeZone, Utc};

use crate::domain::{Dimension, EvaluationResult};

/// Render the fixed-format audit report for an evaluation.
///
/// Pure formatting over the stored fields; nothing is recomputed. The
/// layout is a compatibility surface and is covered by a golden test —
/// change it only together with its consumers.
pub fn render_audit_report(evaluation: &EvaluationResult) -> String {
    let timestamp = Utc
        .timestamp_millis_opt(evaluation.timestamp)
        .single()
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| evaluation.timestamp.to_string());
    let status = if evaluation.approved {
        "APPROVED"
    } else {
        "REJECTED"
    };

    let mut out = String::new();
    out.push_str("BOUNTY EVALUATION AUDIT REPORT\n");
    out.push_str("================================\n");
    out.push_str(&format!("Bounty ID: {}\n", evaluation.bounty_id));
    out.push_str(&format!("Timestamp: {}\n", timestamp));
    out.push_str(&format!("Status: {}\n", status));
    out.push_str(&format!(
        "Weighted Score: {:.2}/100\n\n",
        evaluation.weighted_score
    ));

    out.push_str("SCORES:\n");
    out.push_str("-------\n");
    for dimension in Dimension::ALL {
        out.push_str(&format!(
            "{}: {}/100\n",
            dimension.display_name(),
            evaluation.scores.get(dimension).round() as i64
        ));
    }

    out.push_str("\nZERO-KNOWLEDGE PROOF:\n");
    out.push_str("--------------------\n");
    out.push_str(&format!(
        "Commitment: {}\n",
        evaluation.circuit_output.commitment
    ));
    out.push_str(&format!("Proof: {}\n\n", evaluation.zk_proof));

    out.push_str(
        "This evaluation was conducted using zero-knowledge machine learning (zkML)\n\
         to ensure objective, tamper-proof, and auditable results. The proof can be\n\
         independently verified without revealing the underlying scoring logic.",
    );
    out
}
