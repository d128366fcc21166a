//! Bounty evaluation orchestrator.
//!
//! Sequences scorer → circuit → approval policy, persists the result in
//! the injected history store, and exposes verification and audit-report
//! generation.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::Instrument;

use crate::approval::decide_approval;
use crate::circuit::{EvaluationCircuit, NonceSource};
use crate::domain::{CriteriaSet, EvalError, EvaluationResult, Result, ReviewRequest};
use crate::obs;
use crate::report;
use crate::scorer::score_submission;
use crate::store::{HistoryStore, MemoryHistoryStore};

/// Orchestrates bounty evaluations and owns their history.
///
/// Each `evaluate` call is logically atomic from the caller's perspective:
/// the only shared mutable state it touches is the final single-key upsert
/// into the history store (last-write-wins on races for the same bounty
/// id). No timeouts or cancellation are defined; callers wrap externally
/// if they need them.
pub struct BountyEvaluator {
    criteria: CriteriaSet,
    circuit: EvaluationCircuit,
    store: Arc<dyn HistoryStore>,
}

impl BountyEvaluator {
    /// Evaluator with the default criteria, random attestation nonces, and
    /// a fresh in-memory history store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryHistoryStore::new()))
    }

    /// Evaluator backed by an injected history store.
    pub fn with_store(store: Arc<dyn HistoryStore>) -> Self {
        let criteria = CriteriaSet::default_set();
        Self {
            circuit: EvaluationCircuit::new(criteria.clone()),
            criteria,
            store,
        }
    }

    /// Full control over criteria, nonce generation, and storage.
    pub fn with_parts(
        criteria: CriteriaSet,
        nonce_source: Box<dyn NonceSource>,
        store: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            circuit: EvaluationCircuit::with_nonce_source(criteria.clone(), nonce_source),
            criteria,
            store,
        }
    }

    /// Evaluate a submission and persist the result.
    ///
    /// Fails fast with [`EvalError::CircuitVerification`] if the freshly
    /// produced circuit output does not pass its own structural check —
    /// which would mean an internal bug, not bad caller input.
    pub async fn evaluate(
        &self,
        request: &ReviewRequest,
        evaluator_address: &str,
    ) -> Result<EvaluationResult> {
        let span = obs::evaluation_span(&request.bounty_id);
        self.evaluate_inner(request, evaluator_address)
            .instrument(span)
            .await
    }

    async fn evaluate_inner(
        &self,
        request: &ReviewRequest,
        evaluator_address: &str,
    ) -> Result<EvaluationResult> {
        obs::emit_evaluation_started(&request.bounty_id, evaluator_address);

        let scores = score_submission(
            &request.submission_content,
            &request.deliverables,
            request.metrics.as_ref(),
        );

        let circuit_output = self.circuit.execute(&scores, evaluator_address)?;
        obs::emit_circuit_executed(&request.bounty_id, &circuit_output.commitment);

        if !self.circuit.verify(&circuit_output) {
            return Err(EvalError::CircuitVerification {
                bounty_id: request.bounty_id.clone(),
            });
        }

        // verify() guarantees two public inputs with a numeric second entry
        let weighted_score: f64 = circuit_output.public_inputs[1].parse().map_err(|_| {
            EvalError::MalformedCircuitOutput(format!(
                "weighted score is not numeric: {}",
                circuit_output.public_inputs[1]
            ))
        })?;

        let approved = decide_approval(&self.criteria, &scores, weighted_score);

        let evaluation = EvaluationResult {
            bounty_id: request.bounty_id.clone(),
            scores,
            weighted_score,
            zk_proof: circuit_output.proof.clone(),
            circuit_output,
            approved,
            timestamp: Utc::now().timestamp_millis(),
        };

        self.store.upsert(evaluation.clone()).await?;
        obs::emit_evaluation_finished(&request.bounty_id, weighted_score, approved);

        Ok(evaluation)
    }

    /// Structural re-check of a previous evaluation's circuit output.
    pub fn verify(&self, evaluation: &EvaluationResult) -> bool {
        let valid = self.circuit.verify(&evaluation.circuit_output);
        obs::emit_proof_verified(&evaluation.bounty_id, valid);
        valid
    }

    /// Render the audit report for an evaluation. Pure formatting.
    pub fn audit_report(&self, evaluation: &EvaluationResult) -> String {
        report::render_audit_report(evaluation)
    }

    /// Snapshot of the evaluation history, keyed by bounty id.
    pub async fn history(&self) -> Result<HashMap<String, EvaluationResult>> {
        Ok(self.store.snapshot().await?)
    }
}

impl Default for BountyEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
