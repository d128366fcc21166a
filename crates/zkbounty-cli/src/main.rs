//! zkBounty CLI - bounty review from the command line
//!
//! ## Commands
//!
//! - `demo`: Evaluate three canned submissions end to end
//! - `evaluate`: Evaluate a single submission
//! - `verify`: Structurally verify a stored evaluation
//! - `report`: Render the audit report for a stored evaluation

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};

use zkbounty_core::{BountyEvaluator, EvaluationResult, ReviewRequest};

#[derive(Parser)]
#[command(name = "zkbounty")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "zkML-style bounty review engine", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the canned three-submission demo flow
    Demo {
        /// Evaluator address recorded in the commitments
        #[arg(long, default_value = "zkbounty-demo-evaluator-001")]
        evaluator: String,
    },

    /// Evaluate a single submission
    Evaluate {
        /// Bounty identifier
        #[arg(long)]
        bounty_id: String,

        /// Submission content (inline)
        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,

        /// Read submission content from a file
        #[arg(long)]
        content_file: Option<PathBuf>,

        /// Deliverable description (repeatable)
        #[arg(long = "deliverable")]
        deliverables: Vec<String>,

        /// Per-dimension metric override, e.g. --metric codeQuality=85 (repeatable)
        #[arg(long = "metric", value_parser = parse_metric)]
        metrics: Vec<(String, f64)>,

        /// Evaluator address recorded in the commitment
        #[arg(long, default_value = "default-evaluator")]
        evaluator: String,

        /// Write the full evaluation result as JSON to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Structurally verify a stored evaluation's proof
    Verify {
        /// Evaluation JSON file, as written by `evaluate --output`
        input: PathBuf,
    },

    /// Render the audit report for a stored evaluation
    Report {
        /// Evaluation JSON file, as written by `evaluate --output`
        input: PathBuf,

        /// Write the report to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_metric(raw: &str) -> std::result::Result<(String, f64), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected dimension=value, got '{}'", raw))?;
    let value: f64 = value
        .parse()
        .map_err(|_| format!("metric value for '{}' is not a number", key))?;
    Ok((key.to_string(), value))
}

fn load_evaluation(path: &Path) -> Result<EvaluationResult> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read evaluation file {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("parse evaluation file {:?}", path))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    zkbounty_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Demo { evaluator } => run_demo(&evaluator).await,
        Commands::Evaluate {
            bounty_id,
            content,
            content_file,
            deliverables,
            metrics,
            evaluator,
            output,
        } => {
            let content = match (content, content_file) {
                (Some(inline), _) => inline,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("read content file {:?}", path))?,
                (None, None) => bail!("one of --content or --content-file is required"),
            };
            run_evaluate(
                bounty_id,
                content,
                deliverables,
                metrics,
                &evaluator,
                output.as_deref(),
            )
            .await
        }
        Commands::Verify { input } => run_verify(&input),
        Commands::Report { input, output } => run_report(&input, output.as_deref()),
    }
}

async fn run_evaluate(
    bounty_id: String,
    content: String,
    deliverables: Vec<String>,
    metrics: Vec<(String, f64)>,
    evaluator_address: &str,
    output: Option<&Path>,
) -> Result<()> {
    let metrics: HashMap<String, f64> = metrics.into_iter().collect();
    let request = ReviewRequest {
        bounty_id,
        submission_content: content,
        deliverables,
        metrics: if metrics.is_empty() {
            None
        } else {
            Some(metrics)
        },
    };

    let evaluator = BountyEvaluator::new();
    let evaluation = evaluator
        .evaluate(&request, evaluator_address)
        .await
        .context("evaluation failed")?;
    info!(
        bounty_id = %evaluation.bounty_id,
        approved = evaluation.approved,
        "evaluation complete"
    );

    println!("{}", evaluator.audit_report(&evaluation));

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&evaluation).context("serialize evaluation")?;
        std::fs::write(path, json).with_context(|| format!("write {:?}", path))?;
        println!("\nEvaluation written to {}", path.display());
    }
    Ok(())
}

fn run_verify(input: &Path) -> Result<()> {
    let evaluation = load_evaluation(input)?;
    let evaluator = BountyEvaluator::new();
    if evaluator.verify(&evaluation) {
        println!("{}: proof VALID", evaluation.bounty_id);
        Ok(())
    } else {
        bail!("{}: proof INVALID", evaluation.bounty_id)
    }
}

fn run_report(input: &Path, output: Option<&Path>) -> Result<()> {
    let evaluation = load_evaluation(input)?;
    let report = zkbounty_core::render_audit_report(&evaluation);
    match output {
        Some(path) => {
            std::fs::write(path, &report).with_context(|| format!("write {:?}", path))?;
            println!("Report written to {}", path.display());
        }
        None => println!("{}", report),
    }
    Ok(())
}

/// The three canned submissions the original proof-of-concept demo ships
/// with: one clearly above the approval gates, one borderline, one below.
fn demo_requests() -> Vec<ReviewRequest> {
    vec![
        ReviewRequest {
            bounty_id: "bounty-high-001".to_string(),
            submission_content: "\
This is a high-quality submission demonstrating excellent code quality \
and comprehensive implementation.

# Implementation Details
- Complete authentication system with security audit
- Performance benchmarks showing 95% efficiency improvement
- Comprehensive documentation and API reference
- Security vulnerability assessment and fixes
- Unit tests with 99% code coverage
- Performance optimization techniques applied

The code follows best practices and industry standards."
                .to_string(),
            deliverables: vec![
                "Authentication System - Complete".to_string(),
                "Database Layer - Optimized".to_string(),
                "API Documentation - Full".to_string(),
                "Security Audit Report".to_string(),
                "Performance Benchmarks".to_string(),
                "Unit Test Suite".to_string(),
            ],
            metrics: None,
        },
        ReviewRequest {
            bounty_id: "bounty-medium-001".to_string(),
            submission_content: "\
This submission includes the requested features with basic documentation.

Features Implemented:
- User authentication module
- Data persistence layer
- Basic API endpoints

Documentation is available in README.md"
                .to_string(),
            deliverables: vec![
                "Authentication Module".to_string(),
                "Database Layer".to_string(),
                "API Endpoints".to_string(),
            ],
            metrics: None,
        },
        ReviewRequest {
            bounty_id: "bounty-low-001".to_string(),
            submission_content: "\
Quick implementation of the requested features.
Code is functional but needs review."
                .to_string(),
            deliverables: vec!["Basic implementation".to_string()],
            metrics: None,
        },
    ]
}

async fn run_demo(evaluator_address: &str) -> Result<()> {
    let divider = "=".repeat(60);
    println!("zkBounty Review System - Demo\n{}", divider);

    let evaluator = BountyEvaluator::new();
    let mut evaluations = Vec::new();

    for request in demo_requests() {
        println!("\nEvaluating {}...\n", request.bounty_id);
        let evaluation = evaluator
            .evaluate(&request, evaluator_address)
            .await
            .with_context(|| format!("evaluate {}", request.bounty_id))?;

        println!("{}\n", evaluator.audit_report(&evaluation));
        evaluations.push(evaluation);
    }

    println!("{}\nVerifying proofs...\n", divider);
    for evaluation in &evaluations {
        let verdict = if evaluator.verify(evaluation) {
            "VALID"
        } else {
            "INVALID"
        };
        println!("{}: {}", evaluation.bounty_id, verdict);
    }

    let history = evaluator.history().await.context("fetch history")?;
    let total = history.len();
    let approved = history.values().filter(|e| e.approved).count();
    let average: f64 =
        history.values().map(|e| e.weighted_score).sum::<f64>() / total.max(1) as f64;

    println!("\n{}\nEvaluation statistics\n", divider);
    println!("Total evaluations: {}", total);
    println!("Approved: {}", approved);
    println!("Rejected: {}", total - approved);
    println!("Average score: {:.2}/100", average);

    Ok(())
}
