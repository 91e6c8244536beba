//! The scoring workflow: authenticate, submit, poll, retrieve.
//!
//! The four stages run strictly in sequence; each stage's output (token,
//! request id, status) feeds the next. Any stage failure ends the run.
//! Exhausting the poll budget is not a failure: the run ends reporting the
//! last observed status.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::warn;

use crate::api::{RequestStatus, ScoringApi, ServiceError, StatusReport};
use crate::config::ServiceConfig;
use crate::criteria::CriteriaDocument;
use crate::runtime::Runtime;

/// How persistently to poll for completion.
#[derive(Debug, Clone)]
pub struct PollPlan {
    pub max_attempts: usize,
    pub interval: Duration,
}

impl Default for PollPlan {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            interval: Duration::from_secs(30),
        }
    }
}

/// Result of the polling stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Terminal success; the result document is ready to fetch.
    Completed,
    /// The attempt budget ran out; carries the last observed status.
    TimedOut(StatusReport),
}

/// Final outcome of a full workflow run.
#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The result document was written to the given path.
    Completed(PathBuf),
    /// The request never reached a terminal state within the poll budget.
    TimedOut(StatusReport),
}

/// Query the request status until it turns terminal or the budget runs out.
///
/// No delay follows the final attempt: a plan of N attempts performs at most
/// N queries and N-1 waits. Terminal failure states (`error`, `hold`) and
/// failed status queries abort immediately.
#[tracing::instrument(skip(runtime, api, token))]
pub async fn poll_until_terminal<R: Runtime>(
    runtime: &R,
    api: &dyn ScoringApi,
    token: &str,
    request_id: &str,
    plan: &PollPlan,
) -> Result<PollOutcome> {
    for attempt in 1..=plan.max_attempts {
        let report = api.get_status(token, request_id).await?;
        println!("Current status: {} - {}", report.status, report.message);

        if report.status == RequestStatus::Completed {
            return Ok(PollOutcome::Completed);
        }
        if report.status.is_failure() {
            return Err(ServiceError::TerminalStatus {
                status: report.status,
                message: report.message,
            }
            .into());
        }
        if let RequestStatus::Other(raw) = &report.status {
            warn!("Unrecognized status {:?}, treating as still in progress", raw);
        }

        if attempt == plan.max_attempts {
            return Ok(PollOutcome::TimedOut(report));
        }

        println!(
            "Waiting {} seconds before checking again...",
            plan.interval.as_secs()
        );
        runtime.sleep(plan.interval).await;
    }

    bail!("Poll plan must allow at least one attempt")
}

/// Fetch the result document and persist it as `response_{request_id}.json`
/// under `output_dir`, overwriting any previous file of that name.
///
/// A 200 response can still carry a service-side failure: a body with both
/// an `error` and a `status` key is reported as such and nothing is written.
#[tracing::instrument(skip(runtime, api, token))]
pub async fn retrieve_result<R: Runtime>(
    runtime: &R,
    api: &dyn ScoringApi,
    token: &str,
    request_id: &str,
    output_dir: &Path,
) -> Result<PathBuf> {
    let document = api.get_response(token, request_id).await?;

    if document.get("error").is_some() && document.get("status").is_some() {
        return Err(ServiceError::ResultError {
            error: field_text(&document, "error"),
            message: field_text(&document, "message"),
        }
        .into());
    }

    let pretty =
        serde_json::to_string_pretty(&document).context("Failed to serialize result document")?;
    let preview: String = pretty.chars().take(200).collect();
    println!("Retrieved response successfully!");
    println!("Result summary: {}...", preview);

    runtime.create_dir_all(output_dir)?;
    let path = output_dir.join(format!("response_{}.json", request_id));
    runtime.write(&path, pretty.as_bytes())?;
    println!("Complete response saved to {}", path.display());

    Ok(path)
}

/// Run the full four-stage workflow.
#[tracing::instrument(skip(runtime, api, config, criteria))]
pub async fn run<R: Runtime>(
    runtime: &R,
    api: &dyn ScoringApi,
    config: &ServiceConfig,
    criteria: &CriteriaDocument,
    plan: &PollPlan,
    output_dir: &Path,
) -> Result<RunOutcome> {
    println!("Authenticating...");
    let token = api.authenticate(&config.username, &config.password).await?;
    println!("Authentication successful!");

    println!("Uploading criteria...");
    let receipt = api
        .upload_criteria(&token, &config.customer_id, &config.gls, criteria)
        .await?;
    println!("Upload successful! Request ID: {}", receipt.request_id);

    println!("Checking status...");
    match poll_until_terminal(runtime, api, &token, &receipt.request_id, plan).await? {
        PollOutcome::Completed => {
            println!("Retrieving response data...");
            let path =
                retrieve_result(runtime, api, &token, &receipt.request_id, output_dir).await?;
            Ok(RunOutcome::Completed(path))
        }
        PollOutcome::TimedOut(report) => {
            println!(
                "Request did not complete within the expected time. Current status: {}",
                report.status
            );
            Ok(RunOutcome::TimedOut(report))
        }
    }
}

/// Render a result-document field for diagnostics. Strings print bare; any
/// other JSON value prints in its serialized form.
fn field_text(document: &serde_json::Value, key: &str) -> String {
    match document.get(key) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
