//! The `fetch` command: retrieve and persist the result of a completed
//! request without re-running the submission workflow.

use std::path::Path;

use anyhow::Result;

use crate::api::ScoringApi;
use crate::runtime::Runtime;
use crate::workflow;

#[tracing::instrument(skip(runtime, api, password))]
pub async fn fetch<R: Runtime>(
    runtime: &R,
    api: &dyn ScoringApi,
    username: &str,
    password: &str,
    request_id: &str,
    output_dir: &Path,
) -> Result<()> {
    let token = api.authenticate(username, password).await?;
    println!("Retrieving response data...");
    workflow::retrieve_result(runtime, api, &token, request_id, output_dir).await?;
    Ok(())
}
