//! The `status` command: a single status query for an existing request.

use anyhow::Result;

use crate::api::ScoringApi;

#[tracing::instrument(skip(api, password))]
pub async fn status(
    api: &dyn ScoringApi,
    username: &str,
    password: &str,
    request_id: &str,
) -> Result<()> {
    let token = api.authenticate(username, password).await?;
    let report = api.get_status(&token, request_id).await?;
    println!("Current status: {} - {}", report.status, report.message);
    Ok(())
}
