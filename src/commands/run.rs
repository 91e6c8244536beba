//! The `run` command: the full authenticate/submit/poll/retrieve workflow.

use std::path::Path;

use anyhow::Result;

use crate::api::ScoringApi;
use crate::config::ServiceConfig;
use crate::criteria::CriteriaDocument;
use crate::runtime::Runtime;
use crate::workflow::{self, PollPlan};

#[tracing::instrument(skip(runtime, api, config, plan))]
pub async fn run<R: Runtime>(
    runtime: &R,
    api: &dyn ScoringApi,
    config: &ServiceConfig,
    criteria_path: &Path,
    plan: &PollPlan,
    output_dir: &Path,
) -> Result<()> {
    let text = runtime.read_to_string(criteria_path)?;
    let criteria = CriteriaDocument::from_json(&text)?;

    workflow::run(runtime, api, config, &criteria, plan, output_dir).await?;
    Ok(())
}
