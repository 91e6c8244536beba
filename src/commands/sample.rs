//! The `sample` command: print a starting-point criteria document.

use anyhow::{Context, Result};

use crate::criteria::CriteriaDocument;

pub fn sample() -> Result<()> {
    let document = CriteriaDocument::sample();
    let text = serde_json::to_string_pretty(&document)
        .context("Failed to serialize sample criteria document")?;
    println!("{}", text);
    Ok(())
}
