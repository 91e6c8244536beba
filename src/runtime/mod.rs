//! Runtime abstraction for system operations.
//!
//! A trait-based seam over the filesystem and the clock, so the workflow can
//! be tested without touching either. The poll delay goes through [`Runtime::sleep`]
//! for the same reason: tests assert on how often the workflow waited, not on
//! wall-clock time.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Runtime: Send + Sync {
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Suspend the workflow for the given duration.
    async fn sleep(&self, duration: Duration);
}

pub struct RealRuntime;

#[async_trait]
impl Runtime for RealRuntime {
    #[tracing::instrument(skip(self))]
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.display()))
    }

    #[tracing::instrument(skip(self, contents))]
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents)
            .with_context(|| format!("Failed to write file {}", path.display()))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
        Ok(())
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
