//! Timeout enforcement for probe calls.
//!
//! # Responsibilities
//! - Wrap a probe future with an optional deadline
//! - Report expiry distinctly from the probe's own outcome
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - No deadline configured means the future runs to completion

use std::future::Future;
use std::time::Duration;
use tokio::time::error::Elapsed;

/// Run `fut`, giving up after `deadline` when one is set.
pub async fn with_deadline<F>(deadline: Option<Duration>, fut: F) -> Result<F::Output, Elapsed>
where
    F: Future,
{
    match deadline {
        Some(limit) => tokio::time::timeout(limit, fut).await,
        None => Ok(fut.await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_deadline_runs_to_completion() {
        let out = with_deadline(None, async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            7
        })
        .await;
        assert_eq!(out.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_deadline_expires() {
        let out = with_deadline(Some(Duration::from_millis(10)), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
        })
        .await;
        assert!(out.is_err());
    }
}
