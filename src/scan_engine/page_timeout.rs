//! Timeout utilities for browser operations
//!
//! Wraps an async operation with its own deadline. Each wrapped step runs on
//! an independent timer; nothing here is tied to the fetch timeout.

use anyhow::Result;
use std::future::Future;
use std::time::Duration;

/// Run `operation`, failing with a descriptive error once `timeout` elapses
///
/// # Returns
/// * `Ok(T)` - Operation completed successfully
/// * `Err` - Either the operation failed or the timeout was reached
pub async fn with_page_timeout<F, T>(
    operation: F,
    timeout: Duration,
    operation_name: &str,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => Err(anyhow::anyhow!("{operation_name} timeout after {timeout:?}")),
    }
}
