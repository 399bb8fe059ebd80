use std::fmt::Display;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Backoff schedule for transient transport failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Sleep before each retry; its length is the number of retries.
    pub delays: Vec<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delays: vec![Duration::from_millis(500), Duration::from_secs(1)],
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retries.
    #[must_use]
    pub const fn none() -> Self {
        Self { delays: Vec::new() }
    }

    #[must_use]
    pub fn max_attempts(&self) -> usize {
        self.delays.len() + 1
    }
}

/// Retry an async operation with backoff.
///
/// # Arguments
/// * `operation` - The async operation to retry
/// * `policy` - Delays between attempts
/// * `is_transient` - Errors for which this returns `false` are returned at once
///
/// # Returns
/// The result of the operation if successful, or the last error if all retries fail
pub async fn retry_with_backoff<F, Fut, T, E, R>(
    mut operation: F,
    policy: &RetryPolicy,
    is_transient: R,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: Display,
    R: Fn(&E) -> bool,
{
    let total = policy.max_attempts();
    let mut delays = policy.delays.iter();

    let mut attempt = 0;
    loop {
        attempt += 1;
        let error = match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };

        let Some(delay) = delays.next().filter(|_| is_transient(&error)) else {
            return Err(error);
        };

        warn!(
            "Request failed (attempt {attempt}/{total}): {error}. Retrying after {}ms...",
            delay.as_millis()
        );
        sleep(*delay).await;
    }
}
