use std::future::Future;
use std::time::Duration;

/// Verdict of one attempt inside [`retry_with_backoff`].
pub enum Attempt<T> {
    /// The operation reached a terminal state; stop retrying.
    Done(T),
    /// The designated retryable condition was hit; back off and go again.
    RetryAfterBackoff,
}

/// Sleep applied after attempt `attempt` (0-based) asks for a retry.
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(1u64 << attempt)
}

/// Runs `op` up to `max_attempts` times, sleeping `2^attempt` seconds after
/// each attempt that returns [`Attempt::RetryAfterBackoff`]. Returns `None`
/// once the budget is exhausted; the final backoff sleep still happens before
/// giving up.
pub async fn retry_with_backoff<T, F, Fut>(max_attempts: u32, mut op: F) -> Option<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Attempt<T>>,
{
    for attempt in 0..max_attempts {
        match op(attempt).await {
            Attempt::Done(value) => return Some(value),
            Attempt::RetryAfterBackoff => {
                tokio::time::sleep(backoff_delay(attempt)).await;
            }
        }
    }
    None
}
