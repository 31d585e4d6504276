//! Retry with exponential back-off and jitter for the GDELT client.
//!
//! The scoring engine itself never retries; transient fetch failures are
//! the source layer's problem, handled here before records ever reach the
//! engine.

use std::future::Future;
use std::time::Duration;

use crate::error::GdeltError;

/// Returns `true` for errors worth retrying after a back-off delay:
/// network-level failures (timeout, connection reset) and HTTP 5xx.
/// Deserialization failures are not retriable — the payload will not get
/// better on a second read.
pub(crate) fn is_retriable(err: &GdeltError) -> bool {
    match err {
        GdeltError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        GdeltError::Deserialize { .. } | GdeltError::InvalidBaseUrl(_) => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on
/// transient errors. Delays double per attempt from `backoff_base_ms`,
/// jittered ±25% and capped at 60 s. Non-retriable errors return
/// immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, GdeltError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GdeltError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "GDELT transient error — retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
