use futures_retry_policies::retry_policies::RetryPolicies;
use futures_retry_policies::tokio::RetryFutureExt;
use futures_retry_policies::{RetryPolicy, ShouldRetry};
use retry_policies::policies::ExponentialBackoff;
use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;

pub enum MaybeRetry<T> {
    MaybeRetry(T),
    NoRetry(T),
}

impl<T> MaybeRetry<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::MaybeRetry(inner) | Self::NoRetry(inner) => inner,
        }
    }
}

impl<T> ShouldRetry for MaybeRetry<T> {
    fn should_retry(&self, _: u32) -> bool {
        matches!(self, Self::MaybeRetry(_))
    }
}

/// Backoff for idempotent requests. `max_retries == 0` sends every request exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    pub min_interval: Duration,
    pub max_interval: Duration,
    pub max_retries: u32,
    pub total_timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_millis(500),
            max_interval: Duration::from_secs(5),
            max_retries: 3,
            total_timeout: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    fn policy(&self) -> LoggedRetry<RetryPolicies<ExponentialBackoff>> {
        let backoff = ExponentialBackoff::builder()
            .retry_bounds(self.min_interval, self.max_interval)
            .build_with_max_retries(self.max_retries);
        LoggedRetry(RetryPolicies::new(backoff))
    }
}

struct LoggedRetry<P>(P);

impl<P: RetryPolicy<R>, R> RetryPolicy<R> for LoggedRetry<P> {
    fn should_retry(&mut self, result: R) -> ControlFlow<R, Duration> {
        let wait = self.0.should_retry(result)?;
        tracing::debug!(?wait, "retrying request");
        ControlFlow::Continue(wait)
    }
}

/// Runs `operation` until it succeeds, fails with [`MaybeRetry::NoRetry`] or the backoff gives up.
pub async fn with_backoff<F, Fut, T, E>(config: &RetryConfig, operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, MaybeRetry<E>>>,
{
    operation.retry(config.policy()).await.map_err(MaybeRetry::into_inner)
}
