//! Bounded retry decorator for transports.
//!
//! Replaces ad-hoc retry-on-reset wrappers with an explicit policy object:
//! a fixed number of attempts with a fixed delay between them. On
//! exhaustion a *read* degrades to the empty-status sentinel (the core then
//! projects an empty state), while a *write* surfaces the last error, since
//! a lost write must not look like success.

use std::time::Duration;

use bulbctl_domain::status::RawStatus;

use crate::error::BulbError;
use crate::ports::{BulbTransport, DpsWrite};

/// How often and how patiently to retry a failing transport call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Zero behaves as one.
    pub max_attempts: u32,
    /// Pause between consecutive attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(250),
        }
    }
}

/// Transport decorator applying a [`RetryPolicy`] to every call.
pub struct Retrying<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T> Retrying<T> {
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    fn attempts(&self) -> u32 {
        self.policy.max_attempts.max(1)
    }
}

impl<T: BulbTransport> BulbTransport for Retrying<T> {
    async fn read_status(&self) -> Result<RawStatus, BulbError> {
        let attempts = self.attempts();
        for attempt in 1..=attempts {
            match self.inner.read_status().await {
                Ok(status) => return Ok(status),
                Err(err) => {
                    tracing::warn!(%err, attempt, attempts, "status read failed");
                    if attempt < attempts {
                        tokio::time::sleep(self.policy.delay).await;
                    }
                }
            }
        }

        tracing::warn!(attempts, "status retries exhausted, reporting empty status");
        Ok(RawStatus::default())
    }

    async fn send(&self, write: DpsWrite) -> Result<(), BulbError> {
        let attempts = self.attempts();
        let mut last_err: Option<BulbError> = None;

        for attempt in 1..=attempts {
            match self.inner.send(write.clone()).await {
                Ok(()) => return Ok(()),
                Err(err) => {
                    tracing::warn!(%err, attempt, attempts, "write failed");
                    last_err = Some(err);
                    if attempt < attempts {
                        tokio::time::sleep(self.policy.delay).await;
                    }
                }
            }
        }

        let source: Box<dyn std::error::Error + Send + Sync> = match last_err {
            Some(err) => Box::new(err),
            None => "no attempt was made".into(),
        };
        Err(BulbError::Unreachable { attempts, source })
    }
}
