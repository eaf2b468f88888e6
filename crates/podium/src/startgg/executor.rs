//! Retry-until-success execution of single remote calls
//!
//! Every failure of a call (transport, HTTP status, GraphQL errors, or a
//! response that does not match the expected shape) is retried after an
//! exponential backoff delay. With the default [`BackoffPolicy`] the call
//! never fails; callers can bound it with a maximum number of attempts or
//! interrupt it through a [`CancellationToken`].

use podium_core::backoff::BackoffPolicy;
use podium_core::graphql::Operation;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use super::pacer::Pacer;
use super::transport::Transport;
use crate::prelude::*;

pub struct BackoffExecutor<T> {
    transport: T,
    policy: BackoffPolicy,
    pacer: Pacer,
    cancel: CancellationToken,
}

impl<T: Transport> BackoffExecutor<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            policy: BackoffPolicy::default(),
            pacer: Pacer::unlimited(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_policy(mut self, policy: BackoffPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Pace every request attempt, retries included
    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn policy(&self) -> &BackoffPolicy {
        &self.policy
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute `operation` and decode its data as `R`, retrying on any failure
    pub async fn execute<R: DeserializeOwned>(&self, operation: &Operation) -> Result<R, Error> {
        let mut failures: u32 = 0;

        loop {
            if self.cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            self.pacer.pace().await;

            let error = match self.transport.execute(operation).await {
                Ok(data) => match serde_json::from_value::<R>(data) {
                    Ok(response) => return Ok(response),
                    Err(e) => Error::Transport(format!(
                        "Unexpected {} response shape: {}",
                        operation.name, e
                    )),
                },
                Err(e) => e,
            };

            failures = failures.saturating_add(1);
            if !self.policy.allows_retry(failures) {
                log::error!("{} failed after {} attempts: {}", operation.name, failures, error);
                return Err(Error::RetriesExhausted {
                    attempts: failures,
                    last_error: error.to_string(),
                });
            }

            let delay = self.policy.delay_for(failures);
            log::warn!(
                "{} attempt {} failed, retrying in {:?}: {}",
                operation.name,
                failures,
                delay,
                error
            );

            tokio::select! {
                _ = self.cancel.cancelled() => return Err(Error::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}
