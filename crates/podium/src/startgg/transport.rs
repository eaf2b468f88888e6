use std::future::Future;

use podium_core::graphql::{GraphqlResponse, Operation};
use serde_json::Value;

use super::{create_authenticated_client, StartggConfig};
use crate::prelude::*;

/// Executes one GraphQL operation and returns its `data` object
///
/// Any failure is a [`Error::Transport`]; retrying is the caller's concern.
pub trait Transport: Send + Sync {
    fn execute(&self, operation: &Operation) -> impl Future<Output = Result<Value, Error>> + Send;
}

/// GraphQL over HTTP POST
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &StartggConfig) -> Result<Self> {
        Ok(Self {
            client: create_authenticated_client(config)?,
            endpoint: config.endpoint.clone(),
        })
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, operation: &Operation) -> Result<Value, Error> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(operation)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Failed to send {}: {}", operation.name, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transport(format!(
                "{} failed [{}]: {}",
                operation.name, status, body
            )));
        }

        let envelope: GraphqlResponse = response.json().await.map_err(|e| {
            Error::Transport(format!("Failed to parse {} response: {}", operation.name, e))
        })?;

        envelope
            .into_data()
            .map_err(|message| Error::Transport(format!("{} failed: {}", operation.name, message)))
    }
}
