//! GraphQL request/response envelopes
//!
//! The remote service speaks plain GraphQL over HTTP: a JSON body with a
//! `query` document and a `variables` object, answered by `{data, errors}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single GraphQL operation ready to be sent over the wire
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    /// Operation name, used for logging only
    #[serde(skip)]
    pub name: &'static str,
    pub query: &'static str,
    pub variables: Value,
}

impl Operation {
    pub fn new(name: &'static str, query: &'static str, variables: Value) -> Self {
        Self {
            name,
            query,
            variables,
        }
    }
}

/// Error entry reported by a GraphQL server
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// Raw GraphQL response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlError>>,
}

impl GraphqlResponse {
    /// Extract the `data` object
    ///
    /// A response without `data` is a failed call; the joined error messages
    /// are returned so the caller can report them. Partial data alongside
    /// errors is accepted as-is.
    pub fn into_data(self) -> Result<Value, String> {
        match self.data {
            Some(data) if !data.is_null() => Ok(data),
            _ => {
                let messages = self
                    .errors
                    .unwrap_or_default()
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>();
                if messages.is_empty() {
                    Err("response contained no data".to_string())
                } else {
                    Err(messages.join("; "))
                }
            }
        }
    }
}
