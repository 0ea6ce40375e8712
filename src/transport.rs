//! The GraphQL transport a pagination session sends its requests through

use std::future::Future;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Query variables
pub type Variables = Map<String, Value>;

/// Sends a query with variables and returns the response `data`
///
/// Errors are passed through pagination unmodified. Any
/// `Fn(String, Variables) -> impl Future<Output = Result<Value, E>>` is a transport.
#[async_trait]
pub trait Transport: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn execute(&self, query: &str, variables: &Variables) -> Result<Value, Self::Error>;
}

#[async_trait]
impl<F, Fut, E> Transport for F
where
    F: Fn(String, Variables) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, E>> + Send,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    async fn execute(&self, query: &str, variables: &Variables) -> Result<Value, E> {
        (self)(query.to_string(), variables.clone()).await
    }
}

/// A request as sent to the server, echoed back in errors
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(default)]
    pub variables: Variables,
}

/// Source location of a GraphQL error
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorLocation {
    pub line: usize,
    pub column: usize,
}

/// A single entry of a GraphQL response's `errors` list
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResponseError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<ErrorLocation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Value>,
}

/// Structured failure of a GraphQL request
#[derive(Error, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ResponseError>,
    pub request: GraphQLRequest,
}

impl TransportError {
    /// The server answered, but the query failed with GraphQL errors
    pub fn from_response_errors(errors: Vec<ResponseError>, request: GraphQLRequest) -> Self {
        let details = errors
            .iter()
            .map(|e| format!(" - {}", e.message))
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            message: format!("Request failed due to following response errors:\n{}", details),
            errors,
            request,
        }
    }

    /// The request failed before a GraphQL response was received
    pub fn request_failed(message: impl Into<String>, request: GraphQLRequest) -> Self {
        Self {
            message: message.into(),
            errors: Vec::new(),
            request,
        }
    }
}
