//! In-process transport backed by an async-graphql schema
//!
//! Lets services paginate through their own (or an embedded) schema without an HTTP
//! round-trip, e.g. for backfills and tests.

use async_graphql::{ObjectType, Request, Schema, ServerError, SubscriptionType};
use async_trait::async_trait;
use serde_json::Value;

use crate::transport::{ErrorLocation, GraphQLRequest, ResponseError, Transport, TransportError, Variables};

/// Executes paginated queries against an async-graphql [`Schema`]
pub struct SchemaTransport<Query, Mutation, Subscription> {
    schema: Schema<Query, Mutation, Subscription>,
}

impl<Query, Mutation, Subscription> SchemaTransport<Query, Mutation, Subscription> {
    pub fn new(schema: Schema<Query, Mutation, Subscription>) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema<Query, Mutation, Subscription> {
        &self.schema
    }
}

fn to_response_error(error: ServerError) -> ResponseError {
    ResponseError {
        locations: error
            .locations
            .iter()
            .map(|pos| ErrorLocation {
                line: pos.line,
                column: pos.column,
            })
            .collect(),
        path: error
            .path
            .iter()
            .filter_map(|segment| serde_json::to_value(segment).ok())
            .collect(),
        message: error.message,
    }
}

#[async_trait]
impl<Query, Mutation, Subscription> Transport for SchemaTransport<Query, Mutation, Subscription>
where
    Query: ObjectType + 'static,
    Mutation: ObjectType + 'static,
    Subscription: SubscriptionType + 'static,
{
    type Error = TransportError;

    async fn execute(&self, query: &str, variables: &Variables) -> Result<Value, TransportError> {
        let echo = GraphQLRequest {
            query: query.to_string(),
            variables: variables.clone(),
        };

        let request = Request::new(query).variables(async_graphql::Variables::from_json(
            Value::Object(variables.clone()),
        ));
        let response = self.schema.execute(request).await;

        if !response.errors.is_empty() {
            let errors = response.errors.into_iter().map(to_response_error).collect();
            return Err(TransportError::from_response_errors(errors, echo));
        }

        response
            .data
            .into_json()
            .map_err(|e| TransportError::request_failed(e.to_string(), echo))
    }
}
