//! Test support: a recording transport and generated response pages

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::transport::{GraphQLRequest, Transport, TransportError, Variables};

#[derive(Clone, Copy)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum DataKey {
    Nodes,
    Edges,
}

/// `amount` pages of `repository.issues`, one issue per page
pub fn response_pages(amount: usize, direction: Direction, data_keys: &[DataKey]) -> Vec<Value> {
    (1..=amount)
        .map(|page| {
            let page_info = match direction {
                Direction::Forward => json!({
                    "hasNextPage": page < amount,
                    "endCursor": format!("endCursor{}", page),
                }),
                Direction::Backward => json!({
                    "hasPreviousPage": page < amount,
                    "startCursor": format!("startCursor{}", page),
                }),
            };

            let issue = json!({ "title": format!("Issue {}", page) });
            let mut issues = serde_json::Map::new();
            if data_keys.contains(&DataKey::Nodes) {
                issues.insert("nodes".to_string(), json!([issue.clone()]));
            }
            if data_keys.contains(&DataKey::Edges) {
                issues.insert("edges".to_string(), json!([{ "node": issue }]));
            }
            issues.insert("pageInfo".to_string(), page_info);

            json!({ "repository": { "issues": issues } })
        })
        .collect()
}

/// Replays canned responses and records every request it receives
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<Value, TransportError>>>,
    requests: Mutex<Vec<GraphQLRequest>>,
}

impl MockTransport {
    pub fn new(responses: Vec<Value>) -> Self {
        Self::with_results(responses.into_iter().map(Ok).collect())
    }

    pub fn with_results(results: Vec<Result<Value, TransportError>>) -> Self {
        Self {
            responses: Mutex::new(results.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Request of the `n`-th call, counting from 1
    pub fn request(&self, n: usize) -> GraphQLRequest {
        self.requests.lock().unwrap()[n - 1].clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    type Error = TransportError;

    async fn execute(&self, query: &str, variables: &Variables) -> Result<Value, TransportError> {
        let request = GraphQLRequest {
            query: query.to_string(),
            variables: variables.clone(),
        };
        self.requests.lock().unwrap().push(request.clone());

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::request_failed(
                    "no more mocked responses",
                    request,
                ))
            })
    }
}
