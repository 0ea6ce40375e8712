//! # pleme-graphql-paginate
//!
//! GraphQL client utilities for Pleme platform services.
//!
//! ## Features
//!
//! - **Automatic Pagination** - Follows `pageInfo` cursors until every collection is exhausted
//! - **Response Merging** - Concatenates `nodes`/`edges` of all pages into one response
//! - **Page Iterator** - Step-wise, pull-based access to the raw pages
//! - **Schema Transport** - Runs paginated queries against an in-process async-graphql schema
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pleme_graphql_paginate::{Paginator, Variables};
//! use serde_json::Value;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = |query: String, variables: Variables| async move {
//!     // send `query` and `variables` to the server
//!     # let _ = (query, variables);
//!     Ok::<Value, std::io::Error>(Value::Null)
//! };
//!
//! let paginator = Paginator::new(transport);
//! let issues = paginator
//!     .paginate(
//!         |cursor| {
//!             format!(
//!                 r#"{{
//!                   repository(owner: "octokit", name: "rest.js") {{
//!                     issues(first: 10, after: {}) {{
//!                       nodes {{ title }}
//!                       pageInfo {{ hasNextPage endCursor }}
//!                     }}
//!                   }}
//!                 }}"#,
//!                 cursor.create()
//!             )
//!         },
//!         Variables::new(),
//!     )
//!     .await?;
//! # let _ = issues;
//! # Ok(())
//! # }
//! ```

pub mod object_path;
pub mod page_info;
pub mod merge;
pub mod cursor;
pub mod iterator;
pub mod paginate;
pub mod transport;
pub mod options;
#[cfg(feature = "schema")]
pub mod schema;

#[cfg(test)]
pub(crate) mod testing;

pub use cursor::{CursorFactory, CursorHandler};
pub use iterator::{PageIterator, PageStream};
pub use merge::merge_responses;
pub use options::PaginateOptions;
pub use page_info::{CursorValue, PageInfo, PageInfoContext};
pub use paginate::Paginator;
pub use transport::{GraphQLRequest, ResponseError, Transport, TransportError, Variables};
#[cfg(feature = "schema")]
pub use schema::SchemaTransport;

use serde_json::Value;
use thiserror::Error;

/// Pagination errors raised by the cursor tracking and merge engine
#[derive(Error, Debug)]
pub enum GraphQLError {
    #[error(
        "No pageInfo property found in response. Please make sure to specify the pageInfo in your query. Response-Data: {}",
        pretty_json(.response)
    )]
    MissingPageInfo { response: Value },

    #[error(
        "The cursor at \"{}\" did not change its value \"{}\" after a page transition (variable ${cursor_name}). Please make sure that your query is set up correctly.",
        .path.join("."),
        display_cursor(.cursor_value)
    )]
    MissingCursorChange {
        path: Vec<String>,
        cursor_name: String,
        cursor_value: CursorValue,
    },

    #[error("Invalid pageInfo at \"{}\": {reason}", .path.join("."))]
    InvalidPageInfo { path: Vec<String>, reason: String },

    #[error("Path \"{0}\" not found in response")]
    PathNotFound(String),

    #[error("Invalid pagination options: {0}")]
    InvalidOptions(String),
}

/// Error of a pagination session
///
/// Transport failures are carried as-is so callers see the collaborator's own error.
#[derive(Error, Debug)]
pub enum PaginateError<E> {
    #[error(transparent)]
    Pagination(#[from] GraphQLError),

    #[error(transparent)]
    Transport(E),
}

impl<E> PaginateError<E> {
    /// The transport error, if this failure came from the transport
    pub fn transport(&self) -> Option<&E> {
        match self {
            PaginateError::Transport(err) => Some(err),
            PaginateError::Pagination(_) => None,
        }
    }

    /// The pagination error, if this failure came from the engine itself
    pub fn pagination(&self) -> Option<&GraphQLError> {
        match self {
            PaginateError::Pagination(err) => Some(err),
            PaginateError::Transport(_) => None,
        }
    }
}

/// Result type for pagination operations
pub type Result<T> = std::result::Result<T, GraphQLError>;

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn display_cursor(value: &CursorValue) -> &str {
    value.as_deref().unwrap_or("null")
}
