//! Page-by-page execution of a paginated query
//!
//! Every pull sends one request. The iterator is single-use: once it reports the
//! last page or fails, it stays exhausted.

use std::pin::Pin;

use futures::Stream;
use serde_json::Value;

use crate::cursor::{CursorFactory, CursorHandler};
use crate::options::PaginateOptions;
use crate::page_info::{any_has_another_page, find_page_infos};
use crate::transport::{Transport, Variables};
use crate::{GraphQLError, PaginateError};

/// Raw pages as an asynchronous stream
pub type PageStream<'a, E> = Pin<Box<dyn Stream<Item = Result<Value, PaginateError<E>>> + Send + 'a>>;

const QUERY_KEYWORD: &str = "query";

/// Prefix `query` with a header declaring all cursor variables, unless it has one
pub fn ensure_query_header(query: String, cursors: &CursorHandler) -> String {
    if query.trim_start().starts_with(QUERY_KEYWORD) || cursors.cursors().is_empty() {
        return query;
    }

    tracing::debug!(
        variables = %cursors.generate_query_statement(),
        "adding query header for cursor variables"
    );
    format!(
        "{} paginate({}) {}",
        QUERY_KEYWORD,
        cursors.generate_query_statement(),
        query
    )
}

/// Lazily fetches the pages of one paginated query
pub struct PageIterator<'a, T: Transport> {
    transport: &'a T,
    query: String,
    cursors: CursorHandler,
    parameters: Variables,
    options: PaginateOptions,
    pages_fetched: usize,
    next_page_exists: bool,
}

impl<'a, T: Transport> PageIterator<'a, T> {
    /// Build the query once and prepare the first request
    ///
    /// `query_builder` must declare one cursor per paginated collection, in the order
    /// the collections appear in the response.
    pub fn new<B>(
        transport: &'a T,
        query_builder: B,
        initial_parameters: Variables,
        options: PaginateOptions,
    ) -> Self
    where
        B: FnOnce(&mut CursorFactory) -> String,
    {
        let mut factory = CursorFactory::new();
        let query = query_builder(&mut factory);
        let cursors = CursorHandler::new(factory);
        let query = ensure_query_header(query, &cursors);

        Self {
            transport,
            query,
            cursors,
            parameters: initial_parameters,
            options,
            pages_fetched: 0,
            next_page_exists: true,
        }
    }

    /// The query as sent to the transport
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Variables for the next request
    pub fn parameters(&self) -> &Variables {
        &self.parameters
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    pub fn is_exhausted(&self) -> bool {
        !self.next_page_exists
    }

    /// Fetch the next page
    ///
    /// Returns `None` once the previous page was the last one. After an error the
    /// iterator is exhausted as well.
    pub async fn next_page(&mut self) -> Option<Result<Value, PaginateError<T::Error>>> {
        if !self.next_page_exists {
            return None;
        }

        let page = self.fetch_page().await;
        if page.is_err() {
            self.next_page_exists = false;
        }
        Some(page)
    }

    async fn fetch_page(&mut self) -> Result<Value, PaginateError<T::Error>> {
        let response = self
            .transport
            .execute(&self.query, &self.parameters)
            .await
            .map_err(PaginateError::Transport)?;

        let contexts = find_page_infos(&response)?;
        if contexts.is_empty() {
            return Err(GraphQLError::MissingPageInfo { response }.into());
        }

        self.pages_fetched += 1;
        if self.pages_fetched == 1 && self.cursors.cursors().len() > contexts.len() {
            tracing::warn!(
                declared = self.cursors.cursors().len(),
                found = contexts.len(),
                "Fewer pageInfo objects than cursors found in the response. Nested pagination is not supported; make sure every paginated collection selects pageInfo"
            );
        }

        let next_cursors = self.cursors.extract_next_cursors(&contexts)?;
        self.parameters.extend(next_cursors);

        let has_next_page = any_has_another_page(&contexts);
        self.next_page_exists = has_next_page && !self.options.limit_reached(self.pages_fetched);

        tracing::debug!(
            page = self.pages_fetched,
            has_next_page,
            collections = contexts.len(),
            "fetched page"
        );
        Ok(response)
    }

    /// Turn the iterator into a [`Stream`] of raw pages
    pub fn into_stream(self) -> PageStream<'a, T::Error> {
        let mut pages = self;
        Box::pin(async_stream::stream! {
            while let Some(page) = pages.next_page().await {
                yield page;
            }
        })
    }
}
