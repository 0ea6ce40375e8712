//! Automatic pagination: fetch every page and merge them into one response

use serde_json::{Map, Value};

use crate::cursor::CursorFactory;
use crate::iterator::PageIterator;
use crate::merge::merge_responses;
use crate::options::PaginateOptions;
use crate::transport::{Transport, Variables};
use crate::PaginateError;

/// Paginates queries over a transport
///
/// Each call to [`Paginator::paginate`] or [`Paginator::iterator`] is an independent
/// session with its own cursor state.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    transport: T,
    options: PaginateOptions,
}

impl<T: Transport> Paginator<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            options: PaginateOptions::default(),
        }
    }

    /// Create a paginator with validated options
    pub fn with_options(transport: T, options: PaginateOptions) -> crate::Result<Self> {
        options.validate()?;
        Ok(Self { transport, options })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn options(&self) -> &PaginateOptions {
        &self.options
    }

    /// Step through the raw pages of a query
    pub fn iterator<B>(&self, query_builder: B, initial_parameters: Variables) -> PageIterator<'_, T>
    where
        B: FnOnce(&mut CursorFactory) -> String,
    {
        PageIterator::new(
            &self.transport,
            query_builder,
            initial_parameters,
            self.options,
        )
    }

    /// Fetch all pages of a query and merge them
    ///
    /// List fields (`nodes`, `edges`) of every paginated collection are concatenated
    /// in page order; each collection's `pageInfo` is the one of the last page. On
    /// failure nothing is returned.
    pub async fn paginate<B>(
        &self,
        query_builder: B,
        initial_parameters: Variables,
    ) -> Result<Value, PaginateError<T::Error>>
    where
        B: FnOnce(&mut CursorFactory) -> String,
    {
        let mut pages = self.iterator(query_builder, initial_parameters);
        let mut merged = Value::Object(Map::new());

        while let Some(page) = pages.next_page().await {
            merged = merge_responses(merged, page?)?;
        }

        Ok(merged)
    }

    /// [`Paginator::paginate`] for a query that declares its own variables
    pub async fn paginate_query(
        &self,
        query: &str,
        initial_parameters: Variables,
    ) -> Result<Value, PaginateError<T::Error>> {
        self.paginate(|_| query.to_string(), initial_parameters)
            .await
    }
}
