//! Cursor variables declared by a query builder
//!
//! Cursors are matched positionally: the n-th declared cursor belongs to the n-th
//! paginated collection found in the response.

use std::collections::HashMap;

use serde_json::Value;

use crate::page_info::{CursorValue, PageInfoContext};
use crate::transport::Variables;
use crate::{GraphQLError, Result};

fn as_cursor_variable(name: &str) -> String {
    format!("${}", name)
}

/// Declares cursor variables while a query is being built
#[derive(Debug, Default)]
pub struct CursorFactory {
    cursors: Vec<String>,
}

impl CursorFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a cursor named `cursor<N>` and return its variable reference
    pub fn create(&mut self) -> String {
        let name = format!("cursor{}", self.cursors.len() + 1);
        self.create_named(name)
    }

    /// Declare a cursor with an explicit name and return its variable reference
    pub fn create_named(&mut self, name: impl Into<String>) -> String {
        let name = name.into();
        let variable = as_cursor_variable(&name);
        self.cursors.push(name);
        variable
    }

    /// Declared cursor names, in declaration order
    pub fn cursors(&self) -> &[String] {
        &self.cursors
    }
}

/// Tracks the latest value of every declared cursor across page transitions
#[derive(Debug, Default)]
pub struct CursorHandler {
    cursors: Vec<String>,
    last_values: HashMap<String, CursorValue>,
}

impl CursorHandler {
    pub fn new(factory: CursorFactory) -> Self {
        Self {
            cursors: factory.cursors,
            last_values: HashMap::new(),
        }
    }

    pub fn cursors(&self) -> &[String] {
        &self.cursors
    }

    /// Latest recorded value of a cursor, `None` if it was never observed
    pub fn last_value(&self, name: &str) -> Option<&CursorValue> {
        self.last_values.get(name)
    }

    /// Record the cursors of a freshly fetched page
    ///
    /// Cursors without a matching page info are left untouched. A collection that
    /// still reports another page but returns the cursor recorded last time fails with
    /// [`GraphQLError::MissingCursorChange`], since requesting it again would loop.
    pub fn extract_next_cursors(&mut self, contexts: &[PageInfoContext]) -> Result<Variables> {
        for (name, context) in self.cursors.iter().zip(contexts) {
            let page_info = &context.page_info;
            let value = page_info.cursor();

            if page_info.has_another_page() && self.last_values.get(name) == Some(value) {
                return Err(GraphQLError::MissingCursorChange {
                    path: context.path_in_query.clone(),
                    cursor_name: name.clone(),
                    cursor_value: value.clone(),
                });
            }

            tracing::trace!(cursor = %name, value = ?value, "cursor advanced");
            self.last_values.insert(name.clone(), value.clone());
        }

        Ok(self.variables())
    }

    /// All recorded cursor values as query variables
    pub fn variables(&self) -> Variables {
        self.cursors
            .iter()
            .filter_map(|name| {
                let value = self.last_values.get(name)?;
                Some((name.clone(), value.clone().map_or(Value::Null, Value::String)))
            })
            .collect()
    }

    /// Variable declarations for all cursors, e.g. `$cursor1: String, $cursor2: String`
    pub fn generate_query_statement(&self) -> String {
        self.cursors
            .iter()
            .map(|name| format!("{}: String", as_cursor_variable(name)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
