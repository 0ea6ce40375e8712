//! Page information as reported by paginated collections
//!
//! A collection reports either forward (`hasNextPage`/`endCursor`) or backward
//! (`hasPreviousPage`/`startCursor`) pagination state. The shape is decided by the
//! presence of `hasNextPage`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::object_path::{find_path_to_property, visit};
use crate::{GraphQLError, Result};

/// Key under which collections report their pagination state
pub const PAGE_INFO_KEY: &str = "pageInfo";

/// Cursor value; `None` when the collection has no cursor yet (e.g. empty result)
pub type CursorValue = Option<String>;

/// Page information
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum PageInfo {
    #[serde(rename_all = "camelCase")]
    Forward {
        has_next_page: bool,
        end_cursor: CursorValue,
    },
    #[serde(rename_all = "camelCase")]
    Backward {
        has_previous_page: bool,
        start_cursor: CursorValue,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForwardFields {
    has_next_page: bool,
    #[serde(default)]
    end_cursor: CursorValue,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackwardFields {
    has_previous_page: bool,
    #[serde(default)]
    start_cursor: CursorValue,
}

impl PageInfo {
    /// Decode a raw `pageInfo` object found at `path`
    pub fn from_value(value: &Value, path: &[String]) -> Result<Self> {
        let invalid = |reason: String| GraphQLError::InvalidPageInfo {
            path: path.to_vec(),
            reason,
        };

        if !value.is_object() {
            return Err(invalid(format!("expected an object, found {}", value)));
        }

        if is_forward_search(value) {
            let fields = ForwardFields::deserialize(value)
                .map_err(|e| invalid(e.to_string()))?;
            Ok(PageInfo::Forward {
                has_next_page: fields.has_next_page,
                end_cursor: fields.end_cursor,
            })
        } else {
            let fields = BackwardFields::deserialize(value)
                .map_err(|e| invalid(e.to_string()))?;
            Ok(PageInfo::Backward {
                has_previous_page: fields.has_previous_page,
                start_cursor: fields.start_cursor,
            })
        }
    }

    /// Check if this is forward pagination
    pub fn is_forward(&self) -> bool {
        matches!(self, PageInfo::Forward { .. })
    }

    /// Cursor to request the following page with (`endCursor` or `startCursor`)
    pub fn cursor(&self) -> &CursorValue {
        match self {
            PageInfo::Forward { end_cursor, .. } => end_cursor,
            PageInfo::Backward { start_cursor, .. } => start_cursor,
        }
    }

    /// Whether the collection reports another page in its direction
    pub fn has_another_page(&self) -> bool {
        match self {
            PageInfo::Forward { has_next_page, .. } => *has_next_page,
            PageInfo::Backward {
                has_previous_page, ..
            } => *has_previous_page,
        }
    }
}

/// A page info together with the location of its collection in the response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfoContext {
    pub page_info: PageInfo,
    pub path_in_query: Vec<String>,
}

/// True iff the raw value owns a `hasNextPage` key
pub fn is_forward_search(page_info: &Value) -> bool {
    page_info.get("hasNextPage").is_some()
}

/// True iff at least one collection reports another page
pub fn any_has_another_page(contexts: &[PageInfoContext]) -> bool {
    contexts.iter().any(|ctx| ctx.page_info.has_another_page())
}

/// Collect the page info of every paginated collection in `response`
///
/// Collections are returned in depth-first order, which is the order cursors are
/// matched against. `pageInfo: null` is skipped.
pub fn find_page_infos(response: &Value) -> Result<Vec<PageInfoContext>> {
    let mut found = Vec::new();
    visit(response, |object, path| {
        if let Some(raw) = object.get(PAGE_INFO_KEY).filter(|v| !v.is_null()) {
            found.push((raw.clone(), path.to_vec()));
        }
    });

    found
        .into_iter()
        .map(|(raw, path_in_query)| -> Result<PageInfoContext> {
            Ok(PageInfoContext {
                page_info: PageInfo::from_value(&raw, &path_in_query)?,
                path_in_query,
            })
        })
        .collect()
}

/// Path to the first paginated collection, failing when the response has none
pub fn find_paginated_resource_path(response: &Value) -> Result<Vec<String>> {
    let path = find_path_to_property(response, PAGE_INFO_KEY);
    if path.is_empty() {
        return Err(GraphQLError::MissingPageInfo {
            response: response.clone(),
        });
    }
    Ok(path)
}
