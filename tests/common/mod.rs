//! A small repository schema with forward and backward paginated collections

use async_graphql::{Context, EmptyMutation, EmptySubscription, Object, Schema, SimpleObject};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

pub type RepositorySchema = Schema<Query, EmptyMutation, EmptySubscription>;

/// Offset cursors, base64 encoded
pub struct CursorCodec;

impl CursorCodec {
    pub fn encode(offset: usize) -> String {
        BASE64.encode(offset.to_string().as_bytes())
    }

    pub fn decode(cursor: &str) -> async_graphql::Result<usize> {
        let bytes = BASE64.decode(cursor.as_bytes())?;
        Ok(String::from_utf8(bytes)?.parse()?)
    }
}

#[derive(SimpleObject, Clone)]
pub struct Issue {
    pub title: String,
}

#[derive(SimpleObject, Clone)]
pub struct Label {
    pub name: String,
}

#[derive(SimpleObject, Clone)]
pub struct Comment {
    pub body: String,
}

#[derive(SimpleObject)]
pub struct ForwardPageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(SimpleObject)]
pub struct BackwardPageInfo {
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
}

#[derive(SimpleObject)]
pub struct IssueConnection {
    pub nodes: Vec<Issue>,
    pub page_info: ForwardPageInfo,
}

#[derive(SimpleObject)]
pub struct LabelConnection {
    pub nodes: Vec<Label>,
    pub page_info: ForwardPageInfo,
}

#[derive(SimpleObject)]
pub struct CommentConnection {
    pub nodes: Vec<Comment>,
    pub page_info: BackwardPageInfo,
}

pub struct RepositoryData {
    pub issues: Vec<Issue>,
    pub labels: Vec<Label>,
    pub comments: Vec<Comment>,
}

fn forward_page<T: Clone>(
    items: &[T],
    first: usize,
    after: Option<String>,
) -> async_graphql::Result<(Vec<T>, ForwardPageInfo)> {
    let start = match after {
        Some(cursor) => CursorCodec::decode(&cursor)? + 1,
        None => 0,
    }
    .min(items.len());
    let end = (start + first).min(items.len());

    Ok((
        items[start..end].to_vec(),
        ForwardPageInfo {
            has_next_page: end < items.len(),
            end_cursor: (end > start).then(|| CursorCodec::encode(end - 1)),
        },
    ))
}

fn backward_page<T: Clone>(
    items: &[T],
    last: usize,
    before: Option<String>,
) -> async_graphql::Result<(Vec<T>, BackwardPageInfo)> {
    let end = match before {
        Some(cursor) => CursorCodec::decode(&cursor)?,
        None => items.len(),
    }
    .min(items.len());
    let start = end.saturating_sub(last);

    Ok((
        items[start..end].to_vec(),
        BackwardPageInfo {
            has_previous_page: start > 0,
            start_cursor: (end > start).then(|| CursorCodec::encode(start)),
        },
    ))
}

fn page_size(requested: i32) -> usize {
    requested.clamp(0, 100) as usize
}

pub struct Repository;

#[Object]
impl Repository {
    async fn name(&self) -> &str {
        "rest.js"
    }

    async fn issues(
        &self,
        ctx: &Context<'_>,
        first: i32,
        after: Option<String>,
    ) -> async_graphql::Result<IssueConnection> {
        let data = ctx.data::<RepositoryData>()?;
        let (nodes, page_info) = forward_page(&data.issues, page_size(first), after)?;
        Ok(IssueConnection { nodes, page_info })
    }

    async fn labels(
        &self,
        ctx: &Context<'_>,
        first: i32,
        after: Option<String>,
    ) -> async_graphql::Result<LabelConnection> {
        let data = ctx.data::<RepositoryData>()?;
        let (nodes, page_info) = forward_page(&data.labels, page_size(first), after)?;
        Ok(LabelConnection { nodes, page_info })
    }

    async fn comments(
        &self,
        ctx: &Context<'_>,
        last: i32,
        before: Option<String>,
    ) -> async_graphql::Result<CommentConnection> {
        let data = ctx.data::<RepositoryData>()?;
        let (nodes, page_info) = backward_page(&data.comments, page_size(last), before)?;
        Ok(CommentConnection { nodes, page_info })
    }
}

pub struct Query;

#[Object]
impl Query {
    async fn repository(&self) -> Repository {
        Repository
    }
}

pub fn repository_schema() -> RepositorySchema {
    let data = RepositoryData {
        issues: (1..=5)
            .map(|i| Issue {
                title: format!("Issue {}", i),
            })
            .collect(),
        labels: ["bug", "docs", "feature"]
            .iter()
            .map(|name| Label {
                name: name.to_string(),
            })
            .collect(),
        comments: (1..=3)
            .map(|i| Comment {
                body: format!("Comment {}", i),
            })
            .collect(),
    };

    Schema::build(Query, EmptyMutation, EmptySubscription)
        .data(data)
        .finish()
}
