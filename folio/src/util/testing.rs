// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::env;
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::ContentSource;
use crate::domain::{Block, DomainError, Page, Paginated};

const CURSOR_PREFIX: &str = "cursor-";

/// Shared mock content source for testing the fetch pipeline
///
/// Results are configured as batches: batch `n` is served for cursor
/// `cursor-n` (the first batch for no cursor) and advertises the next batch
/// through `has_more`/`next_cursor`, just like the real API.
///
/// # Examples
///
/// ```
/// use folio::util::testing::{paragraph, MockContentSource};
///
/// let mock = MockContentSource::builder()
///     .with_children("page-1", vec![paragraph("b1", "Hello")])
///     .with_children_failure("page-2", 500)
///     .build();
/// ```
pub struct MockContentSource {
    query_batches: Vec<Vec<Page>>,
    query_failure: Option<u16>,
    children: HashMap<String, Vec<Vec<Block>>>,
    children_failures: HashMap<String, u16>,
    query_calls: Mutex<usize>,
    children_calls: Mutex<HashMap<String, usize>>,
}

impl MockContentSource {
    pub fn builder() -> MockContentSourceBuilder {
        MockContentSourceBuilder::new()
    }

    /// Number of database query requests served.
    pub fn query_calls(&self) -> usize {
        *self.query_calls.lock().unwrap()
    }

    /// Number of children requests served for a block.
    pub fn children_calls(&self, block_id: &str) -> usize {
        self.children_calls
            .lock()
            .unwrap()
            .get(block_id)
            .copied()
            .unwrap_or(0)
    }
}

fn batch_index(cursor: Option<&str>) -> usize {
    cursor
        .and_then(|c| c.strip_prefix(CURSOR_PREFIX))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

fn serve<T: Clone>(batches: &[Vec<T>], cursor: Option<&str>) -> Paginated<T> {
    let index = batch_index(cursor);
    let has_more = index + 1 < batches.len();
    Paginated {
        results: batches.get(index).cloned().unwrap_or_default(),
        has_more,
        next_cursor: has_more.then(|| format!("{CURSOR_PREFIX}{}", index + 1)),
    }
}

fn api_error(status: u16, method: &str, url: String) -> DomainError {
    DomainError::Api {
        status,
        method: method.to_string(),
        url,
        body: "mock failure".to_string(),
    }
}

#[async_trait]
impl ContentSource for MockContentSource {
    async fn query_database(
        &self,
        database_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated<Page>, DomainError> {
        *self.query_calls.lock().unwrap() += 1;
        if let Some(status) = self.query_failure {
            return Err(api_error(status, "POST", format!("/databases/{database_id}/query")));
        }
        Ok(serve(&self.query_batches, cursor))
    }

    async fn block_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated<Block>, DomainError> {
        *self
            .children_calls
            .lock()
            .unwrap()
            .entry(block_id.to_string())
            .or_insert(0) += 1;
        if let Some(&status) = self.children_failures.get(block_id) {
            return Err(api_error(status, "GET", format!("/blocks/{block_id}/children")));
        }
        let batches = self.children.get(block_id).map(Vec::as_slice).unwrap_or(&[]);
        Ok(serve(batches, cursor))
    }
}

/// Builder for MockContentSource
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockContentSourceBuilder {
    query_batches: Vec<Vec<Page>>,
    query_failure: Option<u16>,
    children: HashMap<String, Vec<Vec<Block>>>,
    children_failures: HashMap<String, u16>,
}

impl MockContentSourceBuilder {
    pub fn new() -> Self {
        Self {
            query_batches: vec![],
            query_failure: None,
            children: HashMap::new(),
            children_failures: HashMap::new(),
        }
    }

    /// Database rows, served as a single batch
    pub fn with_pages(self, pages: Vec<Page>) -> Self {
        self.with_query_batches(vec![pages])
    }

    /// Database rows, split across cursor-linked batches
    pub fn with_query_batches(mut self, batches: Vec<Vec<Page>>) -> Self {
        self.query_batches = batches;
        self
    }

    /// Make every database query fail with the given HTTP status
    pub fn with_query_failure(mut self, status: u16) -> Self {
        self.query_failure = Some(status);
        self
    }

    /// Children of a block or page, served as a single batch
    pub fn with_children(self, block_id: &str, blocks: Vec<Block>) -> Self {
        self.with_children_batches(block_id, vec![blocks])
    }

    /// Children of a block or page, split across cursor-linked batches
    pub fn with_children_batches(mut self, block_id: &str, batches: Vec<Vec<Block>>) -> Self {
        self.children.insert(block_id.to_string(), batches);
        self
    }

    /// Make children requests for a block fail with the given HTTP status
    pub fn with_children_failure(mut self, block_id: &str, status: u16) -> Self {
        self.children_failures.insert(block_id.to_string(), status);
        self
    }

    pub fn build(self) -> MockContentSource {
        MockContentSource {
            query_batches: self.query_batches,
            query_failure: self.query_failure,
            children: self.children,
            children_failures: self.children_failures,
            query_calls: Mutex::new(0),
            children_calls: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MockContentSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Block of any type with the given payload.
pub fn block(id: &str, kind: &str, payload: Value, has_children: bool) -> Block {
    let mut value = json!({
        "object": "block",
        "id": id,
        "type": kind,
        "has_children": has_children,
    });
    value[kind] = payload;
    serde_json::from_value(value).expect("fixture block must deserialize")
}

pub fn paragraph(id: &str, text: &str) -> Block {
    block(
        id,
        "paragraph",
        json!({"rich_text": [{"plain_text": text}]}),
        false,
    )
}

pub fn table(id: &str, has_column_header: bool, has_row_header: bool) -> Block {
    block(
        id,
        "table",
        json!({
            "table_width": 2,
            "has_column_header": has_column_header,
            "has_row_header": has_row_header
        }),
        true,
    )
}

pub fn table_row(id: &str, cells: &[&str]) -> Block {
    let cells: Vec<Value> = cells
        .iter()
        .map(|c| json!([{"plain_text": c}]))
        .collect();
    block(id, "table_row", json!({ "cells": cells }), false)
}

/// Database row with a title and a status.
pub fn page(id: &str, title: &str, status: &str) -> Page {
    serde_json::from_value(json!({
        "object": "page",
        "id": id,
        "url": format!("https://www.notion.so/{id}"),
        "last_edited_time": "2024-05-01T10:00:00.000Z",
        "properties": {
            "Name": {"id": "title", "type": "title", "title": [{"plain_text": title}]},
            "Status": {"id": "s", "type": "status", "status": {"name": status}}
        }
    }))
    .expect("fixture page must deserialize")
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio", "h2"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[ctor::ctor]
    fn init() {
        init_test_setup().expect("Failed to initialize test setup");
    }

    #[tokio::test]
    async fn given_batches_when_querying_then_links_cursors() {
        let mock = MockContentSource::builder()
            .with_query_batches(vec![vec![page("a", "A", "Done")], vec![page("b", "B", "Done")]])
            .build();

        let first = mock.query_database("db", None).await.unwrap();
        assert!(first.has_more);
        assert_eq!(first.next_cursor.as_deref(), Some("cursor-1"));

        let second = mock.query_database("db", Some("cursor-1")).await.unwrap();
        assert!(!second.has_more);
        assert_eq!(second.results[0].id, "b");
        assert_eq!(mock.query_calls(), 2);
    }

    #[tokio::test]
    async fn given_unknown_block_when_listing_children_then_returns_empty() {
        let mock = MockContentSource::builder().build();

        let listing = mock.block_children("nope", None).await.unwrap();

        assert!(listing.results.is_empty());
        assert!(!listing.has_more);
        assert_eq!(mock.children_calls("nope"), 1);
    }

    #[tokio::test]
    async fn given_configured_failure_when_listing_children_then_returns_api_error() {
        let mock = MockContentSource::builder()
            .with_children_failure("bad", 404)
            .build();

        let result = mock.block_children("bad", None).await;

        assert!(matches!(result, Err(DomainError::Api { status: 404, .. })));
    }

    #[test]
    fn given_row_fixture_when_building_then_holds_cells() {
        let row = table_row("r", &["a", "b"]);

        assert_eq!(row.type_name(), "table_row");
    }
}
