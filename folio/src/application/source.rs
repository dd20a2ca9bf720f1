// src/application/source.rs
use crate::domain::{Block, DomainError, Page, Paginated};
use async_trait::async_trait;
use tracing::debug;

/// Read access to a content database.
///
/// Each call returns one page of a cursor-paginated listing; the free
/// functions below walk the cursors.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Query the database rows, most recently edited first.
    async fn query_database(
        &self,
        database_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated<Page>, DomainError>;

    /// List the direct children of a block or page.
    async fn block_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated<Block>, DomainError>;
}

/// Collect every row of the database.
pub async fn fetch_all_pages<S: ContentSource + ?Sized>(
    source: &S,
    database_id: &str,
) -> Result<Vec<Page>, DomainError> {
    let mut pages = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let listing = source.query_database(database_id, cursor.as_deref()).await?;
        let next = listing.continuation().map(str::to_string);
        pages.extend(listing.results);
        match next {
            Some(c) => cursor = Some(c),
            None => break,
        }
    }
    debug!(count = pages.len(), "Fetched database pages");
    Ok(pages)
}

/// Collect every direct child of a block.
pub async fn fetch_block_children<S: ContentSource + ?Sized>(
    source: &S,
    block_id: &str,
) -> Result<Vec<Block>, DomainError> {
    let mut blocks = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let listing = source.block_children(block_id, cursor.as_deref()).await?;
        let next = listing.continuation().map(str::to_string);
        blocks.extend(listing.results);
        match next {
            Some(c) => cursor = Some(c),
            None => break,
        }
    }
    Ok(blocks)
}
