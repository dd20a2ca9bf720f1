// src/application/exporter.rs
use crate::application::properties::PropertyMapper;
use crate::application::source::{fetch_all_pages, ContentSource};
use crate::application::transcoder::Transcoder;
use crate::domain::{Artifact, DomainError, Page, ProjectRecord};
use crate::infrastructure::config::TableStyle;
use futures::future::join_all;
use tracing::{info, instrument, warn};

/// Builds the artifact for a whole database.
pub struct Exporter<'a, S: ContentSource + ?Sized> {
    source: &'a S,
    mapper: PropertyMapper,
    table_style: TableStyle,
}

impl<'a, S: ContentSource + ?Sized> Exporter<'a, S> {
    pub fn new(source: &'a S, mapper: PropertyMapper, table_style: TableStyle) -> Self {
        Self {
            source,
            mapper,
            table_style,
        }
    }

    /// Fetch every row, then transcode all page bodies concurrently.
    ///
    /// A failing database query aborts the export. A failing page body only
    /// empties that project's content.
    #[instrument(level = "debug", skip(self))]
    pub async fn export(&self, database_id: &str) -> Result<Artifact, DomainError> {
        let pages = fetch_all_pages(self.source, database_id).await?;
        info!(pages = pages.len(), "Fetched database rows");

        let transcoder = Transcoder::new(self.source, self.table_style);
        let projects = join_all(pages.iter().map(|page| self.project(&transcoder, page))).await;

        Ok(Artifact::new(projects))
    }

    async fn project(&self, transcoder: &Transcoder<'_, S>, page: &Page) -> ProjectRecord {
        let mut record = self.mapper.map(page);
        record.content = match transcoder.page_content(&page.id).await {
            Ok(content) => content,
            Err(e) => {
                warn!(page_id = %page.id, error = %e, "Failed to fetch page content, leaving it empty");
                Vec::new()
            }
        };
        record
    }
}
