// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use crate::cli::args::{Args, Command};
use anyhow::{Context, Result};
use application::{Exporter, PropertyMapper, Transcoder};
use infrastructure::artifact::{read_artifact, write_artifact, write_atomically};
use infrastructure::{Config, Credentials, NotionClient, TableStyle};
use ports::HtmlPresenter;
use std::path::Path;
use tracing::{debug, info};

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting folio with arguments");

    let config = Config::resolve(args.config.as_deref())?;
    debug!(?config, "Resolved configuration");

    match args.command {
        Command::Fetch { output, table_style } => {
            let target = config.output.with_overrides(output, None, table_style);
            handle_fetch(&config, &target.path, target.table_style).await
        }
        Command::Show { page_id, table_style } => {
            let target = config.output.with_overrides(None, None, table_style);
            handle_show(&config, &page_id, target.table_style).await
        }
        Command::Render { input, output, open } => {
            let target = config.output.with_overrides(input, output, None);
            handle_render(&config, &target.path, &target.html_path, open)
        }
    }
}

async fn handle_fetch(config: &Config, output: &Path, table_style: TableStyle) -> Result<()> {
    let credentials = Credentials::from_env()?;
    let client = NotionClient::new(&config.api, credentials.token);
    let exporter = Exporter::new(
        &client,
        PropertyMapper::new(config.properties.clone()),
        table_style,
    );

    info!(?table_style, "Exporting database");
    let artifact = exporter
        .export(&credentials.database_id)
        .await
        .context("Failed to export database")?;

    write_artifact(output, &artifact)?;
    println!(
        "Wrote {} projects → {}",
        artifact.projects.len(),
        output.display()
    );
    Ok(())
}

async fn handle_show(config: &Config, page_id: &str, table_style: TableStyle) -> Result<()> {
    let credentials = Credentials::from_env()?;
    let client = NotionClient::new(&config.api, credentials.token);
    let transcoder = Transcoder::new(&client, table_style);

    info!(page_id, "Transcoding page");
    let content = transcoder
        .page_content(page_id)
        .await
        .with_context(|| format!("Failed to fetch content of page {page_id}"))?;

    for line in content {
        println!("{line}");
    }
    Ok(())
}

fn handle_render(config: &Config, input: &Path, output: &Path, open: bool) -> Result<()> {
    let artifact = read_artifact(input)?;
    info!(projects = artifact.projects.len(), ?input, "Rendering artifact");

    let html = HtmlPresenter::new(config.display.clone()).render(&artifact);
    write_atomically(output, html.as_bytes())?;
    println!("Rendered {} projects → {}", artifact.projects.len(), output.display());

    if open {
        infrastructure::browser::open_in_browser(output)?;
    }
    Ok(())
}

#[cfg(test)]
/// must be public to be used from integration tests
mod tests {
    use crate::util::testing;
    #[ctor::ctor]
    fn init() {
        testing::init_test_setup().expect("Failed to initialize test setup");
    }
}
