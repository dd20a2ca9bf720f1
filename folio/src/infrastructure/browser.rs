// src/infrastructure/browser.rs
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, instrument};

/// Open a rendered page with the platform's default handler.
///
/// The path is resolved first, so a missing file fails here instead of in
/// the launched browser.
#[instrument(level = "debug")]
pub fn open_in_browser(path: &Path) -> Result<()> {
    let absolute = std::fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    debug!(?absolute, "Launching default handler");
    open::that(&absolute).with_context(|| format!("Failed to open {}", absolute.display()))
}
