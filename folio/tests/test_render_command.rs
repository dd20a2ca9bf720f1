mod helpers;

use anyhow::Result;
use clap::Parser;
use folio::cli::args::Args;
use folio::infrastructure::artifact::write_artifact;
use folio::infrastructure::Config;
use helpers::{artifact, project, TestWorkspace};
use std::path::Path;

fn args(argv: &[&str]) -> Result<Args> {
    Ok(Args::try_parse_from(argv.iter().copied())?)
}

fn as_str(path: &Path) -> &str {
    path.to_str().expect("temp paths are utf-8")
}

/// Config file whose output section points into the workspace
fn write_config(workspace: &TestWorkspace) -> Result<std::path::PathBuf> {
    let mut config = Config::default();
    config.output.path = workspace.path("configured/projects.json");
    config.output.html_path = workspace.path("configured/projects.html");
    config
        .display
        .status_colors
        .insert("Done".to_string(), "#abcdef".to_string());

    let config_path = workspace.path("folio.toml");
    std::fs::write(&config_path, toml::to_string(&config)?)?;
    Ok(config_path)
}

#[tokio::test]
async fn given_artifact_when_running_render_then_writes_html_with_cards() -> Result<()> {
    // Arrange
    let workspace = TestWorkspace::new()?;
    let input = workspace.path("projects.json");
    let output = workspace.path("site/index.html");
    write_artifact(
        &input,
        &artifact(vec![project("p1", "Folio", &["Intro"]), project("p2", "Ledger", &[])]),
    )?;

    // Act
    folio::run(args(&["folio", "render", "-i", as_str(&input), "-o", as_str(&output)])?).await?;

    // Assert
    let html = std::fs::read_to_string(&output)?;
    assert_eq!(html.matches("<article class=\"card\">").count(), 2);
    assert!(html.contains("Folio"));
    assert!(html.contains("Ledger"));
    Ok(())
}

#[tokio::test]
async fn given_config_file_when_running_render_then_uses_configured_paths() -> Result<()> {
    // Arrange
    let workspace = TestWorkspace::new()?;
    let config_path = write_config(&workspace)?;
    write_artifact(
        workspace.path("configured/projects.json"),
        &artifact(vec![project("p1", "From config", &[])]),
    )?;

    // Act
    folio::run(args(&["folio", "-c", as_str(&config_path), "render"])?).await?;

    // Assert
    let html = std::fs::read_to_string(workspace.path("configured/projects.html"))?;
    assert!(html.contains("From config"));
    assert!(html.contains("background-color: #abcdef"));
    Ok(())
}

#[tokio::test]
async fn given_config_and_cli_paths_when_running_render_then_cli_wins() -> Result<()> {
    // Arrange
    let workspace = TestWorkspace::new()?;
    let config_path = write_config(&workspace)?;
    let input = workspace.path("cli/projects.json");
    let output = workspace.path("cli/projects.html");
    write_artifact(&input, &artifact(vec![project("p1", "From cli", &[])]))?;

    // Act
    folio::run(args(&[
        "folio",
        "render",
        "-c",
        as_str(&config_path),
        "-i",
        as_str(&input),
        "-o",
        as_str(&output),
    ])?)
    .await?;

    // Assert
    assert!(std::fs::read_to_string(&output)?.contains("From cli"));
    assert!(!workspace.path("configured/projects.html").exists());
    Ok(())
}

#[tokio::test]
async fn given_missing_artifact_when_running_render_then_fails() -> Result<()> {
    // Arrange
    let workspace = TestWorkspace::new()?;
    let input = workspace.path("absent.json");
    let output = workspace.path("out.html");

    // Act
    let result =
        folio::run(args(&["folio", "render", "-i", as_str(&input), "-o", as_str(&output)])?).await;

    // Assert
    assert!(result.is_err());
    assert!(!output.exists());
    Ok(())
}
