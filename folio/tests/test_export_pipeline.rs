mod helpers;

use anyhow::Result;
use chrono::DateTime;
use folio::application::{Exporter, PropertyMapper};
use folio::infrastructure::artifact::write_artifact;
use folio::infrastructure::TableStyle;
use folio::ports::{parse_lines, HtmlPresenter, Segment};
use folio::util::testing::{block, page, paragraph, table, table_row, MockContentSource};
use helpers::TestWorkspace;
use serde_json::{json, Value};

fn read_json(path: &std::path::Path) -> Result<Value> {
    Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
}

#[tokio::test]
async fn given_zero_pages_when_exporting_then_writes_empty_artifact_with_timestamp() -> Result<()> {
    // Arrange
    let workspace = TestWorkspace::new()?;
    let output = workspace.path("public/projects.json");
    let source = MockContentSource::builder().build();
    let exporter = Exporter::new(&source, PropertyMapper::default(), TableStyle::Ascii);

    // Act
    let artifact = exporter.export("db").await?;
    write_artifact(&output, &artifact)?;

    // Assert
    let json = read_json(&output)?;
    assert_eq!(json["projects"], json!([]));
    let stamp = json["generatedAt"].as_str().expect("generatedAt is a string");
    assert!(DateTime::parse_from_rfc3339(stamp).is_ok());
    assert_eq!(source.query_calls(), 1);
    Ok(())
}

#[tokio::test]
async fn given_page_when_exporting_then_artifact_uses_camel_case_fields() -> Result<()> {
    // Arrange
    let workspace = TestWorkspace::new()?;
    let output = workspace.path("projects.json");
    let source = MockContentSource::builder()
        .with_pages(vec![page("p1", "Folio", "In progress")])
        .with_children("p1", vec![paragraph("b1", "Hello")])
        .build();
    let exporter = Exporter::new(&source, PropertyMapper::default(), TableStyle::Ascii);

    // Act
    write_artifact(&output, &exporter.export("db").await?)?;

    // Assert
    let project = &read_json(&output)?["projects"][0];
    assert_eq!(project["id"], "p1");
    assert_eq!(project["title"], "Folio");
    assert_eq!(project["status"], "In progress");
    assert_eq!(project["date"], Value::Null);
    assert_eq!(project["image"], Value::Null);
    assert_eq!(project["tags"], json!([]));
    assert_eq!(project["description"], "");
    assert_eq!(project["lastEdited"], "2024-05-01T10:00:00.000Z");
    assert_eq!(project["url"], "https://www.notion.so/p1");
    assert_eq!(project["content"], json!(["Hello"]));
    assert!(project.get("last_edited").is_none());
    Ok(())
}

#[tokio::test]
async fn given_paginated_sources_when_exporting_then_collects_every_batch() -> Result<()> {
    // Arrange
    let source = MockContentSource::builder()
        .with_query_batches(vec![
            vec![page("p1", "One", "Done")],
            vec![page("p2", "Two", "Done")],
        ])
        .with_children_batches(
            "p1",
            vec![vec![paragraph("a", "first")], vec![paragraph("b", "second")]],
        )
        .build();
    let exporter = Exporter::new(&source, PropertyMapper::default(), TableStyle::Ascii);

    // Act
    let artifact = exporter.export("db").await?;

    // Assert
    assert_eq!(artifact.projects.len(), 2);
    assert_eq!(artifact.projects[0].content, vec!["first", "second"]);
    assert_eq!(source.query_calls(), 2);
    assert_eq!(source.children_calls("p1"), 2);
    Ok(())
}

#[tokio::test]
async fn given_existing_artifact_when_exporting_again_then_overwrites_it() -> Result<()> {
    // Arrange
    let workspace = TestWorkspace::new()?;
    let output = workspace.path("projects.json");
    std::fs::write(&output, "stale")?;
    let source = MockContentSource::builder()
        .with_pages(vec![page("p1", "Fresh", "Done")])
        .build();
    let exporter = Exporter::new(&source, PropertyMapper::default(), TableStyle::Ascii);

    // Act
    write_artifact(&output, &exporter.export("db").await?)?;

    // Assert
    assert_eq!(read_json(&output)?["projects"][0]["title"], "Fresh");
    Ok(())
}

#[tokio::test]
async fn given_attachment_blocks_when_round_tripping_then_each_becomes_one_link() -> Result<()> {
    // Arrange
    let source = MockContentSource::builder()
        .with_pages(vec![page("p1", "Media", "Done")])
        .with_children(
            "p1",
            vec![
                block(
                    "img",
                    "image",
                    json!({"type": "external", "external": {"url": "https://img.example.com/a/shot.png"}, "caption": []}),
                    false,
                ),
                block(
                    "bm",
                    "bookmark",
                    json!({"url": "https://blog.example.com/post", "caption": [{"plain_text": "Write-up"}]}),
                    false,
                ),
            ],
        )
        .build();
    let exporter = Exporter::new(&source, PropertyMapper::default(), TableStyle::Ascii);

    // Act
    let artifact = exporter.export("db").await?;
    let segments = parse_lines(&artifact.projects[0].content);

    // Assert
    assert_eq!(segments.len(), 2);
    match &segments[0] {
        Segment::Attachment { url, label, .. } => {
            assert_eq!(url, "https://img.example.com/a/shot.png");
            assert_eq!(label, "Image");
        }
        other => panic!("Expected attachment, got {:?}", other),
    }
    match &segments[1] {
        Segment::Attachment { url, .. } => assert_eq!(url, "https://blog.example.com/post"),
        other => panic!("Expected attachment, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn given_multi_line_captions_when_round_tripping_then_each_still_becomes_one_link() -> Result<()> {
    // Arrange
    let source = MockContentSource::builder()
        .with_pages(vec![page("p1", "Captions", "Done")])
        .with_children(
            "p1",
            vec![
                block(
                    "img",
                    "image",
                    json!({
                        "type": "external",
                        "external": {"url": "https://img.example.com/a/shot.png"},
                        "caption": [{"plain_text": "first line\nsecond line"}]
                    }),
                    false,
                ),
                block(
                    "bm",
                    "bookmark",
                    json!({"url": "https://blog.example.com/post", "caption": [{"plain_text": "a\n\nb"}]}),
                    false,
                ),
            ],
        )
        .build();
    let exporter = Exporter::new(&source, PropertyMapper::default(), TableStyle::Ascii);

    // Act
    let artifact = exporter.export("db").await?;
    let content = &artifact.projects[0].content;
    let segments = parse_lines(content);

    // Assert
    assert_eq!(content.len(), 4);
    assert!(content.iter().all(|line| !line.contains('\n')));
    assert_eq!(segments.len(), 2);
    assert!(segments
        .iter()
        .all(|s| matches!(s, Segment::Attachment { .. })));
    Ok(())
}

#[tokio::test]
async fn given_html_table_style_when_round_tripping_then_parser_yields_markup() -> Result<()> {
    // Arrange
    let source = MockContentSource::builder()
        .with_pages(vec![page("p1", "Tables", "Done")])
        .with_children("p1", vec![table("t1", true, false)])
        .with_children(
            "t1",
            vec![table_row("r1", &["Name", "Value"]), table_row("r2", &["a<b", "1"])],
        )
        .build();
    let exporter = Exporter::new(&source, PropertyMapper::default(), TableStyle::Html);

    // Act
    let artifact = exporter.export("db").await?;
    let content = &artifact.projects[0].content;
    let segments = parse_lines(content);

    // Assert
    assert_eq!(content.len(), 1);
    assert!(content[0].starts_with("__HTML__:"));
    match &segments[..] {
        [Segment::Html(markup)] => {
            assert!(markup.contains("<th>Name</th>"));
            assert!(markup.contains("a&lt;b"));
        }
        other => panic!("Expected one html segment, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn given_paragraph_typed_as_markup_when_rendering_export_then_shows_it_as_text() -> Result<()> {
    // Arrange
    let source = MockContentSource::builder()
        .with_pages(vec![page("p1", "Sneaky", "Done")])
        .with_children(
            "p1",
            vec![
                paragraph("a", "__HTML__:<script>alert(1)</script>"),
                paragraph("b", r#"<div class="notion-table-wrap"><script>alert(2)</script></div>"#),
            ],
        )
        .build();
    let exporter = Exporter::new(&source, PropertyMapper::default(), TableStyle::Ascii);

    // Act
    let artifact = exporter.export("db").await?;
    let segments = parse_lines(&artifact.projects[0].content);
    let html = HtmlPresenter::default().render(&artifact);

    // Assert
    assert!(segments.iter().all(|s| matches!(s, Segment::Text(_))));
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    Ok(())
}
