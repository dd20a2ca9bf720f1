// src/ports/html.rs
use crate::domain::{Artifact, ProjectRecord};
use crate::infrastructure::config::DisplayConfig;
use crate::ports::line_parser::{parse_lines, Segment};
use chrono::{DateTime, NaiveDate};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;
use tracing::instrument;

const DATE_DISPLAY_FORMAT: &str = "%b %-d, %Y";

#[derive(Debug, Default)]
pub struct HtmlPresenter {
    display: DisplayConfig,
}

impl HtmlPresenter {
    pub fn new(display: DisplayConfig) -> Self {
        Self { display }
    }

    /// Render the whole artifact as one standalone page.
    #[instrument(level = "debug", skip_all, fields(projects = artifact.projects.len()))]
    pub fn render(&self, artifact: &Artifact) -> String {
        let body = if artifact.projects.is_empty() {
            r#"<p class="empty">No projects to show.</p>"#.to_string()
        } else {
            let cards: String = artifact.projects.iter().map(|p| self.card(p)).collect();
            let details: String = artifact.projects.iter().map(|p| self.detail(p)).collect();
            format!(
                "<div class=\"grid\">\n{cards}</div>\n{details}",
                cards = cards,
                details = details
            )
        };

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Projects</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            max-width: 1000px;
            margin: 2rem auto;
            padding: 0 1rem;
            background-color: #f5f5f5;
        }}
        .grid {{
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(260px, 1fr));
            gap: 1rem;
        }}
        .card, .detail {{
            background: white;
            border-radius: 8px;
            padding: 1rem;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }}
        .card img {{
            width: 100%;
            border-radius: 4px;
        }}
        .card a {{
            color: inherit;
            text-decoration: none;
        }}
        .detail {{
            margin-top: 2rem;
        }}
        .status {{
            display: inline-block;
            color: white;
            padding: 2px 8px;
            border-radius: 4px;
            font-size: 0.8em;
        }}
        .date {{
            color: #666;
            font-size: 0.9em;
        }}
        .tag {{
            display: inline-block;
            background: #e9ecef;
            padding: 2px 8px;
            border-radius: 4px;
            margin-right: 4px;
            font-size: 0.8em;
        }}
        .line {{
            white-space: pre-wrap;
            min-height: 1.6em;
        }}
        .notion-table {{
            border-collapse: collapse;
            margin: 0.5rem 0;
        }}
        .notion-table th, .notion-table td {{
            border: 1px solid #ddd;
            padding: 4px 8px;
        }}
    </style>
</head>
<body>
{body}
</body>
</html>"#,
            body = body
        )
    }

    fn card(&self, project: &ProjectRecord) -> String {
        let mut html = format!(
            "<article class=\"card\">\n<a href=\"#{anchor}\">\n",
            anchor = encode_double_quoted_attribute(&project.id)
        );
        if let Some(image) = project.image.as_deref() {
            let _ = writeln!(
                html,
                "<img src=\"{}\" alt=\"\">",
                encode_double_quoted_attribute(image)
            );
        }
        html.push_str(&self.status_badge(&project.status));
        let _ = writeln!(html, "<h2>{}</h2>", encode_text(&project.title));
        if let Some(date) = project.date.as_deref() {
            let _ = writeln!(html, "<div class=\"date\">{}</div>", encode_text(&format_date(date)));
        }
        if !project.description.is_empty() {
            let _ = writeln!(
                html,
                "<p class=\"description\">{}</p>",
                encode_text(&project.description)
            );
        }
        html.push_str(&tag_chips(&project.tags));
        html.push_str("</a>\n</article>\n");
        html
    }

    fn detail(&self, project: &ProjectRecord) -> String {
        let mut html = format!(
            "<section class=\"detail\" id=\"{}\">\n<h2>{}</h2>\n",
            encode_double_quoted_attribute(&project.id),
            encode_text(&project.title)
        );
        html.push_str(&self.status_badge(&project.status));
        html.push_str(&render_content(&project.content));
        let _ = writeln!(
            html,
            "<p><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Open in Notion</a></p>",
            encode_double_quoted_attribute(&project.url)
        );
        html.push_str("</section>\n");
        html
    }

    fn status_badge(&self, status: &str) -> String {
        format!(
            "<span class=\"status\" style=\"background-color: {}\">{}</span>\n",
            encode_double_quoted_attribute(self.display.status_color(status)),
            encode_text(status)
        )
    }
}

fn tag_chips(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let chips: String = tags
        .iter()
        .map(|t| format!("<span class=\"tag\">{}</span>", encode_text(t)))
        .collect();
    format!("<div class=\"tags\">{chips}</div>\n")
}

/// `YYYY-MM-DD` or RFC 3339 input becomes e.g. `Mar 1, 2024`; anything else is shown as is.
pub fn format_date(raw: &str) -> String {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format(DATE_DISPLAY_FORMAT).to_string();
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return datetime.format(DATE_DISPLAY_FORMAT).to_string();
    }
    raw.to_string()
}

fn is_web_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn indent_style(indent: usize) -> String {
    if indent == 0 {
        String::new()
    } else {
        format!(" style=\"margin-left: {}ch\"", indent)
    }
}

/// Turn content lines into markup; text is escaped, sentinel markup is injected verbatim.
pub fn render_content(lines: &[String]) -> String {
    if lines.is_empty() {
        return "<p class=\"empty\">No content.</p>\n".to_string();
    }

    let mut html = String::from("<div class=\"content\">\n");
    for segment in parse_lines(lines) {
        match segment {
            Segment::Html(markup) => {
                html.push_str(&markup);
                html.push('\n');
            }
            Segment::Attachment { indent, kind, label, url } if is_web_url(&url) => {
                let _ = writeln!(
                    html,
                    "<div class=\"line\"{}><a class=\"attachment\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{} {}</a></div>",
                    indent_style(indent),
                    encode_double_quoted_attribute(&url),
                    kind.icon(),
                    encode_text(&label)
                );
            }
            Segment::Attachment { indent, kind, label, url } => {
                let _ = writeln!(
                    html,
                    "<div class=\"line\"{}>{} {} ({})</div>",
                    indent_style(indent),
                    kind.icon(),
                    encode_text(&label),
                    encode_text(&url)
                );
            }
            Segment::Link { indent, url } if is_web_url(&url) => {
                let _ = writeln!(
                    html,
                    "<div class=\"line\"{}><a class=\"link\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></div>",
                    indent_style(indent),
                    encode_double_quoted_attribute(&url),
                    encode_text(&url)
                );
            }
            Segment::Link { indent, url } => {
                let _ = writeln!(
                    html,
                    "<div class=\"line\"{}>{}</div>",
                    indent_style(indent),
                    encode_text(&url)
                );
            }
            Segment::Text(text) => {
                let _ = writeln!(html, "<div class=\"line\">{}</div>", encode_text(&text));
            }
        }
    }
    html.push_str("</div>\n");
    html
}
