// src/application/transcoder.rs
use crate::application::source::{fetch_block_children, ContentSource};
use crate::constants::{
    CAPTION_MAX_CHARS, DEFAULT_CALLOUT_ICON, TABLE_MAX_COL_WIDTH, TABLE_MIN_COL_WIDTH,
    TABLE_WRAP_ATTR,
};
use crate::domain::block::{plain_text, FileSource, Link, Table};
use crate::domain::{Attachment, Block, BlockKind, DomainError, Line};
use crate::infrastructure::config::TableStyle;
use crate::util::text::{cut_to_width, display_width, pad_to_width, short_url, truncate};
use futures::future::{BoxFuture, FutureExt};
use html_escape::encode_text;
use tracing::{instrument, trace};

/// Turns a page's block tree into flat display lines.
///
/// Blocks are visited depth-first in document order. Each block emits its
/// own lines first, then its children one level deeper. Table rows are
/// consumed by their table and never recursed into.
pub struct Transcoder<'a, S: ContentSource + ?Sized> {
    source: &'a S,
    table_style: TableStyle,
}

impl<'a, S: ContentSource + ?Sized> Transcoder<'a, S> {
    pub fn new(source: &'a S, table_style: TableStyle) -> Self {
        Self {
            source,
            table_style,
        }
    }

    /// Content lines of a page, flattened and with blank runs collapsed.
    #[instrument(level = "debug", skip(self))]
    pub async fn page_content(&self, page_id: &str) -> Result<Vec<String>, DomainError> {
        let lines = self.page_lines(page_id).await?;
        Ok(collapse_blank_lines(lines.iter().map(Line::render)))
    }

    pub async fn page_lines(&self, page_id: &str) -> Result<Vec<Line>, DomainError> {
        let roots = fetch_block_children(self.source, page_id).await?;
        let mut lines = Vec::new();
        for block in &roots {
            lines.extend(self.block_lines(block, 0).await?);
        }
        Ok(lines)
    }

    /// Lines of one block and, recursively, its descendants.
    pub fn block_lines<'b>(
        &'b self,
        block: &'b Block,
        depth: usize,
    ) -> BoxFuture<'b, Result<Vec<Line>, DomainError>> {
        async move {
            trace!(id = %block.id, kind = block.type_name(), depth, "Transcoding block");

            if let BlockKind::Table(table) = &block.kind {
                let rows = self.table_rows(&block.id).await?;
                return Ok(render_table(table, &rows, self.table_style, depth));
            }

            let mut lines = render_block(block, depth);
            if block.has_children {
                let children = fetch_block_children(self.source, &block.id).await?;
                for child in &children {
                    lines.extend(self.block_lines(child, depth + 1).await?);
                }
            }
            Ok(lines)
        }
        .boxed()
    }

    async fn table_rows(&self, table_id: &str) -> Result<Vec<Vec<String>>, DomainError> {
        let children = fetch_block_children(self.source, table_id).await?;
        Ok(children
            .iter()
            .filter_map(|child| match &child.kind {
                BlockKind::TableRow(row) => Some(row.cell_texts()),
                _ => None,
            })
            .collect())
    }
}

/// The lines a non-table block contributes by itself, children excluded.
pub fn render_block(block: &Block, depth: usize) -> Vec<Line> {
    let text = |s: String| Line::text(depth, s);
    match &block.kind {
        BlockKind::Paragraph(t) => non_blank(plain_text(&t.rich_text))
            .map(text)
            .into_iter()
            .collect(),
        BlockKind::Heading1(t) => heading(depth, "# ", &plain_text(&t.rich_text)),
        BlockKind::Heading2(t) => heading(depth, "## ", &plain_text(&t.rich_text)),
        BlockKind::Heading3(t) => heading(depth, "### ", &plain_text(&t.rich_text)),
        BlockKind::BulletedListItem(t) => vec![text(format!("• {}", plain_text(&t.rich_text)))],
        // Ordinals are not tracked across siblings.
        BlockKind::NumberedListItem(t) => vec![text(format!("1. {}", plain_text(&t.rich_text)))],
        BlockKind::ToDo(todo) => {
            let mark = if todo.checked { "[x]" } else { "[ ]" };
            vec![text(format!("{mark} {}", plain_text(&todo.rich_text)))]
        }
        BlockKind::Quote(t) => vec![text(format!("> {}", plain_text(&t.rich_text)))],
        BlockKind::Callout(callout) => {
            let icon = callout
                .icon
                .as_ref()
                .and_then(|i| i.emoji.as_deref())
                .unwrap_or(DEFAULT_CALLOUT_ICON);
            vec![text(format!("{icon} {}", plain_text(&callout.rich_text)))]
        }
        BlockKind::Code(code) => {
            let source = plain_text(&code.rich_text);
            let language = code.language.as_deref().unwrap_or("");
            let mut lines = vec![text(format!("```{language}"))];
            lines.extend(source.split('\n').map(|l| Line::text(depth, l)));
            lines.push(text("```".to_string()));
            lines
        }
        BlockKind::Toggle(t) => vec![text(format!("▸ {}", plain_text(&t.rich_text)))],
        BlockKind::Image(source) => media(depth, Attachment::Image, source, None, true),
        BlockKind::File(source) => {
            media(depth, Attachment::File, source, source.name.as_deref(), true)
        }
        BlockKind::Pdf(source) => media(depth, Attachment::Pdf, source, source.name.as_deref(), false),
        BlockKind::Video(source) => media(depth, Attachment::Video, source, None, false),
        BlockKind::Embed(link) => web_link(depth, Attachment::Embed, link, false),
        BlockKind::Bookmark(link) => web_link(depth, Attachment::Bookmark, link, true),
        BlockKind::Table(_) | BlockKind::TableRow(_) | BlockKind::Unknown(_) => {
            vec![text(format!("[{}]", block.type_name()))]
        }
    }
}

fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

fn heading(depth: usize, mark: &str, content: &str) -> Vec<Line> {
    non_blank(content.to_string())
        .map(|c| vec![Line::text(depth, format!("{mark}{c}"))])
        .unwrap_or_default()
}

fn media(
    depth: usize,
    kind: Attachment,
    source: &FileSource,
    name: Option<&str>,
    with_caption: bool,
) -> Vec<Line> {
    let caption = if with_caption {
        source.caption_text()
    } else {
        String::new()
    };
    attachment_lines(depth, kind, name, source.url(), &caption)
}

fn web_link(depth: usize, kind: Attachment, link: &Link, with_caption: bool) -> Vec<Line> {
    let caption = if with_caption {
        plain_text(&link.caption)
    } else {
        String::new()
    };
    attachment_lines(depth, kind, None, link.url.as_deref(), &caption)
}

/// `<name> (<short url>) — <caption>` followed by a `URL:` line when a url exists.
fn attachment_lines(
    depth: usize,
    kind: Attachment,
    name: Option<&str>,
    url: Option<&str>,
    caption: &str,
) -> Vec<Line> {
    let url = url.filter(|u| !u.is_empty());
    let mut label = name
        .filter(|n| !n.is_empty())
        .unwrap_or(kind.default_label())
        .to_string();
    if let Some(u) = url {
        label.push_str(&format!(" ({})", short_url(u)));
    }
    // Labels must stay on one line for the parser to pair them with the url.
    let caption = caption.split_whitespace().collect::<Vec<_>>().join(" ");
    if !caption.is_empty() {
        label.push_str(&format!(" — {}", truncate(&caption, CAPTION_MAX_CHARS)));
    }

    let mut lines = vec![Line::attachment(depth, kind, label)];
    if let Some(u) = url {
        lines.push(Line::url(depth, u));
    }
    lines
}

pub fn render_table(table: &Table, rows: &[Vec<String>], style: TableStyle, depth: usize) -> Vec<Line> {
    match style {
        TableStyle::Ascii => ascii_table(rows, table.has_column_header)
            .into_iter()
            .map(|l| Line::text(depth, l))
            .collect(),
        TableStyle::Html => vec![Line::html(
            depth,
            html_table(rows, table.has_column_header, table.has_row_header),
        )],
    }
}

/// Fixed-width grid sized by display width, one output line per cell line.
///
/// ```text
/// (table)
/// +------+-----+
/// | Name | Qty |
/// +------+-----+
/// | 사과 | 3   |
/// +------+-----+
/// ```
pub fn ascii_table(rows: &[Vec<String>], has_column_header: bool) -> Vec<String> {
    if rows.is_empty() {
        return vec!["(empty table)".to_string()];
    }

    let split: Vec<Vec<Vec<String>>> = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.split('\n').map(|s| s.trim().to_string()).collect())
                .collect()
        })
        .collect();

    let col_count = split.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..col_count)
        .map(|ci| {
            split
                .iter()
                .filter_map(|row| row.get(ci))
                .flatten()
                .map(|line| display_width(line))
                .fold(TABLE_MIN_COL_WIDTH, usize::max)
                .min(TABLE_MAX_COL_WIDTH)
        })
        .collect();

    let border = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );

    let mut out = vec!["(table)".to_string(), border.clone()];
    for (ri, row) in split.iter().enumerate() {
        let height = row.iter().map(Vec::len).max().unwrap_or(0).max(1);
        for k in 0..height {
            let cells: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(ci, &width)| {
                    let raw = row
                        .get(ci)
                        .and_then(|lines| lines.get(k))
                        .map(String::as_str)
                        .unwrap_or("");
                    format!(" {} ", pad_to_width(&cut_to_width(raw, width), width))
                })
                .collect();
            out.push(format!("|{}|", cells.join("|")));
        }
        if has_column_header && ri == 0 {
            out.push(border.clone());
        }
    }
    out.push(border);
    out
}

/// Escaped `<table>` markup; header cells become `<th>`.
pub fn html_table(rows: &[Vec<String>], has_column_header: bool, has_row_header: bool) -> String {
    let col_count = rows.iter().map(Vec::len).max().unwrap_or(0);

    let render_row = |row: &Vec<String>, header_row: bool| -> String {
        let cells: String = (0..col_count)
            .map(|ci| {
                let content = cell_html(row.get(ci).map(String::as_str).unwrap_or(""));
                if header_row {
                    format!("<th>{content}</th>")
                } else if has_row_header && ci == 0 {
                    format!("<th scope=\"row\">{content}</th>")
                } else {
                    format!("<td>{content}</td>")
                }
            })
            .collect();
        format!("<tr>{cells}</tr>")
    };

    let (head, body) = match rows.split_first() {
        Some((first, rest)) if has_column_header => (Some(first), rest),
        _ => (None, rows),
    };

    let mut html = format!(r#"<div {TABLE_WRAP_ATTR}><table class="notion-table">"#);
    if let Some(head) = head {
        html.push_str(&format!("<thead>{}</thead>", render_row(head, true)));
    }
    html.push_str("<tbody>");
    for row in body {
        html.push_str(&render_row(row, false));
    }
    html.push_str("</tbody></table></div>");
    html
}

fn cell_html(text: &str) -> String {
    encode_text(text).replace('\n', "<br>")
}

/// Drop every blank line that directly follows another blank line.
pub fn collapse_blank_lines<I>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out = Vec::new();
    let mut previous_blank = false;
    for line in lines {
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        previous_blank = blank;
        out.push(line);
    }
    out
}
