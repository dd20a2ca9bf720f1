// src/domain/line.rs
use crate::constants::{
    HTML_SENTINEL, INDENT_UNIT, MAX_INDENT_DEPTH, TABLE_WRAP_ATTR, URL_LINE_PREFIX,
};

/// Media and link block families that render as an icon plus label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    Image,
    File,
    Pdf,
    Video,
    Embed,
    Bookmark,
}

impl Attachment {
    pub const ALL: [Attachment; 6] = [
        Attachment::Image,
        Attachment::File,
        Attachment::Pdf,
        Attachment::Video,
        Attachment::Embed,
        Attachment::Bookmark,
    ];

    pub fn icon(self) -> &'static str {
        match self {
            Attachment::Image => "🖼️",
            Attachment::File => "📎",
            Attachment::Pdf => "📄",
            Attachment::Video => "🎞️",
            Attachment::Embed => "🔗",
            Attachment::Bookmark => "🔖",
        }
    }

    /// Label used when the block carries no name of its own.
    pub fn default_label(self) -> &'static str {
        match self {
            Attachment::Image => "Image",
            Attachment::File => "File",
            Attachment::Pdf => "PDF",
            Attachment::Video => "Video",
            Attachment::Embed => "Embed",
            Attachment::Bookmark => "Bookmark",
        }
    }

    /// Match an icon, tolerating a missing variation selector.
    pub fn from_icon(icon: &str) -> Option<Self> {
        let bare = icon.trim_end_matches('\u{FE0F}');
        Self::ALL
            .into_iter()
            .find(|a| a.icon().trim_end_matches('\u{FE0F}') == bare)
    }
}

/// Zero-width space; keeps author text from being read back as markup.
const INERT_PREFIX: char = '\u{200B}';

/// Whether the line parser would take this text for injected markup.
fn reads_as_markup(text: &str) -> bool {
    let rest = text.trim_start_matches('\u{FEFF}').trim_start();
    if rest.starts_with(HTML_SENTINEL) {
        return true;
    }
    rest.strip_prefix("<div")
        .filter(|r| r.starts_with(char::is_whitespace))
        .is_some_and(|r| r.trim_start().starts_with(TABLE_WRAP_ATTR))
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    Text(String),
    /// Pre-sanitized markup, written behind the sentinel prefix.
    Html(String),
    Attachment { kind: Attachment, label: String },
    Url(String),
}

/// One display line produced by the transcoder, with its nesting depth.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub depth: usize,
    pub kind: LineKind,
}

impl Line {
    pub fn text(depth: usize, text: impl Into<String>) -> Self {
        Self {
            depth,
            kind: LineKind::Text(text.into()),
        }
    }

    pub fn html(depth: usize, markup: impl Into<String>) -> Self {
        Self {
            depth,
            kind: LineKind::Html(markup.into()),
        }
    }

    pub fn attachment(depth: usize, kind: Attachment, label: impl Into<String>) -> Self {
        Self {
            depth,
            kind: LineKind::Attachment {
                kind,
                label: label.into(),
            },
        }
    }

    pub fn url(depth: usize, url: impl Into<String>) -> Self {
        Self {
            depth,
            kind: LineKind::Url(url.into()),
        }
    }

    pub fn indent(&self) -> String {
        INDENT_UNIT.repeat(self.depth.min(MAX_INDENT_DEPTH))
    }

    /// Flatten into the artifact's string form.
    pub fn render(&self) -> String {
        let indent = self.indent();
        match &self.kind {
            LineKind::Text(text) if reads_as_markup(text) => format!("{indent}{INERT_PREFIX}{text}"),
            LineKind::Text(text) => format!("{indent}{text}"),
            LineKind::Html(markup) => format!("{indent}{HTML_SENTINEL}{markup}"),
            LineKind::Attachment { kind, label } => format!("{indent}{} {label}", kind.icon()),
            LineKind::Url(url) => format!("{indent}{URL_LINE_PREFIX}{url}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_deep_line_when_rendering_then_caps_indentation() {
        let line = Line::text(9, "deep");
        assert_eq!(line.render(), format!("{}deep", "  ".repeat(6)));
    }

    #[test]
    fn given_text_typed_as_sentinel_when_rendering_then_prefixes_zero_width_space() {
        let line = Line::text(0, "__HTML__:<script>alert(1)</script>");
        assert_eq!(line.render(), "\u{200B}__HTML__:<script>alert(1)</script>");
    }

    #[test]
    fn given_text_typed_as_table_wrap_when_rendering_then_neutralizes_it() {
        let line = Line::text(1, r#"<div  class="notion-table-wrap"><script></script></div>"#);
        assert!(line.render().starts_with("  \u{200B}<div"));
    }

    #[test]
    fn given_ordinary_markup_text_when_rendering_then_keeps_it() {
        let line = Line::text(0, "<div>plain</div>");
        assert_eq!(line.render(), "<div>plain</div>");
    }

    #[test]
    fn given_html_line_when_rendering_then_prefixes_sentinel() {
        let line = Line::html(1, "<table></table>");
        assert_eq!(line.render(), "  __HTML__:<table></table>");
    }

    #[test]
    fn given_attachment_and_url_when_rendering_then_produces_label_and_url_lines() {
        let label = Line::attachment(0, Attachment::File, "report.pdf (example.com/report.pdf)");
        let url = Line::url(0, "https://example.com/report.pdf");

        assert_eq!(label.render(), "📎 report.pdf (example.com/report.pdf)");
        assert_eq!(url.render(), "URL: https://example.com/report.pdf");
    }

    #[test]
    fn given_icon_without_variation_selector_when_matching_then_finds_attachment() {
        assert_eq!(Attachment::from_icon("🖼"), Some(Attachment::Image));
        assert_eq!(Attachment::from_icon("🎞️"), Some(Attachment::Video));
        assert_eq!(Attachment::from_icon("🚀"), None);
    }
}
