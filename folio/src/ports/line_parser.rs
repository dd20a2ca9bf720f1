// src/ports/line_parser.rs
use crate::constants::{HTML_SENTINEL, LABEL_MAX_CHARS};
use crate::domain::Attachment;
use crate::util::text::truncate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HTML_LINE_REGEX: Regex =
        Regex::new(&format!(r"(?s)^\x{{FEFF}}?\s*{}(.*)$", regex::escape(HTML_SENTINEL)))
            .expect("Failed to compile html line regex");
    // Table markup written without the sentinel.
    static ref TABLE_WRAP_REGEX: Regex = Regex::new(r#"^\s*<div\s+class="notion-table-wrap""#)
        .expect("Failed to compile table wrap regex");
    static ref URL_ANCHOR_REGEX: Regex =
        Regex::new(r#"(?i)^(\s*)URL:\s+<a[^>]+href="([^"]+)"[^>]*>.*</a>\s*$"#)
            .expect("Failed to compile url anchor regex");
    static ref URL_PLAIN_REGEX: Regex = Regex::new(r"(?i)^(\s*)URL:\s+(https?://\S+)\s*$")
        .expect("Failed to compile plain url regex");
    static ref ATTACHMENT_REGEX: Regex =
        Regex::new(r"^(\s*)(📎|📄|🖼\x{FE0F}?|🎞\x{FE0F}?|🔖|🔗)\s+(.+)$")
            .expect("Failed to compile attachment regex");
    static ref TRAILING_PAREN_REGEX: Regex =
        Regex::new(r"\s*\(.+\)\s*$").expect("Failed to compile trailing paren regex");
}

/// One display element reconstructed from the content lines.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Sanitized markup to inject as-is.
    Html(String),
    /// Icon and label merged with the url from the following line.
    Attachment {
        indent: usize,
        kind: Attachment,
        label: String,
        url: String,
    },
    /// A `URL:` line without a preceding label.
    Link { indent: usize, url: String },
    Text(String),
}

#[derive(Debug, PartialEq)]
struct AttachmentLabel {
    indent: usize,
    kind: Attachment,
    label: String,
}

/// Extract the url from a `URL:` line, plain or as an anchor.
pub fn parse_url_line(line: &str) -> Option<(usize, String)> {
    URL_ANCHOR_REGEX
        .captures(line)
        .or_else(|| URL_PLAIN_REGEX.captures(line))
        .map(|caps| (caps[1].chars().count(), caps[2].to_string()))
}

fn parse_attachment_label(line: &str) -> Option<AttachmentLabel> {
    let caps = ATTACHMENT_REGEX.captures(line)?;
    let kind = Attachment::from_icon(&caps[2])?;
    let mut label = caps[3].trim();
    if let Some(paren) = TRAILING_PAREN_REGEX.find(label) {
        label = label[..paren.start()].trim();
    }
    Some(AttachmentLabel {
        indent: caps[1].chars().count(),
        kind,
        label: truncate(label, LABEL_MAX_CHARS),
    })
}

/// The markup carried by an HTML line, if it is one.
pub fn parse_html_line(line: &str) -> Option<&str> {
    if let Some(caps) = HTML_LINE_REGEX.captures(line) {
        return caps.get(1).map(|m| m.as_str());
    }
    if TABLE_WRAP_REGEX.is_match(line) {
        return Some(line.trim_start());
    }
    None
}

/// Rebuild display elements from flattened content lines.
///
/// Rules, first match wins:
/// 1. sentinel (or bare table) markup becomes [`Segment::Html`]
/// 2. an attachment label directly followed by a `URL:` line becomes one
///    [`Segment::Attachment`]; the url line is consumed
/// 3. a lone `URL:` line becomes a [`Segment::Link`]
/// 4. anything else is [`Segment::Text`]
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        let raw = lines[i].as_ref();

        if let Some(markup) = parse_html_line(raw) {
            segments.push(Segment::Html(markup.to_string()));
            i += 1;
            continue;
        }

        if let Some(att) = parse_attachment_label(raw) {
            let next_url = lines.get(i + 1).and_then(|next| parse_url_line(next.as_ref()));
            if let Some((_, url)) = next_url {
                segments.push(Segment::Attachment {
                    indent: att.indent,
                    kind: att.kind,
                    label: att.label,
                    url,
                });
                i += 2;
                continue;
            }
        }

        if let Some((indent, url)) = parse_url_line(raw) {
            segments.push(Segment::Link { indent, url });
        } else {
            segments.push(Segment::Text(raw.to_string()));
        }
        i += 1;
    }
    segments
}
