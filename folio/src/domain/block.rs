// src/domain/block.rs
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// One run of Notion rich text. Only the plain rendering is kept.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

/// Concatenate the plain text of all runs.
pub fn plain_text(runs: &[RichText]) -> String {
    runs.iter().map(|r| r.plain_text.as_str()).collect()
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct UrlRef {
    #[serde(default)]
    pub url: Option<String>,
}

/// Media payload shared by image, file, pdf and video blocks, page covers
/// and `files` properties.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileSource {
    #[serde(rename = "type")]
    pub kind: String,
    pub external: Option<UrlRef>,
    pub file: Option<UrlRef>,
    pub caption: Vec<RichText>,
    pub name: Option<String>,
}

impl FileSource {
    /// Externally hosted files carry their url under `external`, uploads under `file`.
    pub fn url(&self) -> Option<&str> {
        let source = if self.kind == "external" {
            self.external.as_ref()
        } else {
            self.file.as_ref()
        };
        source.and_then(|s| s.url.as_deref())
    }

    pub fn caption_text(&self) -> String {
        plain_text(&self.caption)
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextBlock {
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToDo {
    pub rich_text: Vec<RichText>,
    pub checked: bool,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Icon {
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Callout {
    pub rich_text: Vec<RichText>,
    pub icon: Option<Icon>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Code {
    pub rich_text: Vec<RichText>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Table {
    pub has_column_header: bool,
    pub has_row_header: bool,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableRow {
    pub cells: Vec<Vec<RichText>>,
}

impl TableRow {
    pub fn cell_texts(&self) -> Vec<String> {
        self.cells.iter().map(|cell| plain_text(cell)).collect()
    }
}

/// Embed and bookmark payloads.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Link {
    pub url: Option<String>,
    pub caption: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Paragraph(TextBlock),
    Heading1(TextBlock),
    Heading2(TextBlock),
    Heading3(TextBlock),
    BulletedListItem(TextBlock),
    NumberedListItem(TextBlock),
    ToDo(ToDo),
    Quote(TextBlock),
    Callout(Callout),
    Code(Code),
    Toggle(TextBlock),
    Table(Table),
    TableRow(TableRow),
    Image(FileSource),
    File(FileSource),
    Pdf(FileSource),
    Video(FileSource),
    Embed(Link),
    Bookmark(Link),
    /// Any block type this tool does not render; holds the raw type name.
    Unknown(String),
}

/// One node of a page's content tree, as returned by the block children endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawBlock")]
pub struct Block {
    pub id: String,
    pub has_children: bool,
    pub kind: BlockKind,
}

impl Block {
    pub fn type_name(&self) -> &str {
        match &self.kind {
            BlockKind::Paragraph(_) => "paragraph",
            BlockKind::Heading1(_) => "heading_1",
            BlockKind::Heading2(_) => "heading_2",
            BlockKind::Heading3(_) => "heading_3",
            BlockKind::BulletedListItem(_) => "bulleted_list_item",
            BlockKind::NumberedListItem(_) => "numbered_list_item",
            BlockKind::ToDo(_) => "to_do",
            BlockKind::Quote(_) => "quote",
            BlockKind::Callout(_) => "callout",
            BlockKind::Code(_) => "code",
            BlockKind::Toggle(_) => "toggle",
            BlockKind::Table(_) => "table",
            BlockKind::TableRow(_) => "table_row",
            BlockKind::Image(_) => "image",
            BlockKind::File(_) => "file",
            BlockKind::Pdf(_) => "pdf",
            BlockKind::Video(_) => "video",
            BlockKind::Embed(_) => "embed",
            BlockKind::Bookmark(_) => "bookmark",
            BlockKind::Unknown(name) => name,
        }
    }
}

// Notion stores a block's payload under a key named after its type, so the
// typed enum is built from the flattened remainder of the object.
#[derive(Deserialize)]
struct RawBlock {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    has_children: bool,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

fn payload<T: DeserializeOwned + Default>(value: Option<Value>) -> Result<T, serde_json::Error> {
    match value {
        None | Some(Value::Null) => Ok(T::default()),
        Some(v) => serde_json::from_value(v),
    }
}

impl TryFrom<RawBlock> for Block {
    type Error = serde_json::Error;

    fn try_from(mut raw: RawBlock) -> Result<Self, Self::Error> {
        let data = raw.rest.remove(&raw.kind);
        let kind = match raw.kind.as_str() {
            "paragraph" => BlockKind::Paragraph(payload(data)?),
            "heading_1" => BlockKind::Heading1(payload(data)?),
            "heading_2" => BlockKind::Heading2(payload(data)?),
            "heading_3" => BlockKind::Heading3(payload(data)?),
            "bulleted_list_item" => BlockKind::BulletedListItem(payload(data)?),
            "numbered_list_item" => BlockKind::NumberedListItem(payload(data)?),
            "to_do" => BlockKind::ToDo(payload(data)?),
            "quote" => BlockKind::Quote(payload(data)?),
            "callout" => BlockKind::Callout(payload(data)?),
            "code" => BlockKind::Code(payload(data)?),
            "toggle" => BlockKind::Toggle(payload(data)?),
            "table" => BlockKind::Table(payload(data)?),
            "table_row" => BlockKind::TableRow(payload(data)?),
            "image" => BlockKind::Image(payload(data)?),
            "file" => BlockKind::File(payload(data)?),
            "pdf" => BlockKind::Pdf(payload(data)?),
            "video" => BlockKind::Video(payload(data)?),
            "embed" => BlockKind::Embed(payload(data)?),
            "bookmark" => BlockKind::Bookmark(payload(data)?),
            _ => BlockKind::Unknown(raw.kind.clone()),
        };

        Ok(Block {
            id: raw.id,
            has_children: raw.has_children,
            kind,
        })
    }
}
