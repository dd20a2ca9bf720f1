// src/application/properties.rs
use crate::constants::{UNKNOWN_STATUS, UNTITLED};
use crate::domain::block::plain_text;
use crate::domain::page::SelectOption;
use crate::domain::{Page, ProjectRecord, Property};
use crate::infrastructure::config::PropertyConfig;

/// Maps database rows to project records.
///
/// Each field is looked up under its configured names first; when none of
/// them holds a usable value, the page's properties are scanned in order for
/// the first one of the matching type.
#[derive(Debug, Clone)]
pub struct PropertyMapper {
    names: PropertyConfig,
}

impl PropertyMapper {
    pub fn new(names: PropertyConfig) -> Self {
        Self { names }
    }

    /// Build the record without content; the transcoder fills that in.
    pub fn map(&self, page: &Page) -> ProjectRecord {
        ProjectRecord {
            id: page.id.clone(),
            title: self.title(page),
            date: self.date(page),
            tags: self.tags(page),
            status: self.status(page),
            image: self.image(page),
            description: String::new(),
            last_edited: page.last_edited_time.clone(),
            url: page.url.clone(),
            content: Vec::new(),
        }
    }

    fn named<'a>(&'a self, page: &'a Page, names: &'a [String]) -> impl Iterator<Item = &'a Property> {
        names.iter().filter_map(move |name| page.property(name))
    }

    pub fn title(&self, page: &Page) -> String {
        let declared = self.named(page, &self.names.title).find_map(|p| match p {
            Property::Title { title } => Some(title),
            _ => None,
        });
        if let Some(title) = declared.filter(|t| !t.is_empty()) {
            return plain_text(title);
        }

        page.properties
            .iter()
            .find_map(|(_, p)| match p {
                Property::Title { title } if !title.is_empty() => Some(plain_text(title)),
                _ => None,
            })
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    pub fn date(&self, page: &Page) -> Option<String> {
        let start = |p: &Property| match p {
            Property::Date { date: Some(d) } => d.start.clone().filter(|s| !s.is_empty()),
            _ => None,
        };

        self.named(page, &self.names.date)
            .find_map(start)
            .or_else(|| page.properties.iter().find_map(|(_, p)| start(p)))
    }

    pub fn tags(&self, page: &Page) -> Vec<String> {
        let options = |p: &Property| match p {
            Property::MultiSelect { multi_select } => Some(option_names(multi_select)),
            _ => None,
        };

        self.named(page, &self.names.tags)
            .find_map(options)
            .or_else(|| page.properties.iter().find_map(|(_, p)| options(p)))
            .unwrap_or_default()
    }

    pub fn status(&self, page: &Page) -> String {
        let declared = self.named(page, &self.names.status).find_map(|p| match p {
            Property::Status { status: Some(o) } | Property::Select { select: Some(o) }
                if !o.name.is_empty() =>
            {
                Some(o.name.clone())
            }
            _ => None,
        });
        if let Some(name) = declared {
            return name;
        }

        // The first status-like property decides, even when it is unset.
        page.properties
            .iter()
            .find_map(|(_, p)| match p {
                Property::Status { status } | Property::Select { select: status } => Some(
                    status
                        .as_ref()
                        .map(|o| o.name.clone())
                        .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
                ),
                _ => None,
            })
            .unwrap_or_else(|| UNKNOWN_STATUS.to_string())
    }

    pub fn image(&self, page: &Page) -> Option<String> {
        let first_file = self.named(page, &self.names.image).find_map(|p| match p {
            Property::Files { files } => files.first(),
            _ => None,
        });
        if let Some(file) = first_file {
            return file.url().map(str::to_string);
        }

        page.cover.as_ref().and_then(|c| c.url()).map(str::to_string)
    }
}

impl Default for PropertyMapper {
    fn default() -> Self {
        Self::new(PropertyConfig::default())
    }
}

fn option_names(options: &[SelectOption]) -> Vec<String> {
    options.iter().map(|o| o.name.clone()).collect()
}
