// src/domain/page.rs
use crate::domain::block::{FileSource, RichText};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SelectOption {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct DateValue {
    #[serde(default)]
    pub start: Option<String>,
}

/// Typed view of a database property value.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Property {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    Date {
        #[serde(default)]
        date: Option<DateValue>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    Status {
        #[serde(default)]
        status: Option<SelectOption>,
    },
    Select {
        #[serde(default)]
        select: Option<SelectOption>,
    },
    Files {
        #[serde(default)]
        files: Vec<FileSource>,
    },
    #[serde(other)]
    Other,
}

/// A database row.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub last_edited_time: String,
    #[serde(default)]
    pub cover: Option<FileSource>,
    /// Properties in the order the API returned them.
    #[serde(default, deserialize_with = "ordered_properties")]
    pub properties: Vec<(String, Property)>,
}

impl Page {
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

fn ordered_properties<'de, D>(deserializer: D) -> Result<Vec<(String, Property)>, D::Error>
where
    D: Deserializer<'de>,
{
    let map: Option<Map<String, Value>> = Option::deserialize(deserializer)?;
    Ok(map
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| {
            let property = serde_json::from_value(value).unwrap_or(Property::Other);
            (key, property)
        })
        .collect())
}

/// One page of a cursor-paginated list response.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl<T> Paginated<T> {
    /// The cursor to request next, if the listing continues.
    pub fn continuation(&self) -> Option<&str> {
        if self.has_more {
            self.next_cursor.as_deref()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_page_json_when_deserializing_then_preserves_property_order() {
        let page: Page = serde_json::from_value(json!({
            "id": "p1",
            "url": "https://www.notion.so/p1",
            "last_edited_time": "2024-05-01T10:00:00.000Z",
            "properties": {
                "Zeta": {"id": "a", "type": "rich_text", "rich_text": []},
                "Project": {"id": "title", "type": "title", "title": [{"plain_text": "Folio"}]},
                "Alpha": {"id": "b", "type": "select", "select": {"name": "Done"}}
            }
        }))
        .unwrap();

        let keys: Vec<_> = page.properties.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Zeta", "Project", "Alpha"]);
        assert_eq!(page.property("Zeta"), Some(&Property::Other));
        assert!(matches!(page.property("Project"), Some(Property::Title { .. })));
    }

    #[test]
    fn given_malformed_property_when_deserializing_then_degrades_to_other() {
        let page: Page = serde_json::from_value(json!({
            "id": "p2",
            "properties": {
                "Broken": {"no_type": true}
            }
        }))
        .unwrap();

        assert_eq!(page.property("Broken"), Some(&Property::Other));
    }

    #[test]
    fn given_null_status_when_deserializing_then_keeps_none() {
        let property: Property =
            serde_json::from_value(json!({"type": "status", "status": null})).unwrap();

        assert_eq!(property, Property::Status { status: None });
    }

    #[test]
    fn given_more_results_when_reading_continuation_then_returns_cursor() {
        let listing: Paginated<Page> = serde_json::from_value(json!({
            "object": "list",
            "results": [],
            "has_more": true,
            "next_cursor": "abc"
        }))
        .unwrap();

        assert_eq!(listing.continuation(), Some("abc"));
    }

    #[test]
    fn given_last_page_when_reading_continuation_then_returns_none() {
        let listing: Paginated<Page> = serde_json::from_value(json!({
            "results": [],
            "has_more": false,
            "next_cursor": "stale"
        }))
        .unwrap();

        assert_eq!(listing.continuation(), None);
    }
}
