//! Document shape helpers.
//!
//! The document is kept as a `serde_json::Value` so that fields the server
//! does not know about survive a read/write cycle untouched. It is either a
//! flat list of items or an object mapping category labels to item lists.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{NAME_FIELD, TITLE_FIELD};

/// Fixed category labels. Not user-extensible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Upcoming,
    Ongoing,
    Past,
    Announcements,
    Banners,
}

impl Category {
    /// Categories derived from event timestamps.
    pub const TIMED: [Category; 3] = [Category::Upcoming, Category::Ongoing, Category::Past];

    /// Categories selectable with the `type` query parameter.
    pub const TYPED: [Category; 2] = [Category::Banners, Category::Announcements];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Upcoming => "upcoming",
            Category::Ongoing => "ongoing",
            Category::Past => "past",
            Category::Announcements => "announcements",
            Category::Banners => "banners",
        }
    }

    /// Case-insensitive match against one of the timed categories.
    pub fn timed_keyword(s: &str) -> Option<Category> {
        Self::TIMED
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Category::Upcoming),
            "ongoing" => Ok(Category::Ongoing),
            "past" => Ok(Category::Past),
            "announcements" => Ok(Category::Announcements),
            "banners" => Ok(Category::Banners),
            other => Err(format!("Unknown category '{}'", other)),
        }
    }
}

/// Visit every item list in the document: the root itself when it is a flat
/// list, otherwise each array-valued entry of the root object.
pub fn for_each_list_mut(doc: &mut Value, mut f: impl FnMut(&mut Vec<Value>)) {
    match doc {
        Value::Array(items) => f(items),
        Value::Object(map) => {
            for value in map.values_mut() {
                if let Value::Array(items) = value {
                    f(items);
                }
            }
        }
        _ => {}
    }
}

/// Total number of items across every list in the document.
pub fn item_count(doc: &Value) -> usize {
    match doc {
        Value::Array(items) => items.len(),
        Value::Object(map) => map
            .values()
            .filter_map(Value::as_array)
            .map(Vec::len)
            .sum(),
        _ => 0,
    }
}

/// All items of the document as one flat list, in document order.
pub fn flatten(doc: &Value) -> Vec<Value> {
    match doc {
        Value::Array(items) => items.clone(),
        Value::Object(map) => map
            .values()
            .filter_map(Value::as_array)
            .flatten()
            .cloned()
            .collect(),
        _ => Vec::new(),
    }
}

/// Display name of an item: `name`, falling back to `title`.
pub fn display_name(item: &Value) -> Option<&str> {
    item.get(NAME_FIELD)
        .and_then(Value::as_str)
        .or_else(|| item.get(TITLE_FIELD).and_then(Value::as_str))
}

/// String field of an item, if present.
pub fn str_field<'a>(item: &'a Value, field: &str) -> Option<&'a str> {
    item.get(field).and_then(Value::as_str)
}

/// Build a category-keyed object from labelled lists, preserving label order.
pub fn keyed(lists: impl IntoIterator<Item = (Category, Vec<Value>)>) -> Value {
    let map: Map<String, Value> = lists
        .into_iter()
        .map(|(category, items)| (category.to_string(), Value::Array(items)))
        .collect();
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_timed_keyword_is_case_insensitive() {
        assert_eq!(Category::timed_keyword("UpComing"), Some(Category::Upcoming));
        assert_eq!(Category::timed_keyword("PAST"), Some(Category::Past));
        assert_eq!(Category::timed_keyword("banners"), None);
        assert_eq!(Category::timed_keyword("ongoing-ish"), None);
    }

    #[test]
    fn test_category_from_str_rejects_unknown_labels() {
        assert_eq!("banners".parse::<Category>(), Ok(Category::Banners));
        assert!("Banners".parse::<Category>().is_err());
        assert!("events".parse::<Category>().is_err());
    }

    #[test]
    fn test_item_count_and_flatten_cover_both_shapes() {
        let keyed_doc = json!({
            "banners": [{"ref_image": "a.png"}, {"ref_image": "b.png"}],
            "announcements": [{"title": "Hello"}],
            "version": 3
        });
        assert_eq!(item_count(&keyed_doc), 3);
        assert_eq!(flatten(&keyed_doc).len(), 3);

        let flat_doc = json!([{"name": "x"}]);
        assert_eq!(item_count(&flat_doc), 1);
        assert_eq!(item_count(&json!("scalar")), 0);
    }

    #[test]
    fn test_display_name_falls_back_to_title() {
        assert_eq!(display_name(&json!({"name": "Event"})), Some("Event"));
        assert_eq!(display_name(&json!({"title": "Notice"})), Some("Notice"));
        assert_eq!(display_name(&json!({"ref_image": "a.png"})), None);
    }

    #[test]
    fn test_for_each_list_mut_skips_non_array_entries() {
        let mut doc = json!({"banners": [1, 2], "meta": {"a": 1}});
        let mut seen = 0;
        for_each_list_mut(&mut doc, |items| seen += items.len());
        assert_eq!(seen, 2);
    }
}
