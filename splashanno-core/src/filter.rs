//! Query filtering.
//!
//! Only one filtering convention is active per deployment. Each mode reads
//! its own query parameters and ignores the rest.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

use crate::constants::{RAW_IMAGE_FIELD, SEQUENCE_FIELD};
use crate::document::{self, Category};
use crate::error::{StoreError, StoreResult};

/// The active query convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// `type` selects banners or announcements, `id` matches `ref_image`.
    #[default]
    TypeId,
    /// `q` names a timed category, otherwise acts as a substring search.
    Keyword,
    /// `q` is a case-insensitive substring of the item name or title.
    Substring,
    /// `q` is an `imageNumber`.
    Sequence,
}

impl FilterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::TypeId => "type_id",
            FilterMode::Keyword => "keyword",
            FilterMode::Substring => "substring",
            FilterMode::Sequence => "sequence",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "type_id" => Ok(FilterMode::TypeId),
            "keyword" => Ok(FilterMode::Keyword),
            "substring" => Ok(FilterMode::Substring),
            "sequence" => Ok(FilterMode::Sequence),
            other => Err(format!(
                "Unknown filter mode '{}'. Expected type_id, keyword, substring or sequence",
                other
            )),
        }
    }
}

// Parsed through `FromStr`, so config values are case-insensitive
impl<'de> Deserialize<'de> for FilterMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(de::Error::custom)
    }
}

/// Query parameters accepted by `GET /data`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: Option<String>,
    pub q: Option<String>,
}

impl DataQuery {
    /// `type`, ignoring blank values.
    pub fn kind(&self) -> Option<&str> {
        non_blank(&self.kind)
    }

    /// `id`, ignoring blank values.
    pub fn id(&self) -> Option<&str> {
        non_blank(&self.id)
    }

    /// `q`, ignoring blank values.
    pub fn search(&self) -> Option<&str> {
        non_blank(&self.q)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Narrow `doc` to the items `query` selects under `mode`.
///
/// `doc` is expected to be enriched already (and categorized for
/// `FilterMode::Keyword`).
pub fn apply(doc: Value, query: &DataQuery, mode: FilterMode) -> StoreResult<Value> {
    match mode {
        FilterMode::TypeId => by_type_and_id(doc, query.kind(), query.id()),
        FilterMode::Keyword => Ok(match query.search() {
            Some(q) => by_keyword(doc, q),
            None => doc,
        }),
        FilterMode::Substring => Ok(match query.search() {
            Some(q) => by_substring(doc, q),
            None => doc,
        }),
        FilterMode::Sequence => Ok(match query.search() {
            Some(q) => by_sequence(doc, q),
            None => doc,
        }),
    }
}

/// Keep only items of `kind` whose `ref_image` equals `id`.
/// Other categories pass through unchanged.
pub fn by_type_and_id(mut doc: Value, kind: Option<&str>, id: Option<&str>) -> StoreResult<Value> {
    let Some(kind) = kind else {
        return Ok(doc);
    };

    let category = Category::TYPED
        .into_iter()
        .find(|c| c.as_str() == kind)
        .ok_or_else(|| StoreError::InvalidParameter {
            name: "type",
            value: kind.to_string(),
        })?;

    if let (Some(id), Some(Value::Array(items))) = (id, doc.get_mut(category.as_str())) {
        items.retain(|item| document::str_field(item, RAW_IMAGE_FIELD) == Some(id));
    }

    Ok(doc)
}

/// Select a timed category by name, otherwise fall back to substring search.
pub fn by_keyword(doc: Value, q: &str) -> Value {
    let Some(category) = Category::timed_keyword(q) else {
        return by_substring(doc, q);
    };

    let items = doc
        .get(category.as_str())
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    document::keyed([(category, items)])
}

/// Case-insensitive substring match on each item's name or title.
/// When nothing matches anywhere, the unfiltered document is returned.
pub fn by_substring(doc: Value, q: &str) -> Value {
    let needle = q.to_lowercase();
    let mut filtered = doc.clone();

    document::for_each_list_mut(&mut filtered, |items| {
        items.retain(|item| {
            document::display_name(item)
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        });
    });

    if document::item_count(&filtered) == 0 {
        tracing::debug!(q, "No items matched, returning full document");
        return doc;
    }

    filtered
}

/// Keep only the item whose `imageNumber` equals `q`.
/// Numbers restart in every list, so on a category-keyed document the first
/// match in document order wins and every other list comes back empty.
/// A non-numeric `q` or no match returns the full document.
pub fn by_sequence(doc: Value, q: &str) -> Value {
    let Ok(number) = q.parse::<u64>() else {
        return doc;
    };

    let mut filtered = doc.clone();
    let mut found = false;
    document::for_each_list_mut(&mut filtered, |items| {
        items.retain(|item| {
            let keep = !found && item.get(SEQUENCE_FIELD).and_then(Value::as_u64) == Some(number);
            found |= keep;
            keep
        });
    });

    if document::item_count(&filtered) == 0 {
        return doc;
    }

    filtered
}
