//! Per-request shaping: enrich, categorize, filter.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::categorize;
use crate::document;
use crate::enrich::{self, EnrichOptions, Strictness};
use crate::error::{StoreError, StoreResult};
use crate::filter::{self, DataQuery, FilterMode};

/// Settings that stay fixed for the lifetime of the server.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub mode: FilterMode,
    pub image_prefix: String,
}

impl Pipeline {
    pub fn new(mode: FilterMode, image_prefix: impl Into<String>) -> Self {
        Pipeline {
            mode,
            image_prefix: image_prefix.into(),
        }
    }

    fn enrich_options(&self) -> EnrichOptions<'_> {
        EnrichOptions {
            prefix: &self.image_prefix,
            strictness: match self.mode {
                FilterMode::TypeId => Strictness::Strict,
                _ => Strictness::Permissive,
            },
            number_items: self.mode == FilterMode::Sequence,
        }
    }

    /// Shape a stored document for one request. `now` decides event categories.
    /// The stored document is never modified.
    pub fn render(&self, stored: &Value, query: &DataQuery, now: DateTime<Utc>) -> StoreResult<Value> {
        let mut doc = stored.clone();
        enrich::enrich(&mut doc, &self.enrich_options())?;

        if self.mode == FilterMode::Keyword {
            doc = categorize::categorize(document::flatten(&doc), now).into_document();
        }

        filter::apply(doc, query, self.mode)
    }

    /// Check that a document about to be written has the shape this mode reads.
    pub fn validate(&self, doc: &Value) -> StoreResult<()> {
        let result = match self.mode {
            FilterMode::TypeId => enrich::validate_typed_shape(doc),
            FilterMode::Keyword | FilterMode::Substring | FilterMode::Sequence => {
                expect_item_lists(doc)
            }
        };

        result.map_err(|e| match e {
            StoreError::Structure(msg) => StoreError::Validation(msg),
            other => other,
        })
    }
}

/// A flat list of objects, or an object whose lists hold only objects.
fn expect_item_lists(doc: &Value) -> StoreResult<()> {
    let all_objects = |items: &[Value]| items.iter().all(Value::is_object);

    let ok = match doc {
        Value::Array(items) => all_objects(items),
        Value::Object(map) => map
            .values()
            .filter_map(Value::as_array)
            .all(|items| all_objects(items)),
        _ => false,
    };

    if ok {
        Ok(())
    } else {
        Err(StoreError::Structure(
            "expected a list of items or an object of item lists".into(),
        ))
    }
}
