//! Image URL and sequence number derivation.

use serde_json::Value;

use crate::constants::{IMAGE_URL_FIELD, RAW_IMAGE_FIELD, SEQUENCE_FIELD};
use crate::document::{self, Category};
use crate::error::{StoreError, StoreResult};

/// How strictly the document shape is checked while enriching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Require `banners` and `announcements` lists whose items all carry `ref_image`.
    Strict,
    /// Enrich whatever carries `ref_image`, skip everything else.
    Permissive,
}

#[derive(Debug, Clone)]
pub struct EnrichOptions<'a> {
    pub prefix: &'a str,
    pub strictness: Strictness,
    /// Assign `imageNumber` (1-based position in the containing list).
    pub number_items: bool,
}

/// Enrich the document in place.
pub fn enrich(doc: &mut Value, options: &EnrichOptions<'_>) -> StoreResult<()> {
    match options.strictness {
        Strictness::Strict => enrich_strict(doc, options),
        Strictness::Permissive => {
            document::for_each_list_mut(doc, |items| enrich_list(items, options));
            Ok(())
        }
    }
}

/// Check the shape the strict enricher requires, without modifying anything.
pub fn validate_typed_shape(doc: &Value) -> StoreResult<()> {
    let Value::Object(map) = doc else {
        return Err(StoreError::Structure(
            "expected an object with banners and announcements".into(),
        ));
    };

    for category in Category::TYPED {
        let items = map
            .get(category.as_str())
            .ok_or_else(|| StoreError::Structure(format!("missing '{}'", category)))?
            .as_array()
            .ok_or_else(|| StoreError::Structure(format!("'{}' is not a list", category)))?;

        for (index, item) in items.iter().enumerate() {
            if raw_reference(item).is_none() {
                return Err(StoreError::Structure(format!(
                    "{}[{}] has no {}",
                    category, index, RAW_IMAGE_FIELD
                )));
            }
        }
    }

    Ok(())
}

/// The raw image reference of an item, as text.
///
/// Strings are used as-is and numbers by their JSON text (`7` becomes `"7"`).
/// Anything else (missing, null, bool, list, object) counts as no reference:
/// a structure error under `Strict`, skipped under `Permissive`.
pub fn raw_reference(item: &Value) -> Option<String> {
    item.get(RAW_IMAGE_FIELD).and_then(reference_text)
}

fn reference_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn enrich_strict(doc: &mut Value, options: &EnrichOptions<'_>) -> StoreResult<()> {
    validate_typed_shape(doc)?;

    for category in Category::TYPED {
        if let Some(Value::Array(items)) = doc.get_mut(category.as_str()) {
            enrich_list(items, options);
        }
    }

    Ok(())
}

fn enrich_list(items: &mut [Value], options: &EnrichOptions<'_>) {
    for (index, item) in items.iter_mut().enumerate() {
        let Value::Object(fields) = item else {
            continue;
        };

        if let Some(raw) = fields.get(RAW_IMAGE_FIELD).and_then(reference_text) {
            let url = format!("{}{}", options.prefix, raw);
            fields.insert(IMAGE_URL_FIELD.to_string(), Value::String(url));
        }

        if options.number_items {
            fields.insert(SEQUENCE_FIELD.to_string(), Value::from(index + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_IMAGE_PREFIX;
    use serde_json::json;

    fn options(strictness: Strictness, number_items: bool) -> EnrichOptions<'static> {
        EnrichOptions {
            prefix: DEFAULT_IMAGE_PREFIX,
            strictness,
            number_items,
        }
    }

    #[test]
    fn test_strict_enrich_prefixes_banners_and_announcements() {
        let mut doc = json!({
            "banners": [{"ref_image": "a.png"}],
            "announcements": [{"ref_image": "b.png", "title": "Patch notes"}]
        });

        enrich(&mut doc, &options(Strictness::Strict, false)).unwrap();

        assert_eq!(
            doc["banners"][0]["refImage"],
            "https://dl.dir.freefiremobile.com/common/Local/BD/Splashanno/a.png"
        );
        assert_eq!(
            doc["announcements"][0]["refImage"],
            "https://dl.dir.freefiremobile.com/common/Local/BD/Splashanno/b.png"
        );
        assert_eq!(doc["announcements"][0]["title"], "Patch notes");
    }

    #[test]
    fn test_strict_enrich_rejects_missing_category() {
        let mut doc = json!({"banners": []});
        let err = enrich(&mut doc, &options(Strictness::Strict, false)).unwrap_err();
        assert!(matches!(err, StoreError::Structure(ref m) if m.contains("announcements")));
    }

    #[test]
    fn test_strict_enrich_rejects_item_without_reference() {
        let mut doc = json!({"banners": [{"ref_image": "a.png"}, {"name": "x"}], "announcements": []});
        let err = enrich(&mut doc, &options(Strictness::Strict, false)).unwrap_err();
        assert!(matches!(err, StoreError::Structure(ref m) if m.contains("banners[1]")));
    }

    #[test]
    fn test_strict_enrich_rejects_flat_list() {
        let mut doc = json!([{"ref_image": "a.png"}]);
        assert!(enrich(&mut doc, &options(Strictness::Strict, false)).is_err());
    }

    #[test]
    fn test_permissive_enrich_skips_items_without_reference() {
        let mut doc = json!([{"ref_image": "a.png"}, {"name": "no image"}, "not an object"]);

        enrich(&mut doc, &options(Strictness::Permissive, false)).unwrap();

        assert!(doc[0].get("refImage").is_some());
        assert!(doc[1].get("refImage").is_none());
        assert_eq!(doc[2], "not an object");
    }

    #[test]
    fn test_numeric_reference_is_concatenated() {
        let mut strict = json!({"banners": [{"ref_image": 42}], "announcements": []});
        enrich(&mut strict, &options(Strictness::Strict, false)).unwrap();
        assert_eq!(strict["banners"][0]["refImage"], format!("{DEFAULT_IMAGE_PREFIX}42"));

        let mut permissive = json!([{"ref_image": 7}, {"ref_image": null}]);
        enrich(&mut permissive, &options(Strictness::Permissive, false)).unwrap();
        assert_eq!(permissive[0]["refImage"], format!("{DEFAULT_IMAGE_PREFIX}7"));
        assert!(permissive[1].get("refImage").is_none());
    }

    #[test]
    fn test_strict_enrich_rejects_non_scalar_reference() {
        let mut doc = json!({"banners": [{"ref_image": ["a.png"]}], "announcements": []});
        let err = enrich(&mut doc, &options(Strictness::Strict, false)).unwrap_err();
        assert!(matches!(err, StoreError::Structure(_)));
    }

    #[test]
    fn test_sequence_numbers_are_positional() {
        let mut forward = json!([{"ref_image": "a.png"}, {"ref_image": "b.png"}]);
        let mut reversed = json!([{"ref_image": "b.png"}, {"ref_image": "a.png"}]);

        enrich(&mut forward, &options(Strictness::Permissive, true)).unwrap();
        enrich(&mut reversed, &options(Strictness::Permissive, true)).unwrap();

        assert_eq!(forward[0]["imageNumber"], 1);
        assert_eq!(forward[0]["ref_image"], "a.png");
        assert_eq!(reversed[1]["ref_image"], "a.png");
        assert_eq!(reversed[1]["imageNumber"], 2);
    }

    #[test]
    fn test_sequence_numbers_restart_per_list() {
        let mut doc = json!({"banners": [{}, {}], "announcements": [{}]});
        enrich(&mut doc, &options(Strictness::Permissive, true)).unwrap();
        assert_eq!(doc["banners"][1]["imageNumber"], 2);
        assert_eq!(doc["announcements"][0]["imageNumber"], 1);
    }

    #[test]
    fn test_custom_prefix_is_used() {
        let mut doc = json!([{"ref_image": "x.jpg"}]);
        let opts = EnrichOptions {
            prefix: "http://cdn.local/",
            strictness: Strictness::Permissive,
            number_items: false,
        };
        enrich(&mut doc, &opts).unwrap();
        assert_eq!(doc[0]["refImage"], "http://cdn.local/x.jpg");
    }
}
