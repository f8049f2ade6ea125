// feedguard-core/src/record.rs
//! Output records and field lookup helpers for raw feed records.
//!
//! Sanitized records are always fully populated: text and HTML fields fall
//! back to the empty string, link fields to `None`. The "empty record"
//! returned for unusable input is `None` at the Rust level and `{}` once
//! serialized.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// A sanitized feed entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedRssItem {
    pub title: String,
    /// Restricted HTML.
    pub description: String,
    pub link: Option<String>,
    pub author: String,
    pub pub_date: String,
    pub thumbnail: Option<String>,
}

/// Sanitized feed-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizedRssMeta {
    pub title: String,
    pub description: String,
    pub link: Option<String>,
    pub author: String,
    pub image: Option<String>,
}

/// A sanitized feed: metadata plus one record per raw entry, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SanitizedFeed {
    #[serde(serialize_with = "serialize_record")]
    pub meta: Option<SanitizedRssMeta>,
    #[serde(serialize_with = "serialize_records")]
    pub items: Vec<Option<SanitizedRssItem>>,
}

/// Converts a sanitized record into JSON, rendering the empty record as `{}`.
pub fn record_to_value<T: Serialize>(record: Option<&T>) -> Value {
    record
        .and_then(|r| serde_json::to_value(r).ok())
        .unwrap_or_else(|| Value::Object(Map::new()))
}

fn serialize_record<T, S>(record: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match record {
        Some(r) => r.serialize(serializer),
        None => Map::new().serialize(serializer),
    }
}

#[allow(clippy::ptr_arg)]
fn serialize_records<T, S>(records: &Vec<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    use serde::ser::SerializeSeq;
    let mut seq = serializer.serialize_seq(Some(records.len()))?;
    for record in records {
        match record {
            Some(r) => seq.serialize_element(r)?,
            None => seq.serialize_element(&Map::new())?,
        }
    }
    seq.end()
}

/// Whether a field value counts as supplied when choosing between fallbacks.
///
/// `null`, `false`, zero and the empty string do not; every other value does,
/// including values of the wrong type.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Returns the first present value among `keys`, in priority order.
pub fn first_present<'v>(fields: &'v Map<String, Value>, keys: &[&str]) -> Option<&'v Value> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| is_present(value))
}

/// Looks up `parent.child` when `parent` is an object.
pub fn nested<'v>(fields: &'v Map<String, Value>, parent: &str, child: &str) -> Option<&'v Value> {
    fields.get(parent)?.as_object()?.get(child)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_serializes_with_camel_case_and_nulls() {
        let item = SanitizedRssItem {
            title: "T".to_string(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({
                "title": "T",
                "description": "",
                "link": null,
                "author": "",
                "pubDate": "",
                "thumbnail": null
            })
        );
    }

    #[test]
    fn test_empty_record_renders_as_empty_object() {
        assert_eq!(record_to_value::<SanitizedRssItem>(None), json!({}));
        let feed = SanitizedFeed {
            meta: None,
            items: vec![None, Some(SanitizedRssItem::default())],
        };
        let value = serde_json::to_value(&feed).unwrap();
        assert_eq!(value["meta"], json!({}));
        assert_eq!(value["items"][0], json!({}));
        assert_eq!(value["items"][1]["pubDate"], json!(""));
    }

    #[test]
    fn test_first_present_skips_falsy_values() {
        let fields = json!({"a": "", "b": null, "c": 0, "d": "x", "e": "y"});
        let fields = fields.as_object().unwrap();
        assert_eq!(first_present(fields, &["a", "b", "c", "d", "e"]), Some(&json!("x")));
        assert_eq!(first_present(fields, &["a", "missing"]), None);
    }

    #[test]
    fn test_first_present_accepts_wrong_types() {
        let fields = json!({"thumbnail": {"url": "http://x"}, "other": "http://y"});
        let fields = fields.as_object().unwrap();
        assert_eq!(
            first_present(fields, &["thumbnail", "other"]),
            Some(&json!({"url": "http://x"}))
        );
    }

    #[test]
    fn test_nested_requires_object_parent() {
        let fields = json!({"enclosure": {"url": "http://x/a.mp3"}, "flat": "str"});
        let fields = fields.as_object().unwrap();
        assert_eq!(nested(fields, "enclosure", "url"), Some(&json!("http://x/a.mp3")));
        assert_eq!(nested(fields, "flat", "url"), None);
        assert_eq!(nested(fields, "missing", "url"), None);
    }
}
