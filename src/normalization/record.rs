// Raw per-platform catalog records as they appear in store snapshot files

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::rating::parse_rating;

/// One game as published in a platform's top chart.
///
/// Every field is optional and parsed leniently: a wrong-typed value becomes
/// `None` rather than failing the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawGameRecord {
    /// Identity within the source catalog; the dedup key.
    #[serde(default, deserialize_with = "lenient_text")]
    pub app_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub publisher_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    /// Store identifier (numeric id on the App Store, package page id on Play).
    #[serde(default, rename = "appId", deserialize_with = "lenient_text")]
    pub store_app_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub bundle_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: Option<f64>,
}

/// A node of a snapshot file: snapshots nest pages of records to any depth.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CatalogNode {
    Batch(Vec<CatalogNode>),
    Record(RawGameRecord),
    /// Anything that is neither an array nor an object.
    Malformed(Value),
}

impl From<RawGameRecord> for CatalogNode {
    fn from(record: RawGameRecord) -> Self {
        CatalogNode::Record(record)
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_rating))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_store_fields_and_keeps_app_ids_distinct() {
        let record: RawGameRecord = serde_json::from_value(json!({
            "app_id": 55,
            "publisher_id": "pub-1",
            "name": "Puzzle Quest",
            "appId": "com.example.puzzle",
            "bundle_id": "com.example.puzzle",
            "version": "2.1.0",
            "rating": 4.6,
            "humanized_worldwide_release_date": "Jan 1, 2020"
        }))
        .expect("record parses");

        assert_eq!(record.app_id.as_deref(), Some("55"));
        assert_eq!(record.store_app_id.as_deref(), Some("com.example.puzzle"));
        assert_eq!(record.rating, Some(4.6));
    }

    #[test]
    fn wrong_typed_fields_degrade_to_none() {
        let record: RawGameRecord = serde_json::from_value(json!({
            "app_id": "a1",
            "name": ["not", "a", "name"],
            "rating": {"avg": 4},
            "version": null
        }))
        .expect("record still parses");

        assert_eq!(record.app_id.as_deref(), Some("a1"));
        assert_eq!(record.name, None);
        assert_eq!(record.rating, None);
        assert_eq!(record.version, None);
    }

    #[test]
    fn nested_batches_parse_with_scalars_marked_malformed() {
        let node: CatalogNode = serde_json::from_value(json!([
            [{"app_id": 1}, {"app_id": 2}],
            [[{"app_id": 3}]],
            42,
            null
        ]))
        .expect("tree parses");

        let CatalogNode::Batch(top) = node else {
            panic!("expected a batch at the root");
        };
        assert_eq!(top.len(), 4);
        assert!(matches!(top[0], CatalogNode::Batch(ref b) if b.len() == 2));
        assert!(matches!(top[2], CatalogNode::Malformed(_)));
        assert!(matches!(top[3], CatalogNode::Malformed(Value::Null)));
    }
}
