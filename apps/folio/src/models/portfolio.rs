use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Body returned by a successful save.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveResponse {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
}

/// Body returned by the listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentPage {
    #[serde(default)]
    pub items: Vec<PortfolioSummary>,
}

/// A saved portfolio as shown in the recent list. The backend may leave any
/// field out, so every field is lenient.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PortfolioSummary {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_skills")]
    pub skills: Vec<String>,
}

// Backends differ on whether ids are strings or integers.
fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_skills<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_response_accepts_string_and_numeric_ids() {
        let s: SaveResponse = serde_json::from_value(json!({"id": "abc123"})).unwrap();
        assert_eq!(s.id, "abc123");
        let n: SaveResponse = serde_json::from_value(json!({"id": 42, "ok": true})).unwrap();
        assert_eq!(n.id, "42");
    }

    #[test]
    fn test_save_response_without_id_fails() {
        assert!(serde_json::from_value::<SaveResponse>(json!({"ok": true})).is_err());
    }

    #[test]
    fn test_recent_page_missing_items_is_empty() {
        let page: RecentPage = serde_json::from_value(json!({})).unwrap();
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_summary_tolerates_odd_field_types() {
        let page: RecentPage = serde_json::from_value(json!({
            "items": [
                {"name": "Jane", "title": null, "skills": "React"},
                {"skills": ["Go", 3, "Rust"]}
            ]
        }))
        .unwrap();
        assert_eq!(page.items[0].name.as_deref(), Some("Jane"));
        assert_eq!(page.items[0].title, None);
        assert!(page.items[0].skills.is_empty());
        assert_eq!(page.items[1].skills, vec!["Go", "Rust"]);
    }
}
