use anyhow::Result;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use super::MinutesError;

const MISSING_SUMMARY_TEXT: &str = "No summary was generated for this topic.";

/// Cleans up chat model replies that are supposed to be JSON minutes.
///
/// Models wrap the object in prose or markdown fences and make a few
/// recurring syntax mistakes. This extracts the outermost object, fixes
/// the known mistakes and normalizes the result to the minutes schema.
pub struct ResponseRepairer {
    trailing_comma: Regex,
    quoted_numeric_id: Regex,
}

impl ResponseRepairer {
    pub fn new() -> Result<Self> {
        // Matches a comma left dangling before a closing brace or bracket
        let trailing_comma = Regex::new(r",\s*([}\]])")?;
        // Matches a stray quote after a numeric id, as in `"id": 3"`
        let quoted_numeric_id = Regex::new(r#"("id":\s*\d+)""#)?;

        Ok(Self {
            trailing_comma,
            quoted_numeric_id,
        })
    }

    /// Extract and repair the JSON object embedded in a model reply.
    ///
    /// Returns the parsed object with ids assigned sequentially across
    /// discussion points and action items, single owner strings wrapped
    /// into lists and missing summaries filled with a placeholder.
    pub fn repair(&self, raw: &str) -> Result<Value, MinutesError> {
        let (start, end) = match (raw.find('{'), raw.rfind('}')) {
            (Some(start), Some(end)) if start <= end => (start, end),
            _ => {
                return Err(MinutesError::MalformedResponse(
                    "no JSON object found in the reply".to_string(),
                ))
            }
        };

        let candidate = &raw[start..=end];
        let cleaned = self.trailing_comma.replace_all(candidate, "$1");
        let cleaned = self.quoted_numeric_id.replace_all(&cleaned, "$1");

        debug!("Repairing model reply: {} candidate chars", cleaned.len());

        let mut value: Value = serde_json::from_str(&cleaned).map_err(|e| {
            MinutesError::MalformedResponse(format!("failed to decode JSON after cleaning: {e}"))
        })?;

        normalize_minutes(&mut value);

        Ok(value)
    }
}

/// Reassign ids sequentially across both lists, starting at 1 with the
/// discussion points, and patch the fields models commonly get wrong.
fn normalize_minutes(value: &mut Value) {
    let mut next_id: u32 = 1;

    if let Some(points) = value
        .get_mut("discussion_points")
        .and_then(Value::as_array_mut)
    {
        for point in points {
            if let Some(fields) = point.as_object_mut() {
                fields.insert("id".to_string(), Value::from(next_id));
                next_id += 1;

                if !fields.contains_key("summary") {
                    fields.insert("summary".to_string(), Value::from(MISSING_SUMMARY_TEXT));
                }
            }
        }
    }

    if let Some(items) = value.get_mut("action_items").and_then(Value::as_array_mut) {
        for item in items {
            if let Some(fields) = item.as_object_mut() {
                fields.insert("id".to_string(), Value::from(next_id));
                next_id += 1;

                if let Some(owner) = fields.get("owner") {
                    if owner.is_string() {
                        let single = owner.clone();
                        fields.insert("owner".to_string(), Value::Array(vec![single]));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn repairer() -> ResponseRepairer {
        ResponseRepairer::new().unwrap()
    }

    #[test]
    fn test_repair_extracts_object_from_prose() {
        let raw = "Here are your minutes! {\"overall_sentiment\": \"positive\"} Hope that helps.";

        let value = repairer().repair(raw).unwrap();

        assert_eq!(value["overall_sentiment"], "positive");
    }

    #[test]
    fn test_repair_extracts_object_from_markdown_fence() {
        let raw = "```json\n{\"overall_sentiment\": \"tense\", \"topics\": [\"budget\"]}\n```";

        let value = repairer().repair(raw).unwrap();

        assert_eq!(value["topics"], json!(["budget"]));
    }

    #[test]
    fn test_repair_removes_trailing_commas() {
        let raw = r#"{"topics": ["a", "b",], "overall_sentiment": "calm",}"#;

        let value = repairer().repair(raw).unwrap();

        assert_eq!(value["topics"], json!(["a", "b"]));
        assert_eq!(value["overall_sentiment"], "calm");
    }

    #[test]
    fn test_repair_removes_stray_quote_after_numeric_id() {
        let raw = r#"{"id": 3", "task": "review"}"#;

        let value = repairer().repair(raw).unwrap();

        assert_eq!(value["id"], 3);
    }

    #[test]
    fn test_repair_assigns_sequential_ids_across_lists() {
        let raw = r#"{
            "discussion_points": [
                {"topic": "Roadmap", "summary": "Q3 plan agreed"},
                {"topic": "Hiring", "summary": "Two open roles"}
            ],
            "action_items": [
                {"task": "Post the roles", "owner": ["Dana"]},
                {"task": "Draft the plan", "owner": ["Lee"]},
                {"task": "Review budget", "owner": ["Sam"]}
            ]
        }"#;

        let value = repairer().repair(raw).unwrap();

        assert_eq!(value["discussion_points"][0]["id"], 1);
        assert_eq!(value["discussion_points"][1]["id"], 2);
        assert_eq!(value["action_items"][0]["id"], 3);
        assert_eq!(value["action_items"][1]["id"], 4);
        assert_eq!(value["action_items"][2]["id"], 5);
    }

    #[test]
    fn test_repair_overwrites_model_supplied_ids() {
        let raw = r#"{"discussion_points": [{"id": 42, "topic": "Sync", "summary": "Short"}]}"#;

        let value = repairer().repair(raw).unwrap();

        assert_eq!(value["discussion_points"][0]["id"], 1);
    }

    #[test]
    fn test_repair_wraps_single_owner_string_into_list() {
        let raw = r#"{"action_items": [{"task": "Follow up", "owner": "Alice"}]}"#;

        let value = repairer().repair(raw).unwrap();

        assert_eq!(value["action_items"][0]["owner"], json!(["Alice"]));
    }

    #[test]
    fn test_repair_keeps_owner_list_unchanged() {
        let raw = r#"{"action_items": [{"task": "Follow up", "owner": ["Alice", "Bob"]}]}"#;

        let value = repairer().repair(raw).unwrap();

        assert_eq!(value["action_items"][0]["owner"], json!(["Alice", "Bob"]));
    }

    #[test]
    fn test_repair_fills_missing_summary_with_placeholder() {
        let raw = r#"{"discussion_points": [{"topic": "Standup"}]}"#;

        let value = repairer().repair(raw).unwrap();

        assert_eq!(
            value["discussion_points"][0]["summary"],
            "No summary was generated for this topic."
        );
    }

    #[test]
    fn test_repair_keeps_existing_summary_even_when_empty() {
        let raw = r#"{"discussion_points": [{"topic": "Standup", "summary": ""}]}"#;

        let value = repairer().repair(raw).unwrap();

        assert_eq!(value["discussion_points"][0]["summary"], "");
    }

    #[test]
    fn test_repair_fails_without_any_object() {
        let err = repairer().repair("no structured data here").unwrap_err();

        assert!(matches!(err, MinutesError::MalformedResponse(_)));
    }

    #[test]
    fn test_repair_fails_on_reversed_braces() {
        let err = repairer().repair("} nothing useful {").unwrap_err();

        assert!(matches!(err, MinutesError::MalformedResponse(_)));
    }

    #[test]
    fn test_repair_fails_when_cleaning_is_not_enough() {
        let err = repairer().repair(r#"{"topics": ["a" "b"]}"#).unwrap_err();

        match err {
            MinutesError::MalformedResponse(detail) => {
                assert!(detail.contains("failed to decode JSON"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_repair_leaves_non_list_sections_alone() {
        let raw = r#"{"discussion_points": "none", "action_items": [{"task": "x", "owner": ["A"]}]}"#;

        let value = repairer().repair(raw).unwrap();

        assert_eq!(value["discussion_points"], "none");
        assert_eq!(value["action_items"][0]["id"], 1);
    }

    #[test]
    fn test_repair_passes_unknown_fields_through() {
        let raw = r#"{"overall_sentiment": "upbeat", "confidence": 0.87}"#;

        let value = repairer().repair(raw).unwrap();

        assert_eq!(value["confidence"], 0.87);
    }
}
