//! Parse LLM output into an extracted product

use crate::error::ExtractorError;
use minidna_domain::{ExtractedProduct, ProductDetails};
use serde_json::Value;
use tracing::debug;

/// Parse the completion service's raw text into an `ExtractedProduct`
///
/// Tolerates a Markdown code fence around the JSON, nothing else: the JSON
/// itself must be valid and carry a boolean `supported` discriminant.
pub fn parse_extraction(response: &str) -> Result<ExtractedProduct, ExtractorError> {
    if response.trim().is_empty() {
        return Err(ExtractorError::EmptyResponse);
    }

    let json_str = extract_json(response);
    let json: Value = serde_json::from_str(json_str).map_err(|e| {
        ExtractorError::MalformedExtraction(format!("JSON parse error: {}", e))
    })?;

    let supported = {
        let obj = json.as_object().ok_or_else(|| {
            ExtractorError::MalformedExtraction("Expected JSON object".to_string())
        })?;
        match obj.get("supported") {
            Some(Value::Bool(flag)) => *flag,
            Some(other) => {
                return Err(ExtractorError::MalformedExtraction(format!(
                    "'supported' must be a boolean, got {}",
                    other
                )))
            }
            None => {
                return Err(ExtractorError::MalformedExtraction(
                    "Missing 'supported' field".to_string(),
                ))
            }
        }
    };

    if supported {
        let details: ProductDetails = serde_json::from_value(json)?;
        Ok(ExtractedProduct::Supported(details))
    } else {
        let message = parse_message(&json)?;
        debug!(has_message = message.is_some(), "Extraction marked unsupported");
        Ok(ExtractedProduct::Unsupported { message })
    }
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> &str {
    let mut trimmed = response.trim();

    if let Some(rest) = trimmed.strip_prefix("```") {
        trimmed = rest
            .strip_prefix("json")
            .or_else(|| rest.strip_prefix("JSON"))
            .unwrap_or(rest);
    }
    if let Some(rest) = trimmed.strip_suffix("```") {
        trimmed = rest;
    }

    trimmed.trim()
}

/// Optional user-facing message of an unsupported extraction
fn parse_message(json: &Value) -> Result<Option<String>, ExtractorError> {
    match json.get("message") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(message)) if message.trim().is_empty() => Ok(None),
        Some(Value::String(message)) => Ok(Some(message.clone())),
        Some(other) => Err(ExtractorError::MalformedExtraction(format!(
            "'message' must be a string, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUPPORTED_JSON: &str = r#"{
        "supported": true,
        "brand": "Nike",
        "product_line": "Air Zoom Pegasus 40",
        "target_user": "Men",
        "core_type": "Running Shoe",
        "key_attributes": {"material": "Mesh", "closure": "Laces", "usage": "Road running"},
        "variant_attributes": {"color": "Black/White", "size": null},
        "title": "Nike Air Zoom Pegasus 40",
        "description": "Responsive everyday running shoe"
    }"#;

    #[test]
    fn test_parse_supported() {
        let parsed = parse_extraction(SUPPORTED_JSON).unwrap();
        let details = parsed.details().unwrap();
        assert_eq!(details.brand.as_deref(), Some("Nike"));
        assert_eq!(details.core_type.as_deref(), Some("Running Shoe"));
        assert_eq!(details.key_attributes.closure.as_deref(), Some("Laces"));
        assert_eq!(details.variant_attributes.size, None);
    }

    #[test]
    fn test_fenced_equals_unfenced() {
        let fenced = format!("```json\n{}\n```", SUPPORTED_JSON);
        assert_eq!(
            parse_extraction(&fenced).unwrap(),
            parse_extraction(SUPPORTED_JSON).unwrap()
        );
    }

    #[test]
    fn test_fence_without_language_tag() {
        let fenced = format!("```\n{}\n```\n", SUPPORTED_JSON);
        assert!(parse_extraction(&fenced).unwrap().is_supported());
    }

    #[test]
    fn test_empty_response() {
        assert!(matches!(parse_extraction(""), Err(ExtractorError::EmptyResponse)));
        assert!(matches!(
            parse_extraction("  \n\t"),
            Err(ExtractorError::EmptyResponse)
        ));
    }

    #[test]
    fn test_truncated_json() {
        let truncated = &SUPPORTED_JSON[..SUPPORTED_JSON.len() / 2];
        assert!(matches!(
            parse_extraction(truncated),
            Err(ExtractorError::MalformedExtraction(_))
        ));
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(
            parse_extraction("This is not JSON"),
            Err(ExtractorError::MalformedExtraction(_))
        ));
    }

    #[test]
    fn test_prose_around_json_is_not_repaired() {
        let response = format!("Here is the product:\n```json\n{}\n```", SUPPORTED_JSON);
        assert!(matches!(
            parse_extraction(&response),
            Err(ExtractorError::MalformedExtraction(_))
        ));
    }

    #[test]
    fn test_empty_code_block() {
        assert!(matches!(
            parse_extraction("```json\n```"),
            Err(ExtractorError::MalformedExtraction(_))
        ));
    }

    #[test]
    fn test_missing_supported() {
        let result = parse_extraction(r#"{"brand": "Nike"}"#);
        assert!(matches!(result, Err(ExtractorError::MalformedExtraction(_))));
    }

    #[test]
    fn test_supported_not_boolean() {
        let result = parse_extraction(r#"{"supported": "true", "brand": "Nike"}"#);
        assert!(matches!(result, Err(ExtractorError::MalformedExtraction(_))));
    }

    #[test]
    fn test_json_not_object() {
        let result = parse_extraction(r#"[{"supported": true}]"#);
        assert!(matches!(result, Err(ExtractorError::MalformedExtraction(_))));
    }

    #[test]
    fn test_wrong_field_type() {
        let result = parse_extraction(r#"{"supported": true, "brand": 42}"#);
        assert!(matches!(result, Err(ExtractorError::MalformedExtraction(_))));
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let parsed = parse_extraction(r#"{"supported": true, "brand": "IKEA"}"#).unwrap();
        let details = parsed.details().unwrap();
        assert_eq!(details.brand.as_deref(), Some("IKEA"));
        assert_eq!(details.product_line, None);
        assert_eq!(details.key_attributes.material, None);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let parsed =
            parse_extraction(r#"{"supported": true, "brand": "Apple", "price": "999"}"#).unwrap();
        assert_eq!(parsed.details().unwrap().brand.as_deref(), Some("Apple"));
    }

    #[test]
    fn test_parse_unsupported_with_message() {
        let parsed =
            parse_extraction(r#"{"supported": false, "message": "Not a product page"}"#).unwrap();
        assert_eq!(
            parsed,
            ExtractedProduct::Unsupported {
                message: Some("Not a product page".to_string())
            }
        );
    }

    #[test]
    fn test_parse_unsupported_without_message() {
        for raw in [
            r#"{"supported": false}"#,
            r#"{"supported": false, "message": null}"#,
            r#"{"supported": false, "message": ""}"#,
        ] {
            let parsed = parse_extraction(raw).unwrap();
            assert_eq!(parsed, ExtractedProduct::Unsupported { message: None });
        }
    }

    #[test]
    fn test_unsupported_message_wrong_type() {
        let result = parse_extraction(r#"{"supported": false, "message": 7}"#);
        assert!(matches!(result, Err(ExtractorError::MalformedExtraction(_))));
    }

    #[test]
    fn test_extract_json_from_plain_json() {
        let json = r#"{"key": "value"}"#;
        assert_eq!(extract_json(json), json);
    }

    #[test]
    fn test_extract_json_from_markdown() {
        let response = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json(response), r#"{"key": "value"}"#);
    }
}
