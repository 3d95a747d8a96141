pub mod deals;
pub mod games;
pub mod stores;

use crate::error::GatewayError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::borrow::Cow;

const SITE_URL: &str = "https://www.cheapshark.com";

/// Data attached to an outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestData<T> {
    Empty,
    Query(T),
}

/// A single GET against the deals API.
pub trait Endpoint {
    type Query: Serialize;
    type Response;

    fn endpoint(&self) -> Cow<'_, str>;

    fn data(&self) -> RequestData<&Self::Query>;

    /// Turn a parsed response body into the typed response.
    fn decode(body: Value) -> Result<Self::Response, GatewayError>;
}

/// Decode a list body element by element. A body that is not an array is a
/// shape error. Elements that do not decode are skipped and logged; the list
/// only fails when none of a non-empty body's elements decode.
pub(crate) fn decode_list<T>(body: Value) -> Result<Vec<T>, GatewayError>
where
    T: DeserializeOwned,
{
    let items = match body {
        Value::Array(items) => items,
        other => {
            return Err(GatewayError::DataShape(format!(
                "expected an array, got {}",
                json_type(&other)
            )));
        }
    };

    let total = items.len();
    let mut decoded = Vec::with_capacity(total);
    let mut last_error = None;
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value(item) {
            Ok(value) => decoded.push(value),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping list element that did not decode");
                last_error = Some(format!("element {} did not decode: {}", index, e));
            }
        }
    }

    match last_error {
        Some(message) if decoded.is_empty() => Err(GatewayError::DataShape(message)),
        _ => Ok(decoded),
    }
}

pub(crate) fn decode_object<T>(body: Value) -> Result<T, GatewayError>
where
    T: DeserializeOwned,
{
    match body {
        Value::Object(_) => serde_json::from_value(body).map_err(GatewayError::from),
        other => Err(GatewayError::DataShape(format!(
            "expected an object, got {}",
            json_type(&other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Deserialize a field that may be missing or carry an unexpected type.
/// Anything that does not decode as `T` becomes `None`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Keep the raw text of a field the API sends as either a string or a
/// number. Anything else becomes `None`.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

/// Like [`string_or_number`], with an empty string for missing values.
pub(crate) fn raw_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_or_number(deserializer)?.unwrap_or_default())
}

/// Like [`lenient`], falling back to `T::default()`.
pub(crate) fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Icon for a store. Icons are indexed from zero while store ids start at one.
pub fn store_icon_url(store_id: &str) -> Option<String> {
    let id: i64 = store_id.trim().parse().ok()?;
    if id < 1 {
        return None;
    }
    Some(format!("{}/img/stores/icons/{}.png", SITE_URL, id - 1))
}

/// Link that forwards to the store page for a deal.
pub fn redirect_url(deal_id: &str) -> String {
    format!("{}/redirect?dealID={}", SITE_URL, deal_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_icon_url_is_zero_indexed() {
        assert_eq!(
            store_icon_url("1").as_deref(),
            Some("https://www.cheapshark.com/img/stores/icons/0.png")
        );
        assert_eq!(
            store_icon_url("25").as_deref(),
            Some("https://www.cheapshark.com/img/stores/icons/24.png")
        );
    }

    #[test]
    fn test_store_icon_url_rejects_bad_ids() {
        assert_eq!(store_icon_url("abc"), None);
        assert_eq!(store_icon_url(""), None);
        assert_eq!(store_icon_url("0"), None);
    }

    #[test]
    fn test_redirect_url() {
        assert_eq!(
            redirect_url("X8sebHhbc1Ga0dTkgg59WgyM506af9oNZZJLU9uSrX8%3D"),
            "https://www.cheapshark.com/redirect?dealID=X8sebHhbc1Ga0dTkgg59WgyM506af9oNZZJLU9uSrX8%3D"
        );
    }

    #[test]
    fn test_decode_list_rejects_non_array() {
        let result: Result<Vec<String>, _> = decode_list(json!({"error": "nope"}));
        assert!(matches!(result, Err(GatewayError::DataShape(_))));
    }

    #[test]
    fn test_decode_list_skips_bad_elements() {
        let result: Vec<String> = decode_list(json!(["a", 3, "b"])).unwrap();
        assert_eq!(result, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_decode_list_fails_when_no_element_decodes() {
        let result: Result<Vec<String>, _> = decode_list(json!([1, 3]));
        match result {
            Err(GatewayError::DataShape(msg)) => assert!(msg.contains("element 1")),
            other => panic!("expected DataShape, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_empty_list() {
        let result: Vec<String> = decode_list(json!([])).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_string_or_number_keeps_raw_text() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default, deserialize_with = "string_or_number")]
            value: Option<String>,
            #[serde(default, deserialize_with = "raw_text")]
            raw: String,
        }

        let row: Row = serde_json::from_value(json!({"value": 4.99, "raw": 7})).unwrap();
        assert_eq!(row.value.as_deref(), Some("4.99"));
        assert_eq!(row.raw, "7");

        let row: Row = serde_json::from_value(json!({"value": null, "raw": [1]})).unwrap();
        assert_eq!(row.value, None);
        assert_eq!(row.raw, "");

        let row: Row = serde_json::from_value(json!({})).unwrap();
        assert_eq!(row.value, None);
        assert_eq!(row.raw, "");
    }

    #[test]
    fn test_decode_object_rejects_array() {
        let result: Result<serde_json::Map<String, Value>, _> = decode_object(json!([]));
        assert!(matches!(result, Err(GatewayError::DataShape(_))));
    }
}
