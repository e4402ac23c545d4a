//! Voice-assistant payload adapter
//!
//! Tool-call payloads reach the resolver in several shapes depending on how the
//! assistant was configured:
//!
//! - a flat argument object: `{"restaurantId": ..., "zipCode": ..., ...}`
//! - wrapped arguments: `{"arguments": {...}}` or `{"arguments": "<json string>"}`
//! - a tool-call message: `{"message": {"toolCalls": [{"id": ..., "function": {"arguments": ...}}]}}`
//!   (`toolCallList` is accepted as well)
//!
//! All of them become a [`LookupRequest`]. Field names are accepted in
//! camelCase or snake_case; numbers may arrive as strings and vice versa.
//!
//! Replies always carry transport status 200: the outcome itself tells the
//! assistant what went wrong.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AdapterError;
use crate::outcome::Outcome;
use crate::records::LookupRequest;
use crate::resolver::{StreetResolver, StreetSource};

/// Transport status for every reply.
pub const REPLY_STATUS: u16 = 200;

/// A lookup request plus the tool-call id it arrived under, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub tool_call_id: Option<String>,
    pub request: LookupRequest,
}

/// One tool-call result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub tool_call_id: String,
    pub result: Outcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplyBody {
    ToolResults { results: Vec<ToolResult> },
    Direct(Outcome),
}

/// Reply handed back to the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub status_code: u16,
    pub body: ReplyBody,
}

impl Reply {
    /// Wrap an outcome, echoing the tool-call id when there was one.
    pub fn new(tool_call_id: Option<&str>, outcome: Outcome) -> Self {
        let body = match tool_call_id {
            Some(id) => ReplyBody::ToolResults {
                results: vec![ToolResult {
                    tool_call_id: id.to_string(),
                    result: outcome,
                }],
            },
            None => ReplyBody::Direct(outcome),
        };
        Self {
            status_code: REPLY_STATUS,
            body,
        }
    }

    /// The (first) outcome carried by the reply.
    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.body {
            ReplyBody::ToolResults { results } => results.first().map(|r| &r.result),
            ReplyBody::Direct(outcome) => Some(outcome),
        }
    }

    /// Serialized body, as sent on the wire.
    pub fn body_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.body)
    }
}

/// Locate the argument object and tool-call id inside a payload.
fn locate_arguments(payload: &Value) -> Result<(Option<String>, Map<String, Value>), AdapterError> {
    let object = payload.as_object().ok_or(AdapterError::MissingArguments)?;

    if let Some(message) = object.get("message") {
        let call = message
            .get("toolCalls")
            .or_else(|| message.get("toolCallList"))
            .or_else(|| message.get("tool_calls"))
            .and_then(Value::as_array)
            .and_then(|calls| calls.first())
            .ok_or(AdapterError::MissingArguments)?;
        let id = call.get("id").and_then(Value::as_str).map(str::to_string);
        let arguments = call
            .get("function")
            .and_then(|f| f.get("arguments"))
            .ok_or(AdapterError::MissingArguments)?;
        return Ok((id, argument_object(arguments)?));
    }

    if let Some(arguments) = object.get("arguments") {
        return Ok((None, argument_object(arguments)?));
    }

    Ok((None, object.clone()))
}

/// Arguments may be an object or a JSON-encoded object.
fn argument_object(arguments: &Value) -> Result<Map<String, Value>, AdapterError> {
    match arguments {
        Value::Object(map) => Ok(map.clone()),
        Value::String(encoded) => match serde_json::from_str::<Value>(encoded)? {
            Value::Object(map) => Ok(map),
            _ => Err(AdapterError::MissingArguments),
        },
        _ => Err(AdapterError::MissingArguments),
    }
}

/// First present, non-null value among the given key spellings.
fn field<'a>(args: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| args.get(*key))
        .find(|value| !value.is_null())
}

fn text_field(args: &Map<String, Value>, name: &'static str, keys: &[&str]) -> Result<Option<String>, AdapterError> {
    match field(args, keys) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(AdapterError::FieldType {
            field: name,
            expected: "string",
        }),
    }
}

fn attempt_field(args: &Map<String, Value>) -> Result<u32, AdapterError> {
    let invalid = AdapterError::FieldType {
        field: "attemptNumber",
        expected: "positive integer",
    };
    match field(args, &["attemptNumber", "attempt_number", "attempt"]) {
        None => Ok(1),
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()).ok_or(invalid),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(1),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| invalid),
        Some(_) => Err(invalid),
    }
}

/// Parse a payload value into a lookup request.
///
/// Missing identifiers become empty strings so the resolver can report which
/// field was missing.
pub fn parse_request(payload: &Value) -> Result<ParsedRequest, AdapterError> {
    let (tool_call_id, args) = locate_arguments(payload)?;

    let request = LookupRequest {
        restaurant_id: text_field(&args, "restaurantId", &["restaurantId", "restaurant_id"])?.unwrap_or_default(),
        zip_code: text_field(&args, "zipCode", &["zipCode", "zip_code", "zip"])?.unwrap_or_default(),
        street_number: text_field(&args, "streetNumber", &["streetNumber", "street_number"])?,
        street_name: text_field(&args, "streetName", &["streetName", "street_name"])?,
        spelled_street_name: text_field(
            &args,
            "spelledStreetName",
            &["spelledStreetName", "spelled_street_name"],
        )?,
        attempt_number: attempt_field(&args)?,
    };

    Ok(ParsedRequest {
        tool_call_id,
        request,
    })
}

/// Parse a raw request body.
pub fn parse_request_str(body: &str) -> Result<ParsedRequest, AdapterError> {
    parse_request(&serde_json::from_str::<Value>(body)?)
}

/// Parse, resolve and wrap one raw request body.
///
/// Unparseable payloads become an error outcome, never a transport failure.
pub fn handle<S: StreetSource>(resolver: &StreetResolver<S>, body: &str) -> Reply {
    match parse_request_str(body) {
        Ok(parsed) => {
            let outcome = resolver.resolve(&parsed.request);
            Reply::new(parsed.tool_call_id.as_deref(), outcome)
        }
        Err(err) => {
            tracing::warn!(error = %err, "rejected street lookup payload");
            Reply::new(None, Outcome::error(err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_object() {
        let parsed = parse_request(&json!({
            "restaurantId": "rest-001",
            "zipCode": "60008",
            "streetNumber": "2202",
            "streetName": "Grouse Lane"
        }))
        .unwrap();
        assert_eq!(parsed.tool_call_id, None);
        assert_eq!(
            parsed.request,
            LookupRequest::new("rest-001", "60008", "Grouse Lane").with_street_number("2202")
        );
    }

    #[test]
    fn test_snake_case_and_numeric_fields() {
        let parsed = parse_request(&json!({
            "restaurant_id": "rest-001",
            "zip_code": 60008,
            "street_number": 2202,
            "spelled_street_name": "G O L F",
            "attempt_number": "2"
        }))
        .unwrap();
        assert_eq!(parsed.request.zip_code, "60008");
        assert_eq!(parsed.request.street_number.as_deref(), Some("2202"));
        assert_eq!(parsed.request.spelled_street_name.as_deref(), Some("G O L F"));
        assert_eq!(parsed.request.attempt_number, 2);
    }

    #[test]
    fn test_arguments_as_json_string() {
        let parsed = parse_request(&json!({
            "arguments": "{\"restaurantId\":\"rest-001\",\"zipCode\":\"60008\",\"streetName\":\"Golf\"}"
        }))
        .unwrap();
        assert_eq!(parsed.request.street_name.as_deref(), Some("Golf"));
        assert_eq!(parsed.request.attempt_number, 1);
    }

    #[test]
    fn test_tool_call_message() {
        for list_key in ["toolCalls", "toolCallList"] {
            let call = json!({
                "id": "call_123",
                "function": {
                    "name": "lookupStreet",
                    "arguments": {"restaurantId": "rest-001", "zipCode": "60008", "streetName": "Golf"}
                }
            });
            let mut message = Map::new();
            message.insert(list_key.to_string(), json!([call]));
            let payload = json!({ "message": message });
            let parsed = parse_request(&payload).unwrap();
            assert_eq!(parsed.tool_call_id.as_deref(), Some("call_123"));
            assert_eq!(parsed.request.restaurant_id, "rest-001");
        }
    }

    #[test]
    fn test_missing_ids_become_empty() {
        let parsed = parse_request(&json!({"streetName": "Golf"})).unwrap();
        assert_eq!(parsed.request.restaurant_id, "");
        assert_eq!(parsed.request.zip_code, "");
    }

    #[test]
    fn test_bad_shapes() {
        assert!(matches!(parse_request(&json!([1, 2])), Err(AdapterError::MissingArguments)));
        assert!(matches!(
            parse_request(&json!({"message": {"toolCalls": []}})),
            Err(AdapterError::MissingArguments)
        ));
        assert!(matches!(
            parse_request(&json!({"restaurantId": {"nested": true}})),
            Err(AdapterError::FieldType { field: "restaurantId", .. })
        ));
        assert!(matches!(
            parse_request(&json!({"attemptNumber": "second"})),
            Err(AdapterError::FieldType { field: "attemptNumber", .. })
        ));
        assert!(matches!(parse_request_str("{oops"), Err(AdapterError::Json(_))));
    }

    #[test]
    fn test_reply_shapes() {
        let reply = Reply::new(Some("call_1"), Outcome::too_many_matches());
        assert_eq!(reply.status_code, 200);
        let body: Value = serde_json::from_str(&reply.body_json().unwrap()).unwrap();
        assert_eq!(body["results"][0]["toolCallId"], "call_1");
        assert_eq!(body["results"][0]["result"]["status"], "too_many_matches");

        let reply = Reply::new(None, Outcome::error("boom"));
        let body: Value = serde_json::from_str(&reply.body_json().unwrap()).unwrap();
        assert_eq!(body, json!({"status": "error", "message": "boom"}));
        assert_eq!(reply.outcome(), Some(&Outcome::error("boom")));
    }
}
