use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::NotifierError;

/// SNS notification as delivered to the function.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    pub records: Vec<SnsRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnsRecord {
    #[serde(rename = "Sns")]
    pub sns: SnsEnvelope,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub topic_arn: Option<String>,
}

impl SnsEnvelope {
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

impl InboundEvent {
    /// Extracts the SNS records from a raw Lambda payload.
    ///
    /// Fails when `Records` is absent, not an array, empty, or holds a record
    /// without an `Sns` envelope.
    pub fn from_value(payload: &Value) -> Result<Self, NotifierError> {
        let records = payload
            .get("Records")
            .and_then(Value::as_array)
            .ok_or_else(|| NotifierError::InvalidEvent("missing Records".to_string()))?;

        if records.is_empty() {
            return Err(NotifierError::InvalidEvent("empty Records".to_string()));
        }

        let records = records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                SnsRecord::deserialize(record).map_err(|e| {
                    NotifierError::InvalidEvent(format!("record {idx}: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { records })
    }
}

/// Fields of a CloudWatch alarm notification. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmPayload {
    pub alarm_name: Option<String>,
    pub alarm_description: Option<String>,
    pub new_state_reason: Option<String>,
    pub region: Option<String>,
    pub alarm_arn: Option<String>,
    pub message: Option<String>,
}

impl AlarmPayload {
    /// Reads alarm fields from a parsed SNS message. `null` counts as absent,
    /// other non-string values keep their JSON text.
    #[must_use]
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let field = |key: &str| object.get(key).and_then(value_as_text);
        Self {
            alarm_name: field("AlarmName"),
            alarm_description: field("AlarmDescription"),
            new_state_reason: field("NewStateReason"),
            region: field("Region"),
            alarm_arn: field("AlarmArn"),
            message: field("Message"),
        }
    }

    /// Console identifier: the last `:` segment of the ARN, or the alarm name.
    #[must_use]
    pub fn alarm_id<'a>(&'a self, alarm_name: &'a str) -> &'a str {
        self.alarm_arn
            .as_deref()
            .filter(|arn| !arn.is_empty())
            .and_then(|arn| arn.rsplit(':').next())
            .unwrap_or(alarm_name)
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Result handed back to the Lambda invoker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResult {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResult {
    #[must_use]
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

impl From<&NotifierError> for InvocationResult {
    fn from(error: &NotifierError) -> Self {
        Self::new(error.status_code(), error.response_body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_records_with_missing_message() {
        let event = InboundEvent::from_value(&json!({
            "Records": [{ "Sns": { "Subject": "hi" } }]
        }))
        .unwrap();
        assert_eq!(event.records.len(), 1);
        assert_eq!(event.records[0].sns.message(), "");
        assert_eq!(event.records[0].sns.subject.as_deref(), Some("hi"));
    }

    #[test]
    fn rejects_missing_or_empty_records() {
        for payload in [json!({}), json!({ "Records": [] }), json!({ "Records": "x" }), json!([])] {
            let err = InboundEvent::from_value(&payload).unwrap_err();
            assert_eq!(err.status_code(), 400);
        }
    }

    #[test]
    fn rejects_record_without_sns_envelope() {
        let err = InboundEvent::from_value(&json!({ "Records": [{ "EventSource": "aws:sns" }] }))
            .unwrap_err();
        assert!(matches!(err, NotifierError::InvalidEvent(_)));
    }

    #[test]
    fn alarm_payload_treats_null_as_absent() {
        let object = json!({ "AlarmName": "cpu", "AlarmDescription": null, "Region": 42 });
        let alarm = AlarmPayload::from_object(object.as_object().unwrap());
        assert_eq!(alarm.alarm_name.as_deref(), Some("cpu"));
        assert_eq!(alarm.alarm_description, None);
        assert_eq!(alarm.region.as_deref(), Some("42"));
    }

    #[test]
    fn alarm_id_prefers_arn_suffix() {
        let alarm = AlarmPayload {
            alarm_arn: Some("arn:aws:cloudwatch:us-east-1:123456789012:alarm:HighCPU".to_string()),
            ..AlarmPayload::default()
        };
        assert_eq!(alarm.alarm_id("fallback"), "HighCPU");
        assert_eq!(AlarmPayload::default().alarm_id("fallback"), "fallback");
    }

    #[test]
    fn invocation_result_serializes_status_code_key() {
        let value = serde_json::to_value(InvocationResult::new(204, "ok")).unwrap();
        assert_eq!(value, json!({ "statusCode": 204, "body": "ok" }));
    }
}
