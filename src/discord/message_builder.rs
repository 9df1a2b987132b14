//! Builds Discord webhook payloads from SNS messages.
//!
//! CloudWatch alarm notifications become a single embed linking to the alarm
//! in the AWS console. Anything else is forwarded as plain `content`.

use serde::Serialize;
use serde_json::Value;

use crate::core::models::AlarmPayload;

pub const DESCRIPTION_LIMIT: usize = 4000;
pub const FIELD_VALUE_LIMIT: usize = 1024;
pub const CONTENT_LIMIT: usize = 1900;

pub const ALARM_COLOR: u32 = 15_158_332;
pub const FOOTER_TEXT: &str = "AWS CloudWatch Monitoring";

const UNKNOWN_ALARM: &str = "Unknown Alarm";
const NO_DESCRIPTION: &str = "설명 없음";
const NO_REASON: &str = "사유 미제공";

/// Discord webhook body: either plain content or embeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscordMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub url: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

impl DiscordMessage {
    #[must_use]
    pub fn content(text: &str) -> Self {
        Self {
            content: Some(truncate_chars(text, CONTENT_LIMIT)),
            embeds: Vec::new(),
        }
    }

    #[must_use]
    pub fn embed(embed: Embed) -> Self {
        Self {
            content: None,
            embeds: vec![embed],
        }
    }

    #[must_use]
    pub fn is_embed(&self) -> bool {
        !self.embeds.is_empty()
    }
}

/// Turns a raw SNS `Message` into a Discord payload.
///
/// JSON objects carrying an `AlarmName` key are rendered as an alarm embed.
/// Other JSON objects forward their `Message` field, and anything that is not
/// a JSON object is forwarded verbatim.
#[must_use]
pub fn build_discord_message(raw_message: &str, default_region: &str) -> DiscordMessage {
    let parsed = serde_json::from_str::<Value>(raw_message).ok();
    let Some(Value::Object(object)) = parsed else {
        return DiscordMessage::content(raw_message);
    };

    if object.contains_key("AlarmName") {
        let alarm = AlarmPayload::from_object(&object);
        return DiscordMessage::embed(build_alarm_embed(&alarm, default_region));
    }

    match object.get("Message").and_then(Value::as_str) {
        Some(message) => DiscordMessage::content(message),
        None => DiscordMessage::content(raw_message),
    }
}

#[must_use]
pub fn build_alarm_embed(alarm: &AlarmPayload, default_region: &str) -> Embed {
    let alarm_name = alarm.alarm_name.as_deref().unwrap_or(UNKNOWN_ALARM);
    let description = alarm
        .alarm_description
        .as_deref()
        .or(alarm.message.as_deref())
        .unwrap_or(NO_DESCRIPTION);
    let reason = alarm.new_state_reason.as_deref().unwrap_or(NO_REASON);
    let region = alarm.region.as_deref().unwrap_or(default_region);

    Embed {
        title: format!("🚨 CloudWatch 알림: {alarm_name}"),
        description: truncate_chars(description, DESCRIPTION_LIMIT),
        url: console_alarm_url(region, alarm.alarm_id(alarm_name)),
        color: ALARM_COLOR,
        fields: vec![
            EmbedField {
                name: "상태 변경 사유".to_string(),
                value: truncate_chars(reason, FIELD_VALUE_LIMIT),
                inline: false,
            },
            EmbedField {
                name: "리전".to_string(),
                value: region.to_string(),
                inline: true,
            },
            EmbedField {
                name: "알람 이름".to_string(),
                value: alarm_name.to_string(),
                inline: true,
            },
        ],
        footer: EmbedFooter {
            text: FOOTER_TEXT.to_string(),
        },
    }
}

/// Deep link to the alarm in the CloudWatch console.
#[must_use]
pub fn console_alarm_url(region: &str, alarm_id: &str) -> String {
    format!(
        "https://{region}.console.aws.amazon.com/cloudwatch/home?region={region}#alarmsV2:alarm/{}",
        urlencoding::encode(alarm_id)
    )
}

/// Keeps at most `max_chars` characters, never splitting a character.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("알람알람", 2), "알람");
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("exact", 5), "exact");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn console_url_encodes_alarm_id() {
        assert_eq!(
            console_alarm_url("ap-northeast-2", "High CPU"),
            "https://ap-northeast-2.console.aws.amazon.com/cloudwatch/home?region=ap-northeast-2#alarmsV2:alarm/High%20CPU"
        );
    }

    #[test]
    fn content_message_omits_embeds_when_serialized() {
        let value = serde_json::to_value(DiscordMessage::content("hello")).unwrap();
        assert_eq!(value, serde_json::json!({ "content": "hello" }));
    }
}
