//! SNS record processing and the Lambda handler

pub mod handler;

pub use handler::{Notifier, handler};

/// Body returned once every record was accepted by Discord.
pub const SUCCESS_BODY: &str = "메시지 전송 성공";
