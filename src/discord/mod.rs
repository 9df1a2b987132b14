//! All Discord-specific functionality

pub mod client;
pub mod message_builder;

// Re-export main types for convenience
pub use client::{ReqwestTransport, WebhookResponse, WebhookTransport};
pub use message_builder::{DiscordMessage, Embed, EmbedField, EmbedFooter, build_discord_message};
