//! Relay pipeline - turns Telegram updates into agent calls and replies.

pub mod agent;
pub mod interpreter;
pub mod message;
pub mod outbound;
pub mod telegram;

pub use agent::{AgentClient, ImageRequest, TextRequest};
pub use interpreter::{interpret, FallbackReason, OutboundAction};
pub use message::InboundMessage;
pub use telegram::{TelegramClient, TransportError};
