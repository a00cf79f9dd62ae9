//! Outbound dispatch - executes interpreter actions against the transport.
//!
//! Each action maps 1:1 to one Telegram call. No retries here; failures
//! propagate to the per-update handler.

use tracing::info;

use crate::relay::interpreter::OutboundAction;
use crate::relay::telegram::{TelegramClient, TransportError};

pub async fn dispatch(
    telegram: &TelegramClient,
    action: OutboundAction,
) -> Result<(), TransportError> {
    match action {
        OutboundAction::SendText { recipient, text } => {
            telegram.send_text(recipient, &text).await
        }
        OutboundAction::SendDocument { recipient, bytes, filename, caption } => {
            telegram.send_document(recipient, bytes, &filename, &caption).await
        }
        OutboundAction::SendFallbackError { recipient, reason } => {
            info!("Sending {} fallback to user {}", reason.as_str(), recipient);
            telegram.send_text(recipient, reason.user_text()).await
        }
    }
}

/// Dispatch a sequence of actions in emission order.
pub async fn dispatch_all(
    telegram: &TelegramClient,
    actions: Vec<OutboundAction>,
) -> Result<(), TransportError> {
    for action in actions {
        dispatch(telegram, action).await?;
    }
    Ok(())
}
