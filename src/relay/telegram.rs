//! Telegram client using teloxide.

use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{ChatId, FileId, InputFile};
use tracing::{info, warn};

/// Failures on the chat side of the relay.
#[derive(Debug)]
pub enum TransportError {
    /// A send to the chat failed.
    Send(String),
    /// Attachment bytes could not be fetched from Telegram.
    AttachmentUnavailable(String),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Send(e) => write!(f, "send failed: {e}"),
            TransportError::AttachmentUnavailable(e) => {
                write!(f, "attachment unavailable: {e}")
            }
        }
    }
}

impl std::error::Error for TransportError {}

/// Telegram API client.
pub struct TelegramClient {
    bot: Bot,
}

impl TelegramClient {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), TransportError> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .await
            .map(|_| ())
            .map_err(|e| {
                let msg = format!("Failed to send text: {e}");
                warn!("{}", msg);
                TransportError::Send(msg)
            })
    }

    /// Send a document from bytes with a filename and caption.
    pub async fn send_document(
        &self,
        chat_id: i64,
        bytes: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> Result<(), TransportError> {
        info!("📄 Sending document to chat {} ({} bytes)", chat_id, bytes.len());

        let input_file = InputFile::memory(bytes).file_name(filename.to_string());

        self.bot
            .send_document(ChatId(chat_id), input_file)
            .caption(caption)
            .await
            .map(|_| ())
            .map_err(|e| {
                let msg = format!("Failed to send document: {e}");
                warn!("{}", msg);
                TransportError::Send(msg)
            })
    }

    /// Download an attachment by file id (get the file path, then fetch it).
    pub async fn download_attachment(&self, file_id: FileId) -> Result<Vec<u8>, TransportError> {
        let file = self.bot.get_file(file_id).await.map_err(|e| {
            let msg = format!("Failed to get file info: {e}");
            warn!("{}", msg);
            TransportError::AttachmentUnavailable(msg)
        })?;

        let mut data = Vec::new();
        self.bot
            .download_file(&file.path, &mut data)
            .await
            .map_err(|e| {
                let msg = format!("Failed to download file: {e}");
                warn!("{}", msg);
                TransportError::AttachmentUnavailable(msg)
            })?;

        info!("📥 Downloaded attachment ({} bytes)", data.len());
        Ok(data)
    }
}
