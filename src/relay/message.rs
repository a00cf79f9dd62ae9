//! Inbound message normalization.
//!
//! One immutable record per received update; nothing is kept across
//! pipeline passes.

use teloxide::types::{FileId, Message, PhotoSize};

use crate::classifier::UpdateClass;

/// A received message, flattened out of the Telegram update.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Sender user id; every reply derived from this message goes back here.
    pub sender_id: i64,
    pub kind: UpdateClass,
    pub text: Option<String>,
    pub caption: Option<String>,
    /// File id of the largest photo variant, when the message has photos.
    pub photo_file_id: Option<FileId>,
}

impl InboundMessage {
    /// Build from a Telegram message. Returns None when the message has no
    /// sender (channel posts), which the pipeline skips.
    pub fn from_message(msg: &Message, kind: UpdateClass) -> Option<Self> {
        let sender = msg.from.as_ref()?;
        Some(Self {
            sender_id: sender.id.0 as i64,
            kind,
            text: msg.text().map(str::to_string),
            caption: msg.caption().map(str::to_string),
            photo_file_id: msg
                .photo()
                .and_then(largest_photo)
                .map(|photo| photo.file.id.clone()),
        })
    }
}

/// Pick the photo variant with the largest reported byte size.
/// Ties keep the first-seen maximum.
pub fn largest_photo(photos: &[PhotoSize]) -> Option<&PhotoSize> {
    let mut best: Option<&PhotoSize> = None;
    for photo in photos {
        if best.map_or(true, |b| photo.file.size > b.file.size) {
            best = Some(photo);
        }
    }
    best
}
