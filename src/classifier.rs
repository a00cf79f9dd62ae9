use teloxide::types::{Message, Update, UpdateKind};

/// What an inbound update contains, in the priority order the handlers use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateClass {
    /// The update carries no message payload at all (edited message,
    /// callback query, member update, ...). Callers must short-circuit.
    NoMessage,
    Text,
    Photo,
    Document,
    Voice,
    Audio,
    Video,
    VideoNote,
    Sticker,
    Location,
    Contact,
    Unknown,
}

/// Classify an inbound update. Pure, no I/O.
pub fn classify(update: &Update) -> UpdateClass {
    match update.kind {
        UpdateKind::Message(ref msg) => message_class(msg),
        _ => UpdateClass::NoMessage,
    }
}

// Ordered chain; the first populated field wins. Text outranks photo, so a
// photo with a caption is Photo, never Text.
fn message_class(msg: &Message) -> UpdateClass {
    if msg.text().is_some() {
        UpdateClass::Text
    } else if msg.photo().is_some() {
        UpdateClass::Photo
    } else if msg.document().is_some() {
        UpdateClass::Document
    } else if msg.voice().is_some() {
        UpdateClass::Voice
    } else if msg.audio().is_some() {
        UpdateClass::Audio
    } else if msg.video().is_some() {
        UpdateClass::Video
    } else if msg.video_note().is_some() {
        UpdateClass::VideoNote
    } else if msg.sticker().is_some() {
        UpdateClass::Sticker
    } else if msg.location().is_some() {
        UpdateClass::Location
    } else if msg.contact().is_some() {
        UpdateClass::Contact
    } else {
        UpdateClass::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    /// Build an Update wrapping a message with the given payload fields,
    /// using the same JSON shapes the Bot API sends.
    fn message_update(payload: Value) -> Update {
        let mut message = json!({
            "message_id": 1,
            "date": 1710000000,
            "chat": {"id": 42, "type": "private", "first_name": "Ana"},
            "from": {"id": 42, "is_bot": false, "first_name": "Ana"}
        });
        for (key, value) in payload.as_object().unwrap() {
            message[key] = value.clone();
        }
        // teloxide's `Update` uses `#[serde(flatten)]` over a custom
        // `UpdateKind` deserializer that swallows errors when fed serde's
        // buffered `Content` (the `from_value` path) and falls back to
        // `UpdateKind::Error`. Round-tripping through a string deserializes
        // the `Message` for real, matching how real updates arrive.
        let update = json!({"update_id": 1, "message": message});
        serde_json::from_str(&update.to_string())
            .expect("update fixture should deserialize")
    }

    #[test]
    fn test_text_message() {
        let update = message_update(json!({"text": "hola"}));
        assert_eq!(classify(&update), UpdateClass::Text);
    }

    #[test]
    fn test_photo_message() {
        let update = message_update(json!({
            "photo": [
                {"file_id": "f1", "file_unique_id": "u1", "width": 90, "height": 90, "file_size": 100}
            ]
        }));
        assert_eq!(classify(&update), UpdateClass::Photo);
    }

    #[test]
    fn test_photo_with_caption_is_photo_not_text() {
        // A caption never counts as text; the photo handler owns it.
        let update = message_update(json!({
            "caption": "mi foto de perfil",
            "photo": [
                {"file_id": "f1", "file_unique_id": "u1", "width": 90, "height": 90, "file_size": 100}
            ]
        }));
        assert_eq!(classify(&update), UpdateClass::Photo);
    }

    #[test]
    fn test_document_message() {
        let update = message_update(json!({
            "document": {"file_id": "d1", "file_unique_id": "du1", "file_name": "cv.docx"}
        }));
        assert_eq!(classify(&update), UpdateClass::Document);
    }

    #[test]
    fn test_voice_message() {
        let update = message_update(json!({
            "voice": {"file_id": "v1", "file_unique_id": "vu1", "duration": 3, "mime_type": "audio/ogg"}
        }));
        assert_eq!(classify(&update), UpdateClass::Voice);
    }

    #[test]
    fn test_video_message() {
        let update = message_update(json!({
            "video": {"file_id": "vd1", "file_unique_id": "vdu1", "width": 640, "height": 480, "duration": 5, "mime_type": "video/mp4"}
        }));
        assert_eq!(classify(&update), UpdateClass::Video);
    }

    #[test]
    fn test_location_message() {
        let update = message_update(json!({
            "location": {"latitude": -34.9, "longitude": -56.2}
        }));
        assert_eq!(classify(&update), UpdateClass::Location);
    }

    #[test]
    fn test_contact_message() {
        let update = message_update(json!({
            "contact": {"phone_number": "+59891234567", "first_name": "Ana"}
        }));
        assert_eq!(classify(&update), UpdateClass::Contact);
    }

    #[test]
    fn test_unsupported_payload_is_unknown() {
        let update = message_update(json!({
            "dice": {"emoji": "🎲", "value": 3}
        }));
        assert_eq!(classify(&update), UpdateClass::Unknown);
    }

    #[test]
    fn test_edited_message_is_no_message() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 2,
            "edited_message": {
                "message_id": 1,
                "date": 1710000000,
                "edit_date": 1710000060,
                "chat": {"id": 42, "type": "private", "first_name": "Ana"},
                "from": {"id": 42, "is_bot": false, "first_name": "Ana"},
                "text": "hola de nuevo"
            }
        }))
        .unwrap();
        assert_eq!(classify(&update), UpdateClass::NoMessage);
    }
}
