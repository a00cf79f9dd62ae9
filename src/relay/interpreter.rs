//! AI response interpretation.
//!
//! The agent answers with a loosely-shaped envelope:
//! `{"message": {"message": .., "status": .., "pdfData": .., "pdfFilename": ..}}`
//! where any key may be absent, null, or wrong-typed. This module walks that
//! envelope with explicit presence checks and decides which replies to send.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::relay::agent::AgentError;

/// Filename used when the agent does not name the generated PDF.
pub const DEFAULT_PDF_FILENAME: &str = "curriculum.pdf";

/// Caption used when the agent sends a PDF without a message text.
pub const DEFAULT_PDF_CAPTION: &str = "Aquí está tu curriculum";

/// Why a fallback reply is being sent instead of agent content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The agent call failed or the body was not a usable envelope.
    NoResponse,
    /// The envelope parsed but carries no "message" object.
    UnexpectedShape,
    /// The PDF payload was not valid Base64.
    InvalidPdfEncoding,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::NoResponse => "no_response",
            FallbackReason::UnexpectedShape => "unexpected_shape",
            FallbackReason::InvalidPdfEncoding => "invalid_pdf_encoding",
        }
    }

    /// The reply shown to the user for this fallback.
    pub fn user_text(&self) -> &'static str {
        match self {
            FallbackReason::NoResponse => {
                "Lo siento, no pude obtener una respuesta del servicio. Por favor intenta nuevamente."
            }
            FallbackReason::UnexpectedShape => {
                "He recibido tu mensaje, pero no pude procesar la respuesta correctamente."
            }
            FallbackReason::InvalidPdfEncoding => {
                "Lo siento, los datos del PDF no son válidos. Por favor intenta nuevamente."
            }
        }
    }
}

/// A reply decided by the interpreter, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundAction {
    SendText {
        recipient: i64,
        text: String,
    },
    SendDocument {
        recipient: i64,
        bytes: Vec<u8>,
        filename: String,
        caption: String,
    },
    SendFallbackError {
        recipient: i64,
        reason: FallbackReason,
    },
}

fn fallback(recipient: i64, reason: FallbackReason) -> Vec<OutboundAction> {
    vec![OutboundAction::SendFallbackError { recipient, reason }]
}

/// Decide the replies for one agent response.
///
/// The recipient id is threaded unchanged into every action; nothing here
/// resolves or caches a different recipient.
pub fn interpret(recipient: i64, outcome: Result<Value, AgentError>) -> Vec<OutboundAction> {
    let envelope = match outcome {
        Ok(envelope) => envelope,
        Err(e) => {
            error!("Agent call failed for user {}: {}", recipient, e);
            return fallback(recipient, FallbackReason::NoResponse);
        }
    };

    if envelope.is_null() {
        warn!("Agent returned a null envelope for user {}", recipient);
        return fallback(recipient, FallbackReason::NoResponse);
    }

    let message_map = match envelope.get("message") {
        Some(Value::Object(map)) => map,
        Some(_) => {
            warn!("Envelope \"message\" is not an object for user {}", recipient);
            return fallback(recipient, FallbackReason::UnexpectedShape);
        }
        None => {
            warn!("Envelope has no \"message\" key for user {}", recipient);
            return fallback(recipient, FallbackReason::UnexpectedShape);
        }
    };

    if let Some(Value::String(status)) = message_map.get("status") {
        debug!("Agent status for user {}: {}", recipient, status);
    }

    let mut actions = Vec::new();

    match message_map.get("pdfData") {
        None | Some(Value::Null) => {}
        Some(Value::String(data)) if data.is_empty() => {
            // Deliberate silent skip: no document, no error to the user.
            warn!("PDF data is empty for user {}", recipient);
        }
        Some(Value::String(data)) => {
            info!("PDF data received for user {}", recipient);
            match BASE64.decode(data) {
                Ok(bytes) => {
                    let filename = match message_map.get("pdfFilename") {
                        Some(Value::String(name)) => name.clone(),
                        _ => DEFAULT_PDF_FILENAME.to_string(),
                    };
                    let caption = match message_map.get("message") {
                        Some(Value::String(text)) => text.clone(),
                        _ => DEFAULT_PDF_CAPTION.to_string(),
                    };
                    actions.push(OutboundAction::SendDocument {
                        recipient,
                        bytes,
                        filename,
                        caption,
                    });
                    // The caption already carries the message text; a separate
                    // text reply would duplicate it.
                    return actions;
                }
                Err(e) => {
                    error!("Invalid Base64 data for PDF for user {}: {}", recipient, e);
                    actions.push(OutboundAction::SendFallbackError {
                        recipient,
                        reason: FallbackReason::InvalidPdfEncoding,
                    });
                }
            }
        }
        Some(_) => {
            error!("PDF data is not a string for user {}", recipient);
            actions.push(OutboundAction::SendFallbackError {
                recipient,
                reason: FallbackReason::InvalidPdfEncoding,
            });
        }
    }

    if let Some(Value::String(text)) = message_map.get("message") {
        actions.push(OutboundAction::SendText {
            recipient,
            text: text.clone(),
        });
    }

    actions
}
