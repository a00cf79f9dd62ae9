mod classifier;
mod config;
mod relay;

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::UpdateKind;
use tracing::{error, info};
use tracing_subscriber::prelude::*;

use classifier::{classify, UpdateClass};
use config::Config;
use relay::outbound::dispatch_all;
use relay::{interpret, AgentClient, ImageRequest, InboundMessage, TelegramClient, TextRequest, TransportError};

/// Reply for message kinds the relay does not handle.
const UNSUPPORTED_TYPE_REPLY: &str =
    "Lo siento, no puedo procesar este tipo de mensaje. Por favor envía texto o una imagen.";
/// Reply for document messages.
const DOCUMENT_REPLY: &str =
    "Lo siento, actualmente no procesamos documentos. Por favor envía texto o una imagen.";
/// Reply when a photo cannot be fetched or relayed.
const IMAGE_ERROR_REPLY: &str =
    "Lo siento, ocurrió un error al procesar tu imagen. Por favor intenta nuevamente.";
/// Last-resort reply when a handler fails.
const GENERIC_ERROR_REPLY: &str =
    "Lo siento, ocurrió un error al procesar tu mensaje. Por favor intenta nuevamente.";

struct BotState {
    telegram: TelegramClient,
    agent: AgentClient,
}

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "curribot.json".to_string());
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let bot = Bot::new(&config.telegram_bot_token);

    // Setup logging
    let log_dir = config.data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).ok();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("curribot.log"))
        .expect("Failed to open log file");
    let (non_blocking, _guard) = tracing_appender::non_blocking(log_file);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                ),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                ),
        )
        .init();

    info!("🚀 Starting curribot...");
    info!("Loaded config from {config_path}");
    info!("Agent endpoint: {}", config.agent_url);

    let state = Arc::new(BotState {
        telegram: TelegramClient::new(bot.clone()),
        agent: AgentClient::new(config.agent_url.clone(), config.request_timeout),
    });

    let handler = dptree::entry().endpoint(handle_update);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn handle_update(update: Update, state: Arc<BotState>) -> ResponseResult<()> {
    let class = classify(&update);
    info!("Received update {}: {:?}", update.id.0, class);

    if class == UpdateClass::NoMessage {
        info!("Update {} doesn't contain a message, ignoring", update.id.0);
        return Ok(());
    }

    let UpdateKind::Message(ref msg) = update.kind else {
        return Ok(());
    };

    let Some(inbound) = InboundMessage::from_message(msg, class) else {
        info!("Update {} has no sender, ignoring", update.id.0);
        return Ok(());
    };

    info!("User interaction: user={}, kind={:?}", inbound.sender_id, inbound.kind);

    let outcome = match inbound.kind {
        UpdateClass::Text => handle_text(&state, &inbound).await,
        UpdateClass::Photo => handle_photo(&state, &inbound).await,
        UpdateClass::Document => state.telegram.send_text(inbound.sender_id, DOCUMENT_REPLY).await,
        _ => {
            state
                .telegram
                .send_text(inbound.sender_id, UNSUPPORTED_TYPE_REPLY)
                .await
        }
    };

    if let Err(e) = outcome {
        error!(
            "Error processing update {} for user {}: {}",
            update.id.0, inbound.sender_id, e
        );
        state
            .telegram
            .send_text(inbound.sender_id, GENERIC_ERROR_REPLY)
            .await
            .ok();
    }

    Ok(())
}

async fn handle_text(state: &BotState, inbound: &InboundMessage) -> Result<(), TransportError> {
    let text = inbound.text.as_deref().unwrap_or_default();

    // Welcome trigger; no agent call.
    if text == "/start" {
        return Ok(());
    }

    info!("Processing text message from user {}", inbound.sender_id);

    let request = TextRequest::new(inbound.sender_id, text);
    let outcome = state.agent.send_text(&request).await;
    let actions = interpret(inbound.sender_id, outcome);
    dispatch_all(&state.telegram, actions).await
}

async fn handle_photo(state: &BotState, inbound: &InboundMessage) -> Result<(), TransportError> {
    info!("Processing photo message from user {}", inbound.sender_id);

    let Some(ref file_id) = inbound.photo_file_id else {
        return state.telegram.send_text(inbound.sender_id, IMAGE_ERROR_REPLY).await;
    };

    let image = match state.telegram.download_attachment(file_id.clone()).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Error downloading photo for user {}: {}", inbound.sender_id, e);
            return state.telegram.send_text(inbound.sender_id, IMAGE_ERROR_REPLY).await;
        }
    };

    let request = ImageRequest::new(inbound.sender_id, inbound.caption.as_deref(), image);
    let outcome = state.agent.send_image(request).await;
    let actions = interpret(inbound.sender_id, outcome);
    dispatch_all(&state.telegram, actions).await
}
