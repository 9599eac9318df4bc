use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use frame_filter_common::frame::{self, DataUri, FrameError, JPEG_MIME};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::filter::FilterKind;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    FilterUpdated { filter: String },
    ProcessedFrame { frame: String },
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("malformed JSON message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("message has no string `{0}` field")]
    MissingField(&'static str),
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("websocket transport error: {0}")]
    Transport(#[from] axum::Error),
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Handle one text message, returning the reply to send, if any.
///
/// Dispatch is on a string `type`. Anything else, including a missing or
/// non-string `type`, is ignored. Fields are only looked at by the arm that
/// uses them, so unrelated fields of any shape are tolerated.
pub async fn handle_text(
    state: &AppState,
    text: &str,
) -> Result<Option<ServerMessage>, SessionError> {
    let msg: Value = serde_json::from_str(text)?;

    match msg.get("type").and_then(Value::as_str) {
        Some("set_filter") => {
            let requested = msg.get("filter").and_then(Value::as_str).unwrap_or("none");
            let kind = FilterKind::parse(requested).unwrap_or_else(|| {
                warn!(requested, "unknown filter, falling back to none");
                FilterKind::None
            });
            let previous = state.select(kind).await;
            info!(%previous, filter = %kind, "filter changed");
            Ok(Some(ServerMessage::FilterUpdated {
                filter: kind.wire_name().to_string(),
            }))
        }
        Some("process_frame") => {
            let uri = msg
                .get("frame")
                .and_then(Value::as_str)
                .ok_or(SessionError::MissingField("frame"))?;
            let kind = state.selected().await;
            let frame = process_frame(uri, kind, state.jpeg_quality)?;
            Ok(Some(ServerMessage::ProcessedFrame { frame }))
        }
        _ => {
            debug!(kind = ?msg.get("type"), "ignoring message with unrecognised type");
            Ok(None)
        }
    }
}

/// Decode a data-URI frame, apply `kind`, and re-encode it as a JPEG data URI.
pub fn process_frame(uri: &str, kind: FilterKind, jpeg_quality: u8) -> Result<String, FrameError> {
    let data_uri = DataUri::parse(uri)?;
    let mut img = data_uri.decode_image()?;
    kind.apply(&mut img);
    let jpeg = frame::encode_jpeg(&img, jpeg_quality)?;
    debug!(
        media_type = data_uri.media_type,
        width = img.width(),
        height = img.height(),
        in_bytes = data_uri.data.len(),
        out_bytes = jpeg.len(),
        filter = kind.filter().name(),
        "frame processed"
    );
    Ok(frame::to_data_uri(JPEG_MIME, &jpeg))
}

// ---------------------------------------------------------------------------
// Connection loop
// ---------------------------------------------------------------------------

/// Serve one WebSocket connection until the client leaves or a message
/// fails. Messages are handled strictly in arrival order.
pub async fn run(socket: WebSocket, state: Arc<AppState>, peer: SocketAddr) {
    info!(%peer, "client connected to filter service");
    let (mut sender, mut receiver) = socket.split();
    let mut frames: u64 = 0;

    while let Some(result) = receiver.next().await {
        let text = match result {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(Message::Binary(bytes)) => {
                debug!(%peer, len = bytes.len(), "ignoring binary message");
                continue;
            }
            // Ping/Pong are answered by axum.
            Ok(_) => continue,
            Err(e) => {
                warn!(%peer, error = %e, "websocket receive error");
                break;
            }
        };

        match respond(&state, &text, &mut sender).await {
            Ok(true) => {
                frames += 1;
                if frames % 100 == 0 {
                    debug!(%peer, frames, "frames processed");
                }
            }
            Ok(false) => {}
            Err(SessionError::Transport(e)) => {
                warn!(%peer, error = %e, "failed to send reply");
                break;
            }
            Err(e) => {
                error!(%peer, error = %e, "error in filter session, closing connection");
                let _ = sender.send(Message::Close(None)).await;
                break;
            }
        }
    }

    info!(%peer, frames, "client disconnected from filter service");
}

/// Returns `true` if a processed frame was sent.
async fn respond(
    state: &AppState,
    text: &str,
    sender: &mut SplitSink<WebSocket, Message>,
) -> Result<bool, SessionError> {
    let Some(reply) = handle_text(state, text).await? else {
        return Ok(false);
    };
    let is_frame = matches!(reply, ServerMessage::ProcessedFrame { .. });
    sender.send(Message::Text(serde_json::to_string(&reply)?)).await?;
    Ok(is_frame)
}
