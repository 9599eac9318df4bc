mod filter;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{ConnectInfo, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use filter::FilterKind;
use frame_filter_common::config::Config;
use serde::Serialize;
use state::AppState;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

const SERVICE_STATUS: &str = "AR Filter Service Running";
const SERVICE_VERSION: &str = "1.0.0";

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
    version: &'static str,
}

/// GET / — fixed liveness payload
async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: SERVICE_STATUS,
        version: SERVICE_VERSION,
    })
}

/// GET /ws/filter — upgrade to the frame-filter session
async fn ws_filter(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| session::run(socket, state, peer))
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/ws/filter", get(ws_filter))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    let config = match Config::from_args() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.parse().unwrap_or_default()),
        )
        .init();

    let initial = FilterKind::parse(&config.service.default_filter).unwrap_or_else(|| {
        warn!(
            filter = config.service.default_filter,
            "unknown default filter, using none"
        );
        FilterKind::None
    });

    let state = Arc::new(AppState::new(initial, config.service.jpeg_quality));
    let app = router(state);

    let addr = format!("{}:{}", config.service.host, config.service.port);
    info!(
        addr,
        filter = %initial,
        jpeg_quality = config.service.jpeg_quality,
        "frame-filter service starting"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap_or_else(|e| {
        eprintln!("Failed to bind to {addr}: {e}");
        std::process::exit(1);
    });
    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        error!(error = %e, "server error");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::{SinkExt, StreamExt};
    use frame_filter_common::frame::{self, JPEG_MIME};
    use image::{Rgb, RgbImage};
    use std::time::Duration;
    use tokio_tungstenite::tungstenite::Message;

    #[tokio::test]
    async fn status_payload_is_fixed() {
        let Json(body) = status().await;
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"status": "AR Filter Service Running", "version": "1.0.0"})
        );
    }

    #[test]
    fn router_builds_with_state() {
        let _app = router(Arc::new(AppState::new(FilterKind::None, 85)));
    }

    async fn spawn_service(state: Arc<AppState>) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(
                listener,
                router(state).into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });
        addr
    }

    fn text_json(msg: Message) -> serde_json::Value {
        match msg {
            Message::Text(text) => serde_json::from_str(&text).unwrap(),
            other => panic!("expected a text reply, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn session_replies_then_closes_on_malformed_json() {
        let state = Arc::new(AppState::new(FilterKind::None, 85));
        let addr = spawn_service(state.clone()).await;

        tokio::time::timeout(Duration::from_secs(10), async {
            let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws/filter"))
                .await
                .unwrap();

            // Binary frames are skipped, so the next reply belongs to set_filter.
            ws.send(Message::Binary(vec![1, 2, 3].into())).await.unwrap();
            ws.send(Message::Text(
                r#"{"type":"set_filter","filter":"cat_ears"}"#.to_string().into(),
            ))
            .await
            .unwrap();
            let reply = text_json(ws.next().await.unwrap().unwrap());
            assert_eq!(
                reply,
                serde_json::json!({"type": "filter_updated", "filter": "cat_ears"})
            );
            assert_eq!(state.selected().await, FilterKind::CatEars);

            let img = RgbImage::from_pixel(8, 8, Rgb([60, 90, 120]));
            let uri = frame::to_data_uri(JPEG_MIME, &frame::encode_jpeg(&img, 95).unwrap());
            let msg = serde_json::json!({"type": "process_frame", "frame": uri}).to_string();
            ws.send(Message::Text(msg.into())).await.unwrap();
            let reply = text_json(ws.next().await.unwrap().unwrap());
            assert_eq!(reply["type"], "processed_frame");
            assert!(reply["frame"]
                .as_str()
                .unwrap()
                .starts_with("data:image/jpeg;base64,"));

            ws.send(Message::Text("{bad".to_string().into())).await.unwrap();
            match ws.next().await {
                Some(Ok(Message::Close(_))) => {}
                other => panic!("expected a close frame, got {other:?}"),
            }
            // The server has left its loop; nothing but the end of the stream follows.
            match ws.next().await {
                None | Some(Err(_)) => {}
                Some(Ok(msg)) => panic!("unexpected message after close: {msg:?}"),
            }
        })
        .await
        .expect("session did not finish in time");
    }
}
