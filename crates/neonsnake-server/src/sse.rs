use std::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use futures::stream::Stream;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

use crate::spectate::SpectateFrame;
use crate::state::{AppState, ConnectionGuard};

/// GET /api/v1/live/{game_id}/stream — SSE feed of simulation frames for one
/// live game.
pub async fn live_stream(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<SseEvent, Infallible>>>, StatusCode> {
    let max_sse = state.config.limits.max_sse_subscribers;
    let current = state.sse_subscriber_count.load(Ordering::Relaxed);
    if current >= max_sse {
        tracing::warn!(current, max = max_sse, "SSE subscriber limit reached");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    let Some(game) = state.spectate.get(&game_id) else {
        return Err(StatusCode::NOT_FOUND);
    };

    let guard = ConnectionGuard::new(Arc::clone(&state.sse_subscriber_count));
    let rx = game.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(move |result: Result<SpectateFrame, _>| {
        let _guard = &guard;
        match result {
            Ok(frame) => {
                let json = serde_json::to_string(&frame).unwrap_or_default();
                Some(Ok(SseEvent::default()
                    .event("frame")
                    .data(json)
                    .id(frame.tick.to_string())))
            },
            Err(e) => {
                tracing::warn!("SSE broadcast receive error: {e}");
                None
            },
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
