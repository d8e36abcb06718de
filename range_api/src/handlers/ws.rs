// Push channel for viewers. Every frame is a serialized `Notification`,
// `{"type": kind, "data": payload}`. Incoming text is ignored.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::instrument;
use types::Notification;

use crate::game::Game;
use crate::state::AppState;

#[instrument(skip(ws, state))]
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let game = state.game.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, game))
}

#[instrument(skip_all)]
async fn handle_socket(mut socket: WebSocket, game: Game) {
    let (greeting, mut subscription) = game.connect_viewer().await;
    tracing::info!(
        viewers = game.bus().subscriber_count(),
        "viewer connected"
    );

    for notification in &greeting {
        if send(&mut socket, notification).await.is_err() {
            tracing::debug!("viewer went away during greeting");
            return;
        }
    }

    loop {
        tokio::select! {
            notification = subscription.next() => {
                let Some(notification) = notification else {
                    break;
                };
                if let Err(e) = send(&mut socket, &notification).await {
                    tracing::debug!("failed to send to viewer: {e}");
                    break;
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Ping(payload))) => {
                        if socket.send(Message::Pong(payload)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::debug!("websocket receive error: {e}");
                        break;
                    }
                }
            }
        }
    }

    drop(subscription);
    tracing::info!(
        viewers = game.bus().subscriber_count(),
        "viewer disconnected"
    );
}

#[derive(Debug, thiserror::Error)]
enum SendError {
    #[error("serialize: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("socket: {0}")]
    Socket(#[from] axum::Error),
}

fn frame(notification: &Notification) -> Result<Message, serde_json::Error> {
    let text = serde_json::to_string(notification)?;

    Ok(Message::Text(text.into()))
}

async fn send(
    socket: &mut WebSocket,
    notification: &Notification,
) -> Result<(), SendError> {
    socket.send(frame(notification)?).await?;

    Ok(())
}
