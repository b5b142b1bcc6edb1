use axum::{
    debug_handler,
    extract::{ws::{Message as WidgetMessage, WebSocket}, State, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::Message as UpstreamMessage};
use tower_sessions::Session;

use crate::config::Config;
use crate::gateway::Gateway;
use crate::{session, AppResult, AppState};

use super::wire::{Incoming, Outgoing, WidgetLine};

#[debug_handler(state = AppState)]
pub(crate) async fn chat_ws(
    State(config): State<Config>,
    State(gateway): State<Gateway>,
    session: Session,
    ws: WebSocketUpgrade,
) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &gateway).await? else {
        return Ok(StatusCode::UNAUTHORIZED.into_response());
    };

    Ok(ws.on_upgrade(move |widget| async move {
        if let Err(err) = bridge(widget, &config, &user.username).await {
            log::warn!("chat bridge for {} closed: {err}", user.username);
        }
    }))
}

/// One upstream connection per widget mount; both sockets die together.
async fn bridge(widget: WebSocket, config: &Config, user: &str) -> anyhow::Result<()> {
    let (upstream, _) = connect_async(config.chat_url.as_str()).await?;
    let (mut up_tx, mut up_rx) = upstream.split();
    let (mut widget_tx, mut widget_rx) = widget.split();

    let room = config.chat_room.as_str();
    up_tx
        .send(upstream_frame(&Outgoing::Join {
            room: room.to_string(),
            user: user.to_string(),
        })?)
        .await?;
    log::debug!("{user} joined chat room {room}");

    // an outgoing message is echoed to the widget only once the server acks it
    let mut pending: Option<String> = None;

    loop {
        tokio::select! {
            msg = widget_rx.next() => {
                let Some(Ok(msg)) = msg else { break };
                let text = match msg {
                    WidgetMessage::Text(text) => text.to_string(),
                    WidgetMessage::Close(_) => break,
                    _ => continue,
                };
                if text.trim().is_empty() {
                    continue;
                }
                up_tx
                    .send(upstream_frame(&Outgoing::Message {
                        room: room.to_string(),
                        message: text.clone(),
                        user: user.to_string(),
                    })?)
                    .await?;
                pending = Some(text);
            }
            msg = up_rx.next() => {
                let Some(Ok(msg)) = msg else { break };
                let Ok(event) = serde_json::from_slice::<Incoming>(&msg.into_data()) else {
                    // unknown events are ignored
                    continue;
                };
                match event {
                    Incoming::Ack => {
                        if let Some(text) = pending.take() {
                            widget_tx.send(widget_frame(user, &text)?).await?;
                        }
                    }
                    Incoming::Message { message, user: from, .. } => {
                        widget_tx.send(widget_frame(&from, &message)?).await?;
                    }
                    Incoming::Disconnect => break,
                }
            }
        }
    }

    Ok(())
}

fn upstream_frame(event: &Outgoing) -> anyhow::Result<UpstreamMessage> {
    Ok(UpstreamMessage::from(serde_json::to_string(event)?))
}

fn widget_frame(user: &str, message: &str) -> anyhow::Result<WidgetMessage> {
    Ok(WidgetMessage::from(serde_json::to_string(&WidgetLine { user, message })?))
}
