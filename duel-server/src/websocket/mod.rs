use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;
use warp::ws::{Message, WebSocket};

use crate::handlers;
use duel_types::{ClientMessage, PlayerId};

pub mod connection;
pub mod dispatch;
pub mod rate_limiter;


pub use connection::ConnectionManager;
pub use dispatch::Dispatcher;
use rate_limiter::RateLimiter;

#[derive(Debug, Clone, Copy)]
pub struct RateLimitSettings {
    pub burst: u32,
    pub refill: Duration,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            burst: 30,
            refill: Duration::from_millis(500),
        }
    }
}

pub async fn handle_connection(
    websocket: WebSocket,
    dispatcher: Dispatcher,
    rate_limit: RateLimitSettings,
) {
    let player_id: PlayerId = Uuid::new_v4();
    info!("New WebSocket connection: {}", player_id);

    let (mut ws_sender, mut ws_receiver) = websocket.split();
    let message_receiver = dispatcher
        .connection_manager()
        .create_connection(player_id)
        .await;

    // Handle incoming messages
    let incoming_handler = {
        let dispatcher = dispatcher.clone();
        let mut rate_limiter = RateLimiter::new_with_limits(rate_limit.burst, rate_limit.refill);

        async move {
            while let Some(result) = ws_receiver.next().await {
                match result {
                    Ok(msg) => {
                        if msg.is_close() {
                            break;
                        }
                        handle_message(msg, &mut rate_limiter, &dispatcher, player_id).await;
                    }
                    Err(e) => {
                        warn!("WebSocket error for {}: {}", player_id, e);
                        break;
                    }
                }
            }
        }
    };

    // Handle outgoing messages
    let outgoing_handler = async move {
        let mut receiver = message_receiver;

        while let Some(message) = receiver.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    warn!("Failed to serialize message: {:?}", e);
                    continue;
                }
            };

            if let Err(e) = ws_sender.send(Message::text(json)).await {
                warn!("Failed to send message to {}: {:?}", player_id, e);
                break;
            }
        }
    };

    tokio::select! {
        _ = incoming_handler => {},
        _ = outgoing_handler => {},
    }

    let outbounds = handlers::handle_disconnect(player_id, dispatcher.state()).await;
    let open_for = dispatcher
        .connection_manager()
        .remove_connection(player_id)
        .await;
    dispatcher.dispatch(outbounds).await;
    info!("Connection {} disconnected after {:?}", player_id, open_for);
}

/// Invalid or throttled frames are dropped without a reply.
async fn handle_message(
    msg: Message,
    rate_limiter: &mut RateLimiter,
    dispatcher: &Dispatcher,
    player_id: PlayerId,
) {
    if !rate_limiter.check_rate_limit() {
        warn!("Rate limit exceeded for connection {}", player_id);
        return;
    }

    let Ok(text) = msg.to_str() else {
        debug!("Ignoring non-text frame from {}", player_id);
        return;
    };

    let client_message: ClientMessage = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(e) => {
            warn!("Invalid message from {}: {}", player_id, e);
            return;
        }
    };

    let outbounds = handlers::handle_message(player_id, client_message, dispatcher.state()).await;
    dispatcher.dispatch(outbounds).await;
}
