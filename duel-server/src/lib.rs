use std::sync::Arc;
use warp::Filter;

use crate::websocket::{Dispatcher, RateLimitSettings};

pub mod config;
pub mod handlers;
pub mod matchmaking;
pub mod room_registry;
pub mod scheduler;
pub mod server_state;
pub mod websocket;

pub fn create_routes(
    dispatcher: Dispatcher,
    rate_limit: RateLimitSettings,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let dispatcher_filter = warp::any().map(move || dispatcher.clone());

    // WebSocket endpoint
    let websocket = warp::path("ws")
        .and(warp::ws())
        .and(dispatcher_filter)
        .map(move |ws: warp::ws::Ws, dispatcher: Dispatcher| {
            ws.on_upgrade(move |socket| websocket::handle_connection(socket, dispatcher, rate_limit))
        });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", warp::http::StatusCode::OK));

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET"]);

    websocket.or(health).with(cors).with(warp::log("word_duel"))
}

/// Wires the shared state, connection registry and scheduler into a dispatcher.
pub fn build_dispatcher(
    state: server_state::ServerState,
    scheduler: Arc<dyn scheduler::Scheduler>,
) -> Dispatcher {
    Dispatcher::new(
        Arc::new(websocket::ConnectionManager::new()),
        Arc::new(state),
        scheduler,
    )
}
