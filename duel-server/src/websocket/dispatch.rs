use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use std::sync::Arc;
use tracing::warn;

use crate::handlers::{self, Outbound};
use crate::scheduler::Scheduler;
use crate::server_state::ServerState;
use crate::websocket::ConnectionManager;

/// Performs the outbounds a handler returned: direct sends, room broadcasts,
/// and delayed follow-ups through the [`Scheduler`].
#[derive(Clone)]
pub struct Dispatcher {
    connection_manager: Arc<ConnectionManager>,
    state: Arc<ServerState>,
    scheduler: Arc<dyn Scheduler>,
}

impl Dispatcher {
    pub fn new(
        connection_manager: Arc<ConnectionManager>,
        state: Arc<ServerState>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self {
            connection_manager,
            state,
            scheduler,
        }
    }

    pub fn state(&self) -> &ServerState {
        &self.state
    }

    pub fn connection_manager(&self) -> &Arc<ConnectionManager> {
        &self.connection_manager
    }

    pub fn dispatch(&self, outbounds: Vec<Outbound>) -> BoxFuture<'_, ()> {
        async move {
            for outbound in outbounds {
                match outbound {
                    Outbound::ToPlayer { player_id, message } => {
                        if let Err(e) = self
                            .connection_manager
                            .send_to_connection(player_id, message)
                            .await
                        {
                            warn!("Failed to send to {}: {}", player_id, e);
                        }
                    }
                    Outbound::ToRoom {
                        room_id,
                        members,
                        message,
                    } => {
                        for member in members {
                            if let Err(e) = self
                                .connection_manager
                                .send_to_connection(member, message.clone())
                                .await
                            {
                                warn!("Failed to send to {} in room {}: {}", member, room_id, e);
                            }
                        }
                    }
                    Outbound::Deferred { delay, action } => {
                        let dispatcher = self.clone();
                        self.scheduler.schedule(
                            delay,
                            async move {
                                let outbounds =
                                    handlers::run_deferred(action, &dispatcher.state).await;
                                dispatcher.dispatch(outbounds).await;
                            }
                            .boxed(),
                        );
                    }
                }
            }
        }
        .boxed()
    }
}
