use duel_types::{PlayerId, ServerMessage};
use std::collections::HashMap;
use std::time::Instant;
use tokio::sync::{RwLock, mpsc};

#[derive(Debug, Clone)]
pub struct Connection {
    pub id: PlayerId,
    pub connected_at: Instant,
    pub sender: mpsc::UnboundedSender<ServerMessage>,
}

impl Connection {
    pub fn new(id: PlayerId) -> (Self, mpsc::UnboundedReceiver<ServerMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();

        let connection = Self {
            id,
            connected_at: Instant::now(),
            sender,
        };

        (connection, receiver)
    }

    pub fn send_message(&self, message: ServerMessage) -> Result<(), String> {
        self.sender
            .send(message)
            .map_err(|_| "Connection closed".to_string())
    }
}

/// Outbound channels of every open socket, keyed by the player id the
/// gateway assigned to it.
pub struct ConnectionManager {
    connections: RwLock<HashMap<PlayerId, Connection>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    pub async fn create_connection(&self, id: PlayerId) -> mpsc::UnboundedReceiver<ServerMessage> {
        let (conn, receiver) = Connection::new(id);

        {
            let mut connections = self.connections.write().await;
            connections.insert(id, conn);
        }

        receiver
    }

    /// Returns how long the connection was open, if it existed.
    pub async fn remove_connection(&self, id: PlayerId) -> Option<std::time::Duration> {
        let mut connections = self.connections.write().await;
        connections
            .remove(&id)
            .map(|conn| conn.connected_at.elapsed())
    }

    pub async fn send_to_connection(
        &self,
        id: PlayerId,
        message: ServerMessage,
    ) -> Result<(), String> {
        let connections = self.connections.read().await;
        if let Some(connection) = connections.get(&id) {
            connection.send_message(message)
        } else {
            Err("Connection not found".to_string())
        }
    }

    pub async fn connection_count(&self) -> usize {
        let connections = self.connections.read().await;
        connections.len()
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}
