pub mod game;
pub mod messages;

// Re-export all types
pub use game::*;
pub use messages::*;

use uuid::Uuid;

/// Transport-assigned identity of a connected player, stable for the connection's lifetime.
pub type PlayerId = Uuid;
pub type RoomId = String;

/// Guesses a player may submit in one round.
pub const MAX_GUESSES: usize = 6;
