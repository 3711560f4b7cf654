use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use duel_core::{GameRoom, Rejection, Vocabulary};
use duel_types::{PlayerId, RoomId};

/// One lock per room; rooms never share a lock.
pub type SharedRoom = Arc<Mutex<GameRoom>>;

#[derive(Debug, Clone)]
struct RoomEntry {
    members: [PlayerId; 2],
    room: SharedRoom,
}

/// Process-wide map of live rooms plus the player → room index.
pub struct GameRoomRegistry {
    rooms: DashMap<RoomId, RoomEntry>,
    player_rooms: DashMap<PlayerId, RoomId>,
    vocabulary: Arc<Vocabulary>,
}

impl GameRoomRegistry {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self {
            rooms: DashMap::new(),
            player_rooms: DashMap::new(),
            vocabulary,
        }
    }

    /// Builds a room for two players with a random initial target.
    /// The round is not started; see [`GameRoom::start_new_round`].
    pub fn create(
        &self,
        room_id: RoomId,
        player_a: PlayerId,
        player_b: PlayerId,
    ) -> Result<SharedRoom, Rejection> {
        let target_word = self.random_word();
        let room = Arc::new(Mutex::new(GameRoom::new(
            room_id.clone(),
            player_a,
            player_b,
            target_word,
        )?));

        self.rooms.insert(
            room_id.clone(),
            RoomEntry {
                members: [player_a, player_b],
                room: room.clone(),
            },
        );
        self.player_rooms.insert(player_a, room_id.clone());
        self.player_rooms.insert(player_b, room_id.clone());

        info!(
            "Created room {} for {} and {} ({} rooms live)",
            room_id,
            player_a,
            player_b,
            self.rooms.len()
        );
        Ok(room)
    }

    pub fn get(&self, room_id: &str) -> Option<SharedRoom> {
        self.rooms.get(room_id).map(|entry| entry.room.clone())
    }

    pub fn members(&self, room_id: &str) -> Option<[PlayerId; 2]> {
        self.rooms.get(room_id).map(|entry| entry.members)
    }

    pub fn room_of(&self, player_id: &PlayerId) -> Option<RoomId> {
        self.player_rooms.get(player_id).map(|room_id| room_id.clone())
    }

    pub fn room_for_player(&self, player_id: &PlayerId) -> Option<(RoomId, SharedRoom)> {
        let room_id = self.room_of(player_id)?;
        let room = self.get(&room_id)?;
        Some((room_id, room))
    }

    /// Removes the room and releases both players. Returns whether it existed.
    pub fn delete(&self, room_id: &str) -> bool {
        let Some((_, entry)) = self.rooms.remove(room_id) else {
            return false;
        };

        for member in entry.members {
            self.player_rooms
                .remove_if(&member, |_, mapped| mapped.as_str() == room_id);
        }

        info!("Deleted room {} ({} rooms live)", room_id, self.rooms.len());
        true
    }

    pub fn random_word(&self) -> String {
        self.vocabulary.random_word().to_string()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
