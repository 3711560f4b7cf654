use std::sync::Arc;

use duel_core::Vocabulary;

use crate::matchmaking::MatchmakingQueue;
use crate::room_registry::GameRoomRegistry;
use crate::scheduler::CosmeticDelays;

/// Everything the handlers mutate. Empty at startup and lives for the whole
/// process; a second server process would not see any of it.
pub struct ServerState {
    pub queue: MatchmakingQueue,
    pub rooms: GameRoomRegistry,
    pub delays: CosmeticDelays,
}

impl ServerState {
    pub fn new(vocabulary: Vocabulary, delays: CosmeticDelays) -> Self {
        Self {
            queue: MatchmakingQueue::new(),
            rooms: GameRoomRegistry::new(Arc::new(vocabulary)),
            delays,
        }
    }
}
