use std::collections::VecDeque;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::info;

use duel_types::PlayerId;

#[derive(Debug, Clone)]
pub struct QueuedPlayer {
    pub player_id: PlayerId,
    pub queued_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Paired with the longest-waiting player, who has left the queue.
    Paired { opponent: PlayerId },
    /// Now (or still) waiting for an opponent.
    Waiting,
}

/// FIFO of players waiting for an opponent. Every mutation holds the
/// queue-wide write lock, so pairing and cancelling never interleave.
pub struct MatchmakingQueue {
    queue: RwLock<VecDeque<QueuedPlayer>>,
}

impl MatchmakingQueue {
    pub fn new() -> Self {
        Self {
            queue: RwLock::new(VecDeque::new()),
        }
    }

    /// Appends the player unless already queued. Returns whether it was added.
    pub async fn enqueue(&self, player_id: PlayerId) -> bool {
        let mut queue = self.queue.write().await;
        Self::push_unique(&mut queue, player_id)
    }

    /// Removes the player if queued. Returns whether anything was removed.
    pub async fn cancel(&self, player_id: PlayerId) -> bool {
        let mut queue = self.queue.write().await;

        if let Some(index) = queue.iter().position(|p| p.player_id == player_id) {
            queue.remove(index);
            info!("Player {} removed from queue", player_id);
            true
        } else {
            false
        }
    }

    /// Pairs the player with the oldest waiting player, or queues them.
    ///
    /// A player already in the queue stays where they are and keeps waiting.
    pub async fn try_match(&self, player_id: PlayerId) -> MatchOutcome {
        self.try_match_with(player_id, |_| ()).await
    }

    /// Like [`try_match`](Self::try_match), but runs `on_pair` with the
    /// opponent before the queue lock is released. A concurrent `cancel`
    /// for either player waits until `on_pair` has returned.
    pub async fn try_match_with<F>(&self, player_id: PlayerId, on_pair: F) -> MatchOutcome
    where
        F: FnOnce(PlayerId),
    {
        let mut queue = self.queue.write().await;

        if queue.iter().any(|p| p.player_id == player_id) {
            return MatchOutcome::Waiting;
        }

        match queue.pop_front() {
            Some(opponent) => {
                info!(
                    "Paired {} with {} after {:?} in queue",
                    player_id,
                    opponent.player_id,
                    opponent.queued_at.elapsed()
                );
                on_pair(opponent.player_id);
                MatchOutcome::Paired {
                    opponent: opponent.player_id,
                }
            }
            None => {
                Self::push_unique(&mut queue, player_id);
                MatchOutcome::Waiting
            }
        }
    }

    fn push_unique(queue: &mut VecDeque<QueuedPlayer>, player_id: PlayerId) -> bool {
        if queue.iter().any(|p| p.player_id == player_id) {
            return false;
        }

        queue.push_back(QueuedPlayer {
            player_id,
            queued_at: Instant::now(),
        });
        info!(
            "Player {} added to queue at position {}",
            player_id,
            queue.len()
        );
        true
    }

    /// 1-based position in the queue.
    pub async fn position(&self, player_id: PlayerId) -> Option<usize> {
        let queue = self.queue.read().await;
        queue
            .iter()
            .position(|p| p.player_id == player_id)
            .map(|index| index + 1)
    }

    pub async fn contains(&self, player_id: PlayerId) -> bool {
        self.position(player_id).await.is_some()
    }

    pub async fn len(&self) -> usize {
        let queue = self.queue.read().await;
        queue.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MatchmakingQueue {
    fn default() -> Self {
        Self::new()
    }
}
