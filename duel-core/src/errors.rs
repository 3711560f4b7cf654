use thiserror::Error;

/// Why a room operation was refused.
///
/// Rejections never reach the wire: the client sees no response at all.
/// They exist so the server can log and tests can assert on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no room for this player or room id")]
    InvalidRoom,
    #[error("round is not active")]
    RoundNotActive,
    #[error("guess length does not match the target word")]
    WrongLength,
    #[error("player has already finished this round")]
    PlayerFinished,
    #[error("a room needs two distinct players")]
    SamePlayer,
}
