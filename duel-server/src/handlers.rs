//! Inbound event handlers.
//!
//! Each handler takes the sender's id, the decoded message and the shared
//! [`ServerState`], applies the state change, and returns the messages to
//! deliver. Nothing here touches a socket; the gateway performs the
//! returned [`Outbound`]s.

use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use duel_core::Rejection;
use duel_types::{
    ClientMessage, GameOver, GameStart, MatchFound, PlayerId, RoomId, ServerMessage,
};

use crate::matchmaking::MatchOutcome;
use crate::server_state::ServerState;

#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    ToPlayer {
        player_id: PlayerId,
        message: ServerMessage,
    },
    ToRoom {
        room_id: RoomId,
        members: Vec<PlayerId>,
        message: ServerMessage,
    },
    Deferred {
        delay: Duration,
        action: DeferredAction,
    },
}

/// Work that runs after a cosmetic delay. The room is looked up again when
/// it fires and the action is dropped if the room has gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredAction {
    StartRound { room_id: RoomId },
    AnnounceRoundOver { room_id: RoomId },
}

pub async fn handle_message(
    player_id: PlayerId,
    message: ClientMessage,
    state: &ServerState,
) -> Vec<Outbound> {
    match message {
        ClientMessage::FindMatch => handle_find_match(player_id, state).await,
        ClientMessage::CancelMatch => handle_cancel_match(player_id, state).await,
        ClientMessage::UpdateGuess(payload) => {
            handle_update_guess(player_id, &payload.guess, state).await
        }
        ClientMessage::SubmitGuess(payload) => {
            handle_submit_guess(player_id, &payload.guess, state).await
        }
        ClientMessage::NewRound => handle_new_round(player_id, state).await,
    }
}

async fn handle_find_match(player_id: PlayerId, state: &ServerState) -> Vec<Outbound> {
    if let Some(room_id) = state.rooms.room_of(&player_id) {
        debug!(
            "Ignoring findMatch from {}: already in room {}",
            player_id, room_id
        );
        return Vec::new();
    }

    // The room is created before the queue lock is released, so a
    // disconnect from either player always finds it.
    let room_id = Uuid::new_v4().to_string();
    let mut created = None;
    let outcome = state
        .queue
        .try_match_with(player_id, |opponent| {
            created = Some(state.rooms.create(room_id.clone(), opponent, player_id));
        })
        .await;

    match outcome {
        MatchOutcome::Waiting => vec![Outbound::ToPlayer {
            player_id,
            message: ServerMessage::WaitingForOpponent,
        }],
        MatchOutcome::Paired { opponent } => {
            if let Some(Err(rejection)) = created {
                log_rejection(player_id, Some(&room_id), rejection);
                return Vec::new();
            }

            vec![
                Outbound::ToPlayer {
                    player_id: opponent,
                    message: ServerMessage::MatchFound(MatchFound {
                        room_id: room_id.clone(),
                        opponent_id: player_id,
                        your_id: opponent,
                    }),
                },
                Outbound::ToPlayer {
                    player_id,
                    message: ServerMessage::MatchFound(MatchFound {
                        room_id: room_id.clone(),
                        opponent_id: opponent,
                        your_id: player_id,
                    }),
                },
                Outbound::Deferred {
                    delay: state.delays.match_start,
                    action: DeferredAction::StartRound { room_id },
                },
            ]
        }
    }
}

async fn handle_cancel_match(player_id: PlayerId, state: &ServerState) -> Vec<Outbound> {
    if !state.queue.cancel(player_id).await {
        debug!("Ignoring cancelMatch from {}: not queued", player_id);
    }
    Vec::new()
}

async fn handle_update_guess(
    player_id: PlayerId,
    text: &str,
    state: &ServerState,
) -> Vec<Outbound> {
    let Some((room_id, room)) = state.rooms.room_for_player(&player_id) else {
        log_rejection(player_id, None, Rejection::InvalidRoom);
        return Vec::new();
    };

    let mut room = room.lock().await;
    if let Err(rejection) = room.update_guess(&player_id, text) {
        log_rejection(player_id, Some(&room_id), rejection);
        return Vec::new();
    }

    vec![Outbound::ToRoom {
        members: room.player_ids(),
        room_id,
        message: ServerMessage::GameUpdate(room.snapshot()),
    }]
}

async fn handle_submit_guess(
    player_id: PlayerId,
    word: &str,
    state: &ServerState,
) -> Vec<Outbound> {
    let Some((room_id, room)) = state.rooms.room_for_player(&player_id) else {
        log_rejection(player_id, None, Rejection::InvalidRoom);
        return Vec::new();
    };

    let mut room = room.lock().await;
    let record = match room.submit_guess(&player_id, word) {
        Ok(record) => record,
        Err(rejection) => {
            log_rejection(player_id, Some(&room_id), rejection);
            return Vec::new();
        }
    };
    debug!(
        "Player {} guessed {:?} in room {}: {:?}",
        player_id, record.word, room_id, record.result
    );

    let mut outbounds = vec![Outbound::ToRoom {
        room_id: room_id.clone(),
        members: room.player_ids(),
        message: ServerMessage::GameUpdate(room.snapshot()),
    }];

    if room.is_round_over() {
        info!("Round over in room {}", room_id);
        outbounds.push(Outbound::Deferred {
            delay: state.delays.round_over,
            action: DeferredAction::AnnounceRoundOver { room_id },
        });
    }

    outbounds
}

async fn handle_new_round(player_id: PlayerId, state: &ServerState) -> Vec<Outbound> {
    let Some((room_id, room)) = state.rooms.room_for_player(&player_id) else {
        log_rejection(player_id, None, Rejection::InvalidRoom);
        return Vec::new();
    };

    if !room.lock().await.request_start() {
        debug!(
            "Ignoring newRound from {}: start already pending in room {}",
            player_id, room_id
        );
        return Vec::new();
    }

    vec![Outbound::Deferred {
        delay: state.delays.match_start,
        action: DeferredAction::StartRound { room_id },
    }]
}

/// The connection is gone. Leaves the queue, and tears down the room with a
/// notice to whoever is left. No win is recorded for the remaining player.
pub async fn handle_disconnect(player_id: PlayerId, state: &ServerState) -> Vec<Outbound> {
    state.queue.cancel(player_id).await;

    let Some(room_id) = state.rooms.room_of(&player_id) else {
        return Vec::new();
    };

    let remaining: Vec<PlayerId> = state
        .rooms
        .members(&room_id)
        .map(|members| {
            members
                .into_iter()
                .filter(|member| *member != player_id)
                .collect()
        })
        .unwrap_or_default();

    state.rooms.delete(&room_id);
    info!(
        "Player {} disconnected, room {} torn down",
        player_id, room_id
    );

    vec![Outbound::ToRoom {
        room_id,
        members: remaining,
        message: ServerMessage::OpponentDisconnected,
    }]
}

pub async fn run_deferred(action: DeferredAction, state: &ServerState) -> Vec<Outbound> {
    match action {
        DeferredAction::StartRound { room_id } => start_round(room_id, state).await,
        DeferredAction::AnnounceRoundOver { room_id } => announce_round_over(room_id, state).await,
    }
}

async fn start_round(room_id: RoomId, state: &ServerState) -> Vec<Outbound> {
    let Some(room) = state.rooms.get(&room_id) else {
        debug!("Room {} gone before its round could start", room_id);
        return Vec::new();
    };

    let target_word = state.rooms.random_word();
    let mut room = room.lock().await;
    room.start_new_round(target_word);
    info!(
        "Round started in room {} ({} letters)",
        room_id,
        room.target_word_length()
    );

    vec![Outbound::ToRoom {
        members: room.player_ids(),
        message: ServerMessage::GameStart(GameStart {
            target_word_length: u32::try_from(room.target_word_length()).unwrap_or(u32::MAX),
            game_state: room.snapshot(),
        }),
        room_id,
    }]
}

async fn announce_round_over(room_id: RoomId, state: &ServerState) -> Vec<Outbound> {
    let Some(room) = state.rooms.get(&room_id) else {
        debug!("Room {} gone before its round result went out", room_id);
        return Vec::new();
    };

    let room = room.lock().await;
    // A newRound may have landed during the delay.
    if !room.is_round_over() {
        return Vec::new();
    }

    let winner_id = room.winner();
    info!(
        "Room {} result: {}",
        room_id,
        winner_id.map_or_else(|| "draw".to_string(), |id| format!("won by {}", id))
    );

    vec![Outbound::ToRoom {
        members: room.player_ids(),
        message: ServerMessage::GameOver(GameOver {
            winner_id,
            target_word: room.target_word().to_string(),
            game_state: room.snapshot(),
        }),
        room_id,
    }]
}

fn log_rejection(player_id: PlayerId, room_id: Option<&str>, rejection: Rejection) {
    debug!(
        "Ignoring action from {} in room {}: {}",
        player_id,
        room_id.unwrap_or("-"),
        rejection
    );
}
