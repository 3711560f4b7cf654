use std::collections::HashMap;

use crate::PlayerId;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum LetterMark {
    Correct, // right letter, right position
    Present, // right letter, wrong position
    Absent,  // letter not in word (or all occurrences already claimed)
}

/// One submitted guess and its per-letter feedback, index-aligned with `word`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessRecord {
    pub word: String,
    pub result: Vec<LetterMark>,
}

impl GuessRecord {
    pub fn is_solved(&self) -> bool {
        !self.result.is_empty() && self.result.iter().all(|m| *m == LetterMark::Correct)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub guesses: Vec<GuessRecord>,
    pub current_guess: String,
    pub won: bool,
    pub finished: bool,
    pub score: u32,
}

/// Full room state as broadcast to clients. Never an incremental diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GameStateSnapshot {
    pub players: HashMap<PlayerId, PlayerSnapshot>,
    pub game_started: bool,
    pub is_game_over: bool,
}

impl GameStateSnapshot {
    pub fn player(&self, player_id: &PlayerId) -> Option<&PlayerSnapshot> {
        self.players.get(player_id)
    }
}
