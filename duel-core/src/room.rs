use std::collections::HashMap;

use duel_types::{
    GameStateSnapshot, GuessRecord, MAX_GUESSES, PlayerId, PlayerSnapshot, RoomId,
};
use tracing::debug;

use crate::{GuessEvaluator, Rejection, letter_count};

#[derive(Debug, Clone)]
pub struct PlayerState {
    pub id: PlayerId,
    pub guesses: Vec<GuessRecord>,
    pub current_guess: String,
    pub won: bool,
    pub finished: bool,
    pub score: u32,
}

impl PlayerState {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            guesses: Vec::new(),
            current_guess: String::new(),
            won: false,
            finished: false,
            score: 0,
        }
    }

    /// Everything but the score starts over each round.
    fn reset_for_round(&mut self) {
        self.guesses.clear();
        self.current_guess.clear();
        self.won = false;
        self.finished = false;
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            id: self.id,
            guesses: self.guesses.clone(),
            current_guess: self.current_guess.clone(),
            won: self.won,
            finished: self.finished,
            score: self.score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Paired but no round started yet.
    Created,
    RoundActive,
    /// Both players finished. `start_new_round` moves back to `RoundActive`.
    RoundOver,
}

/// A session between exactly two players, spanning any number of rounds.
#[derive(Debug)]
pub struct GameRoom {
    room_id: RoomId,
    players: HashMap<PlayerId, PlayerState>,
    target_word: String,
    game_started: bool,
    first_solver: Option<PlayerId>,
    /// A round start is scheduled and has not fired yet.
    start_pending: bool,
}

impl GameRoom {
    pub fn new(
        room_id: RoomId,
        player_a: PlayerId,
        player_b: PlayerId,
        target_word: String,
    ) -> Result<Self, Rejection> {
        if player_a == player_b {
            return Err(Rejection::SamePlayer);
        }

        let players = [player_a, player_b]
            .into_iter()
            .map(|id| (id, PlayerState::new(id)))
            .collect();

        Ok(Self {
            room_id,
            players,
            target_word,
            game_started: false,
            first_solver: None,
            start_pending: true,
        })
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    pub fn target_word_length(&self) -> usize {
        letter_count(&self.target_word)
    }

    pub fn game_started(&self) -> bool {
        self.game_started
    }

    pub fn player(&self, player_id: &PlayerId) -> Option<&PlayerState> {
        self.players.get(player_id)
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.keys().copied().collect()
    }

    pub fn opponent_of(&self, player_id: &PlayerId) -> Option<PlayerId> {
        if !self.players.contains_key(player_id) {
            return None;
        }
        self.players.keys().find(|id| *id != player_id).copied()
    }

    pub fn phase(&self) -> RoundPhase {
        if !self.game_started {
            RoundPhase::Created
        } else if self.is_round_over() {
            RoundPhase::RoundOver
        } else {
            RoundPhase::RoundActive
        }
    }

    pub fn start_pending(&self) -> bool {
        self.start_pending
    }

    /// Marks a round start as scheduled. Returns `false` if one already is,
    /// so repeated requests collapse into a single start.
    pub fn request_start(&mut self) -> bool {
        !std::mem::replace(&mut self.start_pending, true)
    }

    /// Begin a round with a fresh target. Valid from any phase; scores carry over.
    pub fn start_new_round(&mut self, target_word: String) {
        self.target_word = target_word;
        for player in self.players.values_mut() {
            player.reset_for_round();
        }
        self.first_solver = None;
        self.game_started = true;
        self.start_pending = false;
    }

    /// Live-typing indicator. Accepts any text, in any phase.
    pub fn update_guess(&mut self, player_id: &PlayerId, text: &str) -> Result<(), Rejection> {
        let player = self
            .players
            .get_mut(player_id)
            .ok_or(Rejection::InvalidRoom)?;
        player.current_guess = text.to_string();
        Ok(())
    }

    pub fn submit_guess(
        &mut self,
        player_id: &PlayerId,
        word: &str,
    ) -> Result<GuessRecord, Rejection> {
        if !self.players.contains_key(player_id) {
            return Err(Rejection::InvalidRoom);
        }
        if self.phase() != RoundPhase::RoundActive {
            return Err(Rejection::RoundNotActive);
        }

        let target_length = self.target_word_length();
        let player = self
            .players
            .get_mut(player_id)
            .ok_or(Rejection::InvalidRoom)?;

        if player.finished {
            return Err(Rejection::PlayerFinished);
        }
        if letter_count(word) != target_length {
            return Err(Rejection::WrongLength);
        }

        let record = GuessRecord {
            word: word.to_string(),
            result: GuessEvaluator::evaluate(word, &self.target_word),
        };
        player.guesses.push(record.clone());
        player.current_guess.clear();

        if record.is_solved() {
            player.won = true;
            player.finished = true;
            player.score += 1;
            self.first_solver.get_or_insert(*player_id);
            debug!("Player {} solved room {}", player_id, self.room_id);
        } else if player.guesses.len() >= MAX_GUESSES {
            player.finished = true;
            debug!("Player {} ran out of guesses in room {}", player_id, self.room_id);
        }

        Ok(record)
    }

    pub fn is_round_over(&self) -> bool {
        self.players.values().all(|p| p.finished)
    }

    /// The round's winner once the round is over. `None` on a draw.
    ///
    /// If both players solve the word, the one who solved it first wins.
    pub fn winner(&self) -> Option<PlayerId> {
        if !self.is_round_over() {
            return None;
        }
        self.first_solver
    }

    pub fn snapshot(&self) -> GameStateSnapshot {
        GameStateSnapshot {
            players: self
                .players
                .iter()
                .map(|(id, player)| (*id, player.snapshot()))
                .collect(),
            game_started: self.game_started,
            is_game_over: self.is_round_over(),
        }
    }
}
