#![allow(dead_code)]

use duel_core::{GameRoom, Vocabulary};
use duel_types::PlayerId;
use uuid::Uuid;

/// Creates a test Vocabulary with a known set of words
pub fn create_test_vocabulary() -> Vocabulary {
    let word_list = "apple\ntests\nvalid\nhello\nworld\nhouse\nmouse\ntrain\nplane\nwater\nstone\nbread\ncream";
    Vocabulary::from_word_list(word_list).unwrap()
}

/// Two fresh player ids
pub fn create_test_players() -> (PlayerId, PlayerId) {
    (Uuid::new_v4(), Uuid::new_v4())
}

/// Creates a room with a specific target word, not yet started
pub fn create_room_with_word(word: &str) -> (GameRoom, PlayerId, PlayerId) {
    let (alice, bob) = create_test_players();
    let room = GameRoom::new(Uuid::new_v4().to_string(), alice, bob, word.to_string()).unwrap();
    (room, alice, bob)
}

/// Creates a room whose first round is already running on `word`
pub fn create_started_room(word: &str) -> (GameRoom, PlayerId, PlayerId) {
    let (mut room, alice, bob) = create_room_with_word(word);
    room.start_new_round(word.to_string());
    (room, alice, bob)
}

/// Submits every word in order, ignoring rejections
pub fn submit_guesses(room: &mut GameRoom, player_id: &PlayerId, words: &[&str]) {
    for word in words {
        room.submit_guess(player_id, word).ok();
    }
}

/// Six wrong guesses against a five-letter target other than any of these
pub const SIX_MISSES: [&str; 6] = ["abcde", "fghij", "klmno", "pqrst", "uvwxy", "zzzzz"];

pub fn assert_player_flags(room: &GameRoom, player_id: &PlayerId, won: bool, finished: bool) {
    let player = room.player(player_id).expect("player should be in room");
    assert_eq!(player.won, won, "Expected won={}, got {}", won, player.won);
    assert_eq!(
        player.finished, finished,
        "Expected finished={}, got {}",
        finished, player.finished
    );
}
