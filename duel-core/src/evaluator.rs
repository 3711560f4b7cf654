use duel_types::LetterMark;

/// Maps a positional final-form glyph to the letter it denotes.
///
/// Hebrew writes five letters differently at the end of a word. Both shapes
/// are the same letter for matching purposes.
pub fn canonical_letter(ch: char) -> char {
    match ch {
        'ך' => 'כ',
        'ם' => 'מ',
        'ן' => 'נ',
        'ף' => 'פ',
        'ץ' => 'צ',
        other => other,
    }
}

pub fn canonicalize(word: &str) -> String {
    word.chars().map(canonical_letter).collect()
}

/// Length of a word in letters, as players count them.
pub fn letter_count(word: &str) -> usize {
    word.chars().count()
}

pub struct GuessEvaluator;

impl GuessEvaluator {
    /// Evaluate a guess against the target word.
    ///
    /// The result is index-aligned with `word`. Callers check that both words
    /// have the same letter count first.
    pub fn evaluate(word: &str, target: &str) -> Vec<LetterMark> {
        let word_chars: Vec<char> = word.chars().map(canonical_letter).collect();
        let target_chars: Vec<char> = target.chars().map(canonical_letter).collect();

        let mut marks: Vec<Option<LetterMark>> = vec![None; word_chars.len()];
        let mut consumed = vec![false; target_chars.len()];

        // First pass: exact positions
        for (i, ch) in word_chars.iter().enumerate() {
            if target_chars.get(i) == Some(ch) {
                marks[i] = Some(LetterMark::Correct);
                consumed[i] = true;
            }
        }

        // Second pass: each remaining letter claims the leftmost unclaimed match
        for (i, ch) in word_chars.iter().enumerate() {
            if marks[i].is_some() {
                continue;
            }

            let claim = target_chars
                .iter()
                .enumerate()
                .position(|(j, target_ch)| !consumed[j] && target_ch == ch);

            marks[i] = Some(match claim {
                Some(j) => {
                    consumed[j] = true;
                    LetterMark::Present
                }
                None => LetterMark::Absent,
            });
        }

        marks
            .into_iter()
            .map(|mark| mark.unwrap_or(LetterMark::Absent))
            .collect()
    }

    pub fn is_solved(marks: &[LetterMark]) -> bool {
        !marks.is_empty() && marks.iter().all(|m| *m == LetterMark::Correct)
    }
}
