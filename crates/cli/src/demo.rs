use codecracker_hints::{HintRequest, HintResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt::Write as _;

/// The classic 25-word demo board.
pub(crate) const CLASSIC_WORDS: [&str; 25] = [
    "apple", "book", "chair", "dog", "elephant", "fire", "guitar", "hospital", "ice", "jungle",
    "key", "lamp", "moon", "newspaper", "ocean", "piano", "queen", "robot", "sun", "telephone",
    "umbrella", "volcano", "window", "xylophone", "zebra",
];

const TEAM: usize = 8;
const OPPONENT: usize = 7;
const NEUTRAL: usize = 9;

/// Shuffle the classic words and deal 8 team, 7 opponent, 9 neutral words
/// and one assassin.
pub(crate) fn deal(seed: Option<u64>) -> HintRequest {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut words = CLASSIC_WORDS.to_vec();
    words.shuffle(&mut rng);

    let (team, rest) = words.split_at(TEAM);
    let (opponent, rest) = rest.split_at(OPPONENT);
    let (neutral, assassin) = rest.split_at(NEUTRAL);

    let request = HintRequest::new(team.iter().copied())
        .opponents(opponent.iter().copied())
        .neutrals(neutral.iter().copied());
    match assassin.first() {
        Some(word) => request.assassin(*word),
        None => request,
    }
}

pub(crate) fn render(request: &HintRequest, hints: &HintResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Team:     {}", request.team_words.join(", "));
    let _ = writeln!(out, "Opponent: {}", request.opponent_words.join(", "));
    let _ = writeln!(out, "Neutral:  {}", request.neutral_words.join(", "));
    let _ = writeln!(
        out,
        "Assassin: {}",
        request.assassin_word.as_deref().unwrap_or("-")
    );

    for (size, list) in hints.iter().rev() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Hints for {size} words:");
        if list.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for hint in list {
            let _ = writeln!(
                out,
                "  {:<14} {:>6.3}  {}",
                hint.hint,
                hint.score,
                hint.words.join(", ")
            );
        }
    }
    out
}
