//! Court draw: partition the roster into courts of four and a waiting group.

use crate::models::{
    Court, DrawMode, HistoryLog, Pair, Player, Round, SessionError, COURT_SIZE,
};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Shuffles tried by the anti-repeat pairing search before accepting repeats.
pub const MAX_PAIRING_ATTEMPTS: usize = 500;

/// A freshly drawn round and the pairs to hand to `HistoryLog::record_round`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DrawOutcome {
    pub round: Round,
    pub pairs: Vec<Pair>,
    /// Shuffles used to find the grouping (1 in normal mode).
    pub attempts: usize,
    /// True when the pairing search gave up and accepted repeated pairs.
    pub repeats_accepted: bool,
}

/// Courts that can actually be filled: `min(court_count, floor(players / 4))`.
pub fn courts_in_play(players: usize, court_count: u32) -> usize {
    (court_count as usize).min(players / COURT_SIZE)
}

/// Draw a new round.
///
/// Normal mode shuffles the whole roster, fills courts in shuffled order and sends the
/// rest to waiting. Smart mode first picks who waits from the last two rounds' waiting
/// lists, then searches for a grouping without pairs seen in `history`.
/// Players left over after the last full court always wait; nobody is dropped.
pub fn draw_round<R: Rng + ?Sized>(
    roster: &[Player],
    court_count: u32,
    mode: DrawMode,
    history: &HistoryLog,
    rng: &mut R,
) -> Result<DrawOutcome, SessionError> {
    if roster.len() < COURT_SIZE {
        return Err(SessionError::InsufficientPlayers { have: roster.len() });
    }
    let courts = courts_in_play(roster.len(), court_count);

    let outcome = match mode {
        DrawMode::Normal => draw_normal(roster, courts, rng),
        DrawMode::Smart => draw_smart(roster, courts, history, rng),
    };
    log::debug!(
        "Drew {:?} round: {} court(s), {} waiting, {} attempt(s)",
        mode,
        outcome.round.courts.len(),
        outcome.round.waiting.len(),
        outcome.attempts
    );
    Ok(outcome)
}

fn draw_normal<R: Rng + ?Sized>(roster: &[Player], courts: usize, rng: &mut R) -> DrawOutcome {
    let mut shuffled = roster.to_vec();
    shuffled.shuffle(rng);
    let waiting = shuffled.split_off(courts * COURT_SIZE);
    let courts = chunk_into_courts(&shuffled);
    let round = Round { courts, waiting };
    DrawOutcome {
        pairs: round.pairs(),
        round,
        attempts: 1,
        repeats_accepted: false,
    }
}

fn draw_smart<R: Rng + ?Sized>(
    roster: &[Player],
    courts: usize,
    history: &HistoryLog,
    rng: &mut R,
) -> DrawOutcome {
    let num_waiting = roster.len() - courts * COURT_SIZE;
    let waiting = select_waiting(roster, history, num_waiting, rng);
    let waiting_set: HashSet<&Player> = waiting.iter().collect();
    let playing: Vec<Player> = roster
        .iter()
        .filter(|p| !waiting_set.contains(p))
        .cloned()
        .collect();

    let (courts, attempts, repeats_accepted) = pair_avoiding_history(playing, history, rng);
    let round = Round { courts, waiting };
    DrawOutcome {
        pairs: round.pairs(),
        round,
        attempts,
        repeats_accepted,
    }
}

/// Pick `num_waiting` players to sit out.
///
/// Candidates are ordered: players who waited in neither of the last two rounds, then
/// players who waited two rounds ago, then players who waited last round. Each group is
/// shuffled independently and the first `num_waiting` candidates wait.
pub fn select_waiting<R: Rng + ?Sized>(
    roster: &[Player],
    history: &HistoryLog,
    num_waiting: usize,
    rng: &mut R,
) -> Vec<Player> {
    if num_waiting == 0 {
        return Vec::new();
    }
    let last: HashSet<&Player> = history.last_waiting().iter().collect();
    let second_last: HashSet<&Player> = history.second_last_waiting().iter().collect();

    let mut rested = Vec::new();
    let mut waited_two_ago = Vec::new();
    let mut waited_last = Vec::new();
    for p in roster {
        if last.contains(p) {
            waited_last.push(p.clone());
        } else if second_last.contains(p) {
            waited_two_ago.push(p.clone());
        } else {
            rested.push(p.clone());
        }
    }
    rested.shuffle(rng);
    waited_two_ago.shuffle(rng);
    waited_last.shuffle(rng);

    if rested.len() + waited_two_ago.len() < num_waiting {
        log::info!(
            "Only {} player(s) can wait without a repeat; {} must wait again",
            rested.len() + waited_two_ago.len(),
            num_waiting - rested.len() - waited_two_ago.len()
        );
    }

    rested
        .into_iter()
        .chain(waited_two_ago)
        .chain(waited_last)
        .take(num_waiting)
        .collect()
}

/// Bounded random search for a grouping whose pairs do not appear in `history`.
///
/// First collision-free shuffle wins. After [`MAX_PAIRING_ATTEMPTS`] failures one more
/// unconstrained shuffle is accepted. Returns (courts, shuffles used, repeats accepted).
fn pair_avoiding_history<R: Rng + ?Sized>(
    mut playing: Vec<Player>,
    history: &HistoryLog,
    rng: &mut R,
) -> (Vec<Court>, usize, bool) {
    let seen: HashSet<&Pair> = history.all_pairs().collect();

    for attempt in 1..=MAX_PAIRING_ATTEMPTS {
        playing.shuffle(rng);
        let courts = chunk_into_courts(&playing);
        let collides = courts
            .iter()
            .flat_map(|c| c.pairs())
            .any(|pair| seen.contains(&pair));
        if !collides {
            return (courts, attempt, false);
        }
    }

    log::warn!(
        "Pairing search exhausted after {} attempts; accepting repeated pairs",
        MAX_PAIRING_ATTEMPTS
    );
    playing.shuffle(rng);
    (chunk_into_courts(&playing), MAX_PAIRING_ATTEMPTS + 1, true)
}

fn chunk_into_courts(players: &[Player]) -> Vec<Court> {
    players
        .chunks_exact(COURT_SIZE)
        .filter_map(Court::from_chunk)
        .collect()
}
