//! Target scoring and selection.
//!
//! # Score Formula
//!
//! ```text
//! proximity = max(0, 10 - distance)
//! weakness  = 10 - hp * 10 / max_hp
//! score     = proximity + weakness + archetype bias + jitter(-2..=2)
//! ```
//!
//! Candidates beyond the sight radius (Manhattan) are never scored. The
//! jitter makes near-ties resolve differently from run to run; only the
//! archetype ordering is a firm preference.

use game_core::{ActorRef, GameRng, Position};

use super::profile::Archetype;

/// A potential target as seen by the deciding agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub target: ActorRef,
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
}

impl Candidate {
    /// 0 at full health up to 10 when nearly dead.
    pub fn weakness(&self) -> i32 {
        if self.max_hp <= 0 {
            return 0;
        }
        10 - self.hp.clamp(0, self.max_hp) * 10 / self.max_hp
    }
}

const JITTER: i32 = 2;

/// Deterministic part of the score (everything but jitter).
pub fn score_candidate(archetype: Archetype, from: Position, candidate: &Candidate) -> i32 {
    let distance = from.manhattan(candidate.position);
    let proximity = (10 - distance as i32).max(0);
    let weakness = candidate.weakness();
    proximity + weakness + archetype.bias(candidate, distance, weakness)
}

/// Highest-scoring candidate within `sight_radius`, or `None`.
///
/// Draws one jitter value per visible candidate. On an exact tie the earlier
/// candidate wins.
pub fn select_target(
    archetype: Archetype,
    from: Position,
    candidates: &[Candidate],
    sight_radius: u32,
    rng: &mut GameRng,
) -> Option<Candidate> {
    let mut best: Option<(Candidate, i32)> = None;

    for candidate in candidates {
        if from.manhattan(candidate.position) > sight_radius {
            continue;
        }
        let score = score_candidate(archetype, from, candidate) + rng.range(-JITTER, JITTER);

        tracing::debug!(
            ?archetype,
            target = ?candidate.target,
            score,
            "scored target candidate"
        );

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((*candidate, score));
        }
    }

    best.map(|(candidate, _)| candidate)
}
