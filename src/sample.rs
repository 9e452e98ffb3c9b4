//! Winner drawing.
//!
//! The random source is always passed in. Use [`rng_from_seed`] to get one
//! that is reproducible for a given seed.

use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::comments::CommentEntry;

/// Result of one draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Winners in draw order
    pub winners: Vec<CommentEntry>,
    /// Number of winners asked for
    pub requested: usize,
}

impl Sample {
    /// True when fewer winners were drawn than requested.
    pub fn was_clamped(&self) -> bool {
        self.winners.len() < self.requested
    }
}

/// Builds the random source for a draw. A seed gives identical draws for
/// identical input; no seed pulls fresh OS entropy.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Draws `min(requested, population.len())` distinct entries uniformly
/// without replacement.
///
/// `requested == 0` returns no winners. A request larger than the population
/// is clamped with a warning.
pub fn draw_winners<R: Rng + ?Sized>(
    population: &[CommentEntry],
    requested: usize,
    rng: &mut R,
) -> Sample {
    if requested == 0 {
        return Sample {
            winners: Vec::new(),
            requested,
        };
    }

    let amount = requested.min(population.len());
    if requested > population.len() {
        warn!(
            "sample size {} is larger than the number of comments; selecting {} instead.",
            requested, amount
        );
    }

    let winners = rand::seq::index::sample(rng, population.len(), amount)
        .into_iter()
        .map(|idx| population[idx].clone())
        .collect();

    Sample { winners, requested }
}
