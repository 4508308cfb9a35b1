use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;

use drill_core::Item;

//
// ─── USAGE BINS ────────────────────────────────────────────────────────────────
//

/// Per-pool usage counters driving fair selection.
///
/// Counts default to zero for items never seen, so a bin can be shared
/// across calls without pre-seeding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageBins {
    counts: HashMap<Item, u32>,
}

impl UsageBins {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How often the item has been picked so far.
    #[must_use]
    pub fn count(&self, item: &Item) -> u32 {
        self.counts.get(item).copied().unwrap_or(0)
    }

    fn bump(&mut self, item: &Item) {
        *self.counts.entry(item.clone()).or_insert(0) += 1;
    }
}

//
// ─── FAIRNESS SAMPLER ──────────────────────────────────────────────────────────
//

/// Picks up to `k` distinct items from `pool`, preferring the least-used
/// according to `bins`, with a uniform random tie-break among equally-used
/// items. Bins of the returned items are incremented by one.
///
/// `k == 0` returns an empty list and leaves the bins untouched. A pool
/// smaller than `k` yields the whole pool.
pub fn pick_k_with_fairness<R: Rng + ?Sized>(
    pool: &[Item],
    k: usize,
    bins: &mut UsageBins,
    rng: &mut R,
) -> Vec<Item> {
    if k == 0 || pool.is_empty() {
        return Vec::new();
    }

    let mut ordered: Vec<&Item> = pool.iter().collect();
    // Shuffle first, then stable-sort by usage: ties keep their shuffled
    // order, which realizes the random tie-break.
    ordered.shuffle(rng);
    ordered.sort_by_key(|item| bins.count(item));

    let picked: Vec<Item> = ordered.into_iter().take(k).cloned().collect();
    for item in &picked {
        bins.bump(item);
    }
    picked
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
