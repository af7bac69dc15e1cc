/*!

Unbiased selection of winners for a raffle.

The core operation is [`choose_unique`]: given a pool of `n` participants, it picks `k`
distinct positions uniformly at random, without replacement, and returns them in
ascending order. Every one of the `C(n, k)` subsets is equally likely.

```
use winner_draw::{choose_unique, DrawError};

let winners = choose_unique(10, 3)?;
assert_eq!(winners.len(), 3);
assert!(winners.indices().windows(2).all(|w| w[0] < w[1]));

# Ok::<(), DrawError>(())
```

See the [manual] for the format of participant lists accepted by the `raffle` program.
*/
mod config;
pub mod manual;

use log::debug;
use rand::rngs::OsRng;
use rand::Rng;
use std::collections::HashMap;

pub use crate::config::*;

/// Draws `winner_count` unique positions out of `pool_size`, using the random source
/// of the operating system.
///
/// Requests with an empty pool, no winners or more winners than participants are
/// refused with a [`DrawError`].
pub fn choose_unique(pool_size: usize, winner_count: usize) -> Result<WinnerSet, DrawError> {
    choose_unique_with_rng(&mut OsRng, pool_size, winner_count)
}

/// Same as [`choose_unique`], with a caller-provided random source.
pub fn choose_unique_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    pool_size: usize,
    winner_count: usize,
) -> Result<WinnerSet, DrawError> {
    let request = SelectionRequest::new(pool_size, winner_count)?;
    Ok(draw(rng, &request))
}

// Upper bound on what is reserved before the first draw. Larger draws grow as they go.
const MAX_PREALLOCATION: usize = 1 << 16;

/// Runs the draw for a request that has already been validated.
///
/// Time and memory grow with the number of winners, not with the size of the pool: drawing
/// a few winners out of billions of participants is cheap, while drawing billions of winners
/// is bounded by the available memory.
pub fn draw<R: Rng + ?Sized>(rng: &mut R, request: &SelectionRequest) -> WinnerSet {
    let pool_size = request.pool_size();
    let winner_count = request.winner_count();
    debug!(
        "draw: pool_size: {:?} winner_count: {:?}",
        pool_size, winner_count
    );

    // The working sequence [0, pool_size) is only materialized for the slots that
    // have been touched. Slots [0, round) hold the values already drawn.
    let mut slots = WorkingSequence::new(winner_count);
    let mut indices: Vec<usize> = Vec::with_capacity(winner_count.min(MAX_PREALLOCATION));
    for round in 0..winner_count {
        let picked = rng.gen_range(round..pool_size);
        let value = slots.get(picked);
        let displaced = slots.get(round);
        slots.set(picked, displaced);
        indices.push(value);
    }
    debug!("draw: drawn in order: {:?}", indices);

    indices.sort_unstable();
    WinnerSet { indices }
}

// Sparse view of the sequence [0, n): a slot holds its own index unless it was overwritten.
struct WorkingSequence {
    moved: HashMap<usize, usize>,
}

impl WorkingSequence {
    fn new(capacity: usize) -> WorkingSequence {
        WorkingSequence {
            moved: HashMap::with_capacity(capacity.min(MAX_PREALLOCATION)),
        }
    }

    fn get(&self, slot: usize) -> usize {
        self.moved.get(&slot).cloned().unwrap_or(slot)
    }

    fn set(&mut self, slot: usize, value: usize) {
        self.moved.insert(slot, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{BTreeMap, HashSet};

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn is_valid(ws: &WinnerSet, n: usize, k: usize) -> bool {
        ws.len() == k
            && ws.indices().iter().all(|i| *i < n)
            && ws.indices().windows(2).all(|w| w[0] < w[1])
    }

    #[test]
    fn draws_are_distinct_sorted_and_in_range() {
        init();
        let mut rng = StdRng::seed_from_u64(7);
        for n in 1..30 {
            for k in 1..=n {
                let ws = choose_unique_with_rng(&mut rng, n, k).unwrap();
                assert!(is_valid(&ws, n, k), "n={} k={} got {:?}", n, k, ws);
            }
        }
    }

    #[test]
    fn full_pool_selects_everyone() {
        init();
        let ws = choose_unique(12, 12).unwrap();
        assert_eq!(ws.into_vec(), (0..12).collect::<Vec<usize>>());
    }

    #[test]
    fn single_participant() {
        let ws = choose_unique(1, 1).unwrap();
        assert_eq!(ws.indices(), &[0]);
    }

    #[test]
    fn large_pool_small_draw() {
        let mut rng = StdRng::seed_from_u64(11);
        let n = 1_000_000_000;
        let ws = choose_unique_with_rng(&mut rng, n, 5).unwrap();
        assert!(is_valid(&ws, n, 5));
    }

    #[test]
    fn out_of_contract_requests_are_refused() {
        assert_eq!(choose_unique(0, 1), Err(DrawError::EmptyPool));
        assert_eq!(choose_unique(0, 0), Err(DrawError::EmptyPool));
        assert_eq!(choose_unique(5, 0), Err(DrawError::NoWinnersRequested));
        assert_eq!(
            choose_unique(3, 4),
            Err(DrawError::WinnerCountExceedsPool {
                pool_size: 3,
                winner_count: 4
            })
        );
    }

    #[test]
    fn subsets_are_uniform() {
        init();
        let mut rng = StdRng::seed_from_u64(2022);
        let (n, k) = (5, 2);
        // C(5, 2) = 10 subsets
        let trials = 100_000;
        let mut counts: BTreeMap<Vec<usize>, u32> = BTreeMap::new();
        for _ in 0..trials {
            let ws = choose_unique_with_rng(&mut rng, n, k).unwrap();
            *counts.entry(ws.into_vec()).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), 10);
        // Expected 10000 per subset, standard deviation close to 95.
        for (subset, count) in counts.iter() {
            assert!(
                (9_400..=10_600).contains(count),
                "subset {:?} drawn {} times",
                subset,
                count
            );
        }
    }

    #[test]
    fn every_position_can_win() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen: HashSet<usize> = HashSet::new();
        for _ in 0..500 {
            let ws = choose_unique_with_rng(&mut rng, 20, 1).unwrap();
            seen.extend(ws.iter().cloned());
        }
        assert_eq!(seen.len(), 20);
    }

    #[test]
    fn huge_requests_do_not_reserve_everything_upfront() {
        let slots = WorkingSequence::new(usize::MAX);
        assert!(slots.moved.capacity() < 2 * MAX_PREALLOCATION);
        assert_eq!(slots.get(usize::MAX - 1), usize::MAX - 1);

        let mut rng = StdRng::seed_from_u64(5);
        let n = 100_000_000_000_000;
        let ws = choose_unique_with_rng(&mut rng, n, 3).unwrap();
        assert!(is_valid(&ws, n, 3));
    }

    #[test]
    fn selection_request_checks_bounds() {
        let r = SelectionRequest::new(4, 4).unwrap();
        assert_eq!(r.pool_size(), 4);
        assert_eq!(r.winner_count(), 4);
        assert!(SelectionRequest::new(4, 5).is_err());
    }
}
