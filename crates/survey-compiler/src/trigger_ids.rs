//! Synthetic trigger identifiers for delay chains.
//!
//! Identifiers are drawn from `[0, TRIGGER_ID_SPACE)` and rendered as
//! decimal event names. Collisions across separate surveys are not
//! prevented, only made unlikely by the size of the space.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const TRIGGER_ID_SPACE: u32 = 100_000;

/// Source of fresh event names used to chain delayed rebroadcasts.
pub trait TriggerIdSource {
    fn next_trigger_id(&mut self) -> String;
}

/// ChaCha8-backed identifier source. Same seed -> same identifiers.
#[derive(Debug, Clone)]
pub struct RandomTriggerIds {
    rng: ChaCha8Rng,
}

impl RandomTriggerIds {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }
}

impl TriggerIdSource for RandomTriggerIds {
    fn next_trigger_id(&mut self) -> String {
        self.rng.gen_range(0..TRIGGER_ID_SPACE).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_ids_are_deterministic() {
        let mut ids1 = RandomTriggerIds::seeded(42);
        let mut ids2 = RandomTriggerIds::seeded(42);

        let vals1: Vec<String> = (0..10).map(|_| ids1.next_trigger_id()).collect();
        let vals2: Vec<String> = (0..10).map(|_| ids2.next_trigger_id()).collect();

        assert_eq!(vals1, vals2);
    }

    #[test]
    fn test_different_seeds_different_ids() {
        let mut ids1 = RandomTriggerIds::seeded(42);
        let mut ids2 = RandomTriggerIds::seeded(43);

        let vals1: Vec<String> = (0..10).map(|_| ids1.next_trigger_id()).collect();
        let vals2: Vec<String> = (0..10).map(|_| ids2.next_trigger_id()).collect();

        assert_ne!(vals1, vals2);
    }

    #[test]
    fn test_ids_stay_inside_namespace() {
        let mut ids = RandomTriggerIds::seeded(7);
        for _ in 0..1000 {
            let id: u32 = ids.next_trigger_id().parse().unwrap();
            assert!(id < TRIGGER_ID_SPACE);
        }
    }
}
