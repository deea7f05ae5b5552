use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

/// Source of uniform choices for recommendations and offers.
pub trait ChoiceSource: Send + Sync {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick_index(&self, len: usize) -> usize;
}

#[derive(Debug)]
pub struct SeededChoice {
    rng: Mutex<StdRng>,
}

impl SeededChoice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_rng(&mut rand::rng())),
        }
    }

    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl ChoiceSource for SeededChoice {
    fn pick_index(&self, len: usize) -> usize {
        let mut rng = self.rng.lock();
        (0..len).choose(&mut *rng).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let a = SeededChoice::from_seed(7);
        let b = SeededChoice::from_seed(7);
        let left = (0..32).map(|_| a.pick_index(5)).collect::<Vec<_>>();
        let right = (0..32).map(|_| b.pick_index(5)).collect::<Vec<_>>();
        assert_eq!(left, right);
    }

    #[test]
    fn stays_in_range() {
        let source = SeededChoice::from_entropy();
        for _ in 0..200 {
            assert!(source.pick_index(3) < 3);
        }
        assert_eq!(source.pick_index(1), 0);
    }
}
