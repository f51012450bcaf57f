//! Shuffle engine: uniformly random permutations of row sets.
//!
//! Every function here returns a fresh `Vec`; the caller's slice is never
//! reordered.

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Returns a uniformly random permutation of `items` using OS entropy.
///
/// # Example
///
/// ```
/// use vitrina::shuffle::shuffle;
///
/// let rows = vec![1, 2, 3, 4];
/// let mixed = shuffle(&rows);
/// assert_eq!(mixed.len(), 4);
/// assert_eq!(rows, vec![1, 2, 3, 4]);
/// ```
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut StdRng::from_entropy())
}

/// Returns a permutation of `items` that is reproducible for a given seed.
pub fn shuffle_seeded<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    shuffle_with(items, &mut StdRng::seed_from_u64(seed))
}

/// Returns a permutation of `items` drawn from `rng`.
///
/// Fisher–Yates: for `i` from `len - 1` down to `1`, pick `j` uniformly in
/// `[0, i]` and swap positions `i` and `j` of the copy.
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.gen_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// Shuffle configuration carried by the view state.
///
/// With a seed, each call to [`Shuffler::apply`] advances one seeded stream,
/// so a run is reproducible while successive reloads still get different
/// orders.
#[derive(Debug, Clone)]
pub struct Shuffler {
    rng: StdRng,
}

impl Shuffler {
    /// Creates a shuffler seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a shuffler with a fixed seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns a shuffled copy of `items`.
    pub fn apply<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        shuffle_with(items, &mut self.rng)
    }
}

impl Default for Shuffler {
    fn default() -> Self {
        Self::new()
    }
}
